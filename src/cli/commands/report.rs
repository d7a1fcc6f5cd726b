//! `inspectflow report` command - dimensional rows, header and signatures

use chrono::Utc;
use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::{settings::Style, Table, Tabled};

use crate::cli::args::{OutputFormat, RoleArg};
use crate::cli::helpers::{discover_store, format_ts, load_or_new_report, truncate_str};
use crate::core::calibration;
use crate::core::measurement::Reading;
use crate::core::tolerance::DimensionKey;
use crate::core::workflow::Role;
use crate::entities::report::{DimensionRow, InspectionReport, RowResult};
use crate::store::ReportStore;

#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Set one measurement cell (raw text is kept verbatim)
    Set(SetArgs),

    /// Set a row's accept/reject disposition and remarks
    Result(ResultArgs),

    /// Set header fields
    Header(HeaderArgs),

    /// Set visual check results
    Visual(VisualArgs),

    /// Set the report's free-text notes
    Notes(NotesArgs),

    /// Append a blank row
    AddRow(RowArgs),

    /// Remove the last row (a report keeps at least one)
    RemoveRow(RowArgs),

    /// Sign the report in the acting role (re-signing overwrites your own
    /// prior signature)
    Sign(SignArgs),

    /// Show the report
    Show(ShowArgs),

    /// Review flags: out-of-tolerance cells, invalid text, gauge status
    Check(CheckArgs),
}

#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Order id
    pub order_id: String,

    /// 1-based row number
    #[arg(long)]
    pub row: usize,

    /// Dimension key (l1, lead, taper-avg, thread-height, od, id, standoff, ...)
    #[arg(long)]
    pub key: String,

    /// Raw measurement text
    #[arg(long, allow_hyphen_values = true)]
    pub value: String,
}

#[derive(clap::Args, Debug)]
pub struct ResultArgs {
    /// Order id
    pub order_id: String,

    /// 1-based row number
    #[arg(long)]
    pub row: usize,

    /// Disposition: accept, reject or unset
    #[arg(long)]
    pub result: Option<String>,

    /// Row remarks
    #[arg(long)]
    pub remarks: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct HeaderArgs {
    /// Order id
    pub order_id: String,

    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub customer: Option<String>,
    #[arg(long)]
    pub drawing: Option<String>,
    #[arg(long)]
    pub part: Option<String>,
    #[arg(long)]
    pub heat: Option<String>,
    #[arg(long)]
    pub work_order: Option<String>,
    #[arg(long)]
    pub gauge_doc: Option<String>,
    /// Description; PIN/BOX in the text selects the report variant
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct VisualArgs {
    /// Order id
    pub order_id: String,

    /// Thread visual result (Pass / Fail / notes)
    #[arg(long)]
    pub threads: Option<String>,

    /// Shoulder visual result
    #[arg(long)]
    pub shoulder: Option<String>,

    /// Surface visual result
    #[arg(long)]
    pub surface: Option<String>,

    /// Visual check notes
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct NotesArgs {
    /// Order id
    pub order_id: String,

    /// Notes text
    #[arg(long)]
    pub text: String,
}

#[derive(clap::Args, Debug)]
pub struct RowArgs {
    /// Order id
    pub order_id: String,
}

#[derive(clap::Args, Debug)]
pub struct SignArgs {
    /// Order id
    pub order_id: String,

    /// Acting role
    #[arg(long, value_enum)]
    pub role: RoleArg,

    /// Printed name to record alongside the signature
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Order id
    pub order_id: String,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Order id
    pub order_id: String,
}

pub fn run(cmd: ReportCommands) -> Result<()> {
    match cmd {
        ReportCommands::Set(args) => run_set(args),
        ReportCommands::Result(args) => run_result(args),
        ReportCommands::Header(args) => run_header(args),
        ReportCommands::Visual(args) => run_visual(args),
        ReportCommands::Notes(args) => run_notes(args),
        ReportCommands::AddRow(args) => run_add_row(args),
        ReportCommands::RemoveRow(args) => run_remove_row(args),
        ReportCommands::Sign(args) => run_sign(args),
        ReportCommands::Show(args) => run_show(args),
        ReportCommands::Check(args) => run_check(args),
    }
}

fn row_mut(report: &mut InspectionReport, row: usize) -> Result<&mut DimensionRow> {
    let count = report.dimensions.len();
    if row == 0 || row > count {
        miette::bail!("row {} is out of range (report has {} row(s))", row, count);
    }
    Ok(&mut report.dimensions[row - 1])
}

fn run_set(args: SetArgs) -> Result<()> {
    let store = discover_store()?;
    let key: DimensionKey = args.key.parse().map_err(|e: String| miette::miette!("{}", e))?;

    let mut report = load_or_new_report(&store, &args.order_id)?;
    let row = row_mut(&mut report, args.row)?;
    row.set(key, args.value.clone());
    let eval = row.evaluate(key);
    store.save(&report).into_diagnostic()?;

    print!("row {} {} = {:?}", args.row, key, args.value);
    match eval.reading {
        Reading::Invalid => println!(
            "  {} not numeric - kept for correction",
            style("[invalid]").yellow().bold()
        ),
        _ if eval.out_of_tolerance => {
            let note = key.tolerance_note().unwrap_or("");
            println!(
                "  {} {}",
                style("[OUT OF TOLERANCE]").red().bold(),
                style(note).dim()
            );
        }
        _ => println!("  {}", style("[ok]").green()),
    }
    Ok(())
}

fn run_result(args: ResultArgs) -> Result<()> {
    let store = discover_store()?;
    let mut report = load_or_new_report(&store, &args.order_id)?;
    let row = row_mut(&mut report, args.row)?;

    if let Some(result) = &args.result {
        row.result = result.parse::<RowResult>().map_err(|e| miette::miette!("{}", e))?;
    }
    if let Some(remarks) = args.remarks {
        row.remarks = remarks;
    }
    let disposition = row.result;
    store.save(&report).into_diagnostic()?;

    println!(
        "{} row {} on order {}: {}",
        style("Updated").green().bold(),
        args.row,
        args.order_id,
        if disposition.is_unset() {
            "unset".to_string()
        } else {
            disposition.to_string()
        }
    );
    Ok(())
}

fn run_header(args: HeaderArgs) -> Result<()> {
    let store = discover_store()?;
    let mut report = load_or_new_report(&store, &args.order_id)?;

    let header = &mut report.header;
    if let Some(v) = args.company {
        header.company = v;
    }
    if let Some(v) = args.customer {
        header.customer = v;
    }
    if let Some(v) = args.drawing {
        header.drawing = v;
    }
    if let Some(v) = args.part {
        header.part = v;
    }
    if let Some(v) = args.heat {
        header.heat = v;
    }
    if let Some(v) = args.work_order {
        header.work_order = v;
    }
    if let Some(v) = args.gauge_doc {
        header.gauge_doc = v;
    }
    if let Some(v) = args.description {
        header.description = v;
    }
    report.infer_variant();
    store.save(&report).into_diagnostic()?;

    println!(
        "{} header on order {} ({})",
        style("Updated").green().bold(),
        args.order_id,
        report.variant
    );
    Ok(())
}

fn run_visual(args: VisualArgs) -> Result<()> {
    let store = discover_store()?;
    let mut report = load_or_new_report(&store, &args.order_id)?;

    let visual = &mut report.visual;
    if let Some(v) = args.threads {
        visual.threads = v;
    }
    if let Some(v) = args.shoulder {
        visual.shoulder = v;
    }
    if let Some(v) = args.surface {
        visual.surface = v;
    }
    if let Some(v) = args.notes {
        visual.notes = v;
    }
    store.save(&report).into_diagnostic()?;

    println!(
        "{} visual checks on order {}",
        style("Updated").green().bold(),
        args.order_id
    );
    Ok(())
}

fn run_notes(args: NotesArgs) -> Result<()> {
    let store = discover_store()?;
    let mut report = load_or_new_report(&store, &args.order_id)?;
    report.notes = args.text;
    store.save(&report).into_diagnostic()?;

    println!(
        "{} notes on order {}",
        style("Updated").green().bold(),
        args.order_id
    );
    Ok(())
}

fn run_add_row(args: RowArgs) -> Result<()> {
    let store = discover_store()?;
    let mut report = load_or_new_report(&store, &args.order_id)?;
    report.add_row();
    store.save(&report).into_diagnostic()?;
    println!("Report now has {} row(s)", report.dimensions.len());
    Ok(())
}

fn run_remove_row(args: RowArgs) -> Result<()> {
    let store = discover_store()?;
    let mut report = load_or_new_report(&store, &args.order_id)?;
    if !report.remove_last_row() {
        miette::bail!("a report keeps at least one row");
    }
    store.save(&report).into_diagnostic()?;
    println!("Report now has {} row(s)", report.dimensions.len());
    Ok(())
}

fn run_sign(args: SignArgs) -> Result<()> {
    let store = discover_store()?;
    let now = Utc::now();
    let role: Role = args.role.into();

    let mut report = load_or_new_report(&store, &args.order_id)?;
    let resign = report.signatures.signed_at(role).is_some();
    report.signatures.sign(role, now);
    if let Some(name) = args.name {
        match role {
            Role::Operator => report.signatures.operator_name = name,
            Role::Inspector => report.signatures.inspector_name = name,
        }
    }
    let state = report.signatures.state();
    store.save(&report).into_diagnostic()?;

    println!(
        "{} order {} as {} at {} ({})",
        if resign {
            style("Re-signed").green().bold()
        } else {
            style("Signed").green().bold()
        },
        style(&args.order_id).bold(),
        role,
        format_ts(now),
        state
    );
    Ok(())
}

#[derive(Tabled)]
struct ReportRow {
    #[tabled(rename = "SERIAL")]
    serial: String,
    #[tabled(rename = "L1")]
    l1: String,
    #[tabled(rename = "LEAD")]
    lead: String,
    #[tabled(rename = "TPR AVG")]
    taper_avg: String,
    #[tabled(rename = "THD HT")]
    thread_height: String,
    #[tabled(rename = "OD")]
    od: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "STANDOFF")]
    standoff: String,
    #[tabled(rename = "REMARKS")]
    remarks: String,
    #[tabled(rename = "RESULT")]
    result: String,
}

/// Cell text with a marker: `*` out of tolerance, `?` invalid
fn cell(row: &DimensionRow, key: DimensionKey) -> String {
    let eval = row.evaluate(key);
    let raw = row.get(key);
    if eval.out_of_tolerance {
        format!("{}*", raw)
    } else if eval.reading.is_invalid() {
        format!("{}?", raw)
    } else {
        raw.to_string()
    }
}

impl From<&DimensionRow> for ReportRow {
    fn from(row: &DimensionRow) -> Self {
        Self {
            serial: row.serial.clone(),
            l1: cell(row, DimensionKey::L1),
            lead: cell(row, DimensionKey::Lead),
            taper_avg: cell(row, DimensionKey::TaperAvg),
            thread_height: cell(row, DimensionKey::ThreadHeight),
            od: cell(row, DimensionKey::Od),
            id: cell(row, DimensionKey::Id),
            standoff: cell(row, DimensionKey::Standoff),
            remarks: truncate_str(&row.remarks, 24),
            result: row.result.to_string(),
        }
    }
}

fn run_show(args: ShowArgs) -> Result<()> {
    let store = discover_store()?;
    let report = load_or_new_report(&store, &args.order_id)?;

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report).into_diagnostic()?);
        }
        OutputFormat::Table => {
            println!(
                "{} order {} - 8-RD {} (API 5B)",
                style("Report").bold(),
                style(&report.order_id).bold(),
                report.variant
            );
            if !report.header.part.is_empty() || !report.header.description.is_empty() {
                println!(
                    "Part {} {}",
                    report.header.part,
                    style(&report.header.description).dim()
                );
            }

            let rows: Vec<ReportRow> = report.dimensions.iter().map(Into::into).collect();
            let mut table = Table::new(rows);
            table.with(Style::sharp());
            println!("{}", table);
            println!("{} out of tolerance, {} invalid", style("*").red(), style("?").yellow());

            println!("Signatures: {}", report.signatures.state());
            if let Some(at) = report.signatures.operator_signed_at {
                println!("  operator:  {} {}", format_ts(at), report.signatures.operator_name);
            }
            if let Some(at) = report.signatures.inspector_signed_at {
                println!("  inspector: {} {}", format_ts(at), report.signatures.inspector_name);
            }
        }
    }
    Ok(())
}

fn run_check(args: CheckArgs) -> Result<()> {
    let store = discover_store()?;
    let report = load_or_new_report(&store, &args.order_id)?;

    let mut out_of_tol = 0;
    let mut invalid = 0;
    for (idx, row) in report.dimensions.iter().enumerate() {
        let oot = row.out_of_tolerance_keys();
        let bad = row.invalid_keys();
        out_of_tol += oot.len();
        invalid += bad.len();
        for key in oot {
            let note = key.tolerance_note().unwrap_or("");
            println!(
                "row {:>2} {:<14} {:<10} {} {}",
                idx + 1,
                key.label(),
                row.get(key),
                style("OUT OF TOLERANCE").red().bold(),
                style(note).dim()
            );
        }
        for key in bad {
            println!(
                "row {:>2} {:<14} {:<10} {}",
                idx + 1,
                key.label(),
                row.get(key),
                style("invalid - needs correction").yellow()
            );
        }
    }

    let mut review = 0;
    for record in &report.gauge_uses {
        if calibration::needs_review(record.status_at_use) {
            review += 1;
            println!(
                "gauge {} was {} at use - review calibration",
                record.gauge_id,
                style(record.status_at_use.to_string()).yellow()
            );
        }
    }

    println!(
        "\n{} out-of-tolerance cell(s), {} invalid cell(s), {} gauge review flag(s)",
        out_of_tol, invalid, review
    );
    println!("Signatures: {}", report.signatures.state());
    Ok(())
}
