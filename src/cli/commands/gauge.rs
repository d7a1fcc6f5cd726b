//! `inspectflow gauge` command - gauge catalog and per-packet usage

use chrono::{Duration, Utc};
use clap::Subcommand;
use console::style;
use dialoguer::{theme::ColorfulTheme, Input};
use miette::{IntoDiagnostic, Result};
use tabled::{settings::Style, Table, Tabled};

use crate::cli::args::{GaugeFilter, OutputFormat, RoleArg};
use crate::cli::helpers::{
    discover_store, format_ts, gauge_status_chip, load_existing_report, load_or_new_report,
    parse_date,
};
use crate::core::calibration::{self, GaugeView};
use crate::core::identity;
use crate::entities::gauge::Gauge;
use crate::store::{GaugeStore, ReportStore};

#[derive(Subcommand, Debug)]
pub enum GaugeCommands {
    /// Add a gauge to the catalog
    Add(AddArgs),

    /// List the gauge catalog with computed status
    List(ListArgs),

    /// Flag a gauge as broken (or clear the flag)
    Broken(BrokenArgs),

    /// Record use of a gauge on an order's packet
    Use(UseArgs),

    /// Remove a gauge from an order's packet
    Unuse(UnuseArgs),

    /// Inspector verification of a gauge already in use
    Verify(VerifyArgs),
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Display name (prompted when omitted)
    #[arg(long)]
    pub name: Option<String>,

    /// Gauge kind (plug, ring, standoff tool, ...)
    #[arg(long = "type")]
    pub gauge_type: Option<String>,

    /// Storage location
    #[arg(long)]
    pub location: Option<String>,

    /// Manual gauge id; a unique one is generated when omitted
    #[arg(long)]
    pub id: Option<String>,

    /// Calibration cycle length in days
    #[arg(long, default_value_t = 90)]
    pub interval_days: u32,

    /// Last calibration date (YYYY-MM-DD, defaults to now)
    #[arg(long)]
    pub calibrated: Option<String>,

    /// Calibration expiry date (YYYY-MM-DD)
    #[arg(long, conflicts_with = "expires_in_days")]
    pub expires: Option<String>,

    /// Calibration expiry relative to now, in days (negative = already expired)
    #[arg(long, allow_hyphen_values = true)]
    pub expires_in_days: Option<i64>,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by status class
    #[arg(long, short = 's', value_enum, default_value = "all")]
    pub status: GaugeFilter,

    /// Case-insensitive search over name, type and location
    #[arg(long)]
    pub search: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

#[derive(clap::Args, Debug)]
pub struct BrokenArgs {
    /// Gauge id
    pub id: String,

    /// Clear the broken flag instead of setting it
    #[arg(long)]
    pub clear: bool,
}

#[derive(clap::Args, Debug)]
pub struct UseArgs {
    /// Order id
    pub order_id: String,

    /// Gauge id
    pub gauge_id: String,

    /// Acting role
    #[arg(long, value_enum)]
    pub role: RoleArg,
}

#[derive(clap::Args, Debug)]
pub struct UnuseArgs {
    /// Order id
    pub order_id: String,

    /// Gauge id
    pub gauge_id: String,
}

#[derive(clap::Args, Debug)]
pub struct VerifyArgs {
    /// Order id
    pub order_id: String,

    /// Gauge id
    pub gauge_id: String,

    /// Acting role (must be inspector)
    #[arg(long, value_enum)]
    pub role: RoleArg,
}

pub fn run(cmd: GaugeCommands) -> Result<()> {
    match cmd {
        GaugeCommands::Add(args) => run_add(args),
        GaugeCommands::List(args) => run_list(args),
        GaugeCommands::Broken(args) => run_broken(args),
        GaugeCommands::Use(args) => run_use(args),
        GaugeCommands::Unuse(args) => run_unuse(args),
        GaugeCommands::Verify(args) => run_verify(args),
    }
}

fn run_add(args: AddArgs) -> Result<()> {
    let store = discover_store()?;
    let now = Utc::now();

    let name = match args.name {
        Some(n) => n,
        None => Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt("Gauge name")
            .interact_text()
            .into_diagnostic()?,
    };

    let last_calibrated = match &args.calibrated {
        Some(date) => parse_date(date)?,
        None => now,
    };
    let expires_at = match (&args.expires, args.expires_in_days) {
        (Some(date), _) => parse_date(date)?,
        (None, Some(days)) => now + Duration::days(days),
        (None, None) => last_calibrated + Duration::days(i64::from(args.interval_days)),
    };

    let gauge = Gauge {
        id: args.id.unwrap_or_else(identity::generate_gauge_id),
        name,
        gauge_type: args.gauge_type.unwrap_or_default(),
        location: args.location.unwrap_or_default(),
        last_calibrated,
        calibration_interval_days: args.interval_days,
        expires_at,
        broken: false,
        created_at: now,
    };

    let gauge = store.add(gauge).into_diagnostic()?;
    let view = calibration::with_status(gauge, now);
    println!(
        "{} gauge {} ({}) - {}, {} day(s) left",
        style("Added").green().bold(),
        style(&view.gauge.id).bold(),
        view.gauge.name,
        view.status,
        view.days_left
    );
    Ok(())
}

#[derive(Tabled)]
struct GaugeRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "TYPE")]
    gauge_type: String,
    #[tabled(rename = "STATUS")]
    status: String,
    #[tabled(rename = "CAL DUE (DAYS)")]
    days_left: i64,
    #[tabled(rename = "LOCATION")]
    location: String,
}

impl From<&GaugeView> for GaugeRow {
    fn from(view: &GaugeView) -> Self {
        Self {
            id: view.gauge.id.clone(),
            name: view.gauge.name.clone(),
            gauge_type: view.gauge.gauge_type.clone(),
            status: view.status.to_string(),
            days_left: view.days_left,
            location: if view.gauge.location.is_empty() {
                "-".to_string()
            } else {
                view.gauge.location.clone()
            },
        }
    }
}

fn run_list(args: ListArgs) -> Result<()> {
    let store = discover_store()?;
    let now = Utc::now();

    let mut views: Vec<GaugeView> = store
        .list_all()
        .into_diagnostic()?
        .into_iter()
        .map(|g| calibration::with_status(g, now))
        .collect();

    views.retain(|v| args.status.matches(v.status));
    if let Some(term) = &args.search {
        let term = term.trim().to_lowercase();
        views.retain(|v| {
            [&v.gauge.name, &v.gauge.gauge_type, &v.gauge.location]
                .iter()
                .any(|field| field.to_lowercase().contains(&term))
        });
    }

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&views).into_diagnostic()?);
        }
        OutputFormat::Table => {
            if views.is_empty() {
                println!("No gauges match your filters");
                return Ok(());
            }
            let rows: Vec<GaugeRow> = views.iter().map(Into::into).collect();
            let mut table = Table::new(rows);
            table.with(Style::sharp());
            println!("{}", table);
            println!("{} gauge(s) found", views.len());
        }
    }
    Ok(())
}

fn run_broken(args: BrokenArgs) -> Result<()> {
    let store = discover_store()?;
    let mut gauge = store.get(&args.id).into_diagnostic()?;
    gauge.broken = !args.clear;
    store.update(&gauge).into_diagnostic()?;

    if args.clear {
        println!(
            "{} broken flag on gauge {}",
            style("Cleared").green().bold(),
            style(&gauge.id).bold()
        );
    } else {
        println!(
            "{} gauge {} as broken",
            style("Flagged").red().bold(),
            style(&gauge.id).bold()
        );
    }
    Ok(())
}

fn run_use(args: UseArgs) -> Result<()> {
    let store = discover_store()?;
    let now = Utc::now();
    let gauge = store.get(&args.gauge_id).into_diagnostic()?;

    let mut report = load_or_new_report(&store, &args.order_id)?;
    report
        .record_gauge_use(&gauge, args.role.into(), now)
        .into_diagnostic()?;
    store.save(&report).into_diagnostic()?;

    let status = calibration::status_of(&gauge, now);
    println!(
        "{} gauge {} on order {} [{}]",
        style("Recorded").green().bold(),
        style(&gauge.id).bold(),
        args.order_id,
        gauge_status_chip(status)
    );
    if calibration::needs_review(status) {
        println!(
            "  {} calibration due within {} day(s) - flagged for review",
            style("note:").yellow().bold(),
            calibration::days_left(gauge.expires_at, now)
        );
    }
    Ok(())
}

fn run_unuse(args: UnuseArgs) -> Result<()> {
    let store = discover_store()?;
    let mut report = load_existing_report(&store, &args.order_id)?;

    if !report.remove_gauge_use(&args.gauge_id) {
        miette::bail!(
            "gauge {} is not recorded on order {}",
            args.gauge_id,
            args.order_id
        );
    }
    store.save(&report).into_diagnostic()?;
    println!(
        "{} gauge {} from order {}",
        style("Removed").green().bold(),
        style(&args.gauge_id).bold(),
        args.order_id
    );
    Ok(())
}

fn run_verify(args: VerifyArgs) -> Result<()> {
    let store = discover_store()?;
    let now = Utc::now();
    let mut report = load_existing_report(&store, &args.order_id)?;

    report
        .verify_gauge_use(&args.gauge_id, args.role.into(), now)
        .into_diagnostic()?;
    store.save(&report).into_diagnostic()?;

    println!(
        "{} gauge {} on order {} at {}",
        style("Verified").green().bold(),
        style(&args.gauge_id).bold(),
        args.order_id,
        format_ts(now)
    );
    Ok(())
}
