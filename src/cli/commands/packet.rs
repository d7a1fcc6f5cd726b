//! `inspectflow packet` command - packet assembly

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::args::OutputFormat;
use crate::cli::helpers::discover_store;
use crate::core::packet;
use crate::entities::packet::Packet;
use crate::store::{OrderStore, ReportStore, StoreError};

#[derive(Subcommand, Debug)]
pub enum PacketCommands {
    /// Open (or re-open) the packet for an order
    Open(OpenArgs),

    /// Show the packet without touching saved state
    Show(ShowArgs),
}

#[derive(clap::Args, Debug)]
pub struct OpenArgs {
    /// Order id
    pub order_id: String,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Order id
    pub order_id: String,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

pub fn run(cmd: PacketCommands) -> Result<()> {
    match cmd {
        PacketCommands::Open(args) => run_open(args),
        PacketCommands::Show(args) => run_show(args),
    }
}

fn assemble(order_id: &str, save: bool) -> Result<Packet> {
    let store = discover_store()?;

    let order = match store.get(order_id) {
        Ok(order) => Some(order),
        Err(StoreError::OrderNotFound(_)) => {
            eprintln!(
                "{} order {} not in the store; opening with blank header",
                style("warning:").yellow().bold(),
                order_id
            );
            None
        }
        Err(e) => return Err(e).into_diagnostic(),
    };

    let saved = store.load(order_id).into_diagnostic()?;
    let packet = packet::open_packet(order_id, order.as_ref(), saved);

    if save {
        store.save(&packet.report).into_diagnostic()?;
    }
    Ok(packet)
}

fn print_packet(packet: &Packet, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(packet).into_diagnostic()?);
        }
        OutputFormat::Table => {
            println!(
                "{} order {} ({})",
                style("Packet").bold(),
                style(&packet.order_id).bold(),
                packet.report.variant
            );
            println!("\n{}", style("Checklist").bold());
            for item in &packet.checklist {
                println!("  [ ] {}", item);
            }
            println!("\n{}", style("SOPs").bold());
            for sop in &packet.sop_links {
                println!("  - {}", sop);
            }
            println!(
                "\n{} row(s), {} gauge(s) attached, signatures: {}",
                packet.report.dimensions.len(),
                packet.report.gauge_uses.len(),
                packet.report.signatures.state()
            );
        }
    }
    Ok(())
}

fn run_open(args: OpenArgs) -> Result<()> {
    let packet = assemble(&args.order_id, true)?;
    print_packet(&packet, args.format)
}

fn run_show(args: ShowArgs) -> Result<()> {
    let packet = assemble(&args.order_id, false)?;
    print_packet(&packet, args.format)
}
