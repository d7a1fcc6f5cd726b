//! `inspectflow order` command - inspection order management

use chrono::Utc;
use clap::Subcommand;
use console::style;
use dialoguer::{theme::ColorfulTheme, Input};
use miette::{IntoDiagnostic, Result};
use tabled::{settings::Style, Table, Tabled};

use crate::cli::args::{OutputFormat, RoleArg, StatusArg};
use crate::cli::helpers::{discover_store, format_ts};
use crate::core::workflow::{self, OrderStatus};
use crate::entities::order::Order;
use crate::store::OrderStore;

#[derive(Subcommand, Debug)]
pub enum OrderCommands {
    /// Create a new inspection order (inspector only)
    New(NewArgs),

    /// List orders
    List(ListArgs),

    /// Show one order
    Show(ShowArgs),

    /// Advance an order's status (forward only)
    Advance(AdvanceArgs),
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Acting role
    #[arg(long, value_enum)]
    pub role: RoleArg,

    /// Part number (prompted when omitted)
    #[arg(long)]
    pub part_number: Option<String>,

    /// Required thread spec, e.g. '2-3/8" 8RD' (prompted when omitted)
    #[arg(long)]
    pub thread: Option<String>,

    /// Manual order id; a unique one is generated when omitted
    #[arg(long)]
    pub id: Option<String>,

    /// Initial status
    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by status
    #[arg(long, short = 's', value_enum)]
    pub status: Option<StatusArg>,

    /// Only orders created today
    #[arg(long)]
    pub today: bool,

    /// Show count only, not the items
    #[arg(long)]
    pub count: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Order id
    pub id: String,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

#[derive(clap::Args, Debug)]
pub struct AdvanceArgs {
    /// Order id
    pub id: String,

    /// Target status
    #[arg(long, value_enum)]
    pub to: StatusArg,

    /// Acting role
    #[arg(long, value_enum)]
    pub role: RoleArg,
}

pub fn run(cmd: OrderCommands) -> Result<()> {
    match cmd {
        OrderCommands::New(args) => run_new(args),
        OrderCommands::List(args) => run_list(args),
        OrderCommands::Show(args) => run_show(args),
        OrderCommands::Advance(args) => run_advance(args),
    }
}

fn run_new(args: NewArgs) -> Result<()> {
    let store = discover_store()?;

    let part_number = match args.part_number {
        Some(p) => p,
        None => Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt("Part number")
            .interact_text()
            .into_diagnostic()?,
    };
    let thread = match args.thread {
        Some(t) => t,
        None => Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt("Required thread")
            .interact_text()
            .into_diagnostic()?,
    };

    let order = workflow::create_order(
        args.role.into(),
        args.id,
        &part_number,
        &thread,
        args.status.map(Into::into),
        Utc::now(),
    )
    .into_diagnostic()?;

    let order = store.create(order).into_diagnostic()?;
    println!(
        "{} order {} ({}, {})",
        style("Created").green().bold(),
        style(&order.id).bold(),
        order.part_number,
        order.required_thread
    );
    Ok(())
}

#[derive(Tabled)]
struct OrderRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "PART")]
    part: String,
    #[tabled(rename = "THREAD")]
    thread: String,
    #[tabled(rename = "STATUS")]
    status: String,
    #[tabled(rename = "CREATED")]
    created: String,
}

impl From<&Order> for OrderRow {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.clone(),
            part: order.part_number.clone(),
            thread: order.required_thread.clone(),
            status: order.status.to_string(),
            created: format_ts(order.created_at),
        }
    }
}

fn run_list(args: ListArgs) -> Result<()> {
    let store = discover_store()?;
    let status = args.status.map(OrderStatus::from);
    let orders = if args.today {
        store.list_today(status).into_diagnostic()?
    } else {
        store.list(status).into_diagnostic()?
    };

    if args.count {
        println!("{}", orders.len());
        return Ok(());
    }

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&orders).into_diagnostic()?);
        }
        OutputFormat::Table => {
            if orders.is_empty() {
                println!("No orders found");
                return Ok(());
            }
            let rows: Vec<OrderRow> = orders.iter().map(Into::into).collect();
            let mut table = Table::new(rows);
            table.with(Style::sharp());
            println!("{}", table);
            println!("{} order(s) found", orders.len());
        }
    }
    Ok(())
}

fn run_show(args: ShowArgs) -> Result<()> {
    let store = discover_store()?;
    let order = store.get(&args.id).into_diagnostic()?;

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&order).into_diagnostic()?);
        }
        OutputFormat::Table => {
            println!("{}       {}", style("Order:").bold(), order.id);
            println!("{}        {}", style("Part:").bold(), order.part_number);
            println!("{}      {}", style("Thread:").bold(), order.required_thread);
            println!("{}      {}", style("Status:").bold(), order.status);
            println!("{}     {}", style("Created:").bold(), format_ts(order.created_at));
            let next = workflow::allowed_transitions(order.status);
            if !next.is_empty() {
                let next: Vec<String> = next.iter().map(|s| s.to_string()).collect();
                println!("{}        {}", style("Next:").bold(), next.join(", "));
            }
        }
    }
    Ok(())
}

fn run_advance(args: AdvanceArgs) -> Result<()> {
    let store = discover_store()?;
    let mut order = store.get(&args.id).into_diagnostic()?;
    let from = order.status;

    workflow::advance(&mut order, args.to.into(), args.role.into()).into_diagnostic()?;
    store.update(&order).into_diagnostic()?;

    println!(
        "{} order {}: {} -> {}",
        style("Advanced").green().bold(),
        style(&order.id).bold(),
        from,
        order.status
    );
    Ok(())
}
