//! `inspectflow init` command - project initialization

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::store::Project;

pub fn run() -> Result<()> {
    let cwd = std::env::current_dir().into_diagnostic()?;
    let project = Project::init(&cwd).into_diagnostic()?;

    println!(
        "{} inspectflow project in {}",
        style("Initialized").green().bold(),
        project.root().display()
    );
    println!("  orders:  {}", project.orders_dir().display());
    println!("  gauges:  {}", project.gauges_dir().display());
    println!("  reports: {}", project.reports_dir().display());
    Ok(())
}
