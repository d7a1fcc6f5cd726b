use clap::Parser;
use miette::Result;
use inspectflow::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => inspectflow::cli::commands::init::run(),
        Commands::Order(cmd) => inspectflow::cli::commands::order::run(cmd),
        Commands::Gauge(cmd) => inspectflow::cli::commands::gauge::run(cmd),
        Commands::Packet(cmd) => inspectflow::cli::commands::packet::run(cmd),
        Commands::Report(cmd) => inspectflow::cli::commands::report::run(cmd),
        Commands::Completions(args) => inspectflow::cli::commands::completions::run(args),
    }
}
