use anyhow::Result;
use clap::Parser;

use exohood_cli::{
    cli::{Cli, Commands},
    commands,
};
use exohood_widget::logging::{init_logging, LoggingConfig};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(LoggingConfig::default().with_level(cli.level()));

    let output = match &cli.command {
        Commands::Render(args) => commands::render::execute(args)?,
        Commands::Events { json } => commands::events::execute(*json)?,
    };

    println!("{}", output);
    Ok(())
}
