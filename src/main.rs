use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use fuel_cost_api::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();
    let command = args.get_command();

    // The server initializes tracing itself from its configuration
    if !matches!(command, cli::Commands::Start) {
        init_tracing();
    }

    match command {
        cli::Commands::Start => {
            commands::start::execute(&args.config).await?;
        }
        cli::Commands::Test => {
            commands::test::execute(&args.config)?;
        }
        cli::Commands::Config { action } => match action {
            cli::ConfigCommands::Show => commands::config::show(&args.config)?,
            cli::ConfigCommands::Validate => commands::config::validate(&args.config)?,
        },
        cli::Commands::Estimate {
            from,
            to,
            profile,
            fuel,
            geometry,
        } => {
            let estimate_args = commands::estimate::EstimateArgs {
                from,
                to,
                profile,
                fuel,
                geometry,
            };
            commands::estimate::execute(&args.config, estimate_args).await?;
        }
        cli::Commands::Version => {
            println!("fuel-cost-api v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
