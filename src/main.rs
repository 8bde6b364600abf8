//! automouse - CLI entry point

mod commands;

use anyhow::Result;
use clap::Parser;

use automouse::cli::{Cli, Commands, ConfigCommands};
use automouse::{logging, Config};

use commands::play::PlayArgs;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Record { trim_last_click } => {
            let config = Config::load()?;
            let store = commands::resolve_store(cli.file.as_deref(), &config)?;
            commands::record::handle(&config, store, trim_last_click)
        }
        Commands::Play {
            repeat,
            dry_run,
            delay,
            strict,
        } => {
            let config = Config::load()?;
            let store = commands::resolve_store(cli.file.as_deref(), &config)?;
            let args = PlayArgs {
                repeat,
                dry_run,
                delay,
                strict,
            };
            commands::play::handle(&config, store, args)
        }
        Commands::Status => {
            let config = Config::load()?;
            let store = commands::resolve_store(cli.file.as_deref(), &config)?;
            commands::status::handle(&store)
        }
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(&Config::load()?),
            ConfigCommands::Path => commands::config::handle_path(),
            ConfigCommands::Init { force } => commands::config::handle_init(force),
        },
        Commands::Completions { shell } => commands::completions::handle::<Cli>(shell),
    }
}
