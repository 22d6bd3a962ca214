mod cli;
mod client;
mod commands;
mod config;
mod error;
mod output;
mod responses;
mod types;

use std::error::Error;
use std::io;

use clap::{CommandFactory, Parser};
use clap_complete::generate;

use cli::{Cli, Commands, StoryCommands};
use client::TrackerClient;
use config::Config;
use error::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");

        // Show error chain if verbose flag was passed
        if std::env::args().any(|arg| arg == "--verbose" || arg == "-v") {
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("Caused by: {cause}");
                source = Error::source(cause);
            }
        }

        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    output::set_json_output(cli.json);

    match cli.command {
        // Commands that don't require config/client
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "tracker", &mut io::stdout());
        }
        Commands::Init => {
            commands::init::run().await?;
        }
        // Commands that require config
        command => {
            let config = Config::load()?;

            match command {
                Commands::Projects => {
                    commands::projects::list(&config)?;
                }
                Commands::Project(args) => {
                    let client = TrackerClient::new(config.token()?).verbose(cli.verbose);
                    commands::projects::show(&client, &config, args).await?;
                }
                Commands::Story { action } => {
                    let client = TrackerClient::new(config.token()?).verbose(cli.verbose);
                    match action {
                        StoryCommands::Add(args) => {
                            commands::stories::add(&client, &config, args).await?;
                        }
                        StoryCommands::Delete(args) => {
                            commands::stories::delete(&client, &config, args).await?;
                        }
                    }
                }
                Commands::Completions { .. } | Commands::Init => {
                    // Already handled above
                }
            }
        }
    }

    Ok(())
}
