pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use aromatica_core::config::LoadOptions;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "aromatica",
    about = "Aromatica operator CLI",
    long_about = "Run quiz-driven perfume recommendations and aroma matching against a catalog snapshot, and inspect configuration.",
    after_help = "Examples:\n  aromatica recommend --catalog perfumes.json --request quiz.json\n  aromatica match --catalog perfumes.json --aromas citrus,woody\n  aromatica personalities\n  aromatica config"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Config file to load instead of aromatica.toml")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Score the catalog against a quiz request and print the ranked response")]
    Recommend {
        #[arg(long, help = "Catalog snapshot (JSON array of perfumes)")]
        catalog: Option<PathBuf>,
        #[arg(long, help = "Recommendation request as JSON")]
        request: PathBuf,
    },
    #[command(about = "Rank perfumes by overlap with the given aroma tag slugs")]
    Match {
        #[arg(long, help = "Catalog snapshot (JSON array of perfumes)")]
        catalog: Option<PathBuf>,
        #[arg(long, value_delimiter = ',', required = true, help = "Comma separated aroma slugs")]
        aromas: Vec<String>,
    },
    #[command(about = "List every scent personality type")]
    Personalities,
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

impl Cli {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            require_file: self.config.is_some(),
            config_path: self.config.clone(),
            ..LoadOptions::default()
        }
    }
}

pub fn run() -> ExitCode {
    execute(Cli::parse())
}

pub fn execute(cli: Cli) -> ExitCode {
    let options = cli.load_options();

    let result = match cli.command {
        Command::Recommend { catalog, request } => {
            commands::recommend::run(&options, catalog.as_deref(), &request)
        }
        Command::Match { catalog, aromas } => {
            commands::match_aromas::run(&options, catalog.as_deref(), &aromas)
        }
        Command::Personalities => commands::personalities::run(),
        Command::Config => commands::config::run(&options),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
