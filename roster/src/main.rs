//! Roster CLI - maintain the character dataset
//!
//! ```bash
//! roster check-ids            # Fail on duplicate ids, print the max id
//! roster trim                 # Sorted, reduced JSON
//! roster text                 # Sorted, anonymized text
//! roster aliases              # Sorted short-name list
//! roster all                  # check-ids, then every artifact
//! ```
//!
//! Paths default to the site layout; see `--source` / `--output-dir` or the
//! `ROSTER_SOURCE` / `ROSTER_OUTPUT_DIR` environment variables.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use roster::{logs, run_mode, IdCheck, Mode, PipelineConfig, PipelineError};

#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Validate, sort, trim and render the character dataset", long_about = None)]
struct Cli {
    /// Source dataset (default: src/assets/data/characters.json)
    #[arg(short, long, global = true)]
    source: Option<PathBuf>,

    /// Directory for every output artifact
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Only print errors and requested output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that complete records have unique ids
    CheckIds {
        /// Print the result as JSON on stdout
        #[arg(long)]
        json: bool,
    },

    /// Write the sorted dataset without presentation-only fields
    Trim {
        /// Output file (default: characters.trimmed.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write the sorted dataset as readable text
    Text {
        /// Output file (default: characters.txt)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write every short name, one per line
    Aliases {
        /// Output file (default: shortnames.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check ids, then write every artifact
    All,
}

fn main() {
    let cli = Cli::parse();
    logs::set_quiet(cli.quiet);

    let mut config = PipelineConfig::from_env();
    if let Some(source) = cli.source {
        config = config.with_source(source);
    }
    if let Some(dir) = cli.output_dir {
        config = config.with_output_dir(dir);
    }

    let result = match cli.command {
        Commands::CheckIds { json } => cmd_check_ids(&config, json),

        Commands::Trim { output } => {
            if let Some(path) = output {
                config.trimmed_json = path;
            }
            cmd_run(Mode::Trim, &config)
        }

        Commands::Text { output } => {
            if let Some(path) = output {
                config.text = path;
            }
            cmd_run(Mode::Text, &config)
        }

        Commands::Aliases { output } => {
            if let Some(path) = output {
                config.aliases = path;
            }
            cmd_run(Mode::Aliases, &config)
        }

        Commands::All => cmd_run(Mode::All, &config),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_check_ids(config: &PipelineConfig, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    match run_mode(Mode::CheckIds, config) {
        Ok(report) => {
            if let Some(check) = report.id_check {
                print_check(&check, json)?;
            }
            Ok(())
        }
        Err(PipelineError::DuplicateIdentity { duplicates, max_id }) if json => {
            let check = IdCheck::DuplicatesFound {
                duplicates: duplicates.clone(),
                max_id: max_id.clone(),
            };
            print_check(&check, true)?;
            Err(PipelineError::DuplicateIdentity { duplicates, max_id }.into())
        }
        Err(e) => Err(e.into()),
    }
}

fn print_check(check: &IdCheck, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(check)?);
    } else {
        println!("{}", check);
    }
    Ok(())
}

fn cmd_run(mode: Mode, config: &PipelineConfig) -> Result<(), Box<dyn std::error::Error>> {
    let report = run_mode(mode, config)?;
    if let Some(count) = report.alias_count {
        eprintln!("📋 {} aliases from {} records", count, report.records);
    }
    Ok(())
}
