use clap::{Parser, Subcommand};
use miette::{miette, Result};
use std::path::PathBuf;

use slotname_rs::cli;

#[derive(Parser)]
#[command(name = "slotname")]
#[command(about = "Assign readable variable names to decompiled procedure bodies")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Name every slot of every procedure in a JSON type unit
    Name {
        /// Input JSON document
        input: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Naming settings file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Ignore names recovered from debug symbols
        #[arg(long)]
        no_debug_symbols: bool,

        /// Reserve C# keywords
        #[arg(long)]
        keywords: bool,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Validate a JSON type unit without naming it
    Check {
        /// Input JSON document
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Name {
            input,
            output,
            config,
            no_debug_symbols,
            keywords,
            format,
        } => {
            let args = cli::name::NameArgs {
                input_path: input,
                output_path: output,
                config_path: config,
                no_debug_symbols,
                keywords,
                format,
            };
            cli::name::name(&args).map_err(|e| miette!("{}", e))
        }
        Commands::Check { input } => cli::check::check(&input).map_err(|e| miette!("{}", e)),
    }
}
