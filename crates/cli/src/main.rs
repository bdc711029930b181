mod cmd;
mod logging;

use clap::Parser;
use docmeta_core::config::{ConfigLoader, LoadOptions};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "docmeta",
    version,
    about = "Generate and update description/keywords front matter in Markdown files"
)]
pub struct Cli {
    /// Markdown files to annotate
    #[arg(value_name = "FILE", required_unless_present = "list_models")]
    pub files: Vec<PathBuf>,

    /// Gemini model, bare (gemini-2.5-flash-lite) or qualified (models/...)
    #[arg(long)]
    pub model: Option<String>,

    /// Skip files that already have a description in their front matter
    #[arg(long)]
    pub ignore_existing: bool,

    /// Print the generated front matter instead of writing files
    #[arg(long)]
    pub dry_run: bool,

    /// Config file (default: $XDG_CONFIG_HOME/docmeta/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Env file holding GEMINI_API_KEY (default: ./.env when present)
    #[arg(long)]
    pub env_file: Option<PathBuf>,

    /// List models that support content generation and exit
    #[arg(long)]
    pub list_models: bool,
}

/// Exit status for configuration problems found before any file is touched.
const EXIT_CONFIG: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let rc = match ConfigLoader::load(LoadOptions {
        config_path: cli.config.as_deref(),
        env_file: cli.env_file.as_deref(),
        model: cli.model.as_deref(),
    }) {
        Ok(rc) => rc,
        Err(e) => {
            eprintln!("Error loading config: {e}");
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    let _log_guard = match logging::init(&rc.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to set up logging: {e}");
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    if cli.list_models {
        cmd::list_models::run(&rc)
    } else {
        cmd::annotate::run(&rc, &cli)
    }
}
