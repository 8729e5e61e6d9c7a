use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;
use crate::logging::DEFAULT_LOG_LEVEL;

/// Employee, project and task tracker with a status board.
/// State defaults to ~/.pd/state.json or a path passed via --db.
#[derive(Parser)]
#[command(name = "pd", version, about = "Project dashboard CLI")]
pub struct Cli {
    /// Path to the JSON state file.
    #[arg(long, global = true, env = "PD_DB")]
    pub db: Option<PathBuf>,

    /// Log level: off | error | warn | info | debug | trace.
    #[arg(long, global = true, env = "PD_LOG", default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,

    /// Write logs to rotating files in this directory instead of stderr.
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}
