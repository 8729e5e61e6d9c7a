//! # PD - Project Dashboard CLI
//!
//! Tracks employees, projects and tasks, and shows tasks on a five-column
//! status board (Need To Do, In Progress, Need For Test, Completed, Re-open).
//!
//! ## Key Features
//!
//! - **Integrity-guarded store**: every change goes through one command
//!   dispatcher that refuses edits which would leave dangling references,
//!   duplicate emails, inverted project dates or off-roster assignees
//! - **Status board**: `pd board` for an interactive kanban, `pd move` for
//!   scripted relocations
//! - **Local File Storage**: one JSON document, written after every accepted
//!   change and seeded with sample data on first run
//!
//! ## Quick Start
//!
//! ```bash
//! # Headline numbers and the board
//! pd dashboard
//!
//! # Move task 2 to Completed
//! pd move 2 completed
//!
//! # Add a task to project 1 assigned to employee 2
//! pd task add "Build footer" --desc "Responsive footer" --project 1 --assignee 2 --eta 2025-06-01
//!
//! # Interactive board for one project
//! pd board --project 1
//! ```
//!
//! State lives in `~/.pd/state.json` unless `--db` or `PD_DB` says otherwise.

use std::path::PathBuf;

use clap::Parser;

pub mod board;
pub mod cli;
pub mod cmd;
pub mod db;
pub mod employee;
pub mod error;
pub mod fields;
pub mod logging;
pub mod project;
pub mod seed;
pub mod storage;
pub mod store;
pub mod task;
pub mod views;
pub mod tui {
    pub mod board;
    pub mod colors;
    pub mod run;
}

use cli::Cli;
use cmd::*;
use storage::JsonFileStorage;
use store::Store;

fn main() {
    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        cmd_completions(shell);
        return;
    }

    // Determine the state file
    let db_path = cli.db.clone().unwrap_or_else(|| {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".pd").join("state.json")
    });

    // The board owns the terminal, so its logs always go to a file.
    let log_dir = match (&cli.log_dir, &cli.command) {
        (Some(dir), _) => Some(dir.clone()),
        (None, Commands::Board { .. }) => Some(
            db_path
                .parent()
                .unwrap_or_else(|| std::path::Path::new("."))
                .join("logs"),
        ),
        (None, _) => None,
    };
    let _logger = match logging::init_logging(&cli.log_level, log_dir.as_deref()) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Failed to start logging: {e}");
            std::process::exit(1);
        }
    };

    let mut store = Store::open(Box::new(JsonFileStorage::new(&db_path)));

    match cli.command {
        Commands::Completions { .. } => unreachable!("completions handled above"),
        Commands::Dashboard { project } => cmd_dashboard(&store, project),
        Commands::Board { project } => cmd_board(&mut store, project),
        Commands::Move { task_id, status } => cmd_move(&mut store, task_id, status),
        Commands::Employee { action } => cmd_employee(&mut store, action),
        Commands::Project { action } => cmd_project(&mut store, action),
        Commands::Task { action } => cmd_task(&mut store, action),
        Commands::Export { output } => cmd_export(&store, output),
        Commands::Reset => cmd_reset(&mut store, &db_path),
    }
}
