//! Command implementations for the CLI interface.
//!
//! Every handler reads the store's snapshot and, for mutations, builds a
//! `store::Command` and dispatches it. Store rejections are printed as
//! `Error: <notice>` and end the process with status 1.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::Subcommand;
use clap_complete::{generate, Shell};

use crate::board::{self, Relocation, Slot};
use crate::db::*;
use crate::employee::Employee;
use crate::fields::TaskStatus;
use crate::project::Project;
use crate::seed::seed_snapshot;
use crate::store::{is_valid_url, Command, Dispatched, Store};
use crate::task::Task;
use crate::tui::run::run_board_tui;
use crate::views::*;

#[derive(Subcommand)]
pub enum Commands {
    /// Show headline numbers and the status board.
    Dashboard {
        /// Project id to show on the board, or "all".
        #[arg(long, default_value = "all")]
        project: String,
    },

    /// Launch the interactive status board.
    Board {
        /// Project id to show initially, or "all".
        #[arg(long, default_value = "all")]
        project: String,
    },

    /// Move a task to another board column.
    Move {
        /// Task ID.
        task_id: String,
        /// Destination column.
        #[arg(value_enum)]
        status: TaskStatus,
    },

    /// Manage employees.
    Employee {
        #[command(subcommand)]
        action: EmployeeAction,
    },

    /// Manage projects.
    Project {
        #[command(subcommand)]
        action: ProjectAction,
    },

    /// Manage tasks.
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },

    /// Write the current state as JSON.
    Export {
        /// Output file path (default: stdout)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Replace all stored state with the sample dataset.
    Reset,

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum EmployeeAction {
    /// Add an employee.
    Add {
        /// Display name.
        name: String,
        #[arg(long)]
        position: String,
        /// Must not be used by another employee.
        #[arg(long)]
        email: String,
        /// Profile image URL.
        #[arg(long)]
        profile_image: String,
    },
    /// Update fields on an employee.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        position: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        profile_image: Option<String>,
    },
    /// Delete an employee not assigned to any project or task.
    Delete { id: String },
    /// List employees.
    List,
}

#[derive(Subcommand)]
pub enum ProjectAction {
    /// Add a project.
    Add {
        /// Project title.
        title: String,
        #[arg(long)]
        desc: String,
        /// Logo URL.
        #[arg(long)]
        logo: String,
        /// Start date: YYYY-MM-DD.
        #[arg(long)]
        start: String,
        /// End date: YYYY-MM-DD, not before the start.
        #[arg(long)]
        end: String,
        /// Employee IDs on the roster. May be repeated and comma-separated.
        #[arg(long = "employee", required = true)]
        employees: Vec<String>,
    },
    /// Update fields on a project.
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        desc: Option<String>,
        #[arg(long)]
        logo: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        /// Replace the roster. May be repeated and comma-separated.
        #[arg(long = "employee")]
        employees: Vec<String>,
    },
    /// Delete a project that has no tasks.
    Delete { id: String },
    /// List projects with their rosters.
    List,
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task.
    Add {
        /// Task title.
        title: String,
        #[arg(long)]
        desc: String,
        /// Project ID.
        #[arg(long)]
        project: String,
        /// Employee ID, must be on the project's roster.
        #[arg(long)]
        assignee: String,
        /// ETA: YYYY-MM-DD.
        #[arg(long)]
        eta: String,
        #[arg(long, value_enum, default_value_t = TaskStatus::NeedToDo)]
        status: TaskStatus,
        /// Reference image URLs. May be repeated and comma-separated.
        #[arg(long = "image")]
        images: Vec<String>,
    },
    /// Update fields on a task.
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        desc: Option<String>,
        #[arg(long)]
        project: Option<String>,
        #[arg(long)]
        assignee: Option<String>,
        #[arg(long)]
        eta: Option<String>,
        #[arg(long, value_enum)]
        status: Option<TaskStatus>,
        /// Replace reference images. May be repeated and comma-separated.
        #[arg(long = "image")]
        images: Vec<String>,
        /// Remove all reference images.
        #[arg(long)]
        clear_images: bool,
    },
    /// Delete a task.
    Delete { id: String },
    /// List tasks.
    List {
        /// Project id, or "all".
        #[arg(long, default_value = "all")]
        project: String,
    },
    /// Set a task's status directly.
    Status {
        id: String,
        #[arg(value_enum)]
        status: TaskStatus,
    },
}

/// Dispatch a command and report the outcome, exiting on rejection.
fn apply(store: &mut Store, command: Command, done: &str) {
    match store.dispatch(command) {
        Ok(Dispatched::Applied) => println!("{done}"),
        Ok(Dispatched::NoChange) => println!("Nothing to change."),
        Err(rejection) => {
            eprintln!("Error: {rejection}");
            std::process::exit(1);
        }
    }
}

fn date_arg(label: &str, value: &str) -> NaiveDate {
    match parse_date(value) {
        Some(d) => d,
        None => {
            eprintln!("Invalid {label} '{value}': expected YYYY-MM-DD");
            std::process::exit(1);
        }
    }
}

/// Reference image URLs from the command line. Entries that are not valid
/// URLs are skipped with a notice.
fn image_urls(inputs: &[String]) -> Vec<String> {
    split_list(inputs)
        .into_iter()
        .filter(|url| {
            let ok = is_valid_url(url);
            if !ok {
                eprintln!("Skipping invalid image URL '{url}'");
            }
            ok
        })
        .collect()
}

fn not_found(kind: &str, id: &str) -> ! {
    eprintln!("{kind} {id} not found.");
    std::process::exit(1);
}

/// Launch the interactive board.
pub fn cmd_board(store: &mut Store, project: String) {
    let filter: ProjectFilter = project.parse().unwrap_or_default();
    if let Err(e) = run_board_tui(store, filter) {
        eprintln!("UI error: {e}");
        std::process::exit(1);
    }
}

/// Print headline numbers and the five board columns.
pub fn cmd_dashboard(store: &Store, project: String) {
    let snapshot = store.snapshot();
    let stats = DashboardStats::from_snapshot(snapshot);
    println!(
        "Employees: {}  Projects: {}  Tasks: {}  Completed: {} ({}%)",
        stats.employees, stats.projects, stats.tasks, stats.completed, stats.completion_percentage
    );

    let filter: ProjectFilter = project.parse().unwrap_or_default();
    if let ProjectFilter::Project(id) = &filter {
        println!("Board: {}", project_title(snapshot, id));
    }
    let tasks = filter_tasks(&snapshot.tasks, &filter);
    for (status, bucket) in board::columns(&tasks) {
        println!();
        println!("{} ({})", format_status(status), bucket.len());
        for t in bucket {
            println!(
                "  {:<14} {:<28} {:<16} {}",
                truncate(&t.id, 14),
                truncate(&t.title, 28),
                truncate(employee_name(snapshot, &t.assigned_employee_id), 16),
                format_date(t.eta)
            );
        }
    }
}

/// Relocate a task on the board.
pub fn cmd_move(store: &mut Store, task_id: String, status: TaskStatus) {
    let snapshot = store.snapshot();
    let Some(task) = snapshot.task(&task_id) else {
        not_found("Task", &task_id);
    };
    let source_bucket = board::bucket_of(&snapshot.tasks, task.status);
    let source = Slot {
        bucket: task.status,
        index: source_bucket.iter().position(|t| t.id == task_id).unwrap_or(0),
    };
    // Dropped at the end of the destination column.
    let destination = if status == task.status {
        source
    } else {
        Slot {
            bucket: status,
            index: board::bucket_of(&snapshot.tasks, status).len(),
        }
    };
    let relocation = Relocation {
        task_id: task_id.clone(),
        source,
        destination: Some(destination),
    };
    match board::on_relocate(&relocation) {
        Some(command) => apply(store, command, &format!("Task moved to {}", format_status(status))),
        None => println!("Task {} is already in {}", task_id, format_status(status)),
    }
}

pub fn cmd_employee(store: &mut Store, action: EmployeeAction) {
    match action {
        EmployeeAction::Add { name, position, email, profile_image } => {
            let id = store.snapshot().next_id();
            let employee = Employee { id: id.clone(), name, position, email, profile_image };
            apply(store, Command::AddEmployee(employee), &format!("Added employee {id}"));
        }
        EmployeeAction::Update { id, name, position, email, profile_image } => {
            let Some(current) = store.snapshot().employee(&id) else {
                not_found("Employee", &id);
            };
            let mut employee = current.clone();
            if let Some(v) = name { employee.name = v; }
            if let Some(v) = position { employee.position = v; }
            if let Some(v) = email { employee.email = v; }
            if let Some(v) = profile_image { employee.profile_image = v; }
            apply(store, Command::UpdateEmployee(employee), &format!("Updated employee {id}"));
        }
        EmployeeAction::Delete { id } => {
            apply(store, Command::DeleteEmployee(id.clone()), &format!("Deleted employee {id}"));
        }
        EmployeeAction::List => {
            let snapshot = store.snapshot();
            println!("{:<14} {:<20} {:<20} {}", "ID", "Name", "Position", "Email");
            for e in &snapshot.employees {
                println!(
                    "{:<14} {:<20} {:<20} {}",
                    truncate(&e.id, 14),
                    truncate(&e.name, 20),
                    truncate(&e.position, 20),
                    e.email
                );
            }
        }
    }
}

pub fn cmd_project(store: &mut Store, action: ProjectAction) {
    match action {
        ProjectAction::Add { title, desc, logo, start, end, employees } => {
            let id = store.snapshot().next_id();
            let project = Project {
                id: id.clone(),
                title,
                description: desc,
                logo,
                start_date: date_arg("start date", &start),
                end_date: date_arg("end date", &end),
                assigned_employees: split_unique(&employees),
            };
            apply(store, Command::AddProject(project), &format!("Added project {id}"));
        }
        ProjectAction::Update { id, title, desc, logo, start, end, employees } => {
            let Some(current) = store.snapshot().project(&id) else {
                not_found("Project", &id);
            };
            let mut project = current.clone();
            if let Some(v) = title { project.title = v; }
            if let Some(v) = desc { project.description = v; }
            if let Some(v) = logo { project.logo = v; }
            if let Some(v) = start { project.start_date = date_arg("start date", &v); }
            if let Some(v) = end { project.end_date = date_arg("end date", &v); }
            if !employees.is_empty() {
                project.assigned_employees = split_unique(&employees);
            }
            apply(store, Command::UpdateProject(project), &format!("Updated project {id}"));
        }
        ProjectAction::Delete { id } => {
            apply(store, Command::DeleteProject(id.clone()), &format!("Deleted project {id}"));
        }
        ProjectAction::List => {
            let snapshot = store.snapshot();
            println!("{:<14} {:<24} {:<27} {}", "ID", "Title", "Dates", "Team");
            for p in &snapshot.projects {
                let team: Vec<&str> = roster_members(snapshot, p)
                    .iter()
                    .map(|e| e.name.as_str())
                    .collect();
                println!(
                    "{:<14} {:<24} {:<27} {}",
                    truncate(&p.id, 14),
                    truncate(&p.title, 24),
                    format!("{} - {}", format_date(p.start_date), format_date(p.end_date)),
                    team.join(", ")
                );
            }
        }
    }
}

pub fn cmd_task(store: &mut Store, action: TaskAction) {
    match action {
        TaskAction::Add { title, desc, project, assignee, eta, status, images } => {
            let id = store.snapshot().next_id();
            let task = Task {
                id: id.clone(),
                title,
                description: desc,
                project_id: project,
                assigned_employee_id: assignee,
                eta: date_arg("ETA", &eta),
                status,
                reference_images: image_urls(&images),
            };
            apply(store, Command::AddTask(task), &format!("Added task {id}"));
        }
        TaskAction::Update { id, title, desc, project, assignee, eta, status, images, clear_images } => {
            let Some(current) = store.snapshot().task(&id) else {
                not_found("Task", &id);
            };
            let mut task = current.clone();
            if let Some(v) = title { task.title = v; }
            if let Some(v) = desc { task.description = v; }
            if let Some(v) = project { task.project_id = v; }
            if let Some(v) = assignee { task.assigned_employee_id = v; }
            if let Some(v) = eta { task.eta = date_arg("ETA", &v); }
            if let Some(v) = status { task.status = v; }
            if clear_images {
                task.reference_images.clear();
            } else if !images.is_empty() {
                task.reference_images = image_urls(&images);
            }
            apply(store, Command::UpdateTask(task), &format!("Updated task {id}"));
        }
        TaskAction::Delete { id } => {
            apply(store, Command::DeleteTask(id.clone()), &format!("Deleted task {id}"));
        }
        TaskAction::List { project } => {
            let snapshot = store.snapshot();
            let filter: ProjectFilter = project.parse().unwrap_or_default();
            println!(
                "{:<14} {:<13} {:<13} {:<20} {:<16} {}",
                "ID", "Status", "ETA", "Project", "Assignee", "Title"
            );
            for t in filter_tasks(&snapshot.tasks, &filter) {
                println!(
                    "{:<14} {:<13} {:<13} {:<20} {:<16} {}",
                    truncate(&t.id, 14),
                    format_status(t.status),
                    format_date(t.eta),
                    truncate(project_title(snapshot, &t.project_id), 20),
                    truncate(employee_name(snapshot, &t.assigned_employee_id), 16),
                    t.title
                );
            }
        }
        TaskAction::Status { id, status } => {
            let command = Command::UpdateTaskStatus { id: id.clone(), status };
            apply(store, command, &format!("Task {id} is now {}", format_status(status)));
        }
    }
}

/// Write the snapshot as pretty JSON to a file or stdout.
pub fn cmd_export(store: &Store, output: Option<PathBuf>) {
    let data = match serde_json::to_string_pretty(store.snapshot()) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Failed to serialise state: {e}");
            std::process::exit(1);
        }
    };
    match output {
        Some(path) => {
            if let Err(e) = fs::write(&path, data) {
                eprintln!("Failed to write {}: {e}", path.display());
                std::process::exit(1);
            }
            println!("Exported to {}", path.display());
        }
        None => println!("{data}"),
    }
}

/// Overwrite stored state with the seed dataset.
pub fn cmd_reset(store: &mut Store, db_path: &Path) {
    if let Err(e) = store.replace(seed_snapshot()) {
        eprintln!("Failed to reset {}: {e}", db_path.display());
        std::process::exit(1);
    }
    println!("Reset {} to the sample dataset.", db_path.display());
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;
    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}
