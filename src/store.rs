//! The domain store: the only path through which entities change.
//!
//! `reduce` is a pure transition `(snapshot, command) -> snapshot'` that
//! enforces every cross-entity invariant and returns a typed `Rejection`
//! instead of mutating when one would break. `Store` owns the current
//! snapshot, runs commands through `reduce`, and writes each new snapshot to
//! its `Storage`. Write failures are logged, never returned: the in-memory
//! snapshot stays authoritative for the session.

use log::{debug, error, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::db::Snapshot;
use crate::employee::Employee;
use crate::error::{Rejection, StorageError};
use crate::fields::TaskStatus;
use crate::project::Project;
use crate::seed::seed_snapshot;
use crate::storage::Storage;
use crate::task::Task;

/// Every mutation the store accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddEmployee(Employee),
    UpdateEmployee(Employee),
    DeleteEmployee(String),
    AddProject(Project),
    UpdateProject(Project),
    DeleteProject(String),
    AddTask(Task),
    UpdateTask(Task),
    DeleteTask(String),
    UpdateTaskStatus { id: String, status: TaskStatus },
}

impl Command {
    /// Short name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Command::AddEmployee(_) => "add_employee",
            Command::UpdateEmployee(_) => "update_employee",
            Command::DeleteEmployee(_) => "delete_employee",
            Command::AddProject(_) => "add_project",
            Command::UpdateProject(_) => "update_project",
            Command::DeleteProject(_) => "delete_project",
            Command::AddTask(_) => "add_task",
            Command::UpdateTask(_) => "update_task",
            Command::DeleteTask(_) => "delete_task",
            Command::UpdateTaskStatus { .. } => "update_task_status",
        }
    }
}

/// Result of applying an accepted command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Changed(Snapshot),
    /// The command targeted an id that does not exist.
    Unchanged,
}

/// What `Store::dispatch` did with an accepted command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatched {
    Applied,
    NoChange,
}

/// Compute the next snapshot for `command`, or the reason it is refused.
pub fn reduce(snapshot: &Snapshot, command: Command) -> Result<Transition, Rejection> {
    let mut next = snapshot.clone();
    match command {
        Command::AddEmployee(employee) => {
            if snapshot.employee(&employee.id).is_some() {
                return Err(duplicate("employee", &employee.id));
            }
            validate_employee(snapshot, &employee)?;
            next.employees.push(employee);
        }
        Command::UpdateEmployee(employee) => {
            let Some(idx) = snapshot.employees.iter().position(|e| e.id == employee.id) else {
                return Ok(Transition::Unchanged);
            };
            validate_employee(snapshot, &employee)?;
            next.employees[idx] = employee;
        }
        Command::DeleteEmployee(id) => {
            if snapshot.employee(&id).is_none() {
                return Ok(Transition::Unchanged);
            }
            let on_roster = snapshot.projects.iter().any(|p| p.has_member(&id));
            let on_task = snapshot.tasks.iter().any(|t| t.assigned_employee_id == id);
            if on_roster || on_task {
                return Err(Rejection::EmployeeInUse { employee_id: id });
            }
            next.employees.retain(|e| e.id != id);
        }
        Command::AddProject(project) => {
            if snapshot.project(&project.id).is_some() {
                return Err(duplicate("project", &project.id));
            }
            validate_project(snapshot, &project)?;
            next.projects.push(project);
        }
        Command::UpdateProject(project) => {
            let Some(idx) = snapshot.projects.iter().position(|p| p.id == project.id) else {
                return Ok(Transition::Unchanged);
            };
            validate_project(snapshot, &project)?;
            // Shrinking the roster must not strand an assignee.
            if let Some(t) = snapshot
                .tasks
                .iter()
                .filter(|t| t.project_id == project.id)
                .find(|t| !project.has_member(&t.assigned_employee_id))
            {
                return Err(Rejection::RosterInUse {
                    employee_id: t.assigned_employee_id.clone(),
                    project_id: project.id.clone(),
                });
            }
            next.projects[idx] = project;
        }
        Command::DeleteProject(id) => {
            if snapshot.project(&id).is_none() {
                return Ok(Transition::Unchanged);
            }
            if snapshot.tasks.iter().any(|t| t.project_id == id) {
                return Err(Rejection::ProjectHasTasks { project_id: id });
            }
            next.projects.retain(|p| p.id != id);
        }
        Command::AddTask(task) => {
            if snapshot.task(&task.id).is_some() {
                return Err(duplicate("task", &task.id));
            }
            validate_task(snapshot, &task)?;
            next.tasks.push(task);
        }
        Command::UpdateTask(task) => {
            let Some(idx) = snapshot.tasks.iter().position(|t| t.id == task.id) else {
                return Ok(Transition::Unchanged);
            };
            validate_task(snapshot, &task)?;
            next.tasks[idx] = task;
        }
        Command::DeleteTask(id) => {
            if snapshot.task(&id).is_none() {
                return Ok(Transition::Unchanged);
            }
            next.tasks.retain(|t| t.id != id);
        }
        Command::UpdateTaskStatus { id, status } => {
            let Some(task) = next.tasks.iter_mut().find(|t| t.id == id) else {
                return Ok(Transition::Unchanged);
            };
            task.status = status;
        }
    }
    Ok(Transition::Changed(next))
}

fn duplicate(kind: &'static str, id: &str) -> Rejection {
    Rejection::DuplicateId {
        kind,
        id: id.to_string(),
    }
}

fn require(field: &'static str, value: &str) -> Result<(), Rejection> {
    if value.trim().is_empty() {
        Err(Rejection::EmptyField { field })
    } else {
        Ok(())
    }
}

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("valid email regex")
});

/// Whether `email` looks like `local@domain.tld`.
pub fn is_valid_email(email: &str) -> bool {
    !email.starts_with('.') && !email.contains("..") && EMAIL_RE.is_match(email)
}

/// Whether `value` parses as an absolute URL.
pub fn is_valid_url(value: &str) -> bool {
    Url::parse(value).is_ok()
}

fn require_url(field: &'static str, value: &str) -> Result<(), Rejection> {
    if is_valid_url(value) {
        Ok(())
    } else {
        Err(Rejection::InvalidUrl {
            field,
            value: value.to_string(),
        })
    }
}

fn validate_employee(snapshot: &Snapshot, employee: &Employee) -> Result<(), Rejection> {
    require("Name", &employee.name)?;
    require("Position", &employee.position)?;
    require("Email", &employee.email)?;
    require("Profile image URL", &employee.profile_image)?;
    if !is_valid_email(&employee.email) {
        return Err(Rejection::InvalidEmail {
            email: employee.email.clone(),
        });
    }
    require_url("Profile image", &employee.profile_image)?;
    let taken = snapshot
        .employees
        .iter()
        .any(|e| e.email == employee.email && e.id != employee.id);
    if taken {
        return Err(Rejection::DuplicateEmail {
            email: employee.email.clone(),
        });
    }
    Ok(())
}

fn validate_project(snapshot: &Snapshot, project: &Project) -> Result<(), Rejection> {
    require("Project title", &project.title)?;
    require("Description", &project.description)?;
    require("Logo URL", &project.logo)?;
    require_url("Logo", &project.logo)?;
    if project.end_date < project.start_date {
        return Err(Rejection::EndBeforeStart);
    }
    if project.assigned_employees.is_empty() {
        return Err(Rejection::EmptyRoster);
    }
    for (i, id) in project.assigned_employees.iter().enumerate() {
        if project.assigned_employees[..i].contains(id) {
            return Err(Rejection::DuplicateRosterEntry {
                employee_id: id.clone(),
            });
        }
    }
    if let Some(missing) = project
        .assigned_employees
        .iter()
        .find(|id| snapshot.employee(id).is_none())
    {
        return Err(Rejection::UnknownEmployee {
            employee_id: missing.clone(),
        });
    }
    Ok(())
}

fn validate_task(snapshot: &Snapshot, task: &Task) -> Result<(), Rejection> {
    require("Task title", &task.title)?;
    require("Description", &task.description)?;
    for image in &task.reference_images {
        require_url("Reference image", image)?;
    }
    let project = snapshot
        .project(&task.project_id)
        .ok_or_else(|| Rejection::UnknownProject {
            project_id: task.project_id.clone(),
        })?;
    if snapshot.employee(&task.assigned_employee_id).is_none() {
        return Err(Rejection::UnknownEmployee {
            employee_id: task.assigned_employee_id.clone(),
        });
    }
    if !project.has_member(&task.assigned_employee_id) {
        return Err(Rejection::NotOnRoster {
            employee_id: task.assigned_employee_id.clone(),
            project_id: project.id.clone(),
        });
    }
    Ok(())
}

/// Owner of the current snapshot and its persistence.
pub struct Store {
    snapshot: Snapshot,
    storage: Box<dyn Storage>,
}

impl Store {
    /// Rehydrate from `storage`, falling back to the seed dataset when nothing
    /// is stored or the stored value cannot be read.
    pub fn open(storage: Box<dyn Storage>) -> Self {
        let snapshot = match storage.load() {
            Ok(Some(snapshot)) => {
                info!(
                    "event=store_loaded employees={} projects={} tasks={}",
                    snapshot.employees.len(),
                    snapshot.projects.len(),
                    snapshot.tasks.len()
                );
                snapshot
            }
            Ok(None) => {
                info!("event=store_seeded reason=empty");
                seed_snapshot()
            }
            Err(e) => {
                warn!("event=store_seeded reason=load_failed error={e}");
                seed_snapshot()
            }
        };
        Store { snapshot, storage }
    }

    /// Start from a known snapshot without reading `storage`.
    pub fn with_snapshot(snapshot: Snapshot, storage: Box<dyn Storage>) -> Self {
        Store { snapshot, storage }
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Apply `command`. On rejection the snapshot is untouched and the reason
    /// is returned for display.
    pub fn dispatch(&mut self, command: Command) -> Result<Dispatched, Rejection> {
        let name = command.name();
        match reduce(&self.snapshot, command) {
            Ok(Transition::Changed(next)) => {
                self.snapshot = next;
                debug!("event=command_applied command={name}");
                self.persist();
                Ok(Dispatched::Applied)
            }
            Ok(Transition::Unchanged) => {
                debug!("event=command_noop command={name}");
                Ok(Dispatched::NoChange)
            }
            Err(rejection) => {
                warn!("event=command_rejected command={name} reason=\"{rejection}\"");
                Err(rejection)
            }
        }
    }

    /// Overwrite both memory and storage with `snapshot`. Unlike `dispatch`,
    /// a failed write is returned to the caller.
    pub fn replace(&mut self, snapshot: Snapshot) -> Result<(), StorageError> {
        self.snapshot = snapshot;
        self.storage.save(&self.snapshot).map_err(|e| {
            error!("event=replace_failed error={e}");
            e
        })
    }

    fn persist(&self) {
        if let Err(e) = self.storage.save(&self.snapshot) {
            error!("event=persist_failed error={e}");
        }
    }
}
