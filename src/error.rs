//! Error types for the store and its persistence adapter.

use std::path::PathBuf;

/// Why the store refused a command. The snapshot is unchanged whenever one of
/// these is returned, and the message is suitable to show to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("Cannot delete employee assigned to projects or tasks")]
    EmployeeInUse { employee_id: String },

    #[error("Cannot delete project with associated tasks")]
    ProjectHasTasks { project_id: String },

    #[error("Email is already taken: {email}")]
    DuplicateEmail { email: String },

    #[error("Must be a valid email: {email}")]
    InvalidEmail { email: String },

    #[error("{field} must be a valid URL: {value}")]
    InvalidUrl { field: &'static str, value: String },

    #[error("Employee {employee_id} is listed more than once")]
    DuplicateRosterEntry { employee_id: String },

    #[error("A {kind} with id {id} already exists")]
    DuplicateId { kind: &'static str, id: String },

    #[error("End date cannot be earlier than start date")]
    EndBeforeStart,

    #[error("At least one employee must be assigned")]
    EmptyRoster,

    #[error("{field} is required")]
    EmptyField { field: &'static str },

    #[error("Unknown employee: {employee_id}")]
    UnknownEmployee { employee_id: String },

    #[error("Unknown project: {project_id}")]
    UnknownProject { project_id: String },

    #[error("Employee {employee_id} is not assigned to project {project_id}")]
    NotOnRoster {
        employee_id: String,
        project_id: String,
    },

    #[error("Employee {employee_id} still has tasks in project {project_id}")]
    RosterInUse {
        employee_id: String,
        project_id: String,
    },
}

/// Failures reading or writing the persisted snapshot.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error on {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
