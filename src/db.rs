//! The snapshot aggregate and display helpers.
//!
//! `Snapshot` is the complete value of the three entity collections at one
//! instant. It is what the store hands out to readers and what the storage
//! layer writes to disk.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::employee::Employee;
use crate::fields::TaskStatus;
use crate::project::Project;
use crate::task::Task;

/// All employees, projects and tasks at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub employees: Vec<Employee>,
    pub projects: Vec<Project>,
    pub tasks: Vec<Task>,
}

impl Snapshot {
    /// Get an employee by ID.
    pub fn employee(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    /// Get a project by ID.
    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Get a task by ID.
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Generate a fresh time-based ID.
    ///
    /// IDs are millisecond timestamps. When two entities are created within the
    /// same millisecond, or the clock is behind an existing numeric ID, the
    /// value is bumped past the largest numeric ID already in use. If that ID
    /// is already `u64::MAX`, a `-N` suffix keeps the result unique.
    pub fn next_id(&self) -> String {
        let now = Utc::now().timestamp_millis().max(0) as u64;
        let highest = self
            .employees
            .iter()
            .map(|e| e.id.as_str())
            .chain(self.projects.iter().map(|p| p.id.as_str()))
            .chain(self.tasks.iter().map(|t| t.id.as_str()))
            .filter_map(|id| id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        let base = now.max(highest.saturating_add(1)).to_string();
        if !self.has_id(&base) {
            return base;
        }
        (1u32..)
            .map(|n| format!("{base}-{n}"))
            .find(|id| !self.has_id(id))
            .unwrap_or(base)
    }

    fn has_id(&self, id: &str) -> bool {
        self.employee(id).is_some() || self.project(id).is_some() || self.task(id).is_some()
    }
}

/// Format a task status as its board column title.
pub fn format_status(s: TaskStatus) -> &'static str {
    match s {
        TaskStatus::NeedToDo => "Need To Do",
        TaskStatus::InProgress => "In Progress",
        TaskStatus::NeedForTest => "Need For Test",
        TaskStatus::Completed => "Completed",
        TaskStatus::ReOpen => "Re-open",
    }
}

/// Format a date for display ("May 15, 2025").
pub fn format_date(d: NaiveDate) -> String {
    d.format("%b %-d, %Y").to_string()
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}

/// Split comma-separated inputs, trimming and dropping empty entries.
pub fn split_list(inputs: &[String]) -> Vec<String> {
    inputs
        .iter()
        .flat_map(|s| s.split(','))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Like `split_list`, keeping only the first occurrence of each entry.
pub fn split_unique(inputs: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for item in split_list(inputs) {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_snapshot;

    #[test]
    fn test_next_id_is_unique_and_numeric() {
        let mut snapshot = seed_snapshot();
        snapshot.tasks[0].id = "99999999999999".to_string();
        let id = snapshot.next_id();
        assert_eq!(id, "100000000000000");
        assert!(snapshot.task(&id).is_none());
    }

    #[test]
    fn test_next_id_at_u64_max_does_not_overflow() {
        let mut snapshot = seed_snapshot();
        snapshot.tasks[0].id = u64::MAX.to_string();
        let id = snapshot.next_id();
        assert_eq!(id, format!("{}-1", u64::MAX));

        snapshot.tasks[1].id = id;
        assert_eq!(snapshot.next_id(), format!("{}-2", u64::MAX));
    }

    #[test]
    fn test_lookups() {
        let snapshot = seed_snapshot();
        assert_eq!(snapshot.employee("2").map(|e| e.name.as_str()), Some("Jane Smith"));
        assert_eq!(snapshot.project("2").map(|p| p.title.as_str()), Some("Mobile App Development"));
        assert!(snapshot.task("42").is_none());
    }

    #[test]
    fn test_format_date_and_parse() {
        let d = parse_date("2025-05-15").unwrap();
        assert_eq!(format_date(d), "May 15, 2025");
        assert!(parse_date("15/05/2025").is_none());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Implement Header Component", 10), "Implement…");
    }

    #[test]
    fn test_split_list() {
        let urls = split_list(&["a.png, ,b.png".to_string(), " c.png ".to_string()]);
        assert_eq!(urls, vec!["a.png", "b.png", "c.png"]);
    }

    #[test]
    fn test_split_unique_keeps_first_occurrence() {
        let ids = split_unique(&["1,1,2".to_string(), "2, 3".to_string()]);
        assert_eq!(ids, vec!["1", "2", "3"]);
    }
}
