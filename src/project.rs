//! Project data structure.
//!
//! A project owns a date range and a roster of employee ids. Tasks reference
//! projects by id, and task assignees must come from the roster.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A project with its schedule and assignment roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub logo: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Employee ids assigned to this project. Order carries no meaning.
    pub assigned_employees: Vec<String>,
}

impl Project {
    /// Whether the given employee is on this project's roster.
    pub fn has_member(&self, employee_id: &str) -> bool {
        self.assigned_employees.iter().any(|id| id == employee_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_wire_layout() {
        let json = r#"{
            "id": "9",
            "title": "Intranet",
            "description": "Internal portal",
            "logo": "https://example.com/logo.png",
            "startDate": "2025-01-01",
            "endDate": "2025-02-01",
            "assignedEmployees": ["1", "3"]
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.start_date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert!(project.has_member("3"));
        assert!(!project.has_member("2"));

        let back = serde_json::to_value(&project).unwrap();
        assert_eq!(back["endDate"], "2025-02-01");
        assert_eq!(back["assignedEmployees"][0], "1");
    }
}
