//! Enumerations and field types shared by the store, board and views.
//!
//! The task status set is closed: every task on the board sits in exactly one
//! of the five buckets defined here.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Task progress status, one per board bucket.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    #[value(name = "needToDo", alias = "need-to-do")]
    NeedToDo,
    #[value(name = "inProgress", alias = "in-progress")]
    InProgress,
    #[value(name = "needForTest", alias = "need-for-test")]
    NeedForTest,
    #[value(name = "completed")]
    Completed,
    #[value(name = "reOpen", alias = "re-open")]
    ReOpen,
}

impl TaskStatus {
    /// All statuses in board column order.
    pub const ALL: [TaskStatus; 5] = [
        TaskStatus::NeedToDo,
        TaskStatus::InProgress,
        TaskStatus::NeedForTest,
        TaskStatus::Completed,
        TaskStatus::ReOpen,
    ];

    /// Position of this status on the board, left to right.
    pub fn column(self) -> usize {
        match self {
            TaskStatus::NeedToDo => 0,
            TaskStatus::InProgress => 1,
            TaskStatus::NeedForTest => 2,
            TaskStatus::Completed => 3,
            TaskStatus::ReOpen => 4,
        }
    }

    /// The wire name used in the persisted document.
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::NeedToDo => "needToDo",
            TaskStatus::InProgress => "inProgress",
            TaskStatus::NeedForTest => "needForTest",
            TaskStatus::Completed => "completed",
            TaskStatus::ReOpen => "reOpen",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        for status in TaskStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
        let parsed: TaskStatus = serde_json::from_str("\"needForTest\"").unwrap();
        assert_eq!(parsed, TaskStatus::NeedForTest);
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        assert!(serde_json::from_str::<TaskStatus>("\"blocked\"").is_err());
    }

    #[test]
    fn test_column_order_matches_all() {
        for (i, status) in TaskStatus::ALL.iter().enumerate() {
            assert_eq!(status.column(), i);
        }
    }
}
