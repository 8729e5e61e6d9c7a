//! Task data structure.
//!
//! A task belongs to exactly one project and is assigned to exactly one
//! employee drawn from that project's roster.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::fields::TaskStatus;

/// A unit of work shown on the status board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub project_id: String,
    pub assigned_employee_id: String,
    pub eta: NaiveDate,
    pub status: TaskStatus,
    #[serde(default)]
    pub reference_images: Vec<String>,
}
