//! Employee data structure.

use serde::{Deserialize, Serialize};

/// A team member who can be placed on project rosters and assigned tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub position: String,
    /// Unique across all employees.
    pub email: String,
    pub profile_image: String,
}
