//! Read-side projections for the dashboard and list screens.
//!
//! Integrity is enforced when entities are deleted, not when references are
//! read, so name lookups here degrade to a placeholder label instead of
//! failing.

use std::str::FromStr;

use crate::db::Snapshot;
use crate::employee::Employee;
use crate::fields::TaskStatus;
use crate::project::Project;
use crate::task::Task;

pub const UNASSIGNED: &str = "Unassigned";
pub const UNKNOWN_PROJECT: &str = "Unknown Project";

/// Session-local project selection. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ProjectFilter {
    #[default]
    All,
    Project(String),
}

impl ProjectFilter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            ProjectFilter::All => true,
            ProjectFilter::Project(id) => &task.project_id == id,
        }
    }

    /// Advance to the next project in `projects`, wrapping back to `All`.
    pub fn cycle(&self, projects: &[Project]) -> ProjectFilter {
        let next = match self {
            ProjectFilter::All => 0,
            ProjectFilter::Project(id) => match projects.iter().position(|p| &p.id == id) {
                Some(i) => i + 1,
                None => projects.len(),
            },
        };
        match projects.get(next) {
            Some(p) => ProjectFilter::Project(p.id.clone()),
            None => ProjectFilter::All,
        }
    }
}

impl FromStr for ProjectFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Ok(ProjectFilter::All)
        } else {
            Ok(ProjectFilter::Project(s.to_string()))
        }
    }
}

/// Tasks selected by `filter`, order kept.
pub fn filter_tasks(tasks: &[Task], filter: &ProjectFilter) -> Vec<Task> {
    tasks.iter().filter(|t| filter.matches(t)).cloned().collect()
}

/// Share of completed tasks as a rounded percentage; 0 for an empty list.
pub fn completion_percentage(tasks: &[Task]) -> u32 {
    let total = tasks.len();
    if total == 0 {
        return 0;
    }
    let done = tasks.iter().filter(|t| t.status == TaskStatus::Completed).count();
    (done as f64 * 100.0 / total as f64).round() as u32
}

pub fn employee_name<'a>(snapshot: &'a Snapshot, id: &str) -> &'a str {
    snapshot.employee(id).map_or(UNASSIGNED, |e| e.name.as_str())
}

pub fn project_title<'a>(snapshot: &'a Snapshot, id: &str) -> &'a str {
    snapshot.project(id).map_or(UNKNOWN_PROJECT, |p| p.title.as_str())
}

/// Employees on a project's roster. Ids that no longer resolve are skipped.
pub fn roster_members<'a>(snapshot: &'a Snapshot, project: &Project) -> Vec<&'a Employee> {
    project
        .assigned_employees
        .iter()
        .filter_map(|id| snapshot.employee(id))
        .collect()
}

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
    pub employees: usize,
    pub projects: usize,
    pub tasks: usize,
    pub completed: usize,
    pub completion_percentage: u32,
}

impl DashboardStats {
    /// Counts over the whole snapshot. The project filter narrows the board,
    /// not these numbers.
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        DashboardStats {
            employees: snapshot.employees.len(),
            projects: snapshot.projects.len(),
            tasks: snapshot.tasks.len(),
            completed: snapshot
                .tasks
                .iter()
                .filter(|t| t.status == TaskStatus::Completed)
                .count(),
            completion_percentage: completion_percentage(&snapshot.tasks),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_snapshot;

    #[test]
    fn test_completion_percentage_bounds() {
        assert_eq!(completion_percentage(&[]), 0);
        // Seed: 1 of 4 completed.
        assert_eq!(completion_percentage(&seed_snapshot().tasks), 25);
    }

    #[test]
    fn test_completion_percentage_rounds() {
        let mut tasks = seed_snapshot().tasks;
        tasks.truncate(3);
        tasks[0].status = TaskStatus::Completed;
        tasks[1].status = TaskStatus::Completed;
        assert_eq!(completion_percentage(&tasks), 67);
    }

    #[test]
    fn test_filter_tasks() {
        let seed = seed_snapshot();
        assert_eq!(filter_tasks(&seed.tasks, &ProjectFilter::All).len(), 4);
        let p2 = filter_tasks(&seed.tasks, &ProjectFilter::Project("2".to_string()));
        let ids: Vec<&str> = p2.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "4"]);
        assert!(filter_tasks(&seed.tasks, &"9".parse().unwrap()).is_empty());
    }

    #[test]
    fn test_filter_parse_and_cycle() {
        let seed = seed_snapshot();
        assert_eq!("ALL".parse::<ProjectFilter>().unwrap(), ProjectFilter::All);
        let first = ProjectFilter::All.cycle(&seed.projects);
        assert_eq!(first, ProjectFilter::Project("1".to_string()));
        let second = first.cycle(&seed.projects);
        assert_eq!(second, ProjectFilter::Project("2".to_string()));
        assert_eq!(second.cycle(&seed.projects), ProjectFilter::All);
        assert_eq!(
            ProjectFilter::Project("gone".to_string()).cycle(&seed.projects),
            ProjectFilter::All
        );
    }

    #[test]
    fn test_dangling_references_use_placeholders() {
        let seed = seed_snapshot();
        assert_eq!(employee_name(&seed, "3"), "Robert Johnson");
        assert_eq!(employee_name(&seed, "99"), UNASSIGNED);
        assert_eq!(project_title(&seed, "1"), "Website Redesign");
        assert_eq!(project_title(&seed, "99"), UNKNOWN_PROJECT);
    }

    #[test]
    fn test_roster_members_skip_missing() {
        let mut seed = seed_snapshot();
        seed.projects[1].assigned_employees.push("99".to_string());
        let project = seed.projects[1].clone();
        let names: Vec<&str> = roster_members(&seed, &project)
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["John Doe", "Robert Johnson"]);
    }

    #[test]
    fn test_dashboard_stats() {
        let stats = DashboardStats::from_snapshot(&seed_snapshot());
        assert_eq!(
            stats,
            DashboardStats {
                employees: 3,
                projects: 2,
                tasks: 4,
                completed: 1,
                completion_percentage: 25,
            }
        );
    }
}
