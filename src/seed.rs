//! The fixed dataset used when no persisted snapshot can be loaded.

use chrono::NaiveDate;

use crate::db::Snapshot;
use crate::employee::Employee;
use crate::fields::TaskStatus;
use crate::project::Project;
use crate::task::Task;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    // Literal calendar dates below are all valid.
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn employee(id: &str, name: &str, position: &str, email: &str, image: u32) -> Employee {
    Employee {
        id: id.to_string(),
        name: name.to_string(),
        position: position.to_string(),
        email: email.to_string(),
        profile_image: picsum(image),
    }
}

fn picsum(image: u32) -> String {
    format!("https://picsum.photos/id/{image}/200")
}

/// Three employees, two projects and four tasks.
pub fn seed_snapshot() -> Snapshot {
    let employees = vec![
        employee("1", "John Doe", "Frontend Developer", "john.doe@company.com", 1),
        employee("2", "Jane Smith", "UX Designer", "jane.smith@company.com", 2),
        employee("3", "Robert Johnson", "Backend Developer", "robert.johnson@company.com", 3),
    ];

    let projects = vec![
        Project {
            id: "1".to_string(),
            title: "Website Redesign".to_string(),
            description: "Redesigning the company website with a modern UI/UX".to_string(),
            logo: picsum(4),
            start_date: date(2025, 5, 1),
            end_date: date(2025, 6, 30),
            assigned_employees: vec!["1".to_string(), "2".to_string()],
        },
        Project {
            id: "2".to_string(),
            title: "Mobile App Development".to_string(),
            description: "Building a new mobile app for customer engagement".to_string(),
            logo: picsum(5),
            start_date: date(2025, 5, 15),
            end_date: date(2025, 8, 15),
            assigned_employees: vec!["1".to_string(), "3".to_string()],
        },
    ];

    let tasks = vec![
        Task {
            id: "1".to_string(),
            title: "Design Homepage Mockup".to_string(),
            description: "Create wireframes and mockups for the new homepage".to_string(),
            project_id: "1".to_string(),
            assigned_employee_id: "2".to_string(),
            eta: date(2025, 5, 15),
            status: TaskStatus::InProgress,
            reference_images: vec![picsum(21)],
        },
        Task {
            id: "2".to_string(),
            title: "Implement Header Component".to_string(),
            description: "Develop the responsive header component based on design".to_string(),
            project_id: "1".to_string(),
            assigned_employee_id: "1".to_string(),
            eta: date(2025, 5, 20),
            status: TaskStatus::NeedToDo,
            reference_images: vec![picsum(22)],
        },
        Task {
            id: "3".to_string(),
            title: "Setup Backend API".to_string(),
            description: "Create API endpoints for the mobile app".to_string(),
            project_id: "2".to_string(),
            assigned_employee_id: "3".to_string(),
            eta: date(2025, 6, 1),
            status: TaskStatus::NeedToDo,
            reference_images: vec![picsum(23)],
        },
        Task {
            id: "4".to_string(),
            title: "Design User Profile Screen".to_string(),
            description: "Create mockup for the user profile screen".to_string(),
            project_id: "2".to_string(),
            assigned_employee_id: "1".to_string(),
            eta: date(2025, 5, 25),
            status: TaskStatus::Completed,
            reference_images: vec![picsum(24)],
        },
    ];

    Snapshot { employees, projects, tasks }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_shape() {
        let seed = seed_snapshot();
        assert_eq!(seed.employees.len(), 3);
        assert_eq!(seed.projects.len(), 2);
        assert_eq!(seed.tasks.len(), 4);
        assert_eq!(seed.projects[0].end_date, date(2025, 6, 30));
        assert_eq!(seed.tasks[3].reference_images, vec!["https://picsum.photos/id/24/200"]);
    }

    #[test]
    fn test_seed_is_consistent() {
        let seed = seed_snapshot();
        for t in &seed.tasks {
            let project = seed.project(&t.project_id).expect("task project exists");
            assert!(project.has_member(&t.assigned_employee_id));
        }
        for p in &seed.projects {
            for id in &p.assigned_employees {
                assert!(seed.employee(id).is_some());
            }
        }
    }
}
