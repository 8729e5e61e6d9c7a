//! Status board projection.
//!
//! The board partitions a flat task list into the five status buckets and
//! turns a relocation gesture into an `UpdateTaskStatus` command. Only the
//! status is durable: buckets are recomputed from the task list on every
//! render, so a card's position inside a bucket is never stored.

use crate::fields::TaskStatus;
use crate::store::Command;
use crate::task::Task;

/// A card position on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub bucket: TaskStatus,
    pub index: usize,
}

/// A card moved from `source` to `destination`. A missing destination means
/// the card was dropped outside every bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relocation {
    pub task_id: String,
    pub source: Slot,
    pub destination: Option<Slot>,
}

/// Tasks whose status equals `status`, in their original relative order.
pub fn bucket_of<'a>(tasks: &'a [Task], status: TaskStatus) -> Vec<&'a Task> {
    tasks.iter().filter(|t| t.status == status).collect()
}

/// All five buckets in column order.
pub fn columns(tasks: &[Task]) -> [(TaskStatus, Vec<&Task>); 5] {
    TaskStatus::ALL.map(|status| (status, bucket_of(tasks, status)))
}

/// The command a relocation should issue, if any.
pub fn on_relocate(relocation: &Relocation) -> Option<Command> {
    let destination = relocation.destination?;
    if destination == relocation.source {
        return None;
    }
    Some(Command::UpdateTaskStatus {
        id: relocation.task_id.clone(),
        status: destination.bucket,
    })
}

/// The neighbouring bucket to the left or right, if there is one.
pub fn step(status: TaskStatus, forward: bool) -> Option<TaskStatus> {
    let col = status.column();
    let next = if forward { col.checked_add(1)? } else { col.checked_sub(1)? };
    TaskStatus::ALL.get(next).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_snapshot;
    use crate::storage::MemoryStorage;
    use crate::store::Store;

    fn slot(bucket: TaskStatus, index: usize) -> Slot {
        Slot { bucket, index }
    }

    #[test]
    fn test_bucket_of_keeps_order() {
        let seed = seed_snapshot();
        let todo: Vec<&str> = bucket_of(&seed.tasks, TaskStatus::NeedToDo)
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(todo, vec!["2", "3"]);
        assert!(bucket_of(&seed.tasks, TaskStatus::ReOpen).is_empty());
    }

    #[test]
    fn test_columns_partition_every_task_once() {
        let seed = seed_snapshot();
        let cols = columns(&seed.tasks);
        let total: usize = cols.iter().map(|(_, tasks)| tasks.len()).sum();
        assert_eq!(total, seed.tasks.len());
        assert_eq!(cols[1].0, TaskStatus::InProgress);
        assert_eq!(cols[3].1[0].id, "4");
    }

    #[test]
    fn test_same_slot_issues_nothing() {
        let relocation = Relocation {
            task_id: "2".to_string(),
            source: slot(TaskStatus::NeedToDo, 0),
            destination: Some(slot(TaskStatus::NeedToDo, 0)),
        };
        assert_eq!(on_relocate(&relocation), None);
    }

    #[test]
    fn test_drop_outside_issues_nothing() {
        let relocation = Relocation {
            task_id: "2".to_string(),
            source: slot(TaskStatus::NeedToDo, 0),
            destination: None,
        };
        assert_eq!(on_relocate(&relocation), None);
    }

    #[test]
    fn test_reorder_within_bucket_keeps_status() {
        let relocation = Relocation {
            task_id: "3".to_string(),
            source: slot(TaskStatus::NeedToDo, 1),
            destination: Some(slot(TaskStatus::NeedToDo, 0)),
        };
        assert_eq!(
            on_relocate(&relocation),
            Some(Command::UpdateTaskStatus {
                id: "3".to_string(),
                status: TaskStatus::NeedToDo,
            })
        );
    }

    #[test]
    fn test_relocation_through_store() {
        let mut store = Store::open(Box::new(MemoryStorage::new()));
        let relocation = Relocation {
            task_id: "1".to_string(),
            source: slot(TaskStatus::InProgress, 0),
            destination: Some(slot(TaskStatus::NeedForTest, 3)),
        };
        let command = on_relocate(&relocation).unwrap();
        store.dispatch(command).unwrap();
        let moved = bucket_of(&store.snapshot().tasks, TaskStatus::NeedForTest);
        assert_eq!(moved.len(), 1);
        assert_eq!(moved[0].id, "1");
    }

    #[test]
    fn test_step_stops_at_edges() {
        assert_eq!(step(TaskStatus::NeedToDo, false), None);
        assert_eq!(step(TaskStatus::NeedToDo, true), Some(TaskStatus::InProgress));
        assert_eq!(step(TaskStatus::Completed, true), Some(TaskStatus::ReOpen));
        assert_eq!(step(TaskStatus::ReOpen, true), None);
    }
}
