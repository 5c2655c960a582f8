//! Task status breakdown, completion rate and overdue count for one project.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::task::{TaskRecord, TaskStatus};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub todo: u32,
    pub in_progress: u32,
    pub completed: u32,
    pub hold: u32,
    pub review: u32,
    pub total_tasks: u32,
    /// Integer percentage, rounded half up.
    pub completion_rate: u32,
    pub overdue_tasks: u32,
}

impl TaskStats {
    /// `start_of_today` is the overdue cut-off: a task due any time today is
    /// not yet overdue.
    pub fn compute(tasks: &[TaskRecord], start_of_today: DateTime<Utc>) -> Self {
        let mut stats = Self::default();

        for task in tasks {
            match task.status {
                TaskStatus::ToDo => stats.todo += 1,
                TaskStatus::InProgress => stats.in_progress += 1,
                TaskStatus::Completed => stats.completed += 1,
                TaskStatus::Hold => stats.hold += 1,
                TaskStatus::Review => stats.review += 1,
            }

            let overdue = task.status != TaskStatus::Completed
                && task.end_date.is_some_and(|due| due < start_of_today);
            if overdue {
                stats.overdue_tasks += 1;
            }
        }

        stats.total_tasks =
            stats.todo + stats.in_progress + stats.completed + stats.hold + stats.review;
        stats.completion_rate = completion_rate(stats.completed, stats.total_tasks);
        stats
    }
}

fn completion_rate(completed: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let (completed, total) = (u64::from(completed), u64::from(total));
    // round(completed / total * 100), half up, in integer arithmetic
    ((completed * 200 + total) / (total * 2)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use uuid::Uuid;

    fn today() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 0, 0, 0).unwrap()
    }

    fn task(status: TaskStatus, end_date: Option<DateTime<Utc>>) -> TaskRecord {
        TaskRecord {
            id: Uuid::new_v4(),
            project_id: Uuid::nil(),
            status,
            end_date,
        }
    }

    #[test]
    fn counts_by_status_and_rate() {
        let tasks = vec![
            task(TaskStatus::ToDo, None),
            task(TaskStatus::ToDo, None),
            task(TaskStatus::InProgress, None),
            task(TaskStatus::Completed, None),
            task(TaskStatus::Completed, None),
            task(TaskStatus::Completed, None),
        ];
        let stats = TaskStats::compute(&tasks, today());
        assert_eq!(stats.todo, 2);
        assert_eq!(stats.in_progress, 1);
        assert_eq!(stats.completed, 3);
        assert_eq!(stats.hold, 0);
        assert_eq!(stats.review, 0);
        assert_eq!(stats.total_tasks, 6);
        assert_eq!(stats.completion_rate, 50);
    }

    #[test]
    fn empty_project_has_zero_rate() {
        let stats = TaskStats::compute(&[], today());
        assert_eq!(stats.total_tasks, 0);
        assert_eq!(stats.completion_rate, 0);
        assert_eq!(stats.overdue_tasks, 0);
    }

    #[test]
    fn completion_rate_rounds_half_up_and_stays_bounded() {
        assert_eq!(completion_rate(1, 3), 33);
        assert_eq!(completion_rate(2, 3), 67);
        assert_eq!(completion_rate(1, 8), 13); // 12.5
        assert_eq!(completion_rate(5, 5), 100);
        for total in 1..40 {
            for completed in 0..=total {
                assert!(completion_rate(completed, total) <= 100);
            }
        }
    }

    #[test]
    fn overdue_excludes_completed_and_due_today() {
        let yesterday = today() - Duration::hours(1);
        let later_today = today() + Duration::hours(10);

        let held = TaskStats::compute(&[task(TaskStatus::Hold, Some(yesterday))], today());
        assert_eq!(held.overdue_tasks, 1);

        let done = TaskStats::compute(&[task(TaskStatus::Completed, Some(yesterday))], today());
        assert_eq!(done.overdue_tasks, 0);

        let due_today = TaskStats::compute(
            &[
                task(TaskStatus::InProgress, Some(today())),
                task(TaskStatus::Review, Some(later_today)),
                task(TaskStatus::ToDo, None),
            ],
            today(),
        );
        assert_eq!(due_today.overdue_tasks, 0);
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(TaskStats::compute(&[], today())).unwrap();
        assert!(json.get("inProgress").is_some());
        assert!(json.get("completionRate").is_some());
        assert!(json.get("overdueTasks").is_some());
        assert!(json.get("totalTasks").is_some());
    }
}
