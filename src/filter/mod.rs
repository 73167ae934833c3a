use serde::Serialize;

use crate::routes::tasks::model::{Task, TaskPriority, TaskStatus};

/// Criteria for deriving the visible subset of a task list. An absent
/// status/priority means "no constraint on this dimension"; the wire-level
/// "all" sentinel never survives past `from_params`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TaskFilter {
    pub search: String,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
}

impl TaskFilter {
    /// Maps the query-string form onto a filter: a missing parameter or the
    /// literal "all" lifts the constraint, anything else must name a real
    /// status/priority value.
    pub fn from_params(
        search: Option<String>,
        status: Option<&str>,
        priority: Option<&str>,
    ) -> Result<Self, String> {
        let status = match status {
            None | Some("all") => None,
            Some(raw) => Some(
                TaskStatus::parse(raw).ok_or_else(|| format!("unknown status filter: {raw}"))?,
            ),
        };
        let priority = match priority {
            None | Some("all") => None,
            Some(raw) => Some(
                TaskPriority::parse(raw)
                    .ok_or_else(|| format!("unknown priority filter: {raw}"))?,
            ),
        };
        Ok(Self {
            search: search.unwrap_or_default(),
            status,
            priority,
        })
    }

    fn matches(&self, task: &Task) -> bool {
        self.matches_search(task)
            && self.status.is_none_or(|s| s == task.status)
            && self.priority.is_none_or(|p| p == task.priority)
    }

    fn matches_search(&self, task: &Task) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        task.title.to_lowercase().contains(&needle)
            || task
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle))
    }
}

/// Stable single-pass filter: tasks come back in their original relative
/// order, and a task survives only when all three criteria hold.
pub fn filter_tasks(tasks: Vec<Task>, filter: &TaskFilter) -> Vec<Task> {
    tasks.into_iter().filter(|t| filter.matches(t)).collect()
}

#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct TaskStats {
    pub total: usize,
    pub pending: usize,
    #[serde(rename = "inProgress")]
    pub in_progress: usize,
    pub completed: usize,
}

/// Per-status counts for the stats panel. Status is a closed three-valued
/// enum, so the three buckets always sum to `total`.
pub fn compute_stats(tasks: &[Task]) -> TaskStats {
    let mut stats = TaskStats {
        total: tasks.len(),
        ..TaskStats::default()
    };
    for task in tasks {
        match task.status {
            TaskStatus::Pending => stats.pending += 1,
            TaskStatus::InProgress => stats.in_progress += 1,
            TaskStatus::Completed => stats.completed += 1,
        }
    }
    stats
}
