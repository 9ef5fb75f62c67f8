//! Merge request planning
//!
//! Pure functions that turn settings and a task into the request to file.

use crate::config::MergeSettings;
use crate::types::{BASE_BRANCH, NewMergeRequest, Task};

/// `[<group>] [<task>] <first> <last>`
pub fn merge_request_title(settings: &MergeSettings, task: &Task) -> String {
    format!(
        "[{}] [{}] {} {}",
        settings.group_number, task.name, settings.first_name, settings.last_name
    )
}

/// Group label plus `HW-<category>`
pub fn task_labels(settings: &MergeSettings, task: &Task) -> Vec<String> {
    vec![
        settings.group_number.clone(),
        format!("HW-{}", task.category()),
    ]
}

/// Build the merge request for `task`, assigned to `assignee_id`
pub fn plan_merge_request(settings: &MergeSettings, task: &Task, assignee_id: u64) -> NewMergeRequest {
    NewMergeRequest {
        source_branch: task.name.clone(),
        target_branch: BASE_BRANCH.to_string(),
        title: merge_request_title(settings, task),
        labels: task_labels(settings, task),
        assignee_id,
    }
}
