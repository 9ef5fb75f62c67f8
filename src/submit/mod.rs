//! Merge request submission
//!
//! Split into a pure planning step (title, labels, branches) and an
//! execution step that gates, tests, and files the request.

mod execute;
mod plan;

pub use execute::{SubmitOptions, submit_merge_request};
pub use plan::{merge_request_title, plan_merge_request, task_labels};
