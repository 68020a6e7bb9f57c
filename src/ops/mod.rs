pub mod group_ops;
pub mod reorder;
pub mod task_ops;

use crate::model::group::GroupId;
use crate::model::task::TaskId;

/// Error type for collection operations addressed by id
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("group not found: {0}")]
    GroupNotFound(GroupId),
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    #[error("task is already in a group: {0}")]
    TaskAlreadyAttached(TaskId),
    #[error("invalid position: {0}")]
    InvalidPosition(String),
}
