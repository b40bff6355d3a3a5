use thiserror::Error;

use crate::task::TaskStatus;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("http {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response: {0}")]
    Decode(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConsoleError {
    #[error("Please enter a task description")]
    EmptyTask,

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("Task execution failed, check the log for details")]
    TaskFailed,

    #[error("task not found: {0}")]
    UnknownTask(String),

    #[error("task {id} cannot move from {from} to {to}")]
    InvalidTransition {
        id: String,
        from: TaskStatus,
        to: TaskStatus,
    },

    #[error("no history entry at index {0}")]
    HistoryIndex(usize),

    #[error("nothing to retry")]
    NothingToRetry,
}
