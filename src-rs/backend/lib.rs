pub mod client;
pub mod types;

pub use client::{HttpTaskBackend, TaskBackend};
pub use types::{BackendLogEntry, ExecuteTaskRequest, ExecuteTaskResponse};
