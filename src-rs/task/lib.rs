pub mod store;
pub mod types;

pub use store::TaskHistory;
pub use types::{TaskRecord, TaskStatus};
