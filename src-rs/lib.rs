pub mod config;
pub mod controller;
pub mod error;
pub mod helpers;

#[path = "backend/lib.rs"]
pub mod backend;
#[path = "console/lib.rs"]
pub mod console;
#[path = "task/lib.rs"]
pub mod task;
#[path = "view/lib.rs"]
pub mod view;
#[path = "api/lib.rs"]
pub mod api;

pub use config::ConsoleConfig;
pub use controller::{ViewController, ViewSnapshot};
pub use error::{BackendError, ConsoleError};
