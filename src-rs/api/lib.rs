pub use crate::controller::{TaskOptions, ViewController, ViewSnapshot};

pub mod handlers;
pub mod server;
