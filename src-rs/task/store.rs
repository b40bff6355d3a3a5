use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;

use super::types::{TaskRecord, TaskStatus};
use crate::error::ConsoleError;

static COUNTER: AtomicUsize = AtomicUsize::new(1);

/// Session task history, newest first. Records are never removed.
#[derive(Debug, Default)]
pub struct TaskHistory {
    records: VecDeque<TaskRecord>,
}

impl TaskHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, name: &str) -> TaskRecord {
        let record = TaskRecord {
            id: next_id(),
            name: name.to_string(),
            timestamp: Utc::now(),
            status: TaskStatus::Running,
        };
        self.records.push_front(record.clone());
        record
    }

    pub fn finish(&mut self, id: &str, status: TaskStatus) -> Result<TaskRecord, ConsoleError> {
        let record = self
            .records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or_else(|| ConsoleError::UnknownTask(id.to_string()))?;

        if record.status != TaskStatus::Running || !status.is_terminal() {
            return Err(ConsoleError::InvalidTransition {
                id: id.to_string(),
                from: record.status,
                to: status,
            });
        }
        record.status = status;
        Ok(record.clone())
    }

    pub fn get(&self, index: usize) -> Option<&TaskRecord> {
        self.records.get(index)
    }

    pub fn newest(&self) -> Option<&TaskRecord> {
        self.records.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TaskRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn next_id() -> String {
    let count = COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("task_{}_{}", Utc::now().timestamp_millis(), count)
}
