use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::helpers::{escape_html, local_time};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    #[default]
    Info,
    Success,
    Warning,
    Error,
    /// Any level string the backend sends that we do not recognise.
    #[serde(other)]
    Neutral,
}

impl LogLevel {
    pub fn css_class(&self) -> &'static str {
        match self {
            LogLevel::Info => "text-blue-400",
            LogLevel::Success => "text-green-400",
            LogLevel::Warning => "text-yellow-400",
            LogLevel::Error => "text-red-400",
            LogLevel::Neutral => "text-gray-300",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Success => "success",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
            LogLevel::Neutral => "log",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub level: LogLevel,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            message: message.into(),
            level,
        }
    }

    /// The line as it reads on screen, which is also what gets exported.
    pub fn text(&self) -> String {
        format!("{} {}", local_time(self.timestamp), self.message)
    }

    pub fn render(&self) -> String {
        format!(
            r#"<div class="flex items-start mb-1 {}"><span class="text-gray-500 mr-2 text-xs">{}</span><span>{}</span></div>"#,
            self.level.css_class(),
            local_time(self.timestamp),
            escape_html(&self.message)
        )
    }
}
