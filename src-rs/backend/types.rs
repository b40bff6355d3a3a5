use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::console::LogLevel;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteTaskRequest {
    pub task: String,
    pub headless: bool,
    pub slow_mo: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendLogEntry {
    pub message: String,
    #[serde(rename = "type", default, deserialize_with = "lenient_level")]
    pub level: LogLevel,
}

/// A missing `type` is info; null or anything that is not a known level name renders neutral.
fn lenient_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        value @ Value::String(_) => serde_json::from_value(value).unwrap_or(LogLevel::Neutral),
        _ => LogLevel::Neutral,
    })
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteTaskResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub logs: Vec<BackendLogEntry>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl ExecuteTaskResponse {
    /// Empty strings count as absent, the way the page treats them.
    pub fn url(&self) -> Option<&str> {
        non_empty(self.url.as_deref())
    }

    pub fn title(&self) -> Option<&str> {
        non_empty(self.title.as_deref())
    }

    pub fn content(&self) -> Option<&str> {
        non_empty(self.content.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
