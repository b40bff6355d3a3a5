use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;

use crate::backend::ExecuteTaskResponse;
use crate::helpers::{escape_html, local_datetime, truncate_chars};

pub const DEFAULT_URL: &str = "https://www.example.com";

const SEARCH_CONTENT_MARKERS: &[&str] = &["搜索结果", "search results"];
const SEARCH_TASK_MARKERS: &[&str] = &["搜索", "查找", "search", "find"];
const LOGIN_MARKERS: &[&str] = &["登录", "login", "log in", "sign in"];

const EXCERPT_CHARS: usize = 200;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    Search,
    Login,
    Generic,
}

impl TemplateKind {
    /// Search wins over login; both look at the returned content and the task text.
    pub fn select(task: &str, content: &str) -> Self {
        let markers = markers();
        if markers.search_content.is_match(content) || markers.search_task.is_match(task) {
            TemplateKind::Search
        } else if markers.login.is_match(content) || markers.login.is_match(task) {
            TemplateKind::Login
        } else {
            TemplateKind::Generic
        }
    }
}

struct Markers {
    search_content: Regex,
    search_task: Regex,
    login: Regex,
    search_prefix: Regex,
}

/// ASCII markers only match whole words; CJK markers match anywhere.
fn alternatives(markers: &[&str]) -> String {
    markers
        .iter()
        .map(|marker| {
            if marker.is_ascii() {
                format!(r"\b{}\b", regex::escape(marker))
            } else {
                regex::escape(marker)
            }
        })
        .collect::<Vec<_>>()
        .join("|")
}

fn markers() -> &'static Markers {
    static MARKERS: OnceLock<Markers> = OnceLock::new();
    MARKERS.get_or_init(|| {
        let build = |pattern: String| Regex::new(&pattern).expect("marker pattern");
        Markers {
            search_content: build(format!("(?i){}", alternatives(SEARCH_CONTENT_MARKERS))),
            search_task: build(format!("(?i){}", alternatives(SEARCH_TASK_MARKERS))),
            login: build(format!("(?i){}", alternatives(LOGIN_MARKERS))),
            search_prefix: build(format!("(?is)^.*({})", alternatives(SEARCH_TASK_MARKERS))),
        }
    })
}

/// Task text after the last search marker, e.g. "在百度搜索人工智能" gives "人工智能".
pub fn search_query(task: &str) -> String {
    markers().search_prefix.replace(task, "").trim().to_string()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Viewport {
    Idle,
    Loading { message: String },
    Search { query: String, url: String, excerpt: String },
    Login { title: Option<String>, at: DateTime<Utc> },
    Generic { title: Option<String>, url: String, content: Option<String> },
    Failed { message: String },
    Refreshed { url: String, at: DateTime<Utc> },
    Screenshot { image_url: String },
}

impl Viewport {
    pub fn loading(message: &str) -> Self {
        Viewport::Loading {
            message: message.to_string(),
        }
    }

    pub fn from_response(kind: TemplateKind, task: &str, resp: &ExecuteTaskResponse) -> Self {
        let url = resp.url().unwrap_or_default().to_string();
        match kind {
            TemplateKind::Search => Viewport::Search {
                query: search_query(task),
                url,
                excerpt: truncate_chars(resp.content().unwrap_or_default(), EXCERPT_CHARS).to_string(),
            },
            TemplateKind::Login => Viewport::Login {
                title: resp.title().map(str::to_string),
                at: Utc::now(),
            },
            TemplateKind::Generic => Viewport::Generic {
                title: resp.title().map(str::to_string),
                url,
                content: resp.content().map(str::to_string),
            },
        }
    }

    pub fn template(&self) -> Option<TemplateKind> {
        match self {
            Viewport::Search { .. } => Some(TemplateKind::Search),
            Viewport::Login { .. } => Some(TemplateKind::Login),
            Viewport::Generic { .. } => Some(TemplateKind::Generic),
            _ => None,
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, Viewport::Failed { .. })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Viewport::Idle => "idle",
            Viewport::Loading { .. } => "loading",
            Viewport::Search { .. } => "search",
            Viewport::Login { .. } => "login",
            Viewport::Generic { .. } => "generic",
            Viewport::Failed { .. } => "failed",
            Viewport::Refreshed { .. } => "refreshed",
            Viewport::Screenshot { .. } => "screenshot",
        }
    }

    pub fn render(&self) -> String {
        match self {
            Viewport::Idle => r#"<div class="text-center">
  <i class="fa fa-chrome text-gray-300 text-5xl mb-3"></i>
  <p class="text-gray-400">Waiting for a task...</p>
</div>"#
                .to_string(),
            Viewport::Loading { message } => format!(
                r#"<div class="text-center">
  <div class="inline-block animate-spin rounded-full h-8 w-8 border-b-2 border-primary mb-3"></div>
  <p class="text-gray-500">{}</p>
</div>"#,
                escape_html(message)
            ),
            Viewport::Search { query, url, excerpt } => format!(
                r##"<div class="bg-white rounded-lg shadow p-4 max-w-2xl mx-auto">
  <h2 class="text-xl font-semibold mb-2">Search results: {query}</h2>
  <div class="text-sm text-gray-500 mb-4">About 1,234 results</div>
  <div class="space-y-4">
    <div class="border-b border-gray-100 pb-4">
      <a href="#" class="text-primary hover:text-primary/80 font-medium">Related result</a>
      <div class="text-green-600 text-sm">{url}</div>
      <p class="text-sm text-gray-600 mt-1">{excerpt}...</p>
    </div>
    <div class="border-b border-gray-100 pb-4">
      <a href="#" class="text-primary hover:text-primary/80 font-medium">Related resources</a>
      <div class="text-green-600 text-sm">https://example.com/resource</div>
      <p class="text-sm text-gray-600 mt-1">A resource page related to the search, with details and download links...</p>
    </div>
  </div>
</div>"##,
                query = escape_html(query),
                url = escape_html(url),
                excerpt = escape_html(excerpt)
            ),
            Viewport::Login { title, at } => format!(
                r#"<div class="bg-white rounded-lg shadow-md p-6 max-w-md mx-auto text-center">
  <div class="w-16 h-16 bg-green-100 rounded-full flex items-center justify-center mx-auto mb-4">
    <i class="fa fa-check text-green-500 text-2xl"></i>
  </div>
  <h2 class="text-xl font-semibold mb-2">Signed in</h2>
  <p class="text-gray-600 mb-4">Browser automation signed in to the target site</p>
  <div class="bg-gray-50 rounded-lg p-4 text-left">
    <p class="text-sm text-gray-700">Page title: {}</p>
    <p class="text-sm text-gray-700 mt-1">Signed in at: {}</p>
  </div>
</div>"#,
                escape_html(title.as_deref().unwrap_or("User center")),
                local_datetime(*at)
            ),
            Viewport::Generic { title, url, content } => format!(
                r#"<div class="bg-white rounded-lg shadow-md p-6 max-w-4xl mx-auto">
  <h2 class="text-2xl font-bold mb-4">{}</h2>
  <div class="text-gray-700 mb-6">
    <p>Page visited through browser automation.</p>
    <p class="mt-2">URL: {}</p>
  </div>
  <div class="bg-gray-50 rounded-lg p-4">
    <p class="text-sm text-gray-700">Content preview:</p>
    <div class="mt-2 text-sm text-gray-600">{}</div>
  </div>
</div>"#,
                escape_html(title.as_deref().unwrap_or("Web page content")),
                escape_html(url),
                escape_html(content.as_deref().unwrap_or("Page content loaded"))
            ),
            Viewport::Failed { message } => format!(
                r#"<div class="bg-white rounded-lg shadow-md p-6 max-w-md mx-auto text-center">
  <div class="w-16 h-16 bg-red-100 rounded-full flex items-center justify-center mx-auto mb-4">
    <i class="fa fa-exclamation-triangle text-red-500 text-2xl"></i>
  </div>
  <h2 class="text-xl font-semibold mb-2">Task failed</h2>
  <p class="text-gray-600 mb-4">{}</p>
  <button id="retry-task" data-action="retry" class="bg-primary hover:bg-primary/90 text-white font-medium py-2 px-4 rounded-lg transition-all">
    Retry task
  </button>
</div>"#,
                escape_html(message)
            ),
            Viewport::Refreshed { url, at } => format!(
                r#"<div class="bg-white rounded-lg shadow-md p-6 max-w-4xl mx-auto">
  <h2 class="text-2xl font-bold mb-4">Page refreshed</h2>
  <div class="text-gray-700 mb-6">
    <p>URL: {}</p>
    <p class="mt-2">Refreshed at: {}</p>
  </div>
</div>"#,
                escape_html(url),
                local_datetime(*at)
            ),
            Viewport::Screenshot { image_url } => format!(
                r#"<div class="bg-white rounded-lg shadow-md p-4 max-w-3xl mx-auto">
  <h3 class="font-semibold mb-3">Screenshot preview</h3>
  <div class="bg-gray-100 rounded-lg p-2 flex justify-center">
    <img src="{}" alt="Browser screenshot" class="max-w-full rounded shadow">
  </div>
  <div class="mt-3 flex justify-end">
    <button class="text-sm bg-primary hover:bg-primary/90 text-white py-1 px-3 rounded transition-colors">
      Download screenshot
    </button>
  </div>
</div>"#,
                escape_html(image_url)
            ),
        }
    }
}
