pub mod page;
pub mod panels;
pub mod theme;
pub mod viewport;

pub use page::INDEX_HTML;
pub use panels::render_history;
pub use theme::Theme;
pub use viewport::{search_query, TemplateKind, Viewport, DEFAULT_URL};
