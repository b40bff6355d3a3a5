use super::types::{LogEntry, LogLevel};

pub const CONSOLE_HEADER: &str = "=== Console Log ===";

#[derive(Clone, Debug)]
pub enum ConsoleLine {
    Header,
    Entry(LogEntry),
}

impl ConsoleLine {
    pub fn text(&self) -> String {
        match self {
            ConsoleLine::Header => CONSOLE_HEADER.to_string(),
            ConsoleLine::Entry(entry) => entry.text(),
        }
    }

    pub fn render(&self) -> String {
        match self {
            ConsoleLine::Header => format!(r#"<div class="text-gray-400">{}</div>"#, CONSOLE_HEADER),
            ConsoleLine::Entry(entry) => entry.render(),
        }
    }
}

/// Append-only console. Clearing resets it to the header line.
#[derive(Clone, Debug)]
pub struct ConsoleLog {
    lines: Vec<ConsoleLine>,
    clears: u64,
}

impl Default for ConsoleLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleLog {
    pub fn new() -> Self {
        Self {
            lines: vec![ConsoleLine::Header],
            clears: 0,
        }
    }

    pub fn push(&mut self, level: LogLevel, message: impl Into<String>) -> LogEntry {
        let entry = LogEntry::new(level, message);
        self.lines.push(ConsoleLine::Entry(entry.clone()));
        entry
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.lines.push(ConsoleLine::Header);
        self.clears += 1;
    }

    /// Bumped on every clear so readers can tell a reset from plain growth.
    pub fn clears(&self) -> u64 {
        self.clears
    }

    pub fn lines(&self) -> &[ConsoleLine] {
        &self.lines
    }

    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.lines.iter().filter_map(|line| match line {
            ConsoleLine::Entry(entry) => Some(entry),
            ConsoleLine::Header => None,
        })
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn export_text(&self) -> String {
        self.lines
            .iter()
            .map(ConsoleLine::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn render(&self) -> String {
        self.lines.iter().map(ConsoleLine::render).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_leaves_only_header() {
        let mut log = ConsoleLog::new();
        log.push(LogLevel::Info, "one");
        log.push(LogLevel::Error, "two");
        assert_eq!(log.len(), 3);

        log.clear();
        assert_eq!(log.len(), 1);
        assert!(matches!(log.lines()[0], ConsoleLine::Header));
        assert_eq!(log.export_text(), CONSOLE_HEADER);

        log.clear();
        assert_eq!(log.export_text(), CONSOLE_HEADER);
    }

    #[test]
    fn export_joins_visible_lines_in_order() {
        let mut log = ConsoleLog::new();
        log.push(LogLevel::Info, "first");
        log.push(LogLevel::Success, "second");

        let text = log.export_text();
        let lines: Vec<&str> = text.split('\n').collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CONSOLE_HEADER);
        assert!(lines[1].ends_with(" first"));
        assert!(lines[2].ends_with(" second"));
    }

    #[test]
    fn entries_skip_header() {
        let mut log = ConsoleLog::new();
        log.push(LogLevel::Warning, "careful");
        let levels: Vec<LogLevel> = log.entries().map(|entry| entry.level).collect();
        assert_eq!(levels, vec![LogLevel::Warning]);
    }
}
