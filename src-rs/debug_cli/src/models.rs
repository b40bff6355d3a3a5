use std::path::PathBuf;

use browser_console_rs::ConsoleConfig;

#[derive(Clone, Debug)]
pub struct CLIConfig {
    pub console: ConsoleConfig,
    pub export_dir: PathBuf,
}
