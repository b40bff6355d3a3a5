use std::time::Duration;

use crate::helpers::{env_bool, env_opt, env_or, env_u64};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Clone, Debug)]
pub struct ConsoleConfig {
    pub port: u16,
    pub backend_url: String,
    pub request_timeout: Duration,
    pub refresh_delay: Duration,
    pub screenshot_delay: Duration,
    pub headless: bool,
    pub slow_mo: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            request_timeout: Duration::from_secs(120),
            refresh_delay: Duration::from_millis(1500),
            screenshot_delay: Duration::from_millis(1000),
            headless: true,
            slow_mo: false,
        }
    }
}

impl ConsoleConfig {
    /// Defaults overridden by `PORT` and the `BROWSER_CONSOLE_*` variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let port = env_opt("PORT")
            .and_then(|raw| raw.trim().parse::<u16>().ok())
            .unwrap_or(defaults.port);

        Self {
            port,
            backend_url: env_or("BROWSER_CONSOLE_BACKEND_URL", defaults.backend_url),
            request_timeout: Duration::from_secs(env_u64(
                "BROWSER_CONSOLE_TIMEOUT_SECS",
                defaults.request_timeout.as_secs(),
            )),
            refresh_delay: Duration::from_millis(env_u64(
                "BROWSER_CONSOLE_REFRESH_DELAY_MS",
                defaults.refresh_delay.as_millis() as u64,
            )),
            screenshot_delay: Duration::from_millis(env_u64(
                "BROWSER_CONSOLE_SCREENSHOT_DELAY_MS",
                defaults.screenshot_delay.as_millis() as u64,
            )),
            headless: env_bool("BROWSER_CONSOLE_HEADLESS", defaults.headless),
            slow_mo: env_bool("BROWSER_CONSOLE_SLOW_MO", defaults.slow_mo),
        }
    }

    pub fn execute_url(&self) -> String {
        format!("{}/api/execute-task", self.backend_url.trim_end_matches('/'))
    }
}
