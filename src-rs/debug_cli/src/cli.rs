use std::env;
use std::path::PathBuf;
use std::time::Duration;

use browser_console_rs::helpers::{env_or, parse_on_off};
use browser_console_rs::ConsoleConfig;

use crate::models::CLIConfig;

pub fn parse_config() -> CLIConfig {
    let mut cfg = CLIConfig {
        console: ConsoleConfig::from_env(),
        export_dir: PathBuf::from(env_or("BROWSER_CONSOLE_EXPORT_DIR", ".".to_string())),
    };

    let args: Vec<String> = env::args().collect();
    let mut idx = 1;
    while idx < args.len() {
        match args[idx].as_str() {
            "--backend" => {
                if let Some(value) = args.get(idx + 1) {
                    cfg.console.backend_url = value.clone();
                    idx += 1;
                }
            }
            "--timeout" => {
                if let Some(value) = args.get(idx + 1) {
                    if let Ok(secs) = value.parse::<u64>() {
                        cfg.console.request_timeout = Duration::from_secs(secs);
                    }
                    idx += 1;
                }
            }
            "--export-dir" => {
                if let Some(value) = args.get(idx + 1) {
                    cfg.export_dir = PathBuf::from(value);
                    idx += 1;
                }
            }
            "--headless" => {
                cfg.console.headless = flag_value(&args, &mut idx);
            }
            "--slow" => {
                cfg.console.slow_mo = flag_value(&args, &mut idx);
            }
            _ => {}
        }
        idx += 1;
    }

    cfg
}

/// `--flag` alone means on; `--flag off` consumes the value.
fn flag_value(args: &[String], idx: &mut usize) -> bool {
    match args.get(*idx + 1).and_then(|value| parse_on_off(value)) {
        Some(flag) => {
            *idx += 1;
            flag
        }
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_flag_is_on_and_explicit_value_is_consumed() {
        let argv = args(&["bin", "--headless", "--slow", "off"]);
        let mut idx = 1;
        assert!(flag_value(&argv, &mut idx));
        assert_eq!(idx, 1);

        let mut idx = 2;
        assert!(!flag_value(&argv, &mut idx));
        assert_eq!(idx, 3);
    }
}
