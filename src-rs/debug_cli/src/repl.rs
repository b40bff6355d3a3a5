use std::sync::Arc;

use browser_console_rs::controller::TaskOptions;
use browser_console_rs::helpers::parse_on_off;
use browser_console_rs::{ConsoleError, ViewController};
use tokio::io::{self, AsyncBufReadExt, BufReader};

use crate::models::CLIConfig;
use crate::render;

pub struct REPL {
    pub config: CLIConfig,
    pub controller: Arc<ViewController>,
    printed: usize,
    seen_clears: u64,
}

impl REPL {
    pub fn new(config: CLIConfig, controller: Arc<ViewController>) -> Self {
        Self {
            config,
            controller,
            printed: 0,
            seen_clears: 0,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        render::banner(&self.config);
        self.flush_console();

        let mut lines = BufReader::new(io::stdin()).lines();
        loop {
            render::prompt();
            let Some(line) = lines.next_line().await? else {
                break;
            };
            let line = line.trim().to_string();
            if line.is_empty() {
                continue;
            }
            if line.starts_with('/') {
                if self.handle_command(&line).await {
                    break;
                }
            } else {
                self.controller.set_input(&line);
                self.send(&line).await;
            }
            self.flush_console();
        }
        Ok(())
    }

    async fn handle_command(&mut self, line: &str) -> bool {
        let mut parts = line.splitn(2, ' ');
        let cmd = parts.next().unwrap_or("").trim_start_matches('/');
        let rest = parts.next().unwrap_or("").trim();
        match cmd {
            "exit" | "quit" => return true,
            "help" => render::help(),
            "run" => {
                let input = self.controller.snapshot().input;
                self.send(&input).await;
            }
            "retry" => match self.controller.retry().await {
                Ok(_) => render::viewport(&self.controller.snapshot()),
                Err(ConsoleError::NothingToRetry) => render::info("nothing to retry"),
                Err(_) => render::viewport(&self.controller.snapshot()),
            },
            "history" => render::history(&self.controller.snapshot().history),
            "pick" => match rest.parse::<usize>() {
                Ok(index) => match self.controller.select_history(index) {
                    Ok(task) => render::info(&format!("input: {}", task)),
                    Err(err) => render::error(&err.to_string()),
                },
                Err(_) => render::error("usage: /pick <n>"),
            },
            "view" => render::viewport(&self.controller.snapshot()),
            "refresh" => {
                self.controller.refresh().await;
                render::viewport(&self.controller.snapshot());
            }
            "screenshot" => {
                self.controller.screenshot().await;
                render::viewport(&self.controller.snapshot());
            }
            "clear" => self.controller.clear_log(),
            "export" => self.export(),
            "theme" => {
                self.controller.toggle_theme();
            }
            "headless" => self.update_option(rest, |opts, flag| opts.headless = flag, |opts| opts.headless),
            "slow" => self.update_option(rest, |opts, flag| opts.slow_mo = flag, |opts| opts.slow_mo),
            "reset" => {
                self.controller.reset_all();
                render::info("view reset");
            }
            "config" => render::config(&self.config, &self.controller.snapshot()),
            _ => render::info("unknown command, type /help"),
        }
        false
    }

    async fn send(&mut self, task: &str) {
        // failures are already on the console and in the viewport
        if let Err(ConsoleError::EmptyTask) = self.controller.submit(task).await {
            return;
        }
        self.flush_console();
        render::viewport(&self.controller.snapshot());
    }

    fn update_option(
        &mut self,
        rest: &str,
        set: impl Fn(&mut TaskOptions, bool),
        get: impl Fn(&TaskOptions) -> bool,
    ) {
        let mut options = self.controller.options();
        let flag = if rest.is_empty() {
            !get(&options)
        } else if let Some(flag) = parse_on_off(rest) {
            flag
        } else {
            render::error("expected on or off");
            return;
        };
        set(&mut options, flag);
        self.controller.set_options(options);
        render::info(&format!("headless: {}  slow motion: {}", options.headless, options.slow_mo));
    }

    fn export(&self) {
        let export = self.controller.export_log();
        let path = self.config.export_dir.join(&export.file_name);
        match std::fs::write(&path, export.content) {
            Ok(()) => render::info(&format!("log written to {}", path.display())),
            Err(err) => render::error(&format!("writing {}: {}", path.display(), err)),
        }
    }

    /// Prints console lines added since the last call. A clear restarts from the header.
    fn flush_console(&mut self) {
        let (printed, seen_clears) = (self.printed, self.seen_clears);
        let (total, clears) = self.controller.with_state(|state| {
            let lines = state.console.lines();
            let clears = state.console.clears();
            let start = if clears != seen_clears { 0 } else { printed.min(lines.len()) };
            render::console_lines(&lines[start..]);
            (lines.len(), clears)
        });
        self.printed = total;
        self.seen_clears = clears;
    }
}
