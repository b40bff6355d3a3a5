use std::io::{self, Write};

use browser_console_rs::console::ConsoleLine;
use browser_console_rs::helpers::local_time;
use browser_console_rs::task::TaskRecord;
use browser_console_rs::ViewSnapshot;

use crate::models::CLIConfig;

pub fn banner(cfg: &CLIConfig) {
    println!("Browser Console Debug CLI");
    println!("Backend: {}", cfg.console.execute_url());
    println!(
        "Headless: {}  Slow motion: {}",
        cfg.console.headless, cfg.console.slow_mo
    );
    println!("Type a task to run it, or /help for commands.");
}

pub fn prompt() {
    print!("> ");
    let _ = io::stdout().flush();
}

pub fn help() {
    println!("Commands:");
    println!("  <task text>            Run a task");
    println!("  /help                  Show commands");
    println!("  /exit | /quit          Exit");
    println!("  /retry                 Retry the failed task");
    println!("  /history               Show task history");
    println!("  /pick <n>              Copy history entry n into the input box");
    println!("  /run                   Run the text in the input box");
    println!("  /view                  Print the viewport markup");
    println!("  /refresh               Simulate a page refresh");
    println!("  /screenshot            Simulate a screenshot");
    println!("  /clear                 Clear the console");
    println!("  /export                Write the console to a log file");
    println!("  /theme                 Toggle light/dark theme");
    println!("  /headless [on|off]     Toggle headless mode");
    println!("  /slow [on|off]         Toggle slow motion");
    println!("  /reset                 Reset input, console and viewport");
    println!("  /config                Show current config");
}

pub fn console_lines(lines: &[ConsoleLine]) {
    for line in lines {
        match line {
            ConsoleLine::Header => println!("{}", line.text()),
            ConsoleLine::Entry(entry) => println!(
                "{} [{}] {}",
                local_time(entry.timestamp),
                entry.level,
                entry.message
            ),
        }
    }
}

pub fn history(records: &[TaskRecord]) {
    if records.is_empty() {
        println!("no history");
        return;
    }
    for (idx, record) in records.iter().enumerate() {
        println!(
            "{:>3}  [{}] {} {}",
            idx,
            record.status,
            local_time(record.timestamp),
            record.name
        );
    }
}

pub fn viewport(view: &ViewSnapshot) {
    println!("url: {}", view.url);
    println!("viewport ({}):", view.viewport);
    println!("{}", view.viewport_html);
    if view.retry_available {
        println!("(type /retry to run the task again)");
    }
}

pub fn config(cfg: &CLIConfig, view: &ViewSnapshot) {
    println!("config:");
    println!("  backend: {}", cfg.console.execute_url());
    println!("  timeout: {}s", cfg.console.request_timeout.as_secs());
    println!("  headless: {}", view.headless);
    println!("  slow motion: {}", view.slow_mo);
    println!("  theme: {:?}", view.theme);
    println!("  export dir: {}", cfg.export_dir.display());
}

pub fn info(msg: &str) {
    println!("{}", msg);
}

pub fn error(msg: &str) {
    eprintln!("error: {}", msg);
}
