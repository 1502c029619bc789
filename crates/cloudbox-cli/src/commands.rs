use std::io::BufRead;

use anyhow::Context;
use cloudbox_storage::{DriverConfig, InMemoryStorageDriver, StorageDriver};
use colored::Colorize;
use tracing::debug;

use crate::cli::*;
use crate::script::parse_line;
use crate::session::{render, Session};

/// Walkthrough run by `cloudbox demo`.
const DEMO_SCRIPT: &str = r#"
# a fresh container reports no usage
create c1
stat
# 5 chunks of 10 bytes
put-stream c1 o1 5 10
stat
objects c1
rm c1 o1
delete-container c1
list
"#;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => DriverConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DriverConfig::default(),
    };
    let session = Session::new(InMemoryStorageDriver::with_config(config)?);
    debug!(provider = session.driver().name(), "session started");

    match cli.command {
        Command::Run(args) => {
            let text = std::fs::read_to_string(&args.script)
                .with_context(|| format!("reading script {}", args.script.display()))?;
            run_script(&session, &text, cli.format)
        }
        Command::Shell => cmd_shell(&session, cli.format),
        Command::Demo => run_script(&session, DEMO_SCRIPT, cli.format),
    }
}

/// Execute every line, stopping at the first failure.
fn run_script(session: &Session, text: &str, format: OutputFormat) -> anyhow::Result<()> {
    for (index, line) in text.lines().enumerate() {
        let lineno = index + 1;
        let Some(command) = parse_line(line).with_context(|| format!("line {lineno}"))? else {
            continue;
        };
        debug!(line = lineno, ?command, "executing");
        let outcome = session
            .execute(command)
            .with_context(|| format!("line {lineno}: {}", line.trim()))?;
        println!("{}", render(&outcome, format));
    }
    Ok(())
}

/// Execute stdin lines, reporting failures and carrying on.
fn cmd_shell(session: &Session, format: OutputFormat) -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("{} {e}", "error:".red().bold());
                continue;
            }
        };
        match session.execute(command) {
            Ok(outcome) => println!("{}", render(&outcome, format)),
            Err(e) => eprintln!("{} {e}", "error:".red().bold()),
        }
    }
    Ok(())
}
