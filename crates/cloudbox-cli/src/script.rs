//! Script lines: one driver command per line.
//!
//! Words are split on whitespace; double quotes group words into a single
//! argument (`create "test container 1"`). A `#` outside quotes starts a
//! comment. Blank and comment-only lines are skipped.

use std::path::PathBuf;

use anyhow::bail;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "script",
    no_binary_name = true,
    disable_help_flag = true,
    disable_version_flag = true
)]
struct ScriptLine {
    #[command(subcommand)]
    command: ScriptCommand,
}

#[derive(Subcommand, Clone, Debug, PartialEq, Eq)]
pub enum ScriptCommand {
    /// Create a container
    Create { container: String },
    /// Delete an empty container
    DeleteContainer { container: String },
    /// List containers
    List,
    /// List the objects of a container
    Objects { container: String },
    /// Show one object
    Get { container: String, object: String },
    /// Upload an object sized from a local file
    Put {
        container: String,
        object: String,
        file: PathBuf,
    },
    /// Upload a generated stream of `chunks` x `chunk_len` bytes
    PutStream {
        container: String,
        object: String,
        chunks: usize,
        chunk_len: usize,
    },
    /// Delete an object
    Rm { container: String, object: String },
    /// Download an object to a local file
    Download {
        container: String,
        object: String,
        dest: PathBuf,
        #[arg(long)]
        overwrite: bool,
    },
    /// Show usage metadata
    Stat,
}

/// Parse one script line. Returns `Ok(None)` for blank or comment lines.
pub fn parse_line(line: &str) -> anyhow::Result<Option<ScriptCommand>> {
    let words = split_words(line)?;
    if words.is_empty() {
        return Ok(None);
    }
    match ScriptLine::try_parse_from(&words) {
        Ok(parsed) => Ok(Some(parsed.command)),
        Err(e) => {
            let rendered = e.to_string();
            let first = rendered.lines().next().unwrap_or("invalid command");
            bail!("{}", first.trim_start_matches("error: "))
        }
    }
}

fn split_words(line: &str) -> anyhow::Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                in_word = true;
            }
            '#' if !in_quotes && !in_word => break,
            c if c.is_whitespace() && !in_quotes => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if in_quotes {
        bail!("unterminated quote");
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}
