use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "cloudbox",
    about = "In-memory container and object storage sessions",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Driver configuration file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Execute a script file, stopping at the first failing command
    Run(RunArgs),
    /// Read commands from stdin until EOF
    Shell,
    /// Run the built-in walkthrough
    Demo,
}

#[derive(Args)]
pub struct RunArgs {
    pub script: PathBuf,
}
