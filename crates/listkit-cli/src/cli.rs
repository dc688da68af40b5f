use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "listkit",
    about = "Diff list snapshots and compute crash-free batch updates",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Diff two flat element lists
    Diff(DiffArgs),
    /// Reconcile two sectioned snapshots into a batch update
    Batch(BatchArgs),
    /// Print a batch configuration as TOML
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct DiffArgs {
    /// JSON array of elements before the update
    pub old: PathBuf,
    /// JSON array of elements after the update
    pub new: PathBuf,
    /// Report content updates as delete + insert pairs
    #[arg(long)]
    pub batch_updates: bool,
}

#[derive(Args)]
pub struct BatchArgs {
    /// JSON array of sections before the update
    pub old: PathBuf,
    /// JSON array of sections after the update
    pub new: PathBuf,
    /// TOML batch configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Show what every reconciliation rule changed
    #[arg(long)]
    pub explain: bool,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Print the strict configuration instead of the default
    #[arg(long)]
    pub strict: bool,
}
