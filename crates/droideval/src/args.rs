use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use droideval_core::Shots;

#[derive(Parser, Debug)]
#[command(version, about = "Benchmark a language model on DroidTask UI-element selection", long_about = None)]
pub struct Args {
    /// DroidTask corpus root (overrides config)
    #[arg(short, long)]
    pub corpus: Option<PathBuf>,

    /// JSON config file
    #[arg(long, default_value = "droideval.json")]
    pub config: PathBuf,

    /// Scoring mode
    #[arg(value_enum, short, long, default_value_t = Mode::Full)]
    pub mode: Mode,

    /// Number of worked examples in the prompt
    #[arg(value_enum, short, long, default_value_t = ShotsArg::One)]
    pub shots: ShotsArg,

    /// Evaluate only the first N records (overrides config)
    #[arg(short = 'n', long, conflicts_with = "all")]
    pub limit: Option<usize>,

    /// Evaluate every record
    #[arg(long, default_value_t = false)]
    pub all: bool,

    /// Model backend: openai or ollama (overrides config)
    #[arg(short, long)]
    pub backend: Option<String>,

    /// Model identifier (overrides config)
    #[arg(long)]
    pub model: Option<String>,

    /// Endpoint base URL (overrides OPENAI_BASE_URL and config)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Request timeout in seconds (overrides config)
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Abort the run on the first failed model call
    #[arg(long, default_value_t = false)]
    pub fail_fast: bool,

    /// Print prompts instead of querying the model
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Write the effective config to this path and exit
    #[arg(long)]
    pub save_config: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Element id and input text
    Full,
    /// Element id only, navigation steps only
    Index,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShotsArg {
    Zero,
    One,
    Two,
}

impl From<ShotsArg> for Shots {
    fn from(s: ShotsArg) -> Self {
        match s {
            ShotsArg::Zero => Shots::Zero,
            ShotsArg::One => Shots::One,
            ShotsArg::Two => Shots::Two,
        }
    }
}
