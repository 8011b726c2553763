//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for deliberation reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Full transcript: both rounds for every role plus the decision
    Full,
    /// One summary line per case
    Verdict,
    /// JSON output
    Json,
}

impl From<OutputFormat> for jury_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => jury_domain::OutputFormat::Full,
            OutputFormat::Verdict => jury_domain::OutputFormat::Verdict,
            OutputFormat::Json => jury_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for claim-jury
#[derive(Parser, Debug)]
#[command(name = "claim-jury")]
#[command(author, version, about = "Multi-agent jury that checks claims against internal facts")]
#[command(long_about = r#"
claim-jury asks a panel of evaluator roles whether each external claim
faithfully represents its internal fact, or mutates it.

The process has two rounds per case:
1. Initial Judgments: every role judges the claim independently
2. Confrontation: every role sees all round-1 answers and judges again

The round-2 votes decide the case: Mutated, Faithful, or Ambiguous.

Configuration files are loaded from (in priority order):
1. CLAIM_JURY_* environment variables (e.g. CLAIM_JURY_MODEL__NAME)
2. --config <path>     Explicit config file
3. ./jury.toml         Project-level config
4. ~/.config/claim-jury/config.toml   Global config

Example:
  claim-jury Pioneer.csv --rows 3,7,10,12,14
  claim-jury data.csv --limit 5 -o verdict --fan-out
  claim-jury data.csv -m gpt-4o --temperature 0 -o json > results.json
"#)]
pub struct Cli {
    /// CSV dataset to evaluate (default: dataset.path from config)
    pub dataset: Option<PathBuf>,

    /// Positions of the rows to evaluate, counted after blank rows are dropped
    #[arg(long, value_name = "N,N,...", value_delimiter = ',', conflicts_with = "limit")]
    pub rows: Option<Vec<usize>>,

    /// Evaluate only the first N usable rows
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,

    /// Column holding the internal fact
    #[arg(long, value_name = "COLUMN")]
    pub internal_column: Option<String>,

    /// Column holding the external claim
    #[arg(long, value_name = "COLUMN")]
    pub external_column: Option<String>,

    /// Model every role is evaluated with
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Sampling temperature
    #[arg(long, value_name = "T")]
    pub temperature: Option<f32>,

    /// Leave each role's own answer out of its confrontation transcript
    #[arg(long)]
    pub exclude_self: bool,

    /// Query all roles of a round concurrently
    #[arg(long)]
    pub fan_out: bool,

    /// Number of cases deliberated at once
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Output format (default: output.format from config, else full)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Append every judgment and decision to this JSONL file
    #[arg(long, value_name = "PATH")]
    pub transcript_log: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
