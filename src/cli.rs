use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::io::reports::{DEFAULT_ID_COLUMN, DEFAULT_TEXT_COLUMN};
use crate::labels::Marker;

#[derive(Debug, Parser)]
#[command(
    name = "kira-gentest",
    version,
    about = "EGFR/ALK testing status from pathology report text"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    Run(RunArgs),
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    #[arg(long, help = "Report table (TSV, optionally .gz)")]
    pub input: PathBuf,

    #[arg(long, help = "Model directory (<marker>/<stage>/features.txt + model.json)")]
    pub models: PathBuf,

    #[arg(long, help = "Pattern file (JSON)")]
    pub patterns: PathBuf,

    #[arg(long)]
    pub out: PathBuf,

    #[arg(long, value_enum, default_value_t = MarkerArg::Both)]
    pub marker: MarkerArg,

    #[arg(
        long,
        default_value_t = false,
        help = "Keyword-negative reports are Not Reported without the classifier"
    )]
    pub keyword_gate: bool,

    #[arg(long, default_value_t = 0, help = "Number of threads (0 = auto)")]
    pub threads: usize,

    #[arg(long, default_value_t = false, help = "Also write records.json")]
    pub json: bool,

    #[arg(long, default_value = DEFAULT_ID_COLUMN)]
    pub id_column: String,

    #[arg(long, default_value = DEFAULT_TEXT_COLUMN)]
    pub text_column: String,

    #[arg(long, help = "Keep only the report ids listed in this file")]
    pub only_records: Option<PathBuf>,

    #[arg(long, help = "Keep only reports of the patient ids listed in this file")]
    pub only_patients: Option<PathBuf>,

    #[arg(long, help = "Drop reports of the <patient>_<tumor> cases listed in this file")]
    pub skip_cases: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    #[arg(long)]
    pub models: PathBuf,

    #[arg(long)]
    pub patterns: PathBuf,

    #[arg(long, value_enum, default_value_t = MarkerArg::Both)]
    pub marker: MarkerArg,

    #[arg(long, help = "Optional report table to parse")]
    pub input: Option<PathBuf>,

    #[arg(long, default_value = DEFAULT_ID_COLUMN)]
    pub id_column: String,

    #[arg(long, default_value = DEFAULT_TEXT_COLUMN)]
    pub text_column: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MarkerArg {
    Egfr,
    Alk,
    Both,
}

impl MarkerArg {
    pub fn markers(self) -> Vec<Marker> {
        match self {
            MarkerArg::Egfr => vec![Marker::Egfr],
            MarkerArg::Alk => vec![Marker::Alk],
            MarkerArg::Both => Marker::ALL.to_vec(),
        }
    }
}
