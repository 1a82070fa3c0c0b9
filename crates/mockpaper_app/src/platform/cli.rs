use std::path::PathBuf;

use clap::Parser;
use mockpaper_core::Difficulty;

/// Upload a past exam paper and download freshly generated mock papers.
#[derive(Debug, Parser)]
#[command(name = "mockpaper", version, about)]
pub struct Cli {
    /// Source paper to upload (PDF or DOCX).
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Number of mock papers to generate; blank or invalid means 1.
    #[arg(short = 'n', long = "mocks")]
    pub mocks: Option<String>,

    /// Difficulty relative to the source paper: same, easier or harder.
    #[arg(short, long, default_value = "same")]
    pub difficulty: Difficulty,

    /// OpenAI API key forwarded to the service; omitted when blank.
    #[arg(long = "api-key")]
    pub api_key: Option<String>,

    /// Base URL of the generation service.
    #[arg(long, conflicts_with = "launch_url")]
    pub api: Option<String>,

    /// Page URL or query string carrying an `api=` parameter.
    #[arg(long = "launch-url")]
    pub launch_url: Option<String>,

    /// Directory the archive is saved to.
    #[arg(short, long, default_value = ".")]
    pub out: PathBuf,

    /// Only ask the service whether it is up.
    #[arg(long = "check-health")]
    pub check_health: bool,

    /// Log debug output to the terminal.
    #[arg(short, long)]
    pub verbose: bool,

    /// Also write the log to this file.
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}
