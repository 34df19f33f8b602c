//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::{
    check::CheckArgs, completions::CompletionsArgs, regions::RegionsArgs, register::RegisterArgs,
};

#[derive(Parser)]
#[command(name = "onboard")]
#[command(author, version, about = "ClothBuddy seller onboarding")]
#[command(long_about = "Register a store on ClothBuddy: GST, PAN, then store and address details.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the registration wizard
    Register(RegisterArgs),

    /// Validate a saved registration record (YAML or JSON)
    Check(CheckArgs),

    /// List supported states, or the cities of one state
    Regions(RegionsArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Use the configured default (yaml unless configured otherwise)
    #[default]
    Auto,
    /// YAML format
    Yaml,
    /// JSON format (for programming)
    Json,
}
