use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dietly", version, about = "AI-powered personal diet planner")]
pub struct Args {
    /// TOML config file (endpoint, api_key, api_base, model)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Full generateContent URL; overrides config and environment
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    #[arg(long, global = true)]
    pub model: Option<String>,

    #[arg(long, global = true, default_value_t = false)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Interactive two-step form (the default)
    Wizard,
    /// Generate one chart from a profile file without prompting
    Plan {
        #[arg(long)]
        profile: PathBuf,
        /// Print the synthesized prompt and exit without calling the endpoint
        #[arg(long, default_value_t = false)]
        print_prompt: bool,
        /// Also print the raw model reply
        #[arg(long, default_value_t = false)]
        raw: bool,
    },
    /// Open the chart view on a saved model reply (file or stdin)
    Chart {
        #[arg(long)]
        input: Option<PathBuf>,
    },
}
