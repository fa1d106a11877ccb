//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use serde_json::Value;

use rigging::core::environment::Mode;

/// Rig - composable bundler configuration presets
#[derive(Parser)]
#[command(name = "rig")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compose the configuration for a production build
    Build(ComposeArgs),

    /// Compose the configuration for the development server
    Start(ComposeArgs),

    /// Compose the configuration for the test runner
    Test(ComposeArgs),

    /// List registered middlewares and presets
    List(ListArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct ComposeArgs {
    /// Preset to apply (default: from .rigging/config.toml, else react-preset)
    #[arg(short, long, env = "RIG_PRESET")]
    pub preset: Option<String>,

    /// Project root (default: nearest directory with package.json)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Mode, overriding NODE_ENV (development, production, test)
    #[arg(long)]
    pub mode: Option<Mode>,

    /// Preset options as a JSON object, merged over the config file
    #[arg(long, value_parser = parse_json)]
    pub options: Option<Value>,

    /// Print the configuration on a single line
    #[arg(long)]
    pub compact: bool,

    /// Print the applied middlewares instead of the configuration
    #[arg(long)]
    pub run_list: bool,
}

#[derive(Args)]
pub struct ListArgs {
    /// Print names only
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

fn parse_json(s: &str) -> Result<Value, String> {
    serde_json::from_str(s).map_err(|e| format!("invalid JSON: {}", e))
}
