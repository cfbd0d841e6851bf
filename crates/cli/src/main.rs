mod cmd;
mod input;
mod logging;
mod prompt;

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "tyf", version, about = "Typed, prompt-driven text templates")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Render a template to stdout or a file
    Render(RenderArgs),

    /// Print the parsed variable tree
    Parse(ParseArgs),

    /// Validate a template and report every violation
    Check(CheckArgs),

    /// Validate configuration and print resolved settings
    Doctor,
}

#[derive(Debug, Args)]
pub struct InputArgs {
    /// Template alias from [aliases] in the config, or a file path
    pub name: Option<String>,

    /// Template file path
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Template URL (scheme defaults to https://)
    #[arg(short, long)]
    pub url: Option<String>,
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Preset a variable by name (repeatable)
    #[arg(long = "var", value_name = "NAME=VALUE")]
    pub vars: Vec<String>,

    /// Never prompt; use presets and defaults only
    #[arg(long)]
    pub batch: bool,

    /// Write the rendered output here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ParseArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output format for the variable tree
    #[arg(long, value_enum, default_value_t = Format::Json)]
    pub format: Format,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Yaml,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render(args) => cmd::render::run(cli.config.as_deref(), args),
        Commands::Parse(args) => cmd::parse::run(cli.config.as_deref(), args),
        Commands::Check(args) => cmd::check::run(cli.config.as_deref(), args),
        Commands::Doctor => cmd::doctor::run(cli.config.as_deref()),
    }
}
