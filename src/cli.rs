use crate::copy::ContextCreatorConfig;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Create context for LLMs from a development project.",
    long_about = None
)]
pub struct CliArgs {
    /// The directory to scan
    #[arg(default_value = ".")]
    pub directory: PathBuf,

    /// Don't apply the root .gitignore
    #[arg(long)]
    pub no_gitignore: bool,

    /// Additional patterns to exclude (can be given multiple times)
    #[arg(
        long = "exclude",
        env = "CONTEXT_CREATOR_EXCLUDE",
        value_delimiter = ','
    )]
    pub exclude: Vec<String>,

    /// Don't copy the context to the clipboard
    #[arg(long)]
    pub no_clipboard: bool,

    /// Write the context to this file instead
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Skip the per-directory character summary
    #[arg(long)]
    pub no_stats: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl From<CliArgs> for ContextCreatorConfig {
    fn from(args: CliArgs) -> Self {
        ContextCreatorConfig {
            directory: args.directory,
            use_gitignore: !args.no_gitignore,
            exclude_patterns: args.exclude,
            no_clipboard: args.no_clipboard,
            output: args.output,
            no_stats: args.no_stats,
        }
    }
}
