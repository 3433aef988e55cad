//! CLI argument parsing via `clap`.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "themelint",
    version,
    about = "Pre-push checks for theme components",
    long_about = "themelint — pattern checks for SCSS and JavaScript theme component sources, metadata and settings checks, and delegation to stylelint, prettier, and eslint.\n\nExits 1 when any error is found; warnings alone exit 0.\nConfiguration precedence: CLI > themelint.toml > defaults.",
    after_help = "Examples:\n  themelint\n  themelint --fix\n  themelint --repo-root path/to/component --output json"
)]
/// Top-level CLI options.
pub struct Cli {
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Let delegated tools rewrite files (stylelint --fix, prettier --write, eslint --fix)")]
    pub fix: bool,
    #[arg(long, help = "Project root, used as given (default: nearest ancestor of the current dir with themelint.toml or .git)")]
    pub repo_root: Option<String>,
    #[arg(long, help = "Output mode: human|json (default: human)")]
    pub output: Option<String>,
    #[arg(long, help = "Seconds before a delegated tool is killed (default: 300)")]
    pub timeout: Option<u64>,
}
