//! themelint CLI binary entry point.
//! Resolves configuration, runs every check, prints the report, and exits
//! with 1 when any error was found.

use clap::Parser;
use themelint::cli::Cli;
use themelint::tools::CommandRunner;
use themelint::{config, output, runner, utils};

fn main() {
    let cli = Cli::parse();
    let eff = match config::resolve_effective(
        cli.repo_root.as_deref(),
        cli.output.as_deref(),
        cli.fix,
        cli.timeout,
    ) {
        Ok(eff) => eff,
        Err(e) => {
            eprintln!("{} {}", utils::error_prefix(), e);
            std::process::exit(1);
        }
    };
    if eff.output != "json" {
        if !eff.config_found {
            eprintln!("{} No themelint.toml found; using defaults.", utils::note_prefix());
        }
        if eff.run.fix {
            eprintln!("{} Fix mode: delegated tools may rewrite files.", utils::info_prefix());
        }
    }

    let tools = CommandRunner::new(eff.run.timeout);
    let report = runner::run(&eff.run, &tools);
    output::print_report(&report, &eff.output);
    std::process::exit(report.exit_code());
}
