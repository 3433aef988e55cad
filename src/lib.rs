//! themelint core library.
//!
//! Pre-push checks for theme components: text-pattern rules over style and
//! script files, metadata/settings checks, and delegation to external
//! formatters and linters.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `checks`: Declarative per-file pattern rules and project-wide checks.
//! - `scan`: Style/script file discovery.
//! - `tools`: Delegated tool seam and the process-spawning runner.
//! - `runner`: Fixed-order execution producing a `RunReport`.
//! - `models`: Findings, report entries, and the tool table.
//! - `output`: Human/JSON printers.
//! - `error`: Error types for config loading and tool execution.
//! - `utils`: Supporting helpers.
pub mod checks;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod runner;
pub mod scan;
pub mod tools;
pub mod utils;
