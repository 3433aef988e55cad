//! Output rendering for check reports.
//!
//! Supports `human` (default) and `json` outputs. Human output uses four
//! message classes: section headers, errors, warnings, and success/info
//! lines, followed by a single summary line.

use crate::models::{Entry, Finding, RunReport, Severity};
use owo_colors::OwoColorize;
use serde_json::Value as JsonVal;

fn use_colors(output: &str) -> bool {
    output != "json" && crate::utils::colors_enabled()
}

/// Print the report in the requested format.
pub fn print_report(report: &RunReport, output: &str) {
    match output {
        "json" => match serde_json::to_string_pretty(&compose_report_json(report)) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("{} {}", crate::utils::error_prefix(), e),
        },
        _ => print!("{}", render_human(report, use_colors(output))),
    }
}

/// Render human-readable output (pure) for testing.
pub fn render_human(report: &RunReport, color: bool) -> String {
    let mut out = String::new();
    for entry in &report.entries {
        match entry {
            Entry::Section { title } => {
                let head = format!("==> {}", title);
                if color {
                    out.push_str(&format!("\n{}\n", head.cyan().bold()));
                } else {
                    out.push_str(&format!("\n{}\n", head));
                }
            }
            Entry::Finding(f) => {
                out.push_str(&render_finding(f, color));
                out.push('\n');
            }
            Entry::Success { message } => {
                if color {
                    out.push_str(&format!("{} {}\n", "✔".green(), message));
                } else {
                    out.push_str(&format!("✔ {}\n", message));
                }
            }
            Entry::Info { message } => {
                if color {
                    out.push_str(&format!("{} {} {}\n", "◆".blue(), "⟦info⟧".blue().bold(), message));
                } else {
                    out.push_str(&format!("◆ ⟦info⟧ {}\n", message));
                }
            }
            Entry::Output { text, .. } => {
                out.push_str(text.trim_end_matches('\n'));
                out.push('\n');
            }
        }
    }
    let summary = format!(
        "— Summary — errors={} warnings={}",
        report.summary.errors, report.summary.warnings
    );
    if color {
        out.push_str(&format!("\n{}\n", summary.bold()));
    } else {
        out.push_str(&format!("\n{}\n", summary));
    }
    out
}

fn render_finding(f: &Finding, color: bool) -> String {
    let (icon, sev) = match f.severity {
        Severity::Error => ("✖", "⟦error⟧"),
        Severity::Warning => ("▲", "⟦warn⟧"),
    };
    let (icon, sev) = match (color, f.severity) {
        (false, _) => (icon.to_string(), sev.to_string()),
        (true, Severity::Error) => (icon.red().to_string(), sev.red().bold().to_string()),
        (true, Severity::Warning) => (icon.yellow().to_string(), sev.yellow().bold().to_string()),
    };
    match &f.location {
        Some(loc) => {
            let loc = if color {
                loc.to_string().bold().to_string()
            } else {
                loc.to_string()
            };
            format!("{} {} {} ❲{}❳ — {}", icon, sev, loc, f.rule, f.message)
        }
        None => format!("{} {} ❲{}❳ — {}", icon, sev, f.rule, f.message),
    }
}

/// Compose report JSON object (pure) for testing/snapshot purposes.
pub fn compose_report_json(report: &RunReport) -> JsonVal {
    serde_json::to_value(report).unwrap_or(JsonVal::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReportBuilder;

    fn sample() -> RunReport {
        let mut b = ReportBuilder::new();
        b.section("Checking styles (scss/)");
        b.push(Finding::error("legacy-alpha-color", "legacy rgba() color").at("scss/a.scss", Some(4)));
        b.push(Finding::warning("excess-important", "too many").at("scss/b.scss", None));
        b.success("no hardcoded hex colors");
        b.section("Running delegated tools");
        b.output("stylelint", "scss/a.scss\n  4:3  error\n");
        b.info("stylelint exited with code 2");
        b.finish()
    }

    #[test]
    fn test_render_human_plain() {
        let text = render_human(&sample(), false);
        assert!(text.contains("==> Checking styles (scss/)"));
        assert!(text.contains("✖ ⟦error⟧ scss/a.scss:4 ❲legacy-alpha-color❳ — legacy rgba() color"));
        assert!(text.contains("▲ ⟦warn⟧ scss/b.scss ❲excess-important❳"));
        assert!(text.contains("✔ no hardcoded hex colors"));
        assert!(text.contains("  4:3  error\n"));
        assert!(text.contains("◆ ⟦info⟧ stylelint exited with code 2"));
        assert!(text.trim_end().ends_with("— Summary — errors=1 warnings=1"));
    }

    #[test]
    fn test_compose_report_json_shape() {
        let out = compose_report_json(&sample());
        assert_eq!(out["summary"]["errors"], 1);
        assert_eq!(out["summary"]["warnings"], 1);
        assert_eq!(out["entries"][0]["kind"], "section");
        assert_eq!(out["entries"][1]["kind"], "finding");
        assert_eq!(out["entries"][1]["severity"], "error");
        assert_eq!(out["entries"][1]["location"]["line"], 4);
        assert!(out["entries"][2]["location"].get("line").is_none());
        assert_eq!(out["entries"][5]["tool"], "stylelint");
    }
}
