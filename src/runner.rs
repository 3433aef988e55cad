//! Check runner: executes every check in a fixed order and builds the report.
//!
//! Order: styles, scripts (including the ownership aggregate), metadata,
//! settings, delegated tools. Nothing here aborts the run; each failure is
//! recorded as a finding or an info line and the next check proceeds.

use crate::checks::project::{OwnershipScan, ProjectChecks};
use crate::checks::{compile_rules, CompiledRule, FileKind, SCRIPT_EXTENSIONS, STYLE_EXTENSIONS};
use crate::config::RunConfig;
use crate::error::ToolError;
use crate::models::{Finding, ReportBuilder, RunReport};
use crate::scan::{self, Scan};
use crate::tools::ToolRunner;
use std::fs;

/// Run all checks for `config`, delegating external tools to `tools`.
pub fn run(config: &RunConfig, tools: &dyn ToolRunner) -> RunReport {
    let mut report = ReportBuilder::new();
    let (rules, broken) = compile_rules();
    for (id, err) in broken {
        report.push(Finding::error(id, format!("rule pattern failed to compile: {}", err)));
    }

    check_styles(config, &rules, &mut report);
    check_scripts(config, &rules, &mut report);
    match ProjectChecks::compile() {
        Ok(project) => {
            check_metadata(config, &project, &mut report);
            check_settings(config, &project, &mut report);
        }
        Err(err) => {
            report.push(Finding::error(
                "project-rules",
                format!("rule pattern failed to compile: {}", err),
            ));
            report.info("metadata and settings checks skipped");
        }
    }
    run_tools(config, tools, &mut report);
    report.finish()
}

fn apply_rules(
    rules: &[CompiledRule],
    kind: FileKind,
    scan: &Scan,
    limit: usize,
    report: &mut ReportBuilder,
) {
    for unreadable in &scan.unreadable {
        report.push(
            Finding::warning("unreadable-file", "not valid UTF-8 text; skipped")
                .at(unreadable.clone(), None),
        );
    }
    for rule in rules.iter().filter(|r| r.rule.kind == kind) {
        let mut found = 0;
        for file in &scan.files {
            found += report.extend(rule.apply(file, limit));
        }
        if found == 0 {
            report.success(rule.rule.clean);
        }
    }
}

fn check_styles(config: &RunConfig, rules: &[CompiledRule], report: &mut ReportBuilder) {
    let dir = &config.layout.styles_dir;
    report.section(format!("Checking styles ({}/)", dir));
    let scan = scan::collect(&config.root, dir, STYLE_EXTENSIONS);
    if !scan.present {
        report.info(format!("{}/ not found; style checks skipped", dir));
        return;
    }
    apply_rules(rules, FileKind::Style, &scan, config.layout.important_limit, report);
}

fn check_scripts(config: &RunConfig, rules: &[CompiledRule], report: &mut ReportBuilder) {
    let dir = &config.layout.scripts_dir;
    report.section(format!("Checking scripts ({}/)", dir));
    let scan = scan::collect(&config.root, dir, SCRIPT_EXTENSIONS);
    if !scan.present {
        report.info(format!("{}/ not found; script checks skipped", dir));
        return;
    }
    apply_rules(rules, FileKind::Script, &scan, config.layout.important_limit, report);

    let mut ownership = OwnershipScan::default();
    for file in &scan.files {
        ownership.observe(file);
    }
    match ownership.finding() {
        Some(f) => report.push(f),
        None => report.success("no untagged modifyClass calls"),
    }
}

fn check_metadata(config: &RunConfig, project: &ProjectChecks, report: &mut ReportBuilder) {
    let name = &config.layout.metadata_file;
    report.section(format!("Checking metadata ({})", name));
    let path = config.root.join(name);
    let contents = if path.is_file() {
        match fs::read_to_string(&path) {
            Ok(s) => Some(s),
            Err(e) => {
                report.push(
                    Finding::error("required-metadata-file", format!("unreadable: {}", e))
                        .at(name.clone(), None),
                );
                return;
            }
        }
    } else {
        None
    };
    if report.extend(project.check_metadata(name, contents.as_deref())) == 0 {
        report.success(format!("{} declares required fields", name));
    }
}

fn check_settings(config: &RunConfig, project: &ProjectChecks, report: &mut ReportBuilder) {
    let name = &config.layout.settings_file;
    report.section(format!("Checking settings ({})", name));
    let path = config.root.join(name);
    if !path.is_file() {
        report.info(format!("no {}; settings checks skipped", name));
        return;
    }
    let text = match fs::read_to_string(&path) {
        Ok(s) => s,
        Err(e) => {
            report.push(
                Finding::warning("settings-ux", format!("unreadable: {}", e))
                    .at(name.clone(), None),
            );
            return;
        }
    };
    if report.extend(project.check_settings(name, &text)) == 0 {
        report.success("list settings declare their list_type");
    }
}

fn run_tools(config: &RunConfig, tools: &dyn ToolRunner, report: &mut ReportBuilder) {
    report.section(if config.fix {
        "Fixing with delegated tools"
    } else {
        "Running delegated tools"
    });
    if config.tools.is_empty() {
        report.info("no delegated tools configured");
        return;
    }
    let dep = &config.layout.dependency_dir;
    if !config.root.join(dep).is_dir() {
        let names: Vec<&str> = config.tools.iter().map(|t| t.name.as_str()).collect();
        report.push(Finding::warning(
            "tooling-skipped",
            format!(
                "{}/ not found; skipped {} (install dependencies first)",
                dep,
                names.join(", ")
            ),
        ));
        return;
    }

    for tool in &config.tools {
        let name = tool.name.as_str();
        if !tool.markers.iter().any(|m| config.root.join(m).exists()) {
            report.push(Finding::warning(
                "tool-unavailable",
                format!("no {} config found ({}); skipped", name, tool.markers.join(", ")),
            ));
            continue;
        }
        let result = if config.fix {
            tools.fix(tool, &config.root)
        } else {
            tools.check(tool, &config.root)
        };
        match result {
            Ok(out) => {
                report.output(name, out.output.clone());
                if config.fix {
                    if out.success() {
                        report.success(format!("{}: fixes applied", name));
                    } else {
                        report.info(format!(
                            "{} {}; some problems may need manual fixes",
                            name,
                            exit_phrase(out.code)
                        ));
                    }
                } else if out.success() {
                    report.success(format!("{} passed", name));
                } else {
                    report.push(Finding::error(
                        "tool-failure",
                        format!(
                            "{} reported problems ({}); run `{}` to fix",
                            name,
                            exit_phrase(out.code),
                            tool.remedy()
                        ),
                    ));
                }
            }
            Err(e @ ToolError::TimedOut { .. }) => {
                report.push(Finding::error("tool-timeout", format!("{}: {}", name, e)));
            }
            Err(e) => {
                report.push(Finding::warning("tool-unavailable", format!("{} skipped: {}", name, e)));
            }
        }
    }
}

fn exit_phrase(code: Option<i32>) -> String {
    match code {
        Some(c) => format!("exited with code {}", c),
        None => "was terminated by a signal".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tool::ToolSpec;
    use crate::models::{Entry, Severity};
    use crate::tools::ToolOutput;
    use std::cell::RefCell;
    use std::path::Path;
    use tempfile::tempdir;

    /// Fake runner returning a canned result and recording calls.
    struct FakeRunner {
        result: fn() -> Result<ToolOutput, ToolError>,
        calls: RefCell<Vec<(String, bool)>>,
    }

    impl FakeRunner {
        fn new(result: fn() -> Result<ToolOutput, ToolError>) -> Self {
            Self {
                result,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl ToolRunner for FakeRunner {
        fn check(&self, tool: &ToolSpec, _root: &Path) -> Result<ToolOutput, ToolError> {
            self.calls.borrow_mut().push((tool.name.clone(), false));
            (self.result)()
        }
        fn fix(&self, tool: &ToolSpec, _root: &Path) -> Result<ToolOutput, ToolError> {
            self.calls.borrow_mut().push((tool.name.clone(), true));
            (self.result)()
        }
    }

    fn passing() -> Result<ToolOutput, ToolError> {
        Ok(ToolOutput { code: Some(0), output: String::new() })
    }

    fn failing() -> Result<ToolOutput, ToolError> {
        Ok(ToolOutput { code: Some(1), output: "scss/a.scss\n  1:3  ✖  Unexpected\n".into() })
    }

    fn timed_out() -> Result<ToolOutput, ToolError> {
        Err(ToolError::TimedOut { program: "npx".into(), secs: 300 })
    }

    fn missing() -> Result<ToolOutput, ToolError> {
        Err(ToolError::NotFound { program: "npx".into() })
    }

    fn write(root: &Path, rel: &str, contents: &str) {
        let p = root.join(rel);
        fs::create_dir_all(p.parent().unwrap()).unwrap();
        fs::write(p, contents).unwrap();
    }

    fn with_tooling(root: &Path) {
        fs::create_dir_all(root.join("node_modules")).unwrap();
        write(root, ".stylelintrc", "{}");
        write(root, ".prettierrc", "{}");
        write(root, "eslint.config.mjs", "export default [];");
    }

    const ABOUT: &str = r#"{ "name": "t", "component": true, "minimum_discourse_version": "3.2.0" }"#;

    #[test]
    fn test_sections_in_catalogue_order() {
        let tmp = tempdir().unwrap();
        let report = run(&RunConfig::new(tmp.path(), false), &FakeRunner::new(passing));
        let titles: Vec<_> = report
            .entries
            .iter()
            .filter_map(|e| match e {
                Entry::Section { title } => Some(title.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            titles,
            vec![
                "Checking styles (scss/)",
                "Checking scripts (javascripts/)",
                "Checking metadata (about.json)",
                "Checking settings (settings.yml)",
                "Running delegated tools",
            ]
        );
    }

    #[test]
    fn test_failing_tool_is_one_error_with_verbatim_output() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        write(root, "about.json", ABOUT);
        with_tooling(root);
        let fake = FakeRunner::new(failing);
        let report = run(&RunConfig::new(root, false), &fake);
        assert_eq!(report.summary.errors, 3);
        assert!(report.entries.iter().any(|e| matches!(e, Entry::Output { text, .. } if text.contains("Unexpected"))));
        let stylelint = report
            .findings()
            .find(|f| f.rule == "tool-failure" && f.message.starts_with("stylelint"))
            .unwrap();
        assert!(stylelint.message.contains("npx stylelint --fix"));
        let calls = fake.calls.borrow();
        assert_eq!(calls.len(), 3);
        assert!(calls.iter().all(|(_, fix)| !fix));
    }

    #[test]
    fn test_fix_mode_never_fails_on_tool_exit() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        write(root, "about.json", ABOUT);
        with_tooling(root);
        let fake = FakeRunner::new(failing);
        let report = run(&RunConfig::new(root, true), &fake);
        assert_eq!(report.summary.errors, 0);
        assert_eq!(report.exit_code(), 0);
        assert!(fake.calls.borrow().iter().all(|(_, fix)| *fix));
    }

    #[test]
    fn test_timeout_is_distinct_error() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        write(root, "about.json", ABOUT);
        with_tooling(root);
        let report = run(&RunConfig::new(root, false), &FakeRunner::new(timed_out));
        let timeouts: Vec<_> = report.findings().filter(|f| f.rule == "tool-timeout").collect();
        assert_eq!(timeouts.len(), 3);
        assert!(timeouts[0].message.contains("timed out after 300s"));
    }

    #[test]
    fn test_missing_program_is_warning() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        write(root, "about.json", ABOUT);
        with_tooling(root);
        let report = run(&RunConfig::new(root, false), &FakeRunner::new(missing));
        assert_eq!(report.summary.errors, 0);
        assert_eq!(report.summary.warnings, 3);
    }

    #[test]
    fn test_tool_without_marker_is_skipped_with_warning() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        write(root, "about.json", ABOUT);
        fs::create_dir_all(root.join("node_modules")).unwrap();
        write(root, ".prettierrc", "{}");
        let fake = FakeRunner::new(passing);
        let report = run(&RunConfig::new(root, false), &fake);
        assert_eq!(report.summary.errors, 0);
        assert_eq!(report.summary.warnings, 2);
        assert_eq!(*fake.calls.borrow(), vec![("prettier".to_string(), false)]);
    }

    #[test]
    fn test_missing_dependency_dir_skips_all_tools() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        write(root, "about.json", ABOUT);
        write(root, ".stylelintrc", "{}");
        let fake = FakeRunner::new(failing);
        let report = run(&RunConfig::new(root, false), &fake);
        assert!(fake.calls.borrow().is_empty());
        let skipped: Vec<_> = report.findings().filter(|f| f.rule == "tooling-skipped").collect();
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].severity, Severity::Warning);
    }

    #[test]
    fn test_ownership_error_once_across_files() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        write(root, "about.json", ABOUT);
        for i in 0..4 {
            write(
                root,
                &format!("javascripts/discourse/api-initializers/init{i}.js"),
                "api.modifyClass(\"component:x\", {});",
            );
        }
        let report = run(&RunConfig::new(root, false), &FakeRunner::new(passing));
        let errs: Vec<_> = report.findings().filter(|f| f.severity == Severity::Error).collect();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].rule, "ownership-tag");
    }
}
