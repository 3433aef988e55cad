//! Per-file pattern rules, declared as a table.
//!
//! Each `PatternRule` pairs a regex with the file kind it scans, the
//! severity it reports, line exemptions, and how matches are tallied.
//! Project-wide checks (ownership tag, metadata, settings) live in
//! `project`.

pub mod project;

use crate::models::{Finding, Severity, SourceFile};
use regex::Regex;

pub const STYLE_EXTENSIONS: &[&str] = &["scss"];
pub const SCRIPT_EXTENSIONS: &[&str] = &["js", "gjs"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Style,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// How matches in one file turn into findings.
pub enum Tally {
    /// One finding per matching line, located at that line.
    PerLine,
    /// One finding per file, located at the first matching line.
    PerFile,
    /// One finding per file when the match count exceeds the limit.
    OverLimit,
}

#[derive(Debug)]
pub struct PatternRule {
    pub id: &'static str,
    pub kind: FileKind,
    pub severity: Severity,
    pub pattern: &'static str,
    /// A line matching any of these is never reported.
    pub exempt: &'static [&'static str],
    pub tally: Tally,
    pub message: &'static str,
    /// Shown when the rule finds nothing across all files.
    pub clean: &'static str,
}

pub const PATTERN_RULES: &[PatternRule] = &[
    PatternRule {
        id: "legacy-alpha-color",
        kind: FileKind::Style,
        severity: Severity::Error,
        pattern: r"\brgba\s*\(",
        exempt: &[],
        tally: Tally::PerLine,
        message: "legacy rgba() color; use slash syntax, e.g. rgb(var(--primary-rgb) / 0.5)",
        clean: "no legacy rgba() colors",
    },
    PatternRule {
        id: "hardcoded-hex-color",
        kind: FileKind::Style,
        severity: Severity::Warning,
        pattern: r"#(?:[0-9a-fA-F]{6}|[0-9a-fA-F]{3})\b",
        exempt: &[r"var\(--", r"^\s*(?://|/\*)"],
        tally: Tally::PerLine,
        message: "hardcoded hex color; use a color variable such as var(--primary)",
        clean: "no hardcoded hex colors",
    },
    PatternRule {
        id: "excess-important",
        kind: FileKind::Style,
        severity: Severity::Warning,
        pattern: r"!important",
        exempt: &[],
        tally: Tally::OverLimit,
        message: "too many !important declarations; raise selector specificity instead",
        clean: "!important usage within limits",
    },
    PatternRule {
        id: "deprecated-widget",
        kind: FileKind::Script,
        severity: Severity::Warning,
        pattern: r"\b(?:createWidget|decorateWidget|reopenWidget)\b",
        exempt: &[],
        tally: Tally::PerFile,
        message: "uses the deprecated widget API (createWidget/decorateWidget/reopenWidget); migrate to Glimmer components",
        clean: "no deprecated widget APIs",
    },
    PatternRule {
        id: "template-override",
        kind: FileKind::Script,
        severity: Severity::Warning,
        pattern: r"\bapi\.(?:overrideTemplate|replaceTemplate|registerTemplateOverride)\s*\(",
        exempt: &[],
        tally: Tally::PerFile,
        message: "overrides a core template; render into a plugin outlet with api.renderInOutlet instead",
        clean: "no template overrides",
    },
];

/// A `PatternRule` with its regexes compiled.
pub struct CompiledRule {
    pub rule: &'static PatternRule,
    pattern: Regex,
    exempt: Vec<Regex>,
}

impl CompiledRule {
    pub fn compile(rule: &'static PatternRule) -> Result<Self, regex::Error> {
        Ok(Self {
            rule,
            pattern: Regex::new(rule.pattern)?,
            exempt: rule
                .exempt
                .iter()
                .map(|p| Regex::new(p))
                .collect::<Result<_, _>>()?,
        })
    }

    fn is_exempt(&self, line: &str) -> bool {
        self.exempt.iter().any(|re| re.is_match(line))
    }

    /// Evaluate the rule against one file. `limit` applies to `OverLimit`.
    pub fn apply(&self, file: &SourceFile, limit: usize) -> Vec<Finding> {
        let candidates = file
            .contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !self.is_exempt(line));
        match self.rule.tally {
            Tally::PerLine => candidates
                .filter(|(_, line)| self.pattern.is_match(line))
                .map(|(i, _)| self.finding(self.rule.message.to_string(), file, Some(i + 1)))
                .collect(),
            Tally::PerFile => candidates
                .filter(|(_, line)| self.pattern.is_match(line))
                .map(|(i, _)| self.finding(self.rule.message.to_string(), file, Some(i + 1)))
                .take(1)
                .collect(),
            Tally::OverLimit => {
                let count: usize = candidates
                    .map(|(_, line)| self.pattern.find_iter(line).count())
                    .sum();
                if count > limit {
                    let msg = format!("{} ({} found, limit {})", self.rule.message, count, limit);
                    vec![self.finding(msg, file, None)]
                } else {
                    Vec::new()
                }
            }
        }
    }

    fn finding(&self, message: String, file: &SourceFile, line: Option<usize>) -> Finding {
        Finding {
            severity: self.rule.severity,
            rule: self.rule.id.to_string(),
            message,
            location: None,
        }
        .at(file.display.clone(), line)
    }
}

/// Compile every table entry, returning the ones that failed alongside.
pub fn compile_rules() -> (Vec<CompiledRule>, Vec<(&'static str, regex::Error)>) {
    let mut ok = Vec::new();
    let mut failed = Vec::new();
    for rule in PATTERN_RULES {
        match CompiledRule::compile(rule) {
            Ok(c) => ok.push(c),
            Err(e) => failed.push((rule.id, e)),
        }
    }
    (ok, failed)
}
