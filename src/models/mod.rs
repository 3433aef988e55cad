//! Shared data models for findings, report entries, and the run summary.

pub mod tool;

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
/// Severity of a finding. Only `Error` affects the exit status.
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// File and optional 1-based line a finding points at.
pub struct Location {
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}", self.file, line),
            None => write!(f, "{}", self.file),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A single reported issue.
pub struct Finding {
    pub severity: Severity,
    pub rule: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl Finding {
    pub fn error(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            rule: rule.into(),
            message: message.into(),
            location: None,
        }
    }

    pub fn warning(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            rule: rule.into(),
            message: message.into(),
            location: None,
        }
    }

    pub fn at(mut self, file: impl Into<String>, line: Option<usize>) -> Self {
        self.location = Some(Location {
            file: file.into(),
            line,
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
/// One line-oriented element of the report, in emission order.
pub enum Entry {
    Section { title: String },
    Finding(Finding),
    Success { message: String },
    Info { message: String },
    /// Verbatim output captured from a delegated tool.
    Output { tool: String, text: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub errors: usize,
    pub warnings: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Finalized result of one run.
pub struct RunReport {
    pub entries: Vec<Entry>,
    pub summary: Summary,
}

impl RunReport {
    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.entries.iter().filter_map(|e| match e {
            Entry::Finding(f) => Some(f),
            _ => None,
        })
    }

    /// `1` when any error was recorded, `0` otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.summary.errors > 0 {
            1
        } else {
            0
        }
    }
}

/// Accumulates entries and severity counts while checks run.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    entries: Vec<Entry>,
    summary: Summary,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(&mut self, title: impl Into<String>) {
        self.entries.push(Entry::Section {
            title: title.into(),
        });
    }

    pub fn push(&mut self, finding: Finding) {
        match finding.severity {
            Severity::Error => self.summary.errors += 1,
            Severity::Warning => self.summary.warnings += 1,
        }
        self.entries.push(Entry::Finding(finding));
    }

    /// Push all findings; returns how many were added.
    pub fn extend(&mut self, findings: impl IntoIterator<Item = Finding>) -> usize {
        let mut n = 0;
        for f in findings {
            self.push(f);
            n += 1;
        }
        n
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.entries.push(Entry::Success {
            message: message.into(),
        });
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.entries.push(Entry::Info {
            message: message.into(),
        });
    }

    pub fn output(&mut self, tool: impl Into<String>, text: impl Into<String>) {
        let text = text.into();
        if text.trim().is_empty() {
            return;
        }
        self.entries.push(Entry::Output {
            tool: tool.into(),
            text,
        });
    }

    pub fn finish(self) -> RunReport {
        RunReport {
            entries: self.entries,
            summary: self.summary,
        }
    }
}

/// Contents of a scanned text file.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path relative to the project root, used in messages.
    pub display: String,
    pub contents: String,
}
