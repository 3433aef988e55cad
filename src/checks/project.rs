//! Project-wide checks: ownership tags across scripts, the metadata file,
//! and settings ergonomics.
//!
//! All of these match on raw text. The metadata and settings files are
//! never parsed structurally, so a malformed `about.json` is still checked.

use crate::models::{Finding, SourceFile};
use regex::Regex;

/// Call that patches a core class and needs an ownership tag.
pub const MODIFY_CLASS_CALL: &str = "modifyClass(";
/// Substring accepted as an ownership tag declaration anywhere in scripts.
pub const OWNERSHIP_TAG: &str = "pluginId";

#[derive(Debug, Default)]
/// Aggregate over every script file; decided only after all are seen.
pub struct OwnershipScan {
    uses_modify_class: usize,
    declares_tag: bool,
}

impl OwnershipScan {
    pub fn observe(&mut self, file: &SourceFile) {
        if file.contents.contains(MODIFY_CLASS_CALL) {
            self.uses_modify_class += 1;
        }
        if file.contents.contains(OWNERSHIP_TAG) {
            self.declares_tag = true;
        }
    }

    /// At most one error for the whole run.
    pub fn finding(&self) -> Option<Finding> {
        if self.uses_modify_class > 0 && !self.declares_tag {
            Some(Finding::error(
                "ownership-tag",
                format!(
                    "modifyClass is used in {} file(s) but no {} is declared; pass {{ pluginId: \"your-component\" }} to avoid collisions",
                    self.uses_modify_class, OWNERSHIP_TAG
                ),
            ))
        } else {
            None
        }
    }
}

/// Phrases the metadata file must contain, with the warning for each.
pub const METADATA_REQUIREMENTS: &[(&str, &str)] = &[
    (
        r#""minimum_discourse_version""#,
        "missing \"minimum_discourse_version\"; declare the oldest supported version",
    ),
    (
        r#""component"\s*:\s*true"#,
        "missing \"component\": true; theme components must declare it",
    ),
];

/// A list setting shape that needs a companion `list_type` declaration.
pub struct ListHint {
    pub setting: &'static str,
    pub companion: &'static str,
    pub message: &'static str,
}

pub const SETTINGS_LIST_HINTS: &[ListHint] = &[
    ListHint {
        setting: r"(?m)^[ \t]*[\w-]*categor[\w-]*:[ \t]*\r?\n(?:[ \t]+.*\r?\n)*?[ \t]+type:[ \t]*list\b",
        companion: r#"list_type:[ \t]*["']?category\b"#,
        message: "a category list setting has no `list_type: category`; add it to get a category picker",
    },
    ListHint {
        setting: r"(?m)^[ \t]*[\w-]*group[\w-]*:[ \t]*\r?\n(?:[ \t]+.*\r?\n)*?[ \t]+type:[ \t]*list\b",
        companion: r#"list_type:[ \t]*["']?group\b"#,
        message: "a group list setting has no `list_type: group`; add it to get a group picker",
    },
];

/// Metadata and settings patterns, compiled once per run.
pub struct ProjectChecks {
    metadata: Vec<(Regex, &'static str)>,
    settings: Vec<(Regex, Regex, &'static str)>,
}

impl ProjectChecks {
    pub fn compile() -> Result<Self, regex::Error> {
        let mut metadata = Vec::with_capacity(METADATA_REQUIREMENTS.len());
        for (pattern, message) in METADATA_REQUIREMENTS {
            metadata.push((Regex::new(pattern)?, *message));
        }
        let mut settings = Vec::with_capacity(SETTINGS_LIST_HINTS.len());
        for hint in SETTINGS_LIST_HINTS {
            settings.push((
                Regex::new(hint.setting)?,
                Regex::new(hint.companion)?,
                hint.message,
            ));
        }
        Ok(Self { metadata, settings })
    }

    /// Check the metadata file text. `None` means the file is absent.
    pub fn check_metadata(&self, name: &str, contents: Option<&str>) -> Vec<Finding> {
        let Some(text) = contents else {
            return vec![Finding::error(
                "required-metadata-file",
                format!("{} not found at the project root", name),
            )
            .at(name, None)];
        };
        self.metadata
            .iter()
            .filter(|(re, _)| !re.is_match(text))
            .map(|(_, message)| Finding::warning("required-metadata-file", *message).at(name, None))
            .collect()
    }

    /// Check settings text; at most one warning per hint for the whole file.
    pub fn check_settings(&self, name: &str, text: &str) -> Vec<Finding> {
        self.settings
            .iter()
            .filter(|(setting, companion, _)| setting.is_match(text) && !companion.is_match(text))
            .map(|(_, _, message)| Finding::warning("settings-ux", *message).at(name, None))
            .collect()
    }
}
