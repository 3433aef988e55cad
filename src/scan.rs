//! File discovery under the project's style and script directories.

use crate::models::SourceFile;
use crate::utils;
use glob::{glob, Pattern};
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of scanning one directory.
#[derive(Debug, Default)]
pub struct Scan {
    /// Whether the directory exists at all.
    pub present: bool,
    pub files: Vec<SourceFile>,
    /// Matched paths that could not be read as UTF-8 text.
    pub unreadable: Vec<String>,
}

/// Recursively collect files under `root/dir` with any of `extensions`.
///
/// Results are sorted by path so reports are stable across runs.
pub fn collect(root: &Path, dir: &str, extensions: &[&str]) -> Scan {
    let base = root.join(dir);
    if !base.is_dir() {
        return Scan::default();
    }
    let escaped = Pattern::escape(&base.to_string_lossy());
    let mut paths: Vec<PathBuf> = Vec::new();
    for ext in extensions {
        let pattern = format!("{}/**/*.{}", escaped, ext);
        let Ok(entries) = glob(&pattern) else {
            continue;
        };
        paths.extend(entries.flatten().filter(|p| p.is_file()));
    }
    paths.sort();
    paths.dedup();

    let mut scan = Scan {
        present: true,
        ..Scan::default()
    };
    for path in paths {
        let display = utils::rel_display(root, &path);
        match fs::read_to_string(&path) {
            Ok(contents) => scan.files.push(SourceFile {
                display,
                contents,
            }),
            Err(_) => scan.unreadable.push(display),
        }
    }
    scan
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_collect_recurses_and_filters_extensions() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("javascripts/discourse/components")).unwrap();
        fs::write(root.join("javascripts/discourse/api-init.js"), "a").unwrap();
        fs::write(root.join("javascripts/discourse/components/x.gjs"), "b").unwrap();
        fs::write(root.join("javascripts/readme.md"), "c").unwrap();

        let scan = collect(root, "javascripts", &["js", "gjs"]);
        assert!(scan.present);
        let names: Vec<_> = scan.files.iter().map(|f| f.display.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "javascripts/discourse/api-init.js",
                "javascripts/discourse/components/x.gjs"
            ]
        );
    }

    #[test]
    fn test_missing_directory_is_not_present() {
        let tmp = tempdir().unwrap();
        let scan = collect(tmp.path(), "scss", &["scss"]);
        assert!(!scan.present);
        assert!(scan.files.is_empty());
    }

    #[test]
    fn test_non_utf8_file_reported_unreadable() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("scss")).unwrap();
        fs::write(root.join("scss/bin.scss"), [0xff, 0xfe, 0x00]).unwrap();
        let scan = collect(root, "scss", &["scss"]);
        assert!(scan.files.is_empty());
        assert_eq!(scan.unreadable, vec!["scss/bin.scss".to_string()]);
    }
}
