#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the themelint binary with color off.
#[macro_export]
macro_rules! themelint {
    () => {{
        let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("themelint"));
        cmd.env("NO_COLOR", "1");
        cmd
    }};
}

pub const VALID_ABOUT: &str = r#"{
  "name": "Sample Component",
  "component": true,
  "minimum_discourse_version": "3.2.0",
  "license_url": "https://example.com/LICENSE"
}
"#;

pub const CLEAN_SCSS: &str = ".sample-banner {
  color: var(--primary);
  background: rgb(var(--primary-rgb) / 0.1);
  // brand fallback #ffffff lives in the color scheme
}
";

pub const CLEAN_JS: &str = r#"import { apiInitializer } from "discourse/lib/api";

export default apiInitializer("1.8.0", (api) => {
  api.modifyClass("component:topic-list", {
    pluginId: "sample-component",
  });
});
"#;

/// Temporary project tree for a theme component.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// A project that passes every in-process rule.
    pub fn clean() -> Self {
        let f = Self::new();
        f.create_file("about.json", VALID_ABOUT);
        f.create_file("scss/common.scss", CLEAN_SCSS);
        f.create_file("javascripts/discourse/api-initializers/init.js", CLEAN_JS);
        f
    }

    pub fn create_file(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    pub fn create_dir(&self, relative_path: &str) {
        fs::create_dir_all(self.dir.path().join(relative_path)).expect("Failed to create directory");
    }

    pub fn remove_file(&self, relative_path: &str) {
        fs::remove_file(self.dir.path().join(relative_path)).expect("Failed to remove file");
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn path_str(&self) -> &str {
        self.dir.path().to_str().expect("utf-8 temp path")
    }
}
