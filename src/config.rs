//! Configuration discovery and effective settings resolution.
//!
//! themelint reads `themelint.toml|yaml|yml` from `--repo-root` exactly as
//! given, or else from the closest ancestor of the working directory holding
//! a config file or `.git`, and merges it with CLI flags into a `RunConfig`.
//! Defaults:
//! - `output`: `human`
//! - `timeout`: 300 seconds per delegated tool
//! - `layout`: `scss/`, `javascripts/`, `about.json`, `settings.yml`,
//!   `node_modules/`, at most 10 `!important` per file
//! - `tools`: stylelint, prettier, eslint via `npx`
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::error::ConfigError;
use crate::models::tool::{default_tools, ToolSpec};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `themelint.toml|yaml`.
pub struct ThemelintConfig {
    pub output: Option<String>,
    /// Seconds before a delegated tool is killed.
    pub timeout: Option<u64>,
    #[serde(default)]
    pub layout: Option<LayoutCfg>,
    /// Replaces the built-in tool table when present.
    #[serde(default)]
    pub tools: Option<Vec<ToolSpec>>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// `[layout]` section; every field is optional.
pub struct LayoutCfg {
    pub styles_dir: Option<String>,
    pub scripts_dir: Option<String>,
    pub metadata_file: Option<String>,
    pub settings_file: Option<String>,
    pub dependency_dir: Option<String>,
    pub important_limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Project-relative names the checks look at.
pub struct Layout {
    pub styles_dir: String,
    pub scripts_dir: String,
    pub metadata_file: String,
    pub settings_file: String,
    pub dependency_dir: String,
    pub important_limit: usize,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            styles_dir: "scss".to_string(),
            scripts_dir: "javascripts".to_string(),
            metadata_file: "about.json".to_string(),
            settings_file: "settings.yml".to_string(),
            dependency_dir: "node_modules".to_string(),
            important_limit: 10,
        }
    }
}

impl Layout {
    fn merged(cfg: Option<&LayoutCfg>) -> Self {
        let d = Layout::default();
        let Some(c) = cfg else { return d };
        Self {
            styles_dir: c.styles_dir.clone().unwrap_or(d.styles_dir),
            scripts_dir: c.scripts_dir.clone().unwrap_or(d.scripts_dir),
            metadata_file: c.metadata_file.clone().unwrap_or(d.metadata_file),
            settings_file: c.settings_file.clone().unwrap_or(d.settings_file),
            dependency_dir: c.dependency_dir.clone().unwrap_or(d.dependency_dir),
            important_limit: c.important_limit.unwrap_or(d.important_limit),
        }
    }
}

#[derive(Debug, Clone)]
/// Immutable inputs of a single run.
pub struct RunConfig {
    pub root: PathBuf,
    pub fix: bool,
    pub layout: Layout,
    pub tools: Vec<ToolSpec>,
    pub timeout: Duration,
}

impl RunConfig {
    /// Defaults for `root` with no config file involved.
    pub fn new(root: impl Into<PathBuf>, fix: bool) -> Self {
        let layout = Layout::default();
        let tools = default_tools(&layout.styles_dir, &layout.scripts_dir);
        Self {
            root: root.into(),
            fix,
            layout,
            tools,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone)]
/// Fully-resolved settings used by the binary after applying precedence.
pub struct Effective {
    pub run: RunConfig,
    pub output: String,
    pub config_found: bool,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `themelint.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_NAMES.iter().any(|n| cur.join(n).exists()) {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

const CONFIG_NAMES: [&str; 3] = ["themelint.toml", "themelint.yaml", "themelint.yml"];

/// Load `ThemelintConfig` from `themelint.toml` or `themelint.yaml|yml`.
///
/// Returns `Ok(None)` when no config file exists.
pub fn load_config(root: &Path) -> Result<Option<ThemelintConfig>, ConfigError> {
    let toml_path = root.join(CONFIG_NAMES[0]);
    if toml_path.exists() {
        let s = read(&toml_path)?;
        let cfg = toml::from_str(&s).map_err(|source| ConfigError::Toml {
            path: toml_path.clone(),
            source,
        })?;
        return Ok(Some(cfg));
    }
    for yml in &CONFIG_NAMES[1..] {
        let p = root.join(yml);
        if p.exists() {
            let s = read(&p)?;
            let cfg = serde_yaml::from_str(&s)
                .map_err(|source| ConfigError::Yaml { path: p.clone(), source })?;
            return Ok(Some(cfg));
        }
    }
    Ok(None)
}

fn read(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(
    cli_repo_root: Option<&str>,
    cli_output: Option<&str>,
    cli_fix: bool,
    cli_timeout: Option<u64>,
) -> Result<Effective, ConfigError> {
    // An explicit root is used as given; only the implicit cwd walks upward.
    let root = match cli_repo_root {
        Some(dir) => PathBuf::from(dir),
        None => {
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            detect_repo_root(&cwd)
        }
    };
    let loaded = load_config(&root)?;
    let config_found = loaded.is_some();
    let cfg = loaded.unwrap_or_default();

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());
    if output != "human" && output != "json" {
        return Err(ConfigError::Invalid {
            key: "output".into(),
            value: output,
        });
    }

    let secs = cli_timeout.or(cfg.timeout).unwrap_or(DEFAULT_TIMEOUT_SECS);
    if secs == 0 {
        return Err(ConfigError::Invalid {
            key: "timeout".into(),
            value: "0".into(),
        });
    }

    let layout = Layout::merged(cfg.layout.as_ref());
    let tools = cfg
        .tools
        .unwrap_or_else(|| default_tools(&layout.styles_dir, &layout.scripts_dir));

    Ok(Effective {
        run: RunConfig {
            root,
            fix: cli_fix,
            layout,
            tools,
            timeout: Duration::from_secs(secs),
        },
        output,
        config_found,
    })
}
