//! Delegated tool table: which external programs run, how, and when.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
/// One delegated tool entry, either built in or from `[[tools]]`.
pub struct ToolSpec {
    pub name: String,
    /// Root-level config files; the tool runs only when one exists.
    pub markers: Vec<String>,
    #[serde(default = "default_program")]
    pub program: String,
    /// Leading arguments, e.g. the tool name when `program = "npx"`.
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub check_args: Vec<String>,
    #[serde(default)]
    pub fix_args: Vec<String>,
    /// Paths or globs handed to the tool, passed through unexpanded.
    #[serde(default)]
    pub paths: Vec<String>,
}

fn default_program() -> String {
    "npx".to_string()
}

impl ToolSpec {
    /// Full argument vector for check (`fix = false`) or write mode.
    pub fn argv(&self, fix: bool) -> Vec<String> {
        let mode = if fix { &self.fix_args } else { &self.check_args };
        self.args
            .iter()
            .chain(mode.iter())
            .chain(self.paths.iter())
            .cloned()
            .collect()
    }

    /// Command line suggested to the user when check mode fails.
    pub fn remedy(&self) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.argv(true).into_iter().map(|a| shell_quote(&a)));
        parts.join(" ")
    }
}

fn shell_quote(arg: &str) -> String {
    if arg.contains(['*', '{', ' ', '?']) {
        format!("\"{}\"", arg)
    } else {
        arg.to_string()
    }
}

fn spec(name: &str, markers: &[&str], check: &[&str], fix: &[&str], paths: &[&str]) -> ToolSpec {
    let owned = |xs: &[&str]| xs.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    ToolSpec {
        name: name.to_string(),
        markers: owned(markers),
        program: default_program(),
        args: vec![name.to_string()],
        check_args: owned(check),
        fix_args: owned(fix),
        paths: owned(paths),
    }
}

/// Built-in tools for a theme component: stylelint, prettier, eslint.
pub fn default_tools(styles_dir: &str, scripts_dir: &str) -> Vec<ToolSpec> {
    let styles = format!("{}/**/*.scss", styles_dir);
    let scripts = format!("{}/**/*.{{js,gjs}}", scripts_dir);
    vec![
        spec(
            "stylelint",
            &[
                ".stylelintrc",
                ".stylelintrc.json",
                ".stylelintrc.yml",
                "stylelint.config.js",
                "stylelint.config.mjs",
            ],
            &[],
            &["--fix"],
            &[styles.as_str()],
        ),
        spec(
            "prettier",
            &[
                ".prettierrc",
                ".prettierrc.json",
                ".prettierrc.js",
                ".prettierrc.cjs",
                "prettier.config.js",
            ],
            &["--check"],
            &["--write"],
            &[scripts.as_str(), styles.as_str()],
        ),
        spec(
            "eslint",
            &[
                ".eslintrc",
                ".eslintrc.js",
                ".eslintrc.cjs",
                ".eslintrc.json",
                "eslint.config.js",
                "eslint.config.mjs",
            ],
            &[],
            &["--fix"],
            &[scripts_dir],
        ),
    ]
}
