use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Module style of the emitted dispatch-import line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleFormat {
    #[default]
    Es,
    Cjs,
}

/// Output language selector.
///
/// `dts` is accepted but has no registered generator, so it yields empty
/// output; callers that want a declaration file pair it with their own
/// generator registration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Js,
    Ts,
    Dts,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Js => "js",
            Language::Ts => "ts",
            Language::Dts => "dts",
        }
    }
}

/// Destination and shape of the generated source.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    /// Destination file; empty means stdout (unless `silent`).
    pub path: String,
    pub format: ModuleFormat,
    pub language: Language,
    /// Literal text prepended to the emitted source.
    pub intro: String,
    /// Literal text appended to the emitted source.
    pub outro: String,
}

/// Options for one document build.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    pub input: String,
    pub output: OutputOptions,
    /// Suppress stdout emission when no output path is given.
    pub silent: bool,
    /// Write a pretty-printed `<path>.json` sidecar of the input document.
    pub debug: bool,
    /// Names of built-in plugins to install, in order.
    pub plugins: Vec<String>,
}

/// Project configuration loaded from `.swagen.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SwagenConfig {
    pub documents: Vec<BuildOptions>,
    /// Build documents one at a time instead of in parallel.
    pub serial: bool,
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".swagen.yaml";

/// Load config from a YAML file.
///
/// Returns `None` when the file is missing, unreadable, or unparsable; a
/// broken config is treated as an absent one rather than aborting the run.
pub fn load_config(path: &Path) -> Option<SwagenConfig> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            if path.exists() {
                log::warn!("ignoring unreadable config {}: {}", path.display(), err);
            }
            return None;
        }
    };
    match serde_yaml_ng::from_str(&content) {
        Ok(config) => Some(config),
        Err(err) => {
            log::warn!("ignoring invalid config {}: {}", path.display(), err);
            None
        }
    }
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# swagen configuration: https://github.com/swagen-rs/swagen
serial: false           # build documents one at a time

documents:
  - input: swagger.json
    output:
      path: src/gateway.js
      format: es        # es | cjs
      language: js      # js | ts | dts
      # intro: "/* generated - do not edit */"
      # outro: ""
    silent: false
    plugins: []         # built-ins: fix-ref (always on), hash-names, log
"#
}
