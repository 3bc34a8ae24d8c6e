//! Logger configuration files.
//!
//! A logger can be described by a small JSON document:
//!
//! ```json
//! { "name": "ingest", "level": "info", "format": "structured",
//!   "color": "auto", "name_width": 8, "output": { "file": "ingest.log" } }
//! ```
//!
//! Every key is optional. Environment variables `THREADLOG_LEVEL`,
//! `THREADLOG_FORMAT` and `THREADLOG_COLOR` override the file when applied.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::level::{Format, Threshold};
use crate::logger::{Logger, DEFAULT_FIELD_WIDTH};
use crate::output::Output;
use crate::palette::ColorMode;
use crate::registry::ThreadNames;

pub const ENV_LEVEL: &str = "THREADLOG_LEVEL";
pub const ENV_FORMAT: &str = "THREADLOG_FORMAT";
pub const ENV_COLOR: &str = "THREADLOG_COLOR";

/// How strictly to interpret a config file.
///
/// - `Lenient` ignores unknown fields, keeping older binaries happy with newer files.
/// - `Strict` rejects unknown fields, unsupported versions and widths too narrow
///   to hold the `...` marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigMode {
    Lenient,
    Strict,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputTarget {
    #[default]
    Stderr,
    Stdout,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggerConfig {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub level: Threshold,
    #[serde(default)]
    pub format: Format,
    #[serde(default)]
    pub color: ColorMode,
    #[serde(default)]
    pub abort_on_fatal: bool,
    #[serde(default = "default_width")]
    pub name_width: usize,
    #[serde(default = "default_width")]
    pub thread_width: usize,
    #[serde(default)]
    pub output: OutputTarget,
}

/// Strict twin of `LoggerConfig`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LoggerConfigStrict {
    #[serde(default = "default_version")]
    version: u32,
    #[serde(default)]
    name: String,
    #[serde(default)]
    level: Threshold,
    #[serde(default)]
    format: Format,
    #[serde(default)]
    color: ColorMode,
    #[serde(default)]
    abort_on_fatal: bool,
    #[serde(default = "default_width")]
    name_width: usize,
    #[serde(default = "default_width")]
    thread_width: usize,
    #[serde(default)]
    output: OutputTarget,
}

impl From<LoggerConfigStrict> for LoggerConfig {
    fn from(s: LoggerConfigStrict) -> Self {
        Self {
            version: s.version,
            name: s.name,
            level: s.level,
            format: s.format,
            color: s.color,
            abort_on_fatal: s.abort_on_fatal,
            name_width: s.name_width,
            thread_width: s.thread_width,
            output: s.output,
        }
    }
}

fn default_version() -> u32 {
    1
}

fn default_width() -> usize {
    DEFAULT_FIELD_WIDTH
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            name: String::new(),
            level: Threshold::default(),
            format: Format::Plain,
            color: ColorMode::Auto,
            abort_on_fatal: false,
            name_width: DEFAULT_FIELD_WIDTH,
            thread_width: DEFAULT_FIELD_WIDTH,
            output: OutputTarget::Stderr,
        }
    }
}

impl LoggerConfig {
    /// Apply `THREADLOG_*` overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup. Blank values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = non_blank(lookup(ENV_LEVEL)) {
            self.level = v.parse().map_err(|_| invalid(ENV_LEVEL, &v))?;
        }
        if let Some(v) = non_blank(lookup(ENV_FORMAT)) {
            self.format = v.parse().map_err(|_| invalid(ENV_FORMAT, &v))?;
        }
        if let Some(v) = non_blank(lookup(ENV_COLOR)) {
            self.color = v.parse().map_err(|_| invalid(ENV_COLOR, &v))?;
        }
        Ok(())
    }

    /// Build a logger that uses the process-wide thread-name registry.
    pub fn build(&self) -> Result<Logger, ConfigError> {
        self.build_with_registry(Arc::clone(ThreadNames::global()))
    }

    pub fn build_with_registry(&self, names: Arc<ThreadNames>) -> Result<Logger, ConfigError> {
        let output = match &self.output {
            OutputTarget::Stderr => Output::stderr(),
            OutputTarget::Stdout => Output::stdout(),
            OutputTarget::File(path) => {
                Output::append_file(path).map_err(|e| ConfigError::Io {
                    path: path.clone(),
                    source: e,
                })?
            }
        };

        let mut logger = Logger::with_registry(self.name.clone(), names);
        logger
            .set_output(output)
            .set_threshold(self.level)
            .set_format(self.format)
            .set_color(self.color)
            .set_abort_on_fatal(self.abort_on_fatal)
            .set_name_width(self.name_width)
            .set_thread_width(self.thread_width);
        Ok(logger)
    }
}

fn non_blank(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

/// Parse a config document. `path` is only used for error messages.
pub fn parse_config(src: &str, path: &Path, mode: ConfigMode) -> Result<LoggerConfig, ConfigError> {
    let json_err = |e: serde_json::Error| ConfigError::Json {
        path: path.to_path_buf(),
        source: e,
    };
    let cfg: LoggerConfig = match mode {
        ConfigMode::Lenient => serde_json::from_str(src).map_err(json_err)?,
        ConfigMode::Strict => serde_json::from_str::<LoggerConfigStrict>(src)
            .map_err(json_err)?
            .into(),
    };

    if mode == ConfigMode::Strict {
        if cfg.version != 1 {
            return Err(ConfigError::InvalidConfig {
                path: path.to_path_buf(),
                msg: format!("unsupported config version {} (expected 1)", cfg.version),
            });
        }
        let widths = [("name_width", cfg.name_width), ("thread_width", cfg.thread_width)];
        for (key, width) in widths {
            if width == 1 || width == 2 {
                return Err(ConfigError::InvalidConfig {
                    path: path.to_path_buf(),
                    msg: format!("{key} must be 0 or at least 3 (got {width})"),
                });
            }
        }
    }

    Ok(cfg)
}

fn load_config_with_mode(path: &Path, mode: ConfigMode) -> Result<LoggerConfig, ConfigError> {
    let src = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_config(&src, path, mode)
}

/// Load a config file, ignoring unknown fields.
pub fn load_config(path: &Path) -> Result<LoggerConfig, ConfigError> {
    load_config_with_mode(path, ConfigMode::Lenient)
}

/// Strict version of `load_config`.
pub fn load_config_strict(path: &Path) -> Result<LoggerConfig, ConfigError> {
    load_config_with_mode(path, ConfigMode::Strict)
}
