use std::{fmt, path::PathBuf};

#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a config file or opening an output file.
    Io { path: PathBuf, source: std::io::Error },
    /// JSON parse error for a config file.
    Json { path: PathBuf, source: serde_json::Error },

    /// Config is syntactically valid but semantically invalid.
    InvalidConfig { path: PathBuf, msg: String },

    /// An override (environment variable or flag) carried an unparseable value.
    InvalidValue { key: String, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "I/O error for {}: {}", path.display(), source)
            }
            ConfigError::Json { path, source } => {
                write!(f, "JSON parse error for {}: {}", path.display(), source)
            }
            ConfigError::InvalidConfig { path, msg } => {
                write!(f, "Invalid config {}: {}", path.display(), msg)
            }
            ConfigError::InvalidValue { key, value } => {
                write!(f, "Invalid value for {key}: {value:?}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Json { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// A textual value could not be parsed into one of the crate's enums.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseValueError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseValueError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for ParseValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} {:?}", self.kind, self.value)
    }
}

impl std::error::Error for ParseValueError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn io_error_exposes_source() {
        let err = ConfigError::Io {
            path: PathBuf::from("/nowhere/log.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "I/O error for /nowhere/log.json: missing");
    }

    #[test]
    fn invalid_value_quotes_the_value() {
        let err = ConfigError::InvalidValue {
            key: "THREADLOG_LEVEL".into(),
            value: "loud".into(),
        };
        assert!(err.source().is_none());
        assert_eq!(err.to_string(), "Invalid value for THREADLOG_LEVEL: \"loud\"");
    }
}
