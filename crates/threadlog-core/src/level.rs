//! Severity levels, thresholds and output formats.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseValueError;

/// Event severity, ordered from least to most important.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Level {
    Trace = 0,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl Level {
    pub const ALL: [Level; 6] = [
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Fatal,
    ];

    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn from_rank(rank: i64) -> Option<Level> {
        match rank {
            0 => Some(Level::Trace),
            1 => Some(Level::Debug),
            2 => Some(Level::Info),
            3 => Some(Level::Warn),
            4 => Some(Level::Error),
            5 => Some(Level::Fatal),
            _ => None,
        }
    }

    /// One-letter tag used by both renderers.
    pub fn short(self) -> &'static str {
        match self {
            Level::Trace => "T",
            Level::Debug => "D",
            Level::Info => "I",
            Level::Warn => "W",
            Level::Error => "E",
            Level::Fatal => "F",
        }
    }

    pub fn long(self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
        }
    }

    /// Short form for a raw rank; `"?"` when the rank names no level.
    pub fn short_for_rank(rank: i64) -> &'static str {
        Level::from_rank(rank).map_or("?", Level::short)
    }

    /// Long form for a raw rank; `"?"` when the rank names no level.
    pub fn long_for_rank(rank: i64) -> &'static str {
        Level::from_rank(rank).map_or("?", Level::long)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.long())
    }
}

impl FromStr for Level {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let level = match s.to_ascii_lowercase().as_str() {
            "trace" | "t" => Level::Trace,
            "debug" | "d" => Level::Debug,
            "info" | "i" => Level::Info,
            "warn" | "warning" | "w" => Level::Warn,
            "error" | "e" => Level::Error,
            "fatal" | "f" => Level::Fatal,
            _ => return Err(ParseValueError::new("level", s)),
        };
        Ok(level)
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.long())
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Minimum level a logger renders. `Threshold::OFF` sits above `Fatal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Threshold(Option<Level>);

impl Threshold {
    pub const OFF: Threshold = Threshold(None);

    pub fn level(self) -> Option<Level> {
        self.0
    }

    pub fn allows(self, level: Level) -> bool {
        match self.0 {
            Some(min) => level >= min,
            None => false,
        }
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Threshold(Some(Level::Warn))
    }
}

impl From<Level> for Threshold {
    fn from(level: Level) -> Self {
        Threshold(Some(level))
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(level) => f.write_str(level.long()),
            None => f.write_str("OFF"),
        }
    }
}

impl FromStr for Threshold {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.eq_ignore_ascii_case("off") || t.eq_ignore_ascii_case("none") {
            return Ok(Threshold::OFF);
        }
        t.parse::<Level>()
            .map(Threshold::from)
            .map_err(|_| ParseValueError::new("threshold", t))
    }
}

impl Serialize for Threshold {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Some(level) => serializer.serialize_str(&level.long().to_ascii_lowercase()),
            None => serializer.serialize_str("off"),
        }
    }
}

impl<'de> Deserialize<'de> for Threshold {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Which renderer consumes an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Format {
    #[default]
    Plain,
    Structured,
}

impl FromStr for Format {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "plain" | "text" => Ok(Format::Plain),
            "structured" | "json" => Ok(Format::Structured),
            _ => Err(ParseValueError::new("format", s)),
        }
    }
}

impl Serialize for Format {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(match self {
            Format::Plain => "plain",
            Format::Structured => "structured",
        })
    }
}

impl<'de> Deserialize<'de> for Format {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
