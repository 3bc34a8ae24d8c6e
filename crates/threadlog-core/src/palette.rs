use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseValueError;
use crate::level::Level;

/// ANSI escape sequences per rendering role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub timestamp: &'static str,
    pub trace: &'static str,
    pub debug: &'static str,
    pub info: &'static str,
    pub warn: &'static str,
    pub error: &'static str,
    pub fatal: &'static str,
    pub logger: &'static str,
    pub thread: &'static str,
    pub message: &'static str,
    pub reset: &'static str,
    /// Tint WARN/ERROR/FATAL message bodies with the level color.
    pub tint_messages: bool,
}

impl Palette {
    pub const ON: Palette = Palette {
        timestamp: "\x1b[38;5;180m", // beige
        trace: "\x1b[34m",           // blue
        debug: "\x1b[94m",           // bright blue
        info: "\x1b[33m",            // yellow
        warn: "\x1b[93m",            // bright yellow
        error: "\x1b[31m",           // red
        fatal: "\x1b[91m",           // bright red
        logger: "\x1b[35m",          // violet
        thread: "\x1b[95m",          // bright violet
        message: "\x1b[37m",         // white
        reset: "\x1b[0m",
        tint_messages: true,
    };

    pub const OFF: Palette = Palette {
        timestamp: "",
        trace: "",
        debug: "",
        info: "",
        warn: "",
        error: "",
        fatal: "",
        logger: "",
        thread: "",
        message: "",
        reset: "",
        tint_messages: false,
    };

    /// Pick a table for `mode`, consulting `terminal` only in auto mode.
    pub fn for_mode(mode: ColorMode, terminal: bool) -> &'static Palette {
        let on = match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => terminal,
        };
        if on {
            &Palette::ON
        } else {
            &Palette::OFF
        }
    }

    pub fn level(&self, level: Level) -> &'static str {
        match level {
            Level::Trace => self.trace,
            Level::Debug => self.debug,
            Level::Info => self.info,
            Level::Warn => self.warn,
            Level::Error => self.error,
            Level::Fatal => self.fatal,
        }
    }

    /// Sequence for the message body of an event at `level`.
    pub fn message(&self, level: Level) -> &'static str {
        if self.tint_messages && level >= Level::Warn {
            self.level(level)
        } else {
            self.message
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorMode {
    /// Follow the sink's terminal capability.
    #[default]
    Auto,
    Always,
    Never,
}

impl FromStr for ColorMode {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "" | "auto" => Ok(ColorMode::Auto),
            "always" | "on" | "true" => Ok(ColorMode::Always),
            "never" | "off" | "false" => Ok(ColorMode::Never),
            _ => Err(ParseValueError::new("color mode", s)),
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ColorMode::Auto => "auto",
            ColorMode::Always => "always",
            ColorMode::Never => "never",
        })
    }
}

impl Serialize for ColorMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ColorMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
