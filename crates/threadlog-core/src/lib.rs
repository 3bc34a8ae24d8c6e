//! threadlog: small named loggers with per-thread labels.
//!
//! Every line is shaped like
//!     <timestamp> -<L>- [<logger>] (<thread>) message[: error]
//! or, in structured mode, a one-line JSON record with the same fields.
//!
//! ```no_run
//! use threadlog_core::{assign_thread_name, Level, Logger};
//!
//! let mut log = Logger::new("ingest");
//! log.set_threshold(Level::Info).set_name_width(8);
//!
//! let name = assign_thread_name("loader");
//! log.info("started");
//! threadlog_core::logw!(log, "{} files skipped", 3);
//! name.release();
//! ```

#[macro_use]
mod macros;

pub mod config;
pub mod error;
pub mod event;
pub mod level;
pub mod logger;
pub mod output;
pub mod palette;
pub mod registry;
pub mod render;

pub use config::{load_config, load_config_strict, ConfigMode, LoggerConfig, OutputTarget};
pub use error::{ConfigError, ParseValueError};
pub use event::Event;
pub use level::{Format, Level, Threshold};
pub use logger::{FatalAbort, Logger};
pub use output::{MemorySink, Output};
pub use palette::{ColorMode, Palette};
pub use registry::{assign_thread_name, remove_thread_name, NameHandle, ThreadKey, ThreadNames};
