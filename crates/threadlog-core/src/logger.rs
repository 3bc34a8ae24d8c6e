//! Named loggers.
//!
//! A `Logger` is usually created once per component and shared (`&Logger` or
//! `Arc<Logger>`) by every thread that logs through it. Logging takes `&self`;
//! configuration takes `&mut self`, so reconfiguring a logger that other threads
//! are using is the owner's job to synchronise.
//!
//! Every severity gets four entry points, e.g. for `info`:
//! - `info(msg)`
//! - `info_fmt(format_args!(..))`
//! - `info_err(err, msg)`: does nothing when `err` is `None`
//! - `info_err_fmt(err, format_args!(..))`: same short-circuit

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use crate::event::Event;
use crate::level::{Format, Level, Threshold};
use crate::output::Output;
use crate::palette::{ColorMode, Palette};
use crate::registry::ThreadNames;
use crate::render::{render_plain, render_structured};

pub const DEFAULT_FIELD_WIDTH: usize = 10;

/// Panic payload raised by a FATAL event when abort-on-fatal is enabled.
///
/// Recover it with `JoinHandle::join` or `std::panic::catch_unwind` and
/// `downcast_ref::<FatalAbort>()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FatalAbort {
    /// Description of the error passed with the event, if any.
    pub cause: Option<String>,
}

impl fmt::Display for FatalAbort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "fatal event: {cause}"),
            None => f.write_str("fatal event"),
        }
    }
}

impl Error for FatalAbort {}

#[derive(Debug)]
pub struct Logger {
    output: Output,
    name: String,
    threshold: Threshold,
    format: Format,
    color: ColorMode,
    palette: &'static Palette,
    abort_on_fatal: bool,
    name_width: usize,
    thread_width: usize,
    names: Arc<ThreadNames>,
}

macro_rules! level_methods {
    ($level:expr, $plain:ident, $fmt:ident, $err:ident, $err_fmt:ident, $is:ident) => {
        pub fn $plain(&self, msg: &str) {
            self.log($level, msg, None);
        }

        pub fn $fmt(&self, args: fmt::Arguments<'_>) {
            self.log_args($level, args, None);
        }

        pub fn $err(&self, err: Option<&dyn Error>, msg: &str) {
            if let Some(err) = err {
                self.log($level, msg, Some(err));
            }
        }

        pub fn $err_fmt(&self, err: Option<&dyn Error>, args: fmt::Arguments<'_>) {
            if let Some(err) = err {
                self.log_args($level, args, Some(err));
            }
        }

        pub fn $is(&self) -> bool {
            self.enabled($level)
        }
    };
}

impl Logger {
    /// Logger writing to stderr, using the process-wide thread-name registry.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_registry(name, Arc::clone(ThreadNames::global()))
    }

    pub fn with_registry(name: impl Into<String>, names: Arc<ThreadNames>) -> Self {
        let output = Output::stderr();
        let palette = Palette::for_mode(ColorMode::Auto, output.is_terminal());
        Self {
            output,
            name: name.into(),
            threshold: Threshold::default(),
            format: Format::Plain,
            color: ColorMode::Auto,
            palette,
            abort_on_fatal: false,
            name_width: DEFAULT_FIELD_WIDTH,
            thread_width: DEFAULT_FIELD_WIDTH,
            names,
        }
    }

    // --- configuration --------------------------------------------------------

    /// Attach a sink. In auto color mode the palette follows the new sink.
    pub fn set_output(&mut self, output: Output) -> &mut Self {
        self.output = output;
        if self.color == ColorMode::Auto {
            self.palette = Palette::for_mode(ColorMode::Auto, self.output.is_terminal());
        }
        self
    }

    pub fn set_format(&mut self, format: Format) -> &mut Self {
        self.format = format;
        self
    }

    pub fn set_threshold(&mut self, threshold: impl Into<Threshold>) -> &mut Self {
        self.threshold = threshold.into();
        self
    }

    /// `Always`/`Never` stick across later `set_output` calls; `Auto` re-reads
    /// the current sink.
    pub fn set_color(&mut self, color: ColorMode) -> &mut Self {
        self.color = color;
        self.palette = Palette::for_mode(color, self.output.is_terminal());
        self
    }

    pub fn set_abort_on_fatal(&mut self, abort: bool) -> &mut Self {
        self.abort_on_fatal = abort;
        self
    }

    /// Fixed width of the `[name]` field; 0 prints the name as-is.
    pub fn set_name_width(&mut self, width: usize) -> &mut Self {
        self.name_width = width;
        self
    }

    /// Fixed width of the `(thread)` field; 0 prints the label as-is.
    pub fn set_thread_width(&mut self, width: usize) -> &mut Self {
        self.thread_width = width;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn color(&self) -> ColorMode {
        self.color
    }

    pub fn palette(&self) -> &'static Palette {
        self.palette
    }

    pub fn abort_on_fatal(&self) -> bool {
        self.abort_on_fatal
    }

    pub fn name_width(&self) -> usize {
        self.name_width
    }

    pub fn thread_width(&self) -> usize {
        self.thread_width
    }

    pub fn registry(&self) -> &Arc<ThreadNames> {
        &self.names
    }

    // --- logging --------------------------------------------------------------

    level_methods!(Level::Trace, trace, trace_fmt, trace_err, trace_err_fmt, is_trace);
    level_methods!(Level::Debug, debug, debug_fmt, debug_err, debug_err_fmt, is_debug);
    level_methods!(Level::Info, info, info_fmt, info_err, info_err_fmt, is_info);
    level_methods!(Level::Warn, warn, warn_fmt, warn_err, warn_err_fmt, is_warn);
    level_methods!(Level::Error, error, error_fmt, error_err, error_err_fmt, is_error);
    // With abort-on-fatal enabled, every `fatal*` call that gets past the err
    // short-circuit panics with a `FatalAbort`, even when the threshold hides the line.
    level_methods!(Level::Fatal, fatal, fatal_fmt, fatal_err, fatal_err_fmt, is_fatal);

    /// Would an event at `level` be rendered right now?
    pub fn enabled(&self, level: Level) -> bool {
        self.threshold.allows(level)
    }

    /// Log at a level chosen at runtime.
    ///
    /// # Panics
    ///
    /// Panics with [`FatalAbort`] when `level` is `Fatal` and abort-on-fatal is set.
    pub fn log(&self, level: Level, msg: &str, err: Option<&dyn Error>) {
        let event = Event::new(level, msg, err, &self.names);
        self.dispatch(&event);
    }

    fn log_args(&self, level: Level, args: fmt::Arguments<'_>, err: Option<&dyn Error>) {
        match args.as_str() {
            Some(msg) => self.log(level, msg, err),
            None => self.log(level, &args.to_string(), err),
        }
    }

    fn dispatch(&self, event: &Event) {
        if self.enabled(event.level) {
            let line = match self.format {
                Format::Plain => render_plain(
                    event,
                    &self.name,
                    self.name_width,
                    self.thread_width,
                    self.palette,
                ),
                Format::Structured => render_structured(event, &self.name),
            };
            self.output.write_line(&line);
        }
        if event.level == Level::Fatal && self.abort_on_fatal {
            std::panic::panic_any(FatalAbort {
                cause: event.error.clone(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::MemorySink;
    use std::io;
    use std::panic::{self, AssertUnwindSafe};

    fn logger(sink: &MemorySink) -> Logger {
        let mut l = Logger::with_registry("unit", Arc::new(ThreadNames::new()));
        l.set_output(sink.output(false));
        l
    }

    fn io_err() -> io::Error {
        io::Error::new(io::ErrorKind::Other, "disk on fire")
    }

    #[test]
    fn defaults() {
        let l = Logger::with_registry("svc", Arc::new(ThreadNames::new()));
        assert_eq!(l.name(), "svc");
        assert_eq!(l.threshold(), Threshold::from(Level::Warn));
        assert_eq!(l.format(), Format::Plain);
        assert_eq!(l.color(), ColorMode::Auto);
        assert!(!l.abort_on_fatal());
        assert_eq!((l.name_width(), l.thread_width()), (10, 10));
    }

    #[test]
    fn setters_chain() {
        let sink = MemorySink::new();
        let mut l = logger(&sink);
        l.set_threshold(Level::Debug)
            .set_format(Format::Structured)
            .set_name_width(4)
            .set_thread_width(0)
            .set_abort_on_fatal(true);
        assert_eq!(l.threshold().level(), Some(Level::Debug));
        assert_eq!(l.format(), Format::Structured);
        assert_eq!(l.name_width(), 4);
        assert_eq!(l.thread_width(), 0);
        assert!(l.abort_on_fatal());
    }

    #[test]
    fn predicates_follow_threshold() {
        let sink = MemorySink::new();
        let mut l = logger(&sink);
        l.set_threshold(Level::Info);
        assert!(!l.is_trace() && !l.is_debug());
        assert!(l.is_info() && l.is_warn() && l.is_error() && l.is_fatal());

        l.set_threshold(Threshold::OFF);
        assert!(!l.is_fatal());
    }

    #[test]
    fn err_variants_skip_without_error() {
        let sink = MemorySink::new();
        let mut l = logger(&sink);
        l.set_threshold(Level::Trace).set_abort_on_fatal(true);

        l.trace_err(None, "x");
        l.debug_err(None, "x");
        l.info_err(None, "x");
        l.warn_err(None, "x");
        l.error_err(None, "x");
        l.fatal_err(None, "x");
        l.trace_err_fmt(None, format_args!("x {}", 1));
        l.debug_err_fmt(None, format_args!("x {}", 1));
        l.info_err_fmt(None, format_args!("x {}", 1));
        l.warn_err_fmt(None, format_args!("x {}", 1));
        l.error_err_fmt(None, format_args!("x {}", 1));
        l.fatal_err_fmt(None, format_args!("x {}", 1));

        assert!(sink.contents().is_empty());
    }

    #[test]
    fn err_variant_appends_cause() {
        let sink = MemorySink::new();
        let l = logger(&sink);
        let e = io_err();
        l.error_err(Some(&e), "failed");
        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("failed: disk on fire"), "{}", lines[0]);
    }

    #[test]
    fn formatted_variants() {
        let sink = MemorySink::new();
        let l = logger(&sink);
        l.warn_fmt(format_args!("{} of {} shards", 3, 8));
        let e = io_err();
        l.error_err_fmt(Some(&e), format_args!("shard {}", 3));
        let lines = sink.lines();
        assert!(lines[0].ends_with("3 of 8 shards"), "{}", lines[0]);
        assert!(lines[1].ends_with("shard 3: disk on fire"), "{}", lines[1]);
    }

    #[test]
    fn runtime_level_entry_point() {
        let sink = MemorySink::new();
        let l = logger(&sink);
        l.log(Level::Error, "chosen at runtime", None);
        l.log(Level::Debug, "hidden", None);
        assert_eq!(sink.lines().len(), 1);
    }

    #[test]
    fn auto_color_follows_sink() {
        let sink = MemorySink::new();
        let mut l = logger(&sink);
        assert_eq!(l.palette(), &Palette::OFF);
        l.set_output(sink.output(true));
        assert_eq!(l.palette(), &Palette::ON);
    }

    #[test]
    fn forced_color_survives_reattach() {
        let sink = MemorySink::new();
        let mut l = logger(&sink);
        l.set_color(ColorMode::Always);
        l.set_output(sink.output(false));
        assert_eq!(l.palette(), &Palette::ON);

        l.set_color(ColorMode::Never);
        l.set_output(sink.output(true));
        assert_eq!(l.palette(), &Palette::OFF);

        l.set_color(ColorMode::Auto);
        assert_eq!(l.palette(), &Palette::ON);
    }

    #[test]
    fn colored_output_reaches_sink() {
        let sink = MemorySink::new();
        let mut l = logger(&sink);
        l.set_color(ColorMode::Always);
        l.warn("tinted");
        let out = sink.contents();
        assert!(out.contains(&format!("{}tinted", Palette::ON.warn)), "{out:?}");
        assert!(out.ends_with("\x1b[0m\n"));
    }

    #[test]
    fn fatal_without_abort_returns() {
        let sink = MemorySink::new();
        let l = logger(&sink);
        l.fatal("still here");
        assert_eq!(sink.lines().len(), 1);
    }

    #[test]
    fn fatal_abort_carries_cause() {
        let sink = MemorySink::new();
        let mut l = logger(&sink);
        l.set_abort_on_fatal(true);
        let e = io_err();

        let payload = panic::catch_unwind(AssertUnwindSafe(|| l.fatal_err(Some(&e), "giving up")))
            .expect_err("fatal must unwind");
        let abort = payload.downcast_ref::<FatalAbort>().expect("FatalAbort payload");
        assert_eq!(abort.cause.as_deref(), Some("disk on fire"));
        assert!(sink.contents().contains("giving up: disk on fire"));
    }

    #[test]
    fn fatal_abort_without_cause_has_empty_payload() {
        let sink = MemorySink::new();
        let mut l = logger(&sink);
        l.set_abort_on_fatal(true);
        let payload = panic::catch_unwind(AssertUnwindSafe(|| l.fatal("boom")))
            .expect_err("fatal must unwind");
        assert_eq!(payload.downcast_ref::<FatalAbort>(), Some(&FatalAbort { cause: None }));
    }
}
