//! Formatting front-ends for [`Logger`](crate::Logger).
//!
//! ```ignore
//! logi!(log, "loaded {} rules", n);
//! loge!(log, err = Some(&e), "could not open {}", path.display());
//! ```
//!
//! The `err = ..` form takes an `Option<&dyn Error>` and does nothing on `None`.
//! All but `logf!` skip formatting when the level is filtered out.

#[macro_export]
macro_rules! logt {
    ($logger:expr, err = $err:expr, $($arg:tt)+) => {{
        $logger.trace_err_fmt($err, format_args!($($arg)+))
    }};
    ($logger:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        if logger.is_trace() {
            logger.trace_fmt(format_args!($($arg)+));
        }
    }};
}

#[macro_export]
macro_rules! logd {
    ($logger:expr, err = $err:expr, $($arg:tt)+) => {{
        $logger.debug_err_fmt($err, format_args!($($arg)+))
    }};
    ($logger:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        if logger.is_debug() {
            logger.debug_fmt(format_args!($($arg)+));
        }
    }};
}

#[macro_export]
macro_rules! logi {
    ($logger:expr, err = $err:expr, $($arg:tt)+) => {{
        $logger.info_err_fmt($err, format_args!($($arg)+))
    }};
    ($logger:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        if logger.is_info() {
            logger.info_fmt(format_args!($($arg)+));
        }
    }};
}

#[macro_export]
macro_rules! logw {
    ($logger:expr, err = $err:expr, $($arg:tt)+) => {{
        $logger.warn_err_fmt($err, format_args!($($arg)+))
    }};
    ($logger:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        if logger.is_warn() {
            logger.warn_fmt(format_args!($($arg)+));
        }
    }};
}

#[macro_export]
macro_rules! loge {
    ($logger:expr, err = $err:expr, $($arg:tt)+) => {{
        $logger.error_err_fmt($err, format_args!($($arg)+))
    }};
    ($logger:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        if logger.is_error() {
            logger.error_fmt(format_args!($($arg)+));
        }
    }};
}

/// Fatal events always reach the logger so abort-on-fatal fires below the threshold.
#[macro_export]
macro_rules! logf {
    ($logger:expr, err = $err:expr, $($arg:tt)+) => {{
        $logger.fatal_err_fmt($err, format_args!($($arg)+))
    }};
    ($logger:expr, $($arg:tt)+) => {{
        $logger.fatal_fmt(format_args!($($arg)+))
    }};
}
