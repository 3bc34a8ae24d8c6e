//! Human-oriented line:
//!     <timestamp> -<L>- [<logger>] (<thread>) message[: error]

use std::borrow::Cow;
use std::fmt::Write;

use crate::event::Event;
use crate::palette::Palette;

const ELLIPSIS: &str = "...";

pub fn render_plain(
    event: &Event,
    name: &str,
    name_width: usize,
    thread_width: usize,
    palette: &Palette,
) -> String {
    let mut line = String::with_capacity(96 + event.message.len());
    let _ = write!(
        line,
        "{}{}{} -{}-{} [{}] {}({}) {}{}",
        palette.timestamp,
        event.timestamp_rfc3339(),
        palette.level(event.level),
        event.level.short(),
        palette.logger,
        fit_width(name, name_width),
        palette.thread,
        fit_width(&event.thread, thread_width),
        palette.message(event.level),
        event.message,
    );
    if let Some(err) = &event.error {
        line.push_str(": ");
        line.push_str(err);
    }
    line.push_str(palette.reset);
    line.push('\n');
    line
}

/// Fit `text` to exactly `width` chars: cut with a trailing `...` or pad with
/// spaces. Width 0 leaves the text alone.
pub fn fit_width(text: &str, width: usize) -> Cow<'_, str> {
    if width == 0 {
        return Cow::Borrowed(text);
    }
    let len = text.chars().count();
    if len > width {
        let keep = width.saturating_sub(ELLIPSIS.len());
        let mut s: String = text.chars().take(keep).collect();
        s.extend(ELLIPSIS.chars().take(width - keep));
        Cow::Owned(s)
    } else if len < width {
        let mut s = String::with_capacity(text.len() + width - len);
        s.push_str(text);
        s.extend(std::iter::repeat(' ').take(width - len));
        Cow::Owned(s)
    } else {
        Cow::Borrowed(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;
    use time::OffsetDateTime;

    fn event(level: Level, message: &str, error: Option<&str>) -> Event {
        Event {
            // 2024-03-05T14:07:09Z
            timestamp: OffsetDateTime::from_unix_timestamp(1_709_647_629).unwrap(),
            thread: "42".into(),
            level,
            message: message.into(),
            error: error.map(str::to_string),
        }
    }

    #[test]
    fn long_text_is_cut_with_ellipsis() {
        let out = fit_width("ingest-worker", 8);
        assert_eq!(out, "inges...");
        assert_eq!(out.chars().count(), 8);
    }

    #[test]
    fn short_text_is_padded() {
        assert_eq!(fit_width("svc", 5), "svc  ");
        assert_eq!(fit_width("", 3), "   ");
    }

    #[test]
    fn zero_width_disables_fitting() {
        assert_eq!(fit_width("a-very-long-logger-name", 0), "a-very-long-logger-name");
        assert!(matches!(fit_width("x", 0), Cow::Borrowed(_)));
    }

    #[test]
    fn exact_width_is_untouched() {
        assert_eq!(fit_width("exact", 5), "exact");
    }

    #[test]
    fn fitting_counts_chars_not_bytes() {
        let out = fit_width("größenwahn", 6);
        assert_eq!(out, "grö...");
        assert_eq!(fit_width("äö", 4), "äö  ");
    }

    #[test]
    fn narrow_widths_degrade_to_dots() {
        assert_eq!(fit_width("abcdef", 1), ".");
        assert_eq!(fit_width("abcdef", 2), "..");
        assert_eq!(fit_width("abcdef", 3), "...");
    }

    #[test]
    fn fitted_length_always_matches_width() {
        for width in 1..12 {
            for text in ["", "a", "abc", "abcdefghij", "abcdefghijklmnop"] {
                assert_eq!(fit_width(text, width).chars().count(), width, "{text:?} @ {width}");
            }
        }
    }

    #[test]
    fn plain_layout_without_color() {
        let line = render_plain(&event(Level::Warn, "disk low", None), "svc", 5, 0, &Palette::OFF);
        assert_eq!(line, "2024-03-05T14:07:09Z -W- [svc  ] (42) disk low\n");
    }

    #[test]
    fn plain_appends_error_text() {
        let line = render_plain(
            &event(Level::Error, "failed", Some("connection refused")),
            "db",
            0,
            4,
            &Palette::OFF,
        );
        assert_eq!(
            line,
            "2024-03-05T14:07:09Z -E- [db] (42  ) failed: connection refused\n"
        );
    }

    #[test]
    fn colored_segments_end_with_single_reset() {
        let p = &Palette::ON;
        let line = render_plain(&event(Level::Error, "boom", None), "svc", 0, 0, p);
        let expected = format!(
            "{}2024-03-05T14:07:09Z{} -E-{} [svc] {}(42) {}boom{}\n",
            p.timestamp, p.error, p.logger, p.thread, p.error, p.reset
        );
        assert_eq!(line, expected);
        assert_eq!(line.matches(p.reset).count(), 1);
    }

    #[test]
    fn info_message_keeps_default_color() {
        let p = &Palette::ON;
        let line = render_plain(&event(Level::Info, "hello", None), "svc", 0, 0, p);
        assert!(line.contains(&format!("{}hello", p.message)));
    }
}
