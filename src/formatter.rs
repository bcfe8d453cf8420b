//! Log line formatting: wall-clock time, the frame being simulated, level, spans, then fields.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use time::format_description::FormatItem;
use time::macros::format_description;
use time::OffsetDateTime;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, FormattedFields};
use tracing_subscriber::registry::LookupSpan;

/// Frames simulated since startup.
static FRAME_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Only the low 16 bits of the frame count are printed.
const FRAME_DISPLAY_MASK: u64 = 0xFFFF;

const TIMESTAMP_FORMAT: &[FormatItem<'static>] = format_description!("[hour]:[minute]:[second].[subsecond digits:5]");

const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// A `Full`-style event formatter that prefixes each line with a timestamp and the current
/// frame number in hex:
///
/// ```text
/// 14:02:11.48213 0x01F4 DEBUG run{round=2}: frogger::game: Game over won=false score=0
/// ```
pub struct FrameFormatter;

impl<S, N> FormatEvent<S, N> for FrameFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> fmt::Result {
        let meta = event.metadata();

        let timestamp = OffsetDateTime::now_utc().format(&TIMESTAMP_FORMAT).map_err(|e| {
            eprintln!("Failed to format timestamp: {e}");
            fmt::Error
        })?;
        write_styled(&mut writer, DIM, timestamp)?;
        writer.write_char(' ')?;
        write_styled(&mut writer, DIM, format_frame(frame_count()))?;
        writer.write_char(' ')?;

        write_level(&mut writer, meta.level())?;
        writer.write_char(' ')?;

        if let Some(scope) = ctx.event_scope() {
            let mut any = false;
            for span in scope.from_root() {
                any = true;
                write_styled(&mut writer, BOLD, span.metadata().name())?;

                let extensions = span.extensions();
                if let Some(fields) = extensions.get::<FormattedFields<N>>().filter(|f| !f.is_empty()) {
                    write_styled(&mut writer, BOLD, "{")?;
                    write!(writer, "{fields}")?;
                    write_styled(&mut writer, BOLD, "}")?;
                }
                write_styled(&mut writer, DIM, ":")?;
            }
            if any {
                writer.write_char(' ')?;
            }
        }

        write_styled(&mut writer, DIM, format_args!("{}:", meta.target()))?;
        writer.write_char(' ')?;

        ctx.format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Five characters wide, right aligned, colored when the writer supports it.
fn write_level(writer: &mut Writer<'_>, level: &Level) -> fmt::Result {
    let (color, label) = match *level {
        Level::TRACE => ("\x1b[35m", "TRACE"),
        Level::DEBUG => ("\x1b[34m", "DEBUG"),
        Level::INFO => ("\x1b[32m", "INFO"),
        Level::WARN => ("\x1b[33m", "WARN"),
        Level::ERROR => ("\x1b[31m", "ERROR"),
    };
    write_styled(writer, color, format_args!("{label:>5}"))
}

fn write_styled(writer: &mut Writer<'_>, style: &str, value: impl fmt::Display) -> fmt::Result {
    if writer.has_ansi_escapes() {
        write!(writer, "{style}{value}{RESET}")
    } else {
        write!(writer, "{value}")
    }
}

/// Renders a frame number the way log lines show it, e.g. `0x002A`.
pub fn format_frame(frame: u64) -> String {
    format!("0x{:04X}", frame & FRAME_DISPLAY_MASK)
}

/// Advances the frame counter. Call once per simulated frame.
pub fn increment_frame() {
    FRAME_COUNTER.fetch_add(1, Ordering::Relaxed);
}

pub fn frame_count() -> u64 {
    FRAME_COUNTER.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_frame_is_padded_hex() {
        assert_eq!(format_frame(0), "0x0000");
        assert_eq!(format_frame(42), "0x002A");
    }

    #[test]
    fn test_format_frame_wraps_at_16_bits() {
        assert_eq!(format_frame(0x1_0001), "0x0001");
    }

    #[test]
    fn test_increment_frame_advances_counter() {
        let before = frame_count();
        increment_frame();
        assert!(frame_count() > before);
    }
}
