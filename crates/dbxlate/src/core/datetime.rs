//! Timestamp values with explicit zone-rendering mode.
//!
//! A [`DateTime`] is a wall-clock reading plus, optionally, the offset it was
//! observed in. The offset only decides whether rendered text carries a
//! `+HH:MM` suffix; no conversion between zones ever happens, so dropping the
//! zone for an engine without zone-aware types still yields the same
//! wall-clock text.

use chrono::{Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use super::interval::push_fraction;

/// Whether a value participates in zone-aware rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoneMode {
    /// No zone; rendered as plain wall-clock text.
    None,
    /// Rendered with its offset when the target has a zone-aware type.
    Zoned(FixedOffset),
}

/// Nanosecond-precision timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateTime {
    pub wall: NaiveDateTime,
    pub zone: ZoneMode,
}

impl DateTime {
    /// Zone-less timestamp.
    pub fn naive(wall: NaiveDateTime) -> Self {
        Self {
            wall,
            zone: ZoneMode::None,
        }
    }

    /// Timestamp observed at a fixed offset.
    pub fn zoned(wall: NaiveDateTime, offset: FixedOffset) -> Self {
        Self {
            wall,
            zone: ZoneMode::Zoned(offset),
        }
    }

    /// Midnight of a date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self::naive(date.and_time(NaiveTime::MIN))
    }

    pub fn offset(&self) -> Option<FixedOffset> {
        match self.zone {
            ZoneMode::None => None,
            ZoneMode::Zoned(offset) => Some(offset),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.wall.date()
    }

    pub fn time(&self) -> NaiveTime {
        self.wall.time()
    }

    /// `YYYY-MM-DD`
    pub fn format_date(&self) -> String {
        format_date(self.wall.date())
    }

    /// `HH:MM:SS[.f]`, plus `+HH:MM` when `with_zone` and an offset is known.
    pub fn format_time(&self, fraction_digits: u32, with_zone: bool) -> String {
        let mut out = format_time(self.wall.time(), fraction_digits);
        if with_zone {
            if let Some(offset) = self.offset() {
                out.push_str(&format_offset(offset));
            }
        }
        out
    }

    /// `YYYY-MM-DD HH:MM:SS[.f]`, plus ` +HH:MM` when `with_zone` and an
    /// offset is known.
    pub fn format(&self, fraction_digits: u32, with_zone: bool) -> String {
        let mut out = format!(
            "{} {}",
            self.format_date(),
            format_time(self.wall.time(), fraction_digits)
        );
        if with_zone {
            if let Some(offset) = self.offset() {
                out.push(' ');
                out.push_str(&format_offset(offset));
            }
        }
        out
    }

    /// Parse `YYYY-MM-DD[( |T)HH:MM:SS[.f]][ ]([+-]HH:MM|Z)`.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let (body, offset) = split_offset(text);
        let body = body.trim_end();
        let wall = if body.len() == 10 {
            NaiveDate::parse_from_str(body, "%Y-%m-%d")
                .ok()?
                .and_time(NaiveTime::MIN)
        } else {
            NaiveDateTime::parse_from_str(body, "%Y-%m-%d %H:%M:%S%.f")
                .or_else(|_| NaiveDateTime::parse_from_str(body, "%Y-%m-%dT%H:%M:%S%.f"))
                .ok()?
        };
        Some(match offset {
            Some(offset) => Self::zoned(wall, offset),
            None => Self::naive(wall),
        })
    }
}

impl From<NaiveDateTime> for DateTime {
    fn from(wall: NaiveDateTime) -> Self {
        Self::naive(wall)
    }
}

impl From<chrono::DateTime<FixedOffset>> for DateTime {
    fn from(dt: chrono::DateTime<FixedOffset>) -> Self {
        Self::zoned(dt.naive_local(), *dt.offset())
    }
}

impl std::fmt::Display for DateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let digits = super::interval::trimmed_fraction_digits(i64::from(self.wall.nanosecond()));
        f.write_str(&self.format(digits, true))
    }
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

pub(crate) fn format_time(time: NaiveTime, fraction_digits: u32) -> String {
    let mut out = format!(
        "{:02}:{:02}:{:02}",
        time.hour(),
        time.minute(),
        time.second()
    );
    // Leap-second nanos (>= 1e9) are clamped to the last representable digit.
    let nanos = i64::from(time.nanosecond().min(999_999_999));
    push_fraction(&mut out, nanos, fraction_digits);
    out
}

/// `+HH:MM` / `-HH:MM`
pub(crate) fn format_offset(offset: FixedOffset) -> String {
    let secs = offset.local_minus_utc();
    let sign = if secs < 0 { '-' } else { '+' };
    let abs = secs.unsigned_abs();
    format!("{}{:02}:{:02}", sign, abs / 3600, abs / 60 % 60)
}

fn split_offset(text: &str) -> (&str, Option<FixedOffset>) {
    if let Some(body) = text.strip_suffix('Z') {
        return (body, FixedOffset::east_opt(0));
    }
    if text.len() > 16 && text.is_char_boundary(text.len() - 6) {
        let (body, tail) = text.split_at(text.len() - 6);
        let bytes = tail.as_bytes();
        if (bytes[0] == b'+' || bytes[0] == b'-') && bytes[3] == b':' {
            let hours: i32 = tail[1..3].parse().unwrap_or(-1);
            let minutes: i32 = tail[4..6].parse().unwrap_or(-1);
            if (0..24).contains(&hours) && (0..60).contains(&minutes) {
                let secs = hours * 3600 + minutes * 60;
                let secs = if bytes[0] == b'-' { -secs } else { secs };
                return (body, FixedOffset::east_opt(secs));
            }
        }
    }
    (text, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f").unwrap()
    }

    #[test]
    fn test_format_with_and_without_zone() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let dt = DateTime::zoned(wall("2024-03-01 10:20:30.123456789"), offset);
        assert_eq!(dt.format(3, true), "2024-03-01 10:20:30.123 +02:00");
        // Zone suppressed, wall clock untouched.
        assert_eq!(dt.format(3, false), "2024-03-01 10:20:30.123");
        assert_eq!(dt.format(0, false), "2024-03-01 10:20:30");
        assert_eq!(dt.format_time(6, true), "10:20:30.123456+02:00");
    }

    #[test]
    fn test_naive_never_prints_offset() {
        let dt = DateTime::naive(wall("1999-12-31 23:59:59"));
        assert_eq!(dt.format(0, true), "1999-12-31 23:59:59");
        assert_eq!(dt.zone, ZoneMode::None);
    }

    #[test]
    fn test_negative_offset() {
        let offset = FixedOffset::west_opt(5 * 3600 + 30 * 60).unwrap();
        assert_eq!(format_offset(offset), "-05:30");
    }

    #[test]
    fn test_parse() {
        let dt = DateTime::parse("2024-03-01 10:20:30.5 +02:00").unwrap();
        assert_eq!(dt.offset(), FixedOffset::east_opt(7200));
        assert_eq!(dt.format(1, false), "2024-03-01 10:20:30.5");

        let dt = DateTime::parse("2024-03-01T10:20:30Z").unwrap();
        assert_eq!(dt.offset(), FixedOffset::east_opt(0));

        let dt = DateTime::parse("2024-03-01").unwrap();
        assert_eq!(dt.format(0, true), "2024-03-01 00:00:00");

        assert!(DateTime::parse("yesterday").is_none());
    }

    #[test]
    fn test_display_trims_fraction() {
        let dt = DateTime::naive(wall("2024-03-01 10:20:30.250"));
        assert_eq!(dt.to_string(), "2024-03-01 10:20:30.25");
    }
}
