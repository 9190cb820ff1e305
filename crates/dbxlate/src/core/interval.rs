//! Vendor-neutral interval values.

use serde::{Deserialize, Serialize};

/// Average Gregorian month (365.2425 / 12 days) in nanoseconds.
pub const NANOS_PER_MONTH: i64 = 2_629_746_000_000_000;

pub const NANOS_PER_SECOND: i64 = 1_000_000_000;
pub const NANOS_PER_DAY: i64 = 86_400 * NANOS_PER_SECOND;

/// An interval split into a month component and a nanosecond component.
///
/// Year-month intervals keep `nanos == 0`, day-second intervals keep
/// `months == 0`; year-second intervals (PostgreSQL's `interval`) carry both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub months: i64,
    pub nanos: i64,
}

/// Broken-down day-second component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySecondParts {
    pub negative: bool,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub nanos: i64,
}

impl Interval {
    pub fn new(months: i64, nanos: i64) -> Self {
        Self { months, nanos }
    }

    /// Year-month interval.
    pub fn from_months(months: i64) -> Self {
        Self { months, nanos: 0 }
    }

    /// Day-second interval.
    pub fn from_nanos(nanos: i64) -> Self {
        Self { months: 0, nanos }
    }

    /// Single nanosecond total, using the average month length.
    pub fn total_nanos(&self) -> i128 {
        i128::from(self.months) * i128::from(NANOS_PER_MONTH) + i128::from(self.nanos)
    }

    /// Day-second interval holding the whole value, months folded in at the
    /// average length. Saturates at the `i64` range; the flag is set when it
    /// did.
    pub fn folded_day_second(&self) -> (Self, bool) {
        let total = self.total_nanos();
        match i64::try_from(total) {
            Ok(nanos) => (Self::from_nanos(nanos), false),
            Err(_) => {
                let nanos = if total < 0 { i64::MIN } else { i64::MAX };
                (Self::from_nanos(nanos), true)
            }
        }
    }

    /// `(negative, years, months)` of the month component.
    pub fn year_month_parts(&self) -> (bool, i64, i64) {
        let abs = self.months.unsigned_abs();
        (self.months < 0, (abs / 12) as i64, (abs % 12) as i64)
    }

    /// Broken-down nanosecond component.
    pub fn day_second_parts(&self) -> DaySecondParts {
        let negative = self.nanos < 0;
        // Magnitudes stay unsigned so i64::MIN does not wrap.
        let abs = self.nanos.unsigned_abs();
        let per_second = NANOS_PER_SECOND as u64;
        let secs = abs / per_second;
        DaySecondParts {
            negative,
            days: (secs / 86_400) as i64,
            hours: (secs / 3_600 % 24) as i64,
            minutes: (secs / 60 % 60) as i64,
            seconds: (secs % 60) as i64,
            nanos: (abs % per_second) as i64,
        }
    }

    /// `[-]Y-M`
    pub fn format_year_month(&self) -> String {
        let (negative, years, months) = self.year_month_parts();
        format!("{}{}-{}", if negative { "-" } else { "" }, years, months)
    }

    /// `[-]D HH:MM:SS[.f]` with exactly `fraction_digits` fractional digits.
    pub fn format_day_second(&self, fraction_digits: u32) -> String {
        let p = self.day_second_parts();
        let mut out = format!(
            "{}{} {:02}:{:02}:{:02}",
            if p.negative { "-" } else { "" },
            p.days,
            p.hours,
            p.minutes,
            p.seconds
        );
        push_fraction(&mut out, p.nanos, fraction_digits);
        out
    }

    /// Parse `[-]Y-M`.
    pub fn parse_year_month(text: &str) -> Option<Self> {
        let text = text.trim();
        let (negative, body) = split_sign(text);
        let (years, months) = body.split_once('-')?;
        let years: i64 = years.trim().parse().ok()?;
        let months: i64 = months.trim().parse().ok()?;
        if !(0..12).contains(&months) {
            return None;
        }
        let total = years.checked_mul(12)?.checked_add(months)?;
        Some(Self::from_months(if negative { -total } else { total }))
    }

    /// Parse `[-]D HH:MM:SS[.f]`; the day part is optional.
    pub fn parse_day_second(text: &str) -> Option<Self> {
        let text = text.trim();
        let (negative, body) = split_sign(text);
        let (days, clock) = match body.split_once(' ') {
            Some((d, c)) => (d.trim().parse::<i64>().ok()?, c.trim()),
            None => (0, body),
        };
        let mut fields = clock.splitn(3, ':');
        let hours: i64 = fields.next()?.parse().ok()?;
        let minutes: i64 = fields.next()?.parse().ok()?;
        let seconds = fields.next()?;
        let (whole, frac) = match seconds.split_once('.') {
            Some((w, f)) => (w, f),
            None => (seconds, ""),
        };
        let whole: i64 = whole.parse().ok()?;
        if frac.len() > 9 || !frac.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let frac_nanos: i64 = if frac.is_empty() {
            0
        } else {
            format!("{:0<9}", frac).parse().ok()?
        };
        let secs = days
            .checked_mul(86_400)?
            .checked_add(hours.checked_mul(3_600)?)?
            .checked_add(minutes.checked_mul(60)?)?
            .checked_add(whole)?;
        let nanos = secs.checked_mul(NANOS_PER_SECOND)?.checked_add(frac_nanos)?;
        Some(Self::from_nanos(if negative { -nanos } else { nanos }))
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fraction = trimmed_fraction_digits(self.day_second_parts().nanos);
        match (self.months, self.nanos) {
            (_, 0) => f.write_str(&self.format_year_month()),
            (0, _) => f.write_str(&self.format_day_second(fraction)),
            _ => write!(
                f,
                "{} {}",
                self.format_year_month(),
                self.format_day_second(fraction)
            ),
        }
    }
}

fn split_sign(text: &str) -> (bool, &str) {
    match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    }
}

/// Number of significant fractional digits in a nanosecond count.
pub(crate) fn trimmed_fraction_digits(nanos: i64) -> u32 {
    if nanos == 0 {
        return 0;
    }
    let mut digits = 9;
    let mut n = nanos;
    while n % 10 == 0 {
        n /= 10;
        digits -= 1;
    }
    digits
}

/// Append `.fff` with exactly `digits` digits (truncating), or nothing.
pub(crate) fn push_fraction(out: &mut String, nanos: i64, digits: u32) {
    let digits = digits.min(9) as usize;
    if digits == 0 {
        return;
    }
    let full = format!("{:09}", nanos);
    out.push('.');
    out.push_str(&full[..digits]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_nanos_uses_average_month() {
        let iv = Interval::new(1, 5);
        assert_eq!(iv.total_nanos(), 2_629_746_000_000_005);
        let big = Interval::from_months(12 * 10_000);
        assert!(big.total_nanos() > i128::from(i64::MAX));
    }

    #[test]
    fn test_year_month_format_and_parse() {
        let iv = Interval::from_months(14);
        assert_eq!(iv.format_year_month(), "1-2");
        assert_eq!(Interval::parse_year_month("1-2"), Some(iv));
        assert_eq!(
            Interval::parse_year_month("-3-0"),
            Some(Interval::from_months(-36))
        );
        assert_eq!(Interval::parse_year_month("1-12"), None);
    }

    #[test]
    fn test_day_second_format_and_parse() {
        let nanos = (3 * 86_400 + 4 * 3_600 + 5 * 60 + 6) * NANOS_PER_SECOND + 250_000_000;
        let iv = Interval::from_nanos(nanos);
        assert_eq!(iv.format_day_second(3), "3 04:05:06.250");
        assert_eq!(iv.format_day_second(0), "3 04:05:06");
        assert_eq!(Interval::parse_day_second("3 04:05:06.25"), Some(iv));
        assert_eq!(
            Interval::parse_day_second("-00:00:01"),
            Some(Interval::from_nanos(-NANOS_PER_SECOND))
        );
        assert_eq!(Interval::parse_day_second("1 02:03"), None);
    }

    #[test]
    fn test_folded_day_second_saturates() {
        let (folded, clamped) = Interval::new(1, 5).folded_day_second();
        assert_eq!(folded, Interval::from_nanos(NANOS_PER_MONTH + 5));
        assert!(!clamped);

        let (folded, clamped) = Interval::from_months(-12 * 10_000).folded_day_second();
        assert_eq!(folded, Interval::from_nanos(i64::MIN));
        assert!(clamped);
    }

    #[test]
    fn test_extreme_components_format() {
        assert_eq!(
            Interval::from_months(i64::MIN).format_year_month(),
            "-768614336404564650-8"
        );
        assert_eq!(
            Interval::from_nanos(i64::MIN).format_day_second(9),
            "-106751 23:47:16.854775808"
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Interval::from_months(-14).to_string(), "-1-2");
        assert_eq!(
            Interval::from_nanos(90 * NANOS_PER_SECOND + 500_000_000).to_string(),
            "0 00:01:30.5"
        );
        assert_eq!(
            Interval::new(13, NANOS_PER_DAY).to_string(),
            "1-1 1 00:00:00"
        );
    }
}
