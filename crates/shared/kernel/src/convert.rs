//! Lenient value coercion: parse the textual form of a value into a target type,
//! yielding `None` (or a caller-supplied default) instead of an error.

use chrono::{NaiveDate, NaiveDateTime};
use std::fmt::Display;

/// Separator-based layouts tried first, most specific to least.
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// A type that can be coerced from text.
pub trait Coerce: Sized {
    fn coerce(raw: &str) -> Option<Self>;
}

macro_rules! coerce_from_str {
    ($($ty:ty),*) => {
        $(
            impl Coerce for $ty {
                fn coerce(raw: &str) -> Option<Self> {
                    raw.trim().parse().ok()
                }
            }
        )*
    };
}

coerce_from_str!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl Coerce for bool {
    /// Only `true`/`false` in any letter case; `1`, `yes` and friends are rejected.
    fn coerce(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("true") {
            Some(true)
        } else if raw.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        }
    }
}

impl Coerce for String {
    fn coerce(raw: &str) -> Option<Self> {
        Some(raw.to_owned())
    }
}

impl Coerce for NaiveDateTime {
    fn coerce(raw: &str) -> Option<Self> {
        parse_date_time(raw)
    }
}

impl Coerce for NaiveDate {
    fn coerce(raw: &str) -> Option<Self> {
        parse_date_time(raw).map(|value| value.date())
    }
}

/// Converts `value` through its textual form, or `None` when it does not parse as `T`.
pub fn convert_by_type<T: Coerce>(value: impl Display) -> Option<T> {
    T::coerce(&value.to_string())
}

/// Like [`convert_by_type`], falling back to `default`.
pub fn convert_type<T: Coerce>(value: impl Display, default: T) -> T {
    convert_by_type(value).unwrap_or(default)
}

/// Parses a date/time in one of the separator layouts, or the compact
/// `yyyyMMdd`, `yyyyMMddHH`, `yyyyMMddHHmm`, `yyyyMMddHHmmss` forms.
#[must_use]
pub fn parse_date_time(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .or_else(|| parse_compact(raw))
}

fn parse_compact(raw: &str) -> Option<NaiveDateTime> {
    if !matches!(raw.len(), 8 | 10 | 12 | 14) || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    // Digits only, so byte slicing is safe; missing trailing fields default to zero.
    let field = |range: std::ops::Range<usize>| {
        raw.get(range).map_or(Some(0), |digits| digits.parse::<u32>().ok())
    };
    let year = raw.get(0..4)?.parse::<i32>().ok()?;
    let month = field(4..6)?;
    let day = field(6..8)?;
    let hour = field(8..10)?;
    let minute = field(10..12)?;
    let second = field(12..14)?;

    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)
}
