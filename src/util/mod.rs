//! Small shared helpers with no dependencies on application state.

use std::fmt::Write as _;

/// What: Percent-encode a string for safe inclusion in a URL query value.
///
/// Inputs:
/// - `input`: Raw text (postal codes may contain `-`, service categories may
///   contain multi-byte characters).
///
/// Output:
/// - Encoded string with unreserved characters passed through verbatim.
#[must_use]
pub fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for &b in input.as_bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(b as char);
            }
            b' ' => out.push_str("%20"),
            _ => {
                out.push('%');
                let _ = write!(out, "{b:02X}");
            }
        }
    }
    out
}

/// What: Truncate text to at most `max` characters for error surfacing.
///
/// Inputs:
/// - `text`: Arbitrary response body text.
/// - `max`: Maximum number of characters to keep.
///
/// Output:
/// - The leading `max` characters; never splits a multi-byte character.
#[must_use]
pub fn excerpt(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Number of filled stars for an aggregate rating, clamped to `0..=5`.
#[must_use]
pub fn filled_stars(rating: f64) -> usize {
    if rating.is_nan() || rating <= 0.0 {
        return 0;
    }
    let floored = rating.floor();
    if floored >= 5.0 { 5 } else { floored as usize }
}

fn is_leap(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// What: Format a UNIX timestamp as `YYYY-MM-DD HH:MM:SS` (UTC).
///
/// Inputs:
/// - `secs`: Seconds since the epoch; negative values fall back to `"{secs}"`.
///
/// Output:
/// - Human-readable timestamp used by the log writer.
#[must_use]
pub fn ts_to_date(secs: i64) -> String {
    if secs < 0 {
        return secs.to_string();
    }
    let mut days = secs / 86_400;
    let mut sod = secs % 86_400;
    let hour = sod / 3600;
    sod %= 3600;
    let minute = sod / 60;
    let second = sod % 60;

    let mut year: i32 = 1970;
    loop {
        let diy = if is_leap(year) { 366 } else { 365 };
        if days >= diy {
            days -= diy;
            year += 1;
        } else {
            break;
        }
    }
    let mdays = [
        31,
        if is_leap(year) { 29 } else { 28 },
        31,
        30,
        31,
        30,
        31,
        31,
        30,
        31,
        30,
        31,
    ];
    let mut month: u32 = 1;
    for dim in mdays {
        if days >= dim {
            days -= dim;
            month += 1;
        } else {
            break;
        }
    }
    let day = days + 1;
    format!("{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}")
}
