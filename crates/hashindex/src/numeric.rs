//! Lenient numeric parsing.
//!
//! Both functions parse the longest valid numeric prefix of `text` and report
//! how many bytes they consumed. A text with no leading digits parses as zero
//! with nothing consumed.

/// Parses an optionally signed decimal integer prefix. Out-of-range values
/// saturate to `i32::MIN` / `i32::MAX`.
pub fn int_prefix(text: &str) -> (i32, usize) {
    let b = text.as_bytes();
    let mut i = 0;
    let negative = match b.first() {
        Some(b'-') => {
            i = 1;
            true
        }
        Some(b'+') => {
            i = 1;
            false
        }
        _ => false,
    };

    let digits_start = i;
    let limit = i64::from(i32::MAX) + 1;
    let mut acc: i64 = 0;
    while i < b.len() && b[i].is_ascii_digit() {
        acc = (acc * 10 + i64::from(b[i] - b'0')).min(limit);
        i += 1;
    }
    if i == digits_start {
        return (0, 0);
    }

    let signed = if negative { -acc } else { acc };
    let clamped = signed.clamp(i64::from(i32::MIN), i64::from(i32::MAX));
    (clamped as i32, i)
}

/// Parses a float prefix of the form `[+-]digits[.digits][(e|E)[+-]digits]`.
/// At least one digit must appear before the exponent. Out-of-range values
/// saturate to `-f32::MAX` / `f32::MAX`, so the result is always finite.
pub fn float_prefix(text: &str) -> (f32, usize) {
    let b = text.as_bytes();
    let mut i = 0;
    if matches!(b.first(), Some(b'-' | b'+')) {
        i = 1;
    }

    let int_start = i;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < b.len() && b[i] == b'.' {
        let mut j = i + 1;
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
        }
        digits += j - (i + 1);
        if digits > 0 {
            i = j;
        }
    }
    if digits == 0 {
        return (0.0, 0);
    }

    if i < b.len() && (b[i] == b'e' || b[i] == b'E') {
        let mut j = i + 1;
        if j < b.len() && (b[j] == b'-' || b[j] == b'+') {
            j += 1;
        }
        let exp_start = j;
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    let value = text[..i].parse::<f32>().unwrap_or(0.0);
    (value.clamp(-f32::MAX, f32::MAX), i)
}
