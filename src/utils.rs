//! Utility functions for common operations.

/// Parse the leading base-10 integer of `raw` the way browsers parse numeric
/// attributes: surrounding whitespace is skipped, an optional sign is accepted
/// and anything after the digits is ignored. Returns `None` when no digit
/// follows.
pub fn parse_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let mut value: i64 = 0;
    for b in digits[..end].bytes() {
        value = value.saturating_mul(10).saturating_add(i64::from(b - b'0'));
    }
    Some(if negative { -value } else { value })
}

/// Like [`parse_int`], but zero and unparseable input both yield `fallback`.
pub fn parse_int_or(raw: Option<&str>, fallback: i64) -> i64 {
    match raw.and_then(parse_int) {
        Some(0) | None => fallback,
        Some(value) => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int_plain() {
        assert_eq!(parse_int("4000"), Some(4000));
        assert_eq!(parse_int("  75"), Some(75));
    }

    #[test]
    fn test_parse_int_sign() {
        assert_eq!(parse_int("-5"), Some(-5));
        assert_eq!(parse_int("+12"), Some(12));
        assert_eq!(parse_int("-"), None);
    }

    #[test]
    fn test_parse_int_trailing_garbage() {
        assert_eq!(parse_int("12abc"), Some(12));
        assert_eq!(parse_int("12.7"), Some(12));
        assert_eq!(parse_int("300ms"), Some(300));
    }

    #[test]
    fn test_parse_int_rejects_non_numeric() {
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("abc"), None);
        assert_eq!(parse_int(".5"), None);
    }

    #[test]
    fn test_parse_int_or_falls_back_on_zero() {
        assert_eq!(parse_int_or(Some("0"), 50), 50);
        assert_eq!(parse_int_or(Some(""), 50), 50);
        assert_eq!(parse_int_or(None, 50), 50);
        assert_eq!(parse_int_or(Some("120"), 50), 120);
    }
}
