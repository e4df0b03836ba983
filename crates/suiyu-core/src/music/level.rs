/// Parse a chart constant or display level into a number.
///
/// Non-numeric characters are stripped (`"13?"` reads as 13). A `+` adds
/// `plus_offset` (`"12+"` with 0.5 reads as 12.5).
pub fn parse_level(raw: &str, plus_offset: f64) -> Option<f64> {
    let digits: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if digits.is_empty() {
        return None;
    }

    let base: f64 = digits.parse().ok()?;
    if raw.contains('+') {
        Some(base + plus_offset)
    } else {
        Some(base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_levels() {
        assert_eq!(parse_level("12", 0.5), Some(12.0));
        assert_eq!(parse_level("12.7", 0.5), Some(12.7));
    }

    #[test]
    fn test_plus_levels() {
        assert_eq!(parse_level("12+", 0.5), Some(12.5));
        assert_eq!(parse_level("7+", 0.25), Some(7.25));
    }

    #[test]
    fn test_decorated_levels() {
        assert_eq!(parse_level("13?", 0.5), Some(13.0));
        assert_eq!(parse_level("*14", 0.5), Some(14.0));
    }

    #[test]
    fn test_unparseable_levels() {
        assert_eq!(parse_level("", 0.5), None);
        assert_eq!(parse_level("?", 0.5), None);
        assert_eq!(parse_level("1.2.3", 0.5), None);
    }
}
