use std::fmt;

/// Sentinel the backend uses when a platform had no price.
pub const NOT_AVAILABLE: &str = "N/A";

/// Normalized price of one platform.
///
/// `Amount` is always finite and non-negative; construct through
/// [`parse_price`] or `From<f64>` to keep that true.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ParsedPrice {
    Amount(f64),
    #[default]
    Unavailable,
}

impl ParsedPrice {
    pub fn amount(self) -> Option<f64> {
        match self {
            ParsedPrice::Amount(value) => Some(value),
            ParsedPrice::Unavailable => None,
        }
    }

    pub fn is_available(self) -> bool {
        matches!(self, ParsedPrice::Amount(_))
    }
}

impl From<f64> for ParsedPrice {
    fn from(value: f64) -> Self {
        if value.is_finite() && value >= 0.0 {
            ParsedPrice::Amount(value)
        } else {
            ParsedPrice::Unavailable
        }
    }
}

impl fmt::Display for ParsedPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParsedPrice::Amount(value) => write!(f, "{value}"),
            ParsedPrice::Unavailable => f.write_str(NOT_AVAILABLE),
        }
    }
}

/// Parse a raw price such as `"₹1,23,456.50"` into a number.
///
/// Everything except ASCII digits, `,` and `.` is dropped, then commas are
/// removed as thousands separators. Anything that still fails to parse
/// degrades to [`ParsedPrice::Unavailable`]; this never returns an error.
pub fn parse_price(raw: &str) -> ParsedPrice {
    if raw == NOT_AVAILABLE {
        return ParsedPrice::Unavailable;
    }

    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if cleaned.is_empty() {
        return ParsedPrice::Unavailable;
    }

    match cleaned.parse::<f64>() {
        Ok(value) => ParsedPrice::from(value),
        Err(_) => ParsedPrice::Unavailable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_is_case_sensitive() {
        assert_eq!(parse_price("N/A"), ParsedPrice::Unavailable);
        // "n/a" is not the sentinel, but it has no digits either.
        assert_eq!(parse_price("n/a"), ParsedPrice::Unavailable);
        assert_eq!(parse_price("N/A 500"), ParsedPrice::Amount(500.0));
    }

    #[test]
    fn strips_symbols_and_grouping() {
        assert_eq!(parse_price("₹1,23,456.50"), ParsedPrice::Amount(123_456.5));
        // The abbreviation's period survives filtering.
        assert_eq!(parse_price("Rs. 1,299"), ParsedPrice::Amount(0.1299));
        assert_eq!(parse_price("$ 15,999"), ParsedPrice::Amount(15_999.0));
        assert_eq!(parse_price("-40"), ParsedPrice::Amount(40.0));
    }

    #[test]
    fn malformed_text_is_unavailable() {
        assert_eq!(parse_price(""), ParsedPrice::Unavailable);
        assert_eq!(parse_price("abc"), ParsedPrice::Unavailable);
        assert_eq!(parse_price("1.2.3"), ParsedPrice::Unavailable);
        assert_eq!(parse_price(",,,"), ParsedPrice::Unavailable);
        assert_eq!(parse_price("."), ParsedPrice::Unavailable);
    }

    #[test]
    fn reparsing_display_output_is_stable() {
        for raw in ["₹1,23,456.50", "500", "$0.99", "1,000,000", "12.", ".5"] {
            let first = parse_price(raw);
            assert!(first.is_available(), "{raw} should parse");
            assert_eq!(parse_price(&first.to_string()), first, "{raw}");
        }
    }

    #[test]
    fn from_f64_rejects_invalid_values() {
        assert_eq!(ParsedPrice::from(f64::NAN), ParsedPrice::Unavailable);
        assert_eq!(ParsedPrice::from(f64::INFINITY), ParsedPrice::Unavailable);
        assert_eq!(ParsedPrice::from(-1.0), ParsedPrice::Unavailable);
        assert_eq!(ParsedPrice::from(0.0), ParsedPrice::Amount(0.0));
    }
}
