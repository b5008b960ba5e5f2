//! Count values: parsed targets and per-frame readouts.

use std::fmt;

/// A whole number shown by a counter, or the not-a-number marker produced
/// by a missing or non-numeric target attribute.
///
/// Not-a-number is sticky: scaling it yields not-a-number and it renders as
/// the literal `NaN`, so a broken attribute stays visible instead of being
/// silently replaced by zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CountValue {
    /// A whole number.
    Value(i64),
    /// The target could not be parsed.
    NotANumber,
}

impl CountValue {
    /// Parse an attribute value with integer-prefix semantics.
    ///
    /// Leading whitespace is skipped, an optional `+`/`-` sign is accepted,
    /// then the longest run of ASCII digits is used (`"12px"` is 12).
    /// Missing values and values without leading digits are
    /// [`CountValue::NotANumber`]. Out-of-range values saturate.
    #[must_use]
    pub fn parse_attribute(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::NotANumber;
        };
        let trimmed =
            raw.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
        let (negative, unsigned) = if let Some(rest) = trimmed.strip_prefix('-') {
            (true, rest)
        } else {
            (false, trimmed.strip_prefix('+').unwrap_or(trimmed))
        };

        let digits: Vec<i64> = unsigned
            .bytes()
            .take_while(u8::is_ascii_digit)
            .map(|b| i64::from(b - b'0'))
            .collect();
        if digits.is_empty() {
            return Self::NotANumber;
        }

        let value = digits.into_iter().fold(0_i64, |acc, digit| {
            let shifted = acc.saturating_mul(10);
            if negative {
                shifted.saturating_sub(digit)
            } else {
                shifted.saturating_add(digit)
            }
        });
        Self::Value(value)
    }

    /// `floor(fraction * self)`; not-a-number stays not-a-number.
    #[must_use]
    pub fn scaled(self, fraction: f64) -> Self {
        match self {
            Self::Value(n) => Self::Value((fraction * n as f64).floor() as i64),
            Self::NotANumber => Self::NotANumber,
        }
    }

    /// Whether this is the not-a-number marker.
    #[must_use]
    pub fn is_nan(self) -> bool {
        matches!(self, Self::NotANumber)
    }
}

impl fmt::Display for CountValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(n) => write!(f, "{n}"),
            Self::NotANumber => f.write_str("NaN"),
        }
    }
}
