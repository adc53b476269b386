// ============================================================================
// Decimal Numeral
// Strict textual grammar for operands, normalized to plain positional form
// ============================================================================

use std::fmt;

/// Largest exponent magnitude accepted in scientific notation.
pub const MAX_EXPONENT_MAGNITUDE: u32 = 1_000;

/// Why a piece of text was not accepted as a numeral.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumeralError {
    /// Not a decimal numeral at all
    Malformed,
    /// Well formed, but the exponent is beyond `MAX_EXPONENT_MAGNITUDE`
    OutOfRange,
}

/// A decimal numeral in plain positional form.
///
/// Accepted grammar (no surrounding whitespace):
///
/// ```text
/// numeral  := sign? mantissa exponent?
/// mantissa := digits ('.' digits?)? | '.' digits
/// exponent := ('e' | 'E') sign? digits
/// ```
///
/// The exponent is folded into the digits, so `1.50e1` becomes `15.0`
/// and keeps a scale of 1. Trailing fractional zeros are significant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Numeral {
    negative: bool,
    integer: String,
    fraction: String,
}

impl Numeral {
    /// Parse text into a numeral.
    ///
    /// # Examples
    /// - "123" -> 123 (scale 0)
    /// - "-0.10" -> -0.10 (scale 2)
    /// - ".5" -> 0.5 (scale 1)
    /// - "7." -> 7 (scale 0)
    /// - "2.5e-3" -> 0.0025 (scale 4)
    pub fn parse(text: &str) -> Result<Self, NumeralError> {
        let (negative, rest) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };

        let (mantissa, exponent) = match rest.find(['e', 'E']) {
            Some(pos) => (&rest[..pos], Some(&rest[pos + 1..])),
            None => (rest, None),
        };

        let (integer, fraction) = match mantissa.find('.') {
            Some(pos) => (&mantissa[..pos], &mantissa[pos + 1..]),
            None => (mantissa, ""),
        };

        if integer.is_empty() && fraction.is_empty() {
            return Err(NumeralError::Malformed);
        }
        if !all_ascii_digits(integer) || !all_ascii_digits(fraction) {
            return Err(NumeralError::Malformed);
        }

        let exponent = match exponent {
            Some(exp) => parse_exponent(exp)?,
            None => 0,
        };

        Ok(Self::shifted(negative, integer, fraction, exponent))
    }

    /// Build a numeral from digits and move the decimal point by `exponent`.
    fn shifted(negative: bool, integer: &str, fraction: &str, exponent: i64) -> Self {
        let digits: String = [integer, fraction].concat();
        let point = integer.len() as i64 + exponent;

        let (int_part, frac_part) = if point <= 0 {
            let zeros = "0".repeat(point.unsigned_abs() as usize);
            (String::new(), zeros + &digits)
        } else if point as usize >= digits.len() {
            let zeros = "0".repeat(point as usize - digits.len());
            (digits + &zeros, String::new())
        } else {
            let (i, f) = digits.split_at(point as usize);
            (i.to_string(), f.to_string())
        };

        let trimmed = int_part.trim_start_matches('0');
        let integer = if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        };

        Self {
            negative,
            integer,
            fraction: frac_part,
        }
    }

    /// Number of digits right of the decimal point.
    pub fn scale(&self) -> u32 {
        u32::try_from(self.fraction.len()).unwrap_or(u32::MAX)
    }
}

impl fmt::Display for Numeral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        f.write_str(&self.integer)?;
        if !self.fraction.is_empty() {
            write!(f, ".{}", self.fraction)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Numeral {
    type Err = NumeralError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn all_ascii_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

fn parse_exponent(text: &str) -> Result<i64, NumeralError> {
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    if digits.is_empty() || !all_ascii_digits(digits) {
        return Err(NumeralError::Malformed);
    }

    let significant = digits.trim_start_matches('0');
    let magnitude: u32 = if significant.is_empty() {
        0
    } else {
        // More digits than fit in a u32 is out of range, not malformed.
        significant.parse().map_err(|_| NumeralError::OutOfRange)?
    };

    if magnitude > MAX_EXPONENT_MAGNITUDE {
        return Err(NumeralError::OutOfRange);
    }

    let magnitude = i64::from(magnitude);
    Ok(if negative { -magnitude } else { magnitude })
}
