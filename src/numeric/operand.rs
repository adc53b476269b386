// ============================================================================
// Operand
// Heterogeneous calculator inputs and their coercion to exact decimals
// ============================================================================

use super::errors::{CalcError, CalcResult};
use super::exact::ExactDecimal;
use super::numeral::{Numeral, NumeralError};
use smallvec::SmallVec;
use std::fmt;

/// Operand lists are almost always short; keep them on the stack.
pub type DecimalList<D> = SmallVec<[D; 4]>;

/// One input to a calculator operation.
///
/// Every variant is turned into an exact decimal through its text form,
/// never through binary floating point.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Any primitive integer
    Integer(i128),
    /// A binary floating-point number, read through its shortest round-trip text
    Float(f64),
    /// A decimal numeral such as "-12.50" or "1.5e-3"
    Text(String),
    /// A single digit character
    Char(char),
}

impl Operand {
    /// Name of the variant, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Operand::Integer(_) => "integer",
            Operand::Float(_) => "float",
            Operand::Text(_) => "string",
            Operand::Char(_) => "character",
        }
    }

    /// Decode the operand into a plain positional numeral.
    ///
    /// # Errors
    /// Returns `InvalidArgument` naming the offending value when the operand
    /// is not numeric.
    pub fn to_numeral(&self) -> CalcResult<Numeral> {
        match self {
            Operand::Integer(value) => {
                parse_checked(&value.to_string(), |text| format!("Non-numeric value: {}", text))
            },
            Operand::Float(value) => {
                if !value.is_finite() {
                    return Err(CalcError::invalid(format!("Non-numeric value: {}", value)));
                }
                // Debug output always carries a fractional digit ("2.0") or an exponent.
                parse_checked(&format!("{:?}", value), |text| {
                    format!("Non-numeric value: {}", text)
                })
            },
            Operand::Text(text) => parse_checked(text, |text| format!("Non-numeric string: {}", text)),
            Operand::Char(c) => {
                if !c.is_ascii_digit() {
                    return Err(CalcError::invalid(format!("Non-numeric character: {}", c)));
                }
                parse_checked(c.encode_utf8(&mut [0; 4]), |text| {
                    format!("Non-numeric character: {}", text)
                })
            },
        }
    }

    /// Convert the operand to the backend's exact decimal.
    pub fn to_exact<D: ExactDecimal>(&self) -> CalcResult<D> {
        let numeral = self.to_numeral()?;
        D::from_numeral(&numeral)
            .ok_or_else(|| CalcError::invalid(format!("Numeric value out of range: {}", self)))
    }
}

fn parse_checked(text: &str, malformed: impl FnOnce(&str) -> String) -> CalcResult<Numeral> {
    Numeral::parse(text).map_err(|err| match err {
        NumeralError::Malformed => CalcError::invalid(malformed(text)),
        NumeralError::OutOfRange => {
            CalcError::invalid(format!("Numeric value out of range: {}", text))
        },
    })
}

/// Convert a sequence of operands, preserving order.
///
/// Fails on the first operand that cannot be converted.
pub fn to_exact_decimals<'a, D, I>(operands: I) -> CalcResult<DecimalList<D>>
where
    D: ExactDecimal,
    I: IntoIterator<Item = &'a Operand>,
{
    operands.into_iter().map(Operand::to_exact).collect()
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Integer(value) => write!(f, "{}", value),
            Operand::Float(value) => write!(f, "{:?}", value),
            Operand::Text(text) => f.write_str(text),
            Operand::Char(c) => write!(f, "{}", c),
        }
    }
}

// ============================================================================
// Conversions into Operand
// ============================================================================

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Operand {
                #[inline]
                fn from(value: $t) -> Self {
                    Operand::Integer(i128::from(value))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

impl From<isize> for Operand {
    fn from(value: isize) -> Self {
        Operand::Integer(value as i128)
    }
}

impl From<usize> for Operand {
    fn from(value: usize) -> Self {
        Operand::Integer(value as i128)
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Operand::Float(value)
    }
}

impl From<f32> for Operand {
    /// Widen through the f32's own shortest text so `0.1f32` stays `0.1`.
    fn from(value: f32) -> Self {
        let widened = value.to_string().parse::<f64>().unwrap_or(f64::from(value));
        Operand::Float(widened)
    }
}

impl From<&str> for Operand {
    fn from(value: &str) -> Self {
        Operand::Text(value.to_string())
    }
}

impl From<String> for Operand {
    fn from(value: String) -> Self {
        Operand::Text(value)
    }
}

impl From<char> for Operand {
    fn from(value: char) -> Self {
        Operand::Char(value)
    }
}

impl From<rust_decimal::Decimal> for Operand {
    fn from(value: rust_decimal::Decimal) -> Self {
        Operand::Text(value.to_string())
    }
}

/// Build a `Vec<Option<Operand>>` from a mix of values.
///
/// ```
/// use decimal_calculator::operands;
///
/// let ops = operands![2, -3.5, "1.25", '7'];
/// assert_eq!(ops.len(), 4);
/// ```
#[macro_export]
macro_rules! operands {
    () => {
        ::std::vec::Vec::<::std::option::Option<$crate::numeric::Operand>>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$(::std::option::Option::Some($crate::numeric::Operand::from($value))),+]
    };
}

// ============================================================================
// Dynamic Operands (JSON)
// ============================================================================

#[cfg(feature = "serde")]
impl Operand {
    /// Decode a JSON value into an operand slot.
    ///
    /// `null` becomes an absent slot; booleans, arrays and objects are
    /// rejected as unsupported types.
    pub fn from_json(value: &serde_json::Value) -> CalcResult<Option<Operand>> {
        use serde_json::Value;

        match value {
            Value::Null => Ok(None),
            Value::Number(number) => {
                if let Some(i) = number.as_i64() {
                    Ok(Some(Operand::Integer(i128::from(i))))
                } else if let Some(u) = number.as_u64() {
                    Ok(Some(Operand::Integer(i128::from(u))))
                } else {
                    // Non-integral JSON numbers keep their literal text.
                    Ok(Some(Operand::Text(number.to_string())))
                }
            },
            Value::String(text) => Ok(Some(Operand::Text(text.clone()))),
            Value::Bool(_) => Err(CalcError::invalid("Invalid type: boolean")),
            Value::Array(_) => Err(CalcError::invalid("Invalid type: array")),
            Value::Object(_) => Err(CalcError::invalid("Invalid type: object")),
        }
    }

    /// Decode a JSON array into operand slots, preserving order.
    pub fn slots_from_json(values: &[serde_json::Value]) -> CalcResult<Vec<Option<Operand>>> {
        values.iter().map(Operand::from_json).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn exact(operand: impl Into<Operand>) -> CalcResult<Decimal> {
        operand.into().to_exact::<Decimal>()
    }

    #[test]
    fn test_integer_operand() {
        let d = exact(42).unwrap();
        assert_eq!(d, Decimal::from(42));
        assert_eq!(d.scale(), 0);
        assert_eq!(exact(-7i64).unwrap(), Decimal::from(-7));
        assert_eq!(exact(u64::MAX).unwrap(), Decimal::from(u64::MAX));
    }

    #[test]
    fn test_float_uses_shortest_text() {
        let d = exact(0.1).unwrap();
        assert_eq!(d.to_string(), "0.1");

        let two = exact(2.0).unwrap();
        assert_eq!(two.scale(), 1);

        let f = exact(0.1f32).unwrap();
        assert_eq!(f.to_string(), "0.1");

        assert_eq!(exact(-2.3).unwrap().to_string(), "-2.3");
    }

    #[test]
    fn test_float_non_finite() {
        let err = exact(f64::NAN).unwrap_err();
        assert_eq!(err, CalcError::invalid("Non-numeric value: NaN"));
        assert!(exact(f64::INFINITY).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_float_out_of_range() {
        let err = exact(1e300).unwrap_err();
        assert_eq!(err, CalcError::invalid("Numeric value out of range: 1e300"));
    }

    #[test]
    fn test_text_too_wide_for_backend() {
        let err = exact("9999999999999999999999999999.99").unwrap_err();
        assert_eq!(
            err,
            CalcError::invalid("Numeric value out of range: 9999999999999999999999999999.99")
        );
    }

    #[test]
    fn test_text_operand() {
        assert_eq!(exact("12.50").unwrap().to_string(), "12.50");
        assert_eq!(exact("-1.5e-2").unwrap(), Decimal::from_str("-0.015").unwrap());

        let err = exact("abc").unwrap_err();
        assert_eq!(err, CalcError::invalid("Non-numeric string: abc"));

        let err = exact(String::from("1,5")).unwrap_err();
        assert_eq!(err.to_string(), "Non-numeric string: 1,5");
    }

    #[test]
    fn test_char_operand() {
        assert_eq!(exact('7').unwrap(), Decimal::from(7));

        let err = exact('f').unwrap_err();
        assert_eq!(err, CalcError::invalid("Non-numeric character: f"));

        assert!(exact('-').unwrap_err().is_invalid_argument());
        assert!(exact('٣').unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_decimal_operand() {
        let d = Decimal::new(12345, 3);
        assert_eq!(exact(d).unwrap(), d);
    }

    #[test]
    fn test_list_preserves_order() {
        let list = [Operand::from(3), Operand::from("1.5"), Operand::from('2')];
        let decimals = to_exact_decimals::<Decimal, _>(&list).unwrap();
        let texts: Vec<String> = decimals.iter().map(|d| d.to_string()).collect();
        assert_eq!(texts, vec!["3", "1.5", "2"]);
    }

    #[test]
    fn test_list_fails_on_first_bad_operand() {
        let list = [Operand::from(1), Operand::from("x"), Operand::from('y')];
        let err = to_exact_decimals::<Decimal, _>(&list).unwrap_err();
        assert_eq!(err.to_string(), "Non-numeric string: x");
    }

    #[test]
    fn test_operands_macro() {
        let ops = operands![2, -3.5, "1.25", '7'];
        assert_eq!(ops[0], Some(Operand::Integer(2)));
        assert_eq!(ops[1], Some(Operand::Float(-3.5)));
        assert_eq!(ops[2], Some(Operand::Text("1.25".to_string())));
        assert_eq!(ops[3], Some(Operand::Char('7')));
        assert!(operands![].is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(Operand::from(2.0).to_string(), "2.0");
        assert_eq!(Operand::from("x").to_string(), "x");
        assert_eq!(Operand::from('9').type_name(), "character");
    }

    quickcheck! {
        fn prop_integers_are_exact(value: i64) -> bool {
            exact(value).map(|d| d == Decimal::from(value)).unwrap_or(false)
        }

        fn prop_integer_text_matches_integer(value: i32) -> bool {
            exact(value.to_string()).ok() == exact(value).ok()
        }

        fn prop_digit_chars_parse(digit: u8) -> bool {
            let c = char::from(b'0' + digit % 10);
            exact(c).map(|d| d == Decimal::from(digit % 10)).unwrap_or(false)
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_json() {
        use serde_json::json;

        assert_eq!(Operand::from_json(&json!(null)).unwrap(), None);
        assert_eq!(Operand::from_json(&json!(3)).unwrap(), Some(Operand::Integer(3)));
        assert_eq!(
            Operand::from_json(&json!(2.5)).unwrap(),
            Some(Operand::Text("2.5".to_string()))
        );
        assert_eq!(
            Operand::from_json(&json!(true)).unwrap_err(),
            CalcError::invalid("Invalid type: boolean")
        );
        assert!(Operand::from_json(&json!([1])).is_err());

        let slots = Operand::slots_from_json(&[json!("1.5"), json!(null)]).unwrap();
        assert_eq!(slots, vec![Some(Operand::Text("1.5".to_string())), None]);
    }
}
