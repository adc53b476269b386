// ============================================================================
// Exact Decimal Backend
// Capability trait over base-10 arithmetic libraries
// ============================================================================
//
// The calculator never touches a concrete decimal type directly. Everything
// it needs (parse, scale, the four operations, rounding, conversion to f64)
// goes through `ExactDecimal`, so any decimal library can be plugged in.

use super::numeral::Numeral;
use crate::domain::RoundingMode;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::cmp::Ordering;
use std::fmt;

/// Largest scale a `rust_decimal::Decimal` can carry.
pub const RUST_DECIMAL_MAX_SCALE: u32 = 28;

/// Exact base-10 arithmetic used by the calculator.
///
/// Every fallible method returns `None` when the backend cannot represent
/// the result; the caller turns that into a typed error.
pub trait ExactDecimal: Clone + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Largest scale the backend can hold, if bounded.
    const MAX_SCALE: Option<u32>;

    /// Additive identity.
    fn zero() -> Self;

    /// Multiplicative identity.
    fn one() -> Self;

    /// Build from a plain positional numeral, keeping its scale.
    fn from_numeral(numeral: &Numeral) -> Option<Self>;

    /// Digits right of the decimal point.
    fn fraction_digits(&self) -> u32;

    /// Value equality with zero, whatever the scale.
    fn is_exact_zero(&self) -> bool;

    fn exact_add(&self, rhs: &Self) -> Option<Self>;

    fn exact_sub(&self, rhs: &Self) -> Option<Self>;

    fn exact_mul(&self, rhs: &Self) -> Option<Self>;

    /// `self / rhs` carried to exactly `scale` fractional digits.
    ///
    /// Returns `None` for a zero divisor or an unrepresentable quotient.
    fn div_rounded(&self, rhs: &Self, scale: u32, mode: RoundingMode) -> Option<Self>;

    /// The same value at exactly `scale` fractional digits.
    fn rescaled(&self, scale: u32, mode: RoundingMode) -> Option<Self>;

    /// Nearest `f64` to the exact value.
    fn to_double(&self) -> Option<f64>;

    /// Clamp a requested scale to what the backend can hold.
    fn clamp_scale(scale: u32) -> u32 {
        match Self::MAX_SCALE {
            Some(max) => scale.min(max),
            None => scale,
        }
    }
}

// ============================================================================
// rust_decimal backend
// ============================================================================

impl From<RoundingMode> for RoundingStrategy {
    fn from(mode: RoundingMode) -> Self {
        match mode {
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::HalfDown => RoundingStrategy::MidpointTowardZero,
            RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
            RoundingMode::Up => RoundingStrategy::AwayFromZero,
            RoundingMode::Down => RoundingStrategy::ToZero,
            RoundingMode::Ceiling => RoundingStrategy::ToPositiveInfinity,
            RoundingMode::Floor => RoundingStrategy::ToNegativeInfinity,
        }
    }
}

impl ExactDecimal for Decimal {
    const MAX_SCALE: Option<u32> = Some(RUST_DECIMAL_MAX_SCALE);

    fn zero() -> Self {
        Decimal::ZERO
    }

    fn one() -> Self {
        Decimal::ONE
    }

    fn from_numeral(numeral: &Numeral) -> Option<Self> {
        if numeral.scale() > RUST_DECIMAL_MAX_SCALE {
            return None;
        }
        // from_str_exact fails instead of rounding digits that do not fit.
        let parsed = Decimal::from_str_exact(&numeral.to_string()).ok()?;
        (parsed.scale() == numeral.scale()).then_some(parsed)
    }

    fn fraction_digits(&self) -> u32 {
        Decimal::scale(self)
    }

    fn is_exact_zero(&self) -> bool {
        Decimal::is_zero(self)
    }

    fn exact_add(&self, rhs: &Self) -> Option<Self> {
        Decimal::checked_add(*self, *rhs)
    }

    fn exact_sub(&self, rhs: &Self) -> Option<Self> {
        Decimal::checked_sub(*self, *rhs)
    }

    fn exact_mul(&self, rhs: &Self) -> Option<Self> {
        Decimal::checked_mul(*self, *rhs)
    }

    fn div_rounded(&self, rhs: &Self, scale: u32, mode: RoundingMode) -> Option<Self> {
        if Decimal::is_zero(rhs) {
            return None;
        }
        let scale = <Self as ExactDecimal>::clamp_scale(scale);
        // A quotient too wide for the requested scale keeps the digits that fit.
        (0..=scale)
            .rev()
            .find_map(|digits| divide_at_scale(self, rhs, digits, mode))
    }

    fn rescaled(&self, scale: u32, mode: RoundingMode) -> Option<Self> {
        let scale = <Self as ExactDecimal>::clamp_scale(scale);
        let mut rounded = self.round_dp_with_strategy(scale, mode.into());
        // round_dp never widens; pad with zeros so the scale is exact.
        if rounded.scale() < scale {
            rounded.rescale(scale);
        }
        Some(rounded)
    }

    fn to_double(&self) -> Option<f64> {
        // Text parsing is correctly rounded; ToPrimitive is a fallback only.
        self.to_string()
            .parse::<f64>()
            .ok()
            .or_else(|| ToPrimitive::to_f64(self))
    }
}

/// What the digits dropped by a truncated quotient are worth, in units of
/// its last place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Remainder {
    Zero,
    BelowHalf,
    Half,
    AboveHalf,
}

/// `lhs / rhs` at exactly `scale` digits, rounded once from the exact quotient.
///
/// Works on the 96-bit mantissas directly: `checked_div` rounds to 28
/// significant digits first, and rounding that again can land on the wrong
/// side of a midpoint.
fn divide_at_scale(
    lhs: &Decimal,
    rhs: &Decimal,
    scale: u32,
    mode: RoundingMode,
) -> Option<Decimal> {
    let negative = (lhs.mantissa() < 0) != (rhs.mantissa() < 0);
    let numerator = lhs.mantissa().unsigned_abs();
    let denominator = rhs.mantissa().unsigned_abs();

    // quotient * 10^scale == numerator * 10^shift / denominator
    let shift = i64::from(scale) + i64::from(rhs.scale()) - i64::from(lhs.scale());

    let (truncated, remainder) = if shift >= 0 {
        let mut quotient = numerator / denominator;
        let mut rest = numerator % denominator;
        for _ in 0..shift {
            // rest < 2^96, so rest * 10 stays well inside u128
            rest *= 10;
            quotient = quotient.checked_mul(10)?.checked_add(rest / denominator)?;
            rest %= denominator;
        }
        let remainder = if rest == 0 {
            Remainder::Zero
        } else {
            match (rest * 2).cmp(&denominator) {
                Ordering::Less => Remainder::BelowHalf,
                Ordering::Equal => Remainder::Half,
                Ordering::Greater => Remainder::AboveHalf,
            }
        };
        (quotient, remainder)
    } else {
        // lhs.scale() <= 28, so the divisor power fits in u128
        let power = 10u128.checked_pow(u32::try_from(-shift).ok()?)?;
        let whole = numerator / denominator;
        let rest = numerator % denominator;
        let dropped = whole % power;
        let remainder = if dropped == 0 && rest == 0 {
            Remainder::Zero
        } else {
            match dropped.cmp(&(power / 2)) {
                Ordering::Less => Remainder::BelowHalf,
                Ordering::Equal if rest == 0 => Remainder::Half,
                _ => Remainder::AboveHalf,
            }
        };
        (whole / power, remainder)
    };

    let away_from_zero = match (remainder, mode) {
        (Remainder::Zero, _) => false,
        (_, RoundingMode::Up) => true,
        (_, RoundingMode::Down) => false,
        (_, RoundingMode::Ceiling) => !negative,
        (_, RoundingMode::Floor) => negative,
        (r, RoundingMode::HalfUp) => r >= Remainder::Half,
        (r, RoundingMode::HalfDown) => r == Remainder::AboveHalf,
        (r, RoundingMode::HalfEven) => {
            r == Remainder::AboveHalf || (r == Remainder::Half && truncated % 2 == 1)
        },
    };

    let magnitude = if away_from_zero {
        truncated.checked_add(1)?
    } else {
        truncated
    };
    let mantissa = i128::try_from(magnitude).ok()?;
    let signed = if negative { -mantissa } else { mantissa };
    Decimal::try_from_i128_with_scale(signed, scale).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(text: &str) -> Decimal {
        Decimal::from_str(text).unwrap()
    }

    fn numeral(text: &str) -> Numeral {
        Numeral::parse(text).unwrap()
    }

    #[test]
    fn test_from_numeral_keeps_scale() {
        let d = Decimal::from_numeral(&numeral("2.500")).unwrap();
        assert_eq!(d.fraction_digits(), 3);
        assert_eq!(d.to_string(), "2.500");

        let small = Decimal::from_numeral(&numeral("1e-7")).unwrap();
        assert_eq!(small, dec("0.0000001"));
    }

    #[test]
    fn test_from_numeral_out_of_range() {
        assert!(Decimal::from_numeral(&numeral("1e40")).is_none());
        assert!(Decimal::from_numeral(&numeral("1e-29")).is_none());
    }

    #[test]
    fn test_from_numeral_rejects_lossy_text() {
        let wide = numeral("9999999999999999999999999999.99");
        assert!(Decimal::from_numeral(&wide).is_none());

        let fits = Decimal::from_numeral(&numeral("999999999999999999999999999.9")).unwrap();
        assert_eq!(fits.fraction_digits(), 1);
    }

    #[test]
    fn test_zero_ignores_scale() {
        assert!(dec("0.000").is_exact_zero());
        assert!(dec("-0.0").is_exact_zero());
        assert!(!dec("0.001").is_exact_zero());
    }

    #[test]
    fn test_rescaled_half_up() {
        assert_eq!(dec("2.5").rescaled(0, RoundingMode::HalfUp), Some(dec("3")));
        assert_eq!(dec("-2.5").rescaled(0, RoundingMode::HalfUp), Some(dec("-3")));
        assert_eq!(dec("2.45").rescaled(1, RoundingMode::HalfUp), Some(dec("2.5")));
        assert_eq!(dec("2.44").rescaled(1, RoundingMode::HalfUp), Some(dec("2.4")));
    }

    #[test]
    fn test_rescaled_other_modes() {
        assert_eq!(dec("2.5").rescaled(0, RoundingMode::HalfEven), Some(dec("2")));
        assert_eq!(dec("2.5").rescaled(0, RoundingMode::HalfDown), Some(dec("2")));
        assert_eq!(dec("2.1").rescaled(0, RoundingMode::Up), Some(dec("3")));
        assert_eq!(dec("2.9").rescaled(0, RoundingMode::Down), Some(dec("2")));
        assert_eq!(dec("-2.1").rescaled(0, RoundingMode::Ceiling), Some(dec("-2")));
        assert_eq!(dec("-2.1").rescaled(0, RoundingMode::Floor), Some(dec("-3")));
    }

    #[test]
    fn test_rescaled_widens() {
        let widened = dec("5").rescaled(2, RoundingMode::HalfUp).unwrap();
        assert_eq!(widened.fraction_digits(), 2);
        assert_eq!(widened.to_string(), "5.00");
    }

    #[test]
    fn test_div_rounded() {
        let q = dec("2").div_rounded(&dec("3"), 2, RoundingMode::HalfUp).unwrap();
        assert_eq!(q.to_string(), "0.67");

        let q = dec("-2").div_rounded(&dec("3"), 2, RoundingMode::HalfUp).unwrap();
        assert_eq!(q.to_string(), "-0.67");

        assert!(dec("1").div_rounded(&dec("0.00"), 2, RoundingMode::HalfUp).is_none());
    }

    #[test]
    fn test_div_rounded_from_exact_quotient() {
        // 0.494999...95 must not round through 0.495 first
        let q = dec("9899999999999999999999999999")
            .div_rounded(&dec("20000000000000000000000000000"), 2, RoundingMode::HalfUp)
            .unwrap();
        assert_eq!(q.to_string(), "0.49");
    }

    #[test]
    fn test_div_rounded_midpoint_modes() {
        let eighth = |mode| dec("1").div_rounded(&dec("8"), 2, mode).unwrap().to_string();
        assert_eq!(eighth(RoundingMode::HalfUp), "0.13");
        assert_eq!(eighth(RoundingMode::HalfDown), "0.12");
        assert_eq!(eighth(RoundingMode::HalfEven), "0.12");
        assert_eq!(eighth(RoundingMode::Up), "0.13");
        assert_eq!(eighth(RoundingMode::Down), "0.12");

        let minus = |mode| dec("-1").div_rounded(&dec("8"), 2, mode).unwrap().to_string();
        assert_eq!(minus(RoundingMode::HalfUp), "-0.13");
        assert_eq!(minus(RoundingMode::Ceiling), "-0.12");
        assert_eq!(minus(RoundingMode::Floor), "-0.13");
    }

    #[test]
    fn test_div_rounded_below_dividend_scale() {
        let q = |text: &str, mode| dec(text).div_rounded(&dec("1"), 0, mode).unwrap().to_string();
        assert_eq!(q("1.25", RoundingMode::HalfUp), "1");
        assert_eq!(q("1.50", RoundingMode::HalfUp), "2");
        assert_eq!(q("2.50", RoundingMode::HalfEven), "2");
        assert_eq!(q("2.501", RoundingMode::HalfEven), "3");
        assert_eq!(q("2.001", RoundingMode::Ceiling), "3");
    }

    #[test]
    fn test_div_rounded_keeps_digits_that_fit() {
        let q = dec("100").div_rounded(&dec("3"), 28, RoundingMode::HalfUp).unwrap();
        assert_eq!(q.fraction_digits(), 27);
        assert!(q.to_string().starts_with("33.3333"));
    }

    #[test]
    fn test_checked_arithmetic() {
        assert_eq!(dec("2.3").exact_add(&dec("3.3")), Some(dec("5.6")));
        assert_eq!(dec("2.3").exact_sub(&dec("3.3")), Some(dec("-1.0")));
        assert_eq!(dec("2.3").exact_mul(&dec("3.3")), Some(dec("7.59")));
        assert!(Decimal::MAX.exact_add(&Decimal::ONE).is_none());
        assert!(Decimal::MAX.exact_mul(&dec("2")).is_none());
    }

    #[test]
    fn test_to_double() {
        assert_eq!(dec("7.59").to_double(), Some(7.59));
        assert_eq!(dec("-4.7").to_double(), Some(-4.7));
        assert_eq!(dec("0.1").to_double(), Some(0.1));
        assert_eq!(dec("6.831").to_double(), Some(6.831));
    }

    #[test]
    fn test_clamp_scale() {
        assert_eq!(<Decimal as ExactDecimal>::clamp_scale(40), 28);
        assert_eq!(<Decimal as ExactDecimal>::clamp_scale(4), 4);
    }
}
