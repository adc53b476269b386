// ============================================================================
// BigDecimal Backend
// Unbounded-scale implementation of `ExactDecimal` (feature = "bigdecimal")
// ============================================================================

use super::exact::ExactDecimal;
use super::numeral::Numeral;
use crate::domain::RoundingMode;
use bigdecimal::{BigDecimal, One, ToPrimitive, Zero};
use std::str::FromStr;

impl From<RoundingMode> for bigdecimal::RoundingMode {
    fn from(mode: RoundingMode) -> Self {
        match mode {
            RoundingMode::HalfUp => bigdecimal::RoundingMode::HalfUp,
            RoundingMode::HalfDown => bigdecimal::RoundingMode::HalfDown,
            RoundingMode::HalfEven => bigdecimal::RoundingMode::HalfEven,
            RoundingMode::Up => bigdecimal::RoundingMode::Up,
            RoundingMode::Down => bigdecimal::RoundingMode::Down,
            RoundingMode::Ceiling => bigdecimal::RoundingMode::Ceiling,
            RoundingMode::Floor => bigdecimal::RoundingMode::Floor,
        }
    }
}

impl ExactDecimal for BigDecimal {
    const MAX_SCALE: Option<u32> = None;

    fn zero() -> Self {
        <BigDecimal as Zero>::zero()
    }

    fn one() -> Self {
        <BigDecimal as One>::one()
    }

    fn from_numeral(numeral: &Numeral) -> Option<Self> {
        BigDecimal::from_str(&numeral.to_string()).ok()
    }

    fn fraction_digits(&self) -> u32 {
        let (_, exponent) = self.as_bigint_and_exponent();
        u32::try_from(exponent.max(0)).unwrap_or(u32::MAX)
    }

    fn is_exact_zero(&self) -> bool {
        Zero::is_zero(self)
    }

    fn exact_add(&self, rhs: &Self) -> Option<Self> {
        Some(self + rhs)
    }

    fn exact_sub(&self, rhs: &Self) -> Option<Self> {
        Some(self - rhs)
    }

    fn exact_mul(&self, rhs: &Self) -> Option<Self> {
        Some(self * rhs)
    }

    fn div_rounded(&self, rhs: &Self, scale: u32, mode: RoundingMode) -> Option<Self> {
        if Zero::is_zero(rhs) {
            return None;
        }
        // Division carries the backend's default precision; round from there.
        let quotient = self / rhs;
        Some(quotient.with_scale_round(i64::from(scale), mode.into()))
    }

    fn rescaled(&self, scale: u32, mode: RoundingMode) -> Option<Self> {
        Some(self.with_scale_round(i64::from(scale), mode.into()))
    }

    fn to_double(&self) -> Option<f64> {
        self.to_string()
            .parse::<f64>()
            .ok()
            .or_else(|| ToPrimitive::to_f64(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(text: &str) -> BigDecimal {
        BigDecimal::from_str(text).unwrap()
    }

    #[test]
    fn test_from_numeral_unbounded() {
        let numeral = Numeral::parse("1e-40").unwrap();
        let value = BigDecimal::from_numeral(&numeral).unwrap();
        assert_eq!(value.fraction_digits(), 40);
    }

    #[test]
    fn test_rescaled_half_up() {
        assert_eq!(big("2.5").rescaled(0, RoundingMode::HalfUp), Some(big("3")));
        assert_eq!(big("-2.5").rescaled(0, RoundingMode::HalfUp), Some(big("-3")));
        assert_eq!(big("7").rescaled(2, RoundingMode::HalfUp).unwrap().fraction_digits(), 2);
    }

    #[test]
    fn test_div_rounded() {
        let q = big("2").div_rounded(&big("3"), 2, RoundingMode::HalfUp).unwrap();
        assert_eq!(q, big("0.67"));
        assert!(big("2").div_rounded(&big("0.0"), 2, RoundingMode::HalfUp).is_none());
    }

    #[test]
    fn test_to_double() {
        assert_eq!(big("7.59").to_double(), Some(7.59));
        assert_eq!(big("-0.1").to_double(), Some(-0.1));
    }
}
