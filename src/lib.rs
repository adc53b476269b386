// ============================================================================
// Decimal Calculator Library
// Exact decimal arithmetic over heterogeneous operands
// ============================================================================

//! # Decimal Calculator
//!
//! A stateless calculator that adds, subtracts, multiplies and divides mixed
//! operands (integers, floats, numeric text, digit characters) with exact
//! decimal arithmetic and controlled rounding.
//!
//! ## Features
//!
//! - **No binary floating-point error**: floats are read through their
//!   shortest text form, so `0.1 + 0.2` is `0.3`
//! - **Scale bookkeeping** per operation (max, sum, or left-operand rules)
//! - **Configurable rounding** (half-up by default)
//! - **Pluggable decimal backend** through the `ExactDecimal` trait
//! - **Injectable observer** for diagnostics instead of global logging
//!
//! ## Example
//!
//! ```rust
//! use decimal_calculator::prelude::*;
//! use std::sync::Arc;
//!
//! let calc = DecimalCalculator::<rust_decimal::Decimal>::new(Arc::new(NoOpObserver));
//!
//! assert_eq!(calc.add(&operands![-2.3, -3.3, 0.9]), Ok(-4.7));
//! assert_eq!(calc.multiply(&operands![2.3, "3.3"]), Ok(7.59));
//! assert_eq!(calc.divide(&operands![2, 3]), Ok(1.0));
//! assert_eq!(calc.divide(&operands![2, 0]), Err(CalcError::DivisionByZero));
//! ```

pub mod domain;
pub mod engine;
pub mod interfaces;
pub mod numeric;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{CalculatorConfig, Operation, RoundingMode};
    pub use crate::engine::{create_from_config, DecimalCalculator, DecimalCalculatorBuilder};
    pub use crate::interfaces::{
        CalculationEvent, CalculationObserver, LoggingObserver, NoOpObserver, RecordingObserver,
    };
    pub use crate::numeric::{CalcError, CalcResult, ExactDecimal, Operand};
    pub use crate::operands;
}

#[cfg(test)]
mod integration_tests {
    use super::prelude::*;
    use std::sync::Arc;

    #[test]
    fn test_end_to_end_calculation() {
        let observer = Arc::new(RecordingObserver::new());
        let calc = DecimalCalculatorBuilder::new()
            .build(observer.clone())
            .unwrap();

        assert_eq!(calc.add(&operands![2, 3]), Ok(5.0));
        assert_eq!(calc.subtract(&operands![2, 3]), Ok(-1.0));
        assert_eq!(calc.multiply(&operands![-2, -3, 0.5]), Ok(3.0));
        assert_eq!(calc.divide(&operands![2.3, 3.3]), Ok(0.7));
        assert!(calc.divide(&operands![2, 0]).unwrap_err().is_division_by_zero());
        assert!(calc.add(&operands![1]).unwrap_err().is_invalid_argument());

        let events = observer.take();
        assert_eq!(events.len(), 6);
        assert!(matches!(events[4], CalculationEvent::DivisionByZero { .. }));
        assert!(matches!(events[5], CalculationEvent::Rejected { .. }));

        let operations: Vec<Operation> = events.iter().map(|e| e.operation()).collect();
        assert_eq!(
            operations,
            vec![
                Operation::Add,
                Operation::Subtract,
                Operation::Multiply,
                Operation::Divide,
                Operation::Divide,
                Operation::Add,
            ]
        );
    }

    #[test]
    fn test_dispatch_by_operation() {
        let calc = DecimalCalculator::<rust_decimal::Decimal>::new(Arc::new(NoOpObserver));
        let slots = operands!["-2.3", "-3.3", "0.9"];

        let results: Vec<f64> = Operation::ALL
            .iter()
            .map(|op| calc.calculate(*op, &slots).unwrap())
            .collect();

        assert_eq!(results, vec![-4.7, 0.1, 6.831, 0.8]);
    }

    #[cfg(feature = "bigdecimal")]
    #[test]
    fn test_bigdecimal_backend_matches_default() {
        use bigdecimal::BigDecimal;

        let default = DecimalCalculator::<rust_decimal::Decimal>::new(Arc::new(NoOpObserver));
        let big = DecimalCalculator::<BigDecimal>::new(Arc::new(NoOpObserver));

        let cases = [
            operands![-2.3, -3.3, 0.9],
            operands![2, 3],
            operands![-2, -3, 0.5],
            operands![-2.3, -3.3, 0.09],
        ];

        for slots in &cases {
            for op in Operation::ALL {
                assert_eq!(default.calculate(op, slots), big.calculate(op, slots));
            }
        }

        assert_eq!(big.divide(&operands![2, "0.000"]), Err(CalcError::DivisionByZero));
    }

    #[cfg(feature = "bigdecimal")]
    #[test]
    fn test_bigdecimal_backend_has_no_scale_limit() {
        use bigdecimal::BigDecimal;

        let big = DecimalCalculator::<BigDecimal>::new(Arc::new(NoOpObserver));
        let tiny = "0.000000000000001";
        let product = big.multiply_exact(&operands![tiny, tiny]).unwrap();
        assert_eq!(product.fraction_digits(), 30);
        assert!(!product.is_exact_zero());
    }
}
