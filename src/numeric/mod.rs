// ============================================================================
// Numeric Module
// Exact decimal arithmetic behind the calculator
// ============================================================================
//
// This module provides:
// - Operand: heterogeneous inputs (integers, floats, numeric text, digit chars)
// - Numeral: strict decimal grammar, normalized to positional form
// - ExactDecimal: capability trait over decimal libraries
// - CalcError: error types for every operation
//
// Design principles:
// - No binary floating-point on the exact path
// - All arithmetic returns Result (no panics)
// - Backend chosen at compile time through a type parameter

#[cfg(feature = "bigdecimal")]
mod big;
mod errors;
mod exact;
mod numeral;
mod operand;

pub use errors::{CalcError, CalcResult, DIVISION_BY_ZERO_MESSAGE};
pub use exact::{ExactDecimal, RUST_DECIMAL_MAX_SCALE};
pub use numeral::{Numeral, NumeralError, MAX_EXPONENT_MAGNITUDE};
pub use operand::{to_exact_decimals, DecimalList, Operand};
