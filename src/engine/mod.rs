// ============================================================================
// Engine Module
// Contains the calculator pipeline and its scale rules
// ============================================================================

mod calculator;

pub mod factory;
pub mod scale;

pub use calculator::DecimalCalculator;
pub use factory::{create_from_config, DecimalCalculatorBuilder};
