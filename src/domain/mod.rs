// ============================================================================
// Domain Models Module
// Operations and calculator configuration
// ============================================================================

pub mod config;
pub mod operation;

pub use config::{CalculatorConfig, RoundingMode};
pub use operation::Operation;
