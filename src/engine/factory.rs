// ============================================================================
// Calculator Factory
// Creates calculators with proper configuration
// ============================================================================

use crate::domain::config::{CalculatorConfig, RoundingMode};
use crate::engine::DecimalCalculator;
use crate::interfaces::CalculationObserver;
use crate::numeric::ExactDecimal;
use std::sync::Arc;

// ============================================================================
// Factory Functions
// ============================================================================

/// Creates a calculator from configuration
///
/// # Arguments
/// * `config` - Calculator configuration
/// * `observer` - Observer for calculation events
///
/// # Returns
/// * `Result<DecimalCalculator, String>` - Configured calculator or error
///
/// # Example
/// ```
/// use decimal_calculator::prelude::*;
/// use std::sync::Arc;
///
/// let config = CalculatorConfig::bankers();
/// let calc = create_from_config(config, Arc::new(NoOpObserver)).unwrap();
/// assert_eq!(calc.divide(&operands![5, 2]), Ok(2.0));
/// ```
pub fn create_from_config(
    config: CalculatorConfig,
    observer: Arc<dyn CalculationObserver>,
) -> Result<DecimalCalculator, String> {
    DecimalCalculator::with_config(config, observer)
}

// ============================================================================
// Builder Pattern for Advanced Configuration
// ============================================================================

/// Builder for creating calculators with fluent API
///
/// # Example
/// ```
/// use decimal_calculator::prelude::*;
/// use std::sync::Arc;
///
/// let calc = DecimalCalculatorBuilder::new()
///     .rounding_mode(RoundingMode::HalfUp)
///     .division_guard_digits(4)
///     .build(Arc::new(NoOpObserver))
///     .unwrap();
///
/// assert_eq!(calc.add(&operands![2.3, 3.3]), Ok(5.6));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DecimalCalculatorBuilder {
    config: CalculatorConfig,
}

impl DecimalCalculatorBuilder {
    /// Create a new builder with the standard configuration
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Rounding Configuration
    // ========================================================================

    /// Set the rounding mode
    pub fn rounding_mode(mut self, mode: RoundingMode) -> Self {
        self.config.rounding_mode = mode;
        self
    }

    /// Round half-up (default)
    pub fn half_up(self) -> Self {
        self.rounding_mode(RoundingMode::HalfUp)
    }

    /// Round half-even
    pub fn half_even(self) -> Self {
        self.rounding_mode(RoundingMode::HalfEven)
    }

    // ========================================================================
    // Scale Configuration
    // ========================================================================

    /// Set the guard digits carried by intermediate division steps
    pub fn division_guard_digits(mut self, digits: u32) -> Self {
        self.config.division_guard_digits = digits;
        self
    }

    /// Cap every output scale
    pub fn max_scale(mut self, scale: u32) -> Self {
        self.config.max_scale = Some(scale);
        self
    }

    // ========================================================================
    // Preset Configurations
    // ========================================================================

    /// Start from banker's rounding
    pub fn bankers() -> Self {
        Self {
            config: CalculatorConfig::bankers(),
        }
    }

    /// Start from truncation
    pub fn truncating() -> Self {
        Self {
            config: CalculatorConfig::truncating(),
        }
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Build a calculator on the default `rust_decimal` backend
    pub fn build(self, observer: Arc<dyn CalculationObserver>) -> Result<DecimalCalculator, String> {
        create_from_config(self.config, observer)
    }

    /// Build a calculator on any decimal backend
    pub fn build_with_backend<D: ExactDecimal>(
        self,
        observer: Arc<dyn CalculationObserver>,
    ) -> Result<DecimalCalculator<D>, String> {
        DecimalCalculator::with_config(self.config, observer)
    }

    /// Get the configuration without building (for inspection)
    pub fn get_config(&self) -> &CalculatorConfig {
        &self.config
    }
}
