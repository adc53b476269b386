// ============================================================================
// Calculator Configuration
// Rounding behaviour and scale limits for every operation
// ============================================================================

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest number of extra fractional digits kept by intermediate division steps
pub const MAX_GUARD_DIGITS: u32 = 10;

/// Largest `max_scale` a configuration may request
pub const MAX_CONFIG_SCALE: u32 = 28;

// ============================================================================
// Rounding Mode
// ============================================================================

/// Rounding applied whenever a result is brought to its output scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RoundingMode {
    /// Ties round away from zero: 0.5 -> 1, -0.5 -> -1
    #[default]
    HalfUp,
    /// Ties round toward zero: 0.5 -> 0, -0.5 -> 0
    HalfDown,
    /// Ties round to the even neighbour (banker's rounding)
    HalfEven,
    /// Always away from zero
    Up,
    /// Always toward zero (truncation)
    Down,
    /// Toward positive infinity
    Ceiling,
    /// Toward negative infinity
    Floor,
}

// ============================================================================
// Complete Calculator Configuration
// ============================================================================

/// Configuration shared by all four operations
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalculatorConfig {
    /// Rounding used for every scale adjustment
    pub rounding_mode: RoundingMode,

    /// Extra fractional digits carried by each intermediate division step
    pub division_guard_digits: u32,

    /// Optional: upper bound on every output scale
    /// None means the scale rules alone decide
    pub max_scale: Option<u32>,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self::new(RoundingMode::HalfUp)
    }
}

impl CalculatorConfig {
    /// Create a configuration with the given rounding mode and default limits
    pub fn new(rounding_mode: RoundingMode) -> Self {
        Self {
            rounding_mode,
            division_guard_digits: 2,
            max_scale: None,
        }
    }

    /// Builder method: Set rounding mode
    pub fn with_rounding_mode(mut self, mode: RoundingMode) -> Self {
        self.rounding_mode = mode;
        self
    }

    /// Builder method: Set division guard digits
    pub fn with_division_guard_digits(mut self, digits: u32) -> Self {
        self.division_guard_digits = digits;
        self
    }

    /// Builder method: Set maximum output scale
    pub fn with_max_scale(mut self, scale: u32) -> Self {
        self.max_scale = Some(scale);
        self
    }

    /// Clamp a scale produced by the scale rules to the configured maximum
    pub fn clamp_scale(&self, scale: u32) -> u32 {
        match self.max_scale {
            Some(max) => scale.min(max),
            None => scale,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.division_guard_digits > MAX_GUARD_DIGITS {
            return Err(format!(
                "Division guard digits must not exceed {}",
                MAX_GUARD_DIGITS
            ));
        }

        if let Some(scale) = self.max_scale {
            if scale > MAX_CONFIG_SCALE {
                return Err(format!("Maximum scale must not exceed {}", MAX_CONFIG_SCALE));
            }
        }

        Ok(())
    }
}

// ============================================================================
// Preset Configurations (Factory Methods)
// ============================================================================

impl CalculatorConfig {
    /// Standard configuration
    /// - Round half-up
    /// - Two guard digits on division
    pub fn standard() -> Self {
        Self::default()
    }

    /// Banker's rounding
    /// - Ties go to the even neighbour
    pub fn bankers() -> Self {
        Self::new(RoundingMode::HalfEven)
    }

    /// Truncating configuration
    /// - Every adjustment drops the discarded digits
    pub fn truncating() -> Self {
        Self::new(RoundingMode::Down)
    }
}
