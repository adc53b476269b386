// ============================================================================
// Decimal Calculator
// Core arithmetic over heterogeneous operands
// ============================================================================

use super::scale::output_scale;
use crate::domain::{CalculatorConfig, Operation};
use crate::interfaces::{CalculationEvent, CalculationObserver, LoggingObserver};
use crate::numeric::{to_exact_decimals, CalcError, CalcResult, DecimalList, ExactDecimal, Operand};
use chrono::Utc;
use rust_decimal::Decimal;
use smallvec::SmallVec;
use std::marker::PhantomData;
use std::sync::Arc;

/// Stateless calculator with exact decimal arithmetic.
///
/// Every operation runs the same pipeline:
/// validate -> coerce -> compute exactly -> pick output scale -> round -> `f64`.
///
/// The calculator only holds immutable configuration and an observer handle,
/// so one instance can be shared freely across threads.
pub struct DecimalCalculator<D: ExactDecimal = Decimal> {
    /// Rounding and scale limits
    config: CalculatorConfig,

    /// Receives one event per call
    observer: Arc<dyn CalculationObserver>,

    _backend: PhantomData<fn() -> D>,
}

impl<D: ExactDecimal> DecimalCalculator<D> {
    /// Create a calculator with the standard configuration
    pub fn new(observer: Arc<dyn CalculationObserver>) -> Self {
        Self {
            config: CalculatorConfig::default(),
            observer,
            _backend: PhantomData,
        }
    }

    /// Create a calculator from an explicit configuration
    pub fn with_config(
        config: CalculatorConfig,
        observer: Arc<dyn CalculationObserver>,
    ) -> Result<Self, String> {
        config.validate()?;
        Ok(Self {
            config,
            observer,
            _backend: PhantomData,
        })
    }

    /// Get the active configuration
    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    // ========================================================================
    // Public operations
    // ========================================================================

    /// Sum all operands.
    pub fn add(&self, operands: &[Option<Operand>]) -> CalcResult<f64> {
        self.calculate(Operation::Add, operands)
    }

    /// Subtract every following operand from the first.
    pub fn subtract(&self, operands: &[Option<Operand>]) -> CalcResult<f64> {
        self.calculate(Operation::Subtract, operands)
    }

    /// Multiply all operands.
    pub fn multiply(&self, operands: &[Option<Operand>]) -> CalcResult<f64> {
        self.calculate(Operation::Multiply, operands)
    }

    /// Divide the first operand by each following operand, left to right.
    ///
    /// # Errors
    /// `DivisionByZero` if any divisor is zero.
    pub fn divide(&self, operands: &[Option<Operand>]) -> CalcResult<f64> {
        self.calculate(Operation::Divide, operands)
    }

    /// Run `operation` and convert the rounded result to `f64`.
    pub fn calculate(&self, operation: Operation, operands: &[Option<Operand>]) -> CalcResult<f64> {
        let exact = self.calculate_exact(operation, operands)?;
        exact.to_double().ok_or(CalcError::Overflow { operation })
    }

    pub fn add_exact(&self, operands: &[Option<Operand>]) -> CalcResult<D> {
        self.calculate_exact(Operation::Add, operands)
    }

    pub fn subtract_exact(&self, operands: &[Option<Operand>]) -> CalcResult<D> {
        self.calculate_exact(Operation::Subtract, operands)
    }

    pub fn multiply_exact(&self, operands: &[Option<Operand>]) -> CalcResult<D> {
        self.calculate_exact(Operation::Multiply, operands)
    }

    pub fn divide_exact(&self, operands: &[Option<Operand>]) -> CalcResult<D> {
        self.calculate_exact(Operation::Divide, operands)
    }

    /// Run `operation` and return the rounded decimal itself.
    pub fn calculate_exact(
        &self,
        operation: Operation,
        operands: &[Option<Operand>],
    ) -> CalcResult<D> {
        let outcome = self.evaluate(operation, operands);

        match &outcome {
            Ok((present, result)) => {
                self.observer.on_event(CalculationEvent::Computed {
                    operation,
                    operands: present.iter().map(ToString::to_string).collect(),
                    result: result.to_string(),
                    scale: result.fraction_digits(),
                    timestamp: Utc::now(),
                });
            },
            // Already reported with its own event
            Err(CalcError::DivisionByZero) => {},
            Err(err) => {
                self.observer.on_event(CalculationEvent::Rejected {
                    operation,
                    reason: err.to_string(),
                    timestamp: Utc::now(),
                });
            },
        }

        outcome.map(|(_, result)| result)
    }

    // ========================================================================
    // Pipeline
    // ========================================================================

    fn evaluate<'a>(
        &self,
        operation: Operation,
        operands: &'a [Option<Operand>],
    ) -> CalcResult<(SmallVec<[&'a Operand; 4]>, D)> {
        let present = validate(operation, operands)?;
        let values: DecimalList<D> = to_exact_decimals(present.iter().copied())?;

        let scale = self.target_scale(output_scale(operation, &values));

        let raw = match operation {
            Operation::Add => sum(&values, operation)?,
            Operation::Subtract => {
                let (first, rest) = split(&values)?;
                let subtrahend = sum(rest, operation)?;
                first
                    .exact_sub(&subtrahend)
                    .ok_or(CalcError::Overflow { operation })?
            },
            Operation::Multiply => product(&values, operation)?,
            Operation::Divide => self.quotient(&present, &values, scale)?,
        };

        let rounded = raw
            .rescaled(scale, self.config.rounding_mode)
            .ok_or(CalcError::Overflow { operation })?;

        Ok((present, rounded))
    }

    /// Sequential division; each step keeps `scale + guard digits` digits.
    fn quotient(&self, present: &[&Operand], values: &[D], scale: u32) -> CalcResult<D> {
        let (first, rest) = split(values)?;
        let step_scale = D::clamp_scale(scale.saturating_add(self.config.division_guard_digits));

        let mut result = first.clone();
        for (index, divisor) in rest.iter().enumerate() {
            if divisor.is_exact_zero() {
                self.observer.on_event(CalculationEvent::DivisionByZero {
                    operands: present.iter().map(ToString::to_string).collect(),
                    divisor: divisor.to_string(),
                    position: index + 1,
                    timestamp: Utc::now(),
                });
                return Err(CalcError::DivisionByZero);
            }
            result = result
                .div_rounded(divisor, step_scale, self.config.rounding_mode)
                .ok_or(CalcError::Overflow {
                    operation: Operation::Divide,
                })?;
        }

        Ok(result)
    }

    /// Apply the configured and backend scale limits.
    fn target_scale(&self, scale: u32) -> u32 {
        D::clamp_scale(self.config.clamp_scale(scale))
    }
}

impl<D: ExactDecimal> Default for DecimalCalculator<D> {
    fn default() -> Self {
        Self::new(Arc::new(LoggingObserver))
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Require at least two operands and no absent ones.
fn validate(
    operation: Operation,
    operands: &[Option<Operand>],
) -> CalcResult<SmallVec<[&Operand; 4]>> {
    if operands.len() < 2 {
        return Err(CalcError::invalid(format!(
            "At least two arguments must be provided for the {}",
            operation
        )));
    }

    operands
        .iter()
        .map(|slot| {
            slot.as_ref()
                .ok_or_else(|| CalcError::invalid("No argument may be null"))
        })
        .collect()
}

fn split<D>(values: &[D]) -> CalcResult<(&D, &[D])> {
    values
        .split_first()
        .ok_or_else(|| CalcError::invalid("At least two arguments must be provided"))
}

fn sum<D: ExactDecimal>(values: &[D], operation: Operation) -> CalcResult<D> {
    values.iter().try_fold(D::zero(), |acc, value| {
        acc.exact_add(value).ok_or(CalcError::Overflow { operation })
    })
}

fn product<D: ExactDecimal>(values: &[D], operation: Operation) -> CalcResult<D> {
    values.iter().try_fold(D::one(), |acc, value| {
        acc.exact_mul(value).ok_or(CalcError::Overflow { operation })
    })
}
