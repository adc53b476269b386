// ============================================================================
// Calculation Observer Interface
// Defines the contract for receiving calculation diagnostics
// ============================================================================

use crate::domain::Operation;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Events emitted by the calculator
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CalculationEvent {
    /// Operation completed
    Computed {
        operation: Operation,
        operands: Vec<String>,
        result: String,
        scale: u32,
        timestamp: DateTime<Utc>,
    },

    /// Division halted on a zero divisor
    DivisionByZero {
        operands: Vec<String>,
        divisor: String,
        /// Index of the zero divisor in the operand list
        position: usize,
        timestamp: DateTime<Utc>,
    },

    /// Operation rejected before computing
    Rejected {
        operation: Operation,
        reason: String,
        timestamp: DateTime<Utc>,
    },
}

impl CalculationEvent {
    /// The operation this event belongs to
    pub fn operation(&self) -> Operation {
        match self {
            CalculationEvent::Computed { operation, .. } => *operation,
            CalculationEvent::DivisionByZero { .. } => Operation::Divide,
            CalculationEvent::Rejected { operation, .. } => *operation,
        }
    }

    /// When the event was created
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            CalculationEvent::Computed { timestamp, .. }
            | CalculationEvent::DivisionByZero { timestamp, .. }
            | CalculationEvent::Rejected { timestamp, .. } => *timestamp,
        }
    }
}

impl fmt::Display for CalculationEvent {
    /// Human-readable trace line, e.g. `2 - (3, 0.5) = -1.5`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalculationEvent::Computed {
                operation,
                operands,
                result,
                ..
            } => {
                if operation.is_left_fold() {
                    if let Some((first, rest)) = operands.split_first() {
                        return write!(
                            f,
                            "{} {} ({}) = {}",
                            first,
                            operation.symbol(),
                            rest.join(", "),
                            result
                        );
                    }
                }
                let separator = format!(" {} ", operation.symbol());
                write!(f, "{} = {}", operands.join(&separator), result)
            },
            CalculationEvent::DivisionByZero { divisor, position, .. } => {
                write!(f, "division by zero with divisor {} at position {}", divisor, position)
            },
            CalculationEvent::Rejected { operation, reason, .. } => {
                write!(f, "{} rejected: {}", operation, reason)
            },
        }
    }
}

/// Observer trait for calculation diagnostics
/// Implementations can handle logging, auditing, metrics, etc.
pub trait CalculationObserver: Send + Sync {
    /// Handle a calculation event
    fn on_event(&self, event: CalculationEvent);
}

/// No-op observer for testing
pub struct NoOpObserver;

impl CalculationObserver for NoOpObserver {
    fn on_event(&self, _event: CalculationEvent) {}
}

/// Logging observer
pub struct LoggingObserver;

impl CalculationObserver for LoggingObserver {
    fn on_event(&self, event: CalculationEvent) {
        let at = event.timestamp();
        match &event {
            CalculationEvent::Computed {
                operation,
                operands,
                result,
                scale,
                ..
            } => {
                tracing::info!(%operation, ?operands, %result, scale, %at, "{}", event);
            },
            CalculationEvent::DivisionByZero {
                operands,
                divisor,
                position,
                ..
            } => {
                tracing::error!(?operands, %divisor, position, %at, "{}", event);
            },
            CalculationEvent::Rejected { operation, reason, .. } => {
                tracing::warn!(%operation, %reason, %at, "{}", event);
            },
        }
    }
}

/// Observer that keeps every event in memory
#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<CalculationEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all events seen so far
    pub fn events(&self) -> Vec<CalculationEvent> {
        self.events.lock().clone()
    }

    /// Drain all events seen so far
    pub fn take(&self) -> Vec<CalculationEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl CalculationObserver for RecordingObserver {
    fn on_event(&self, event: CalculationEvent) {
        self.events.lock().push(event);
    }
}
