// ============================================================================
// Operation
// The four arithmetic operations and their scale rules
// ============================================================================

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Arithmetic operation exposed by the calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Operation {
    /// Exact sum, rounded to the largest operand scale
    Add,
    /// First operand minus the sum of the rest, rounded to the largest operand scale
    Subtract,
    /// Exact product, rounded to the sum of the operand scales
    Multiply,
    /// Sequential left-to-right division, rounded to the largest operand scale
    Divide,
}

impl Operation {
    /// All operations, in declaration order
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
    ];

    /// Noun used in validation messages ("... provided for the addition")
    pub const fn name(self) -> &'static str {
        match self {
            Operation::Add => "addition",
            Operation::Subtract => "subtraction",
            Operation::Multiply => "multiplication",
            Operation::Divide => "division",
        }
    }

    /// Infix symbol used in diagnostics
    pub const fn symbol(self) -> char {
        match self {
            Operation::Add => '+',
            Operation::Subtract => '-',
            Operation::Multiply => '*',
            Operation::Divide => '/',
        }
    }

    /// Whether the first operand plays a distinct role (minuend / dividend)
    pub const fn is_left_fold(self) -> bool {
        matches!(self, Operation::Subtract | Operation::Divide)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
