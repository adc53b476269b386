// ============================================================================
// Scale Rules
// Output scale for each operation, derived from the operand scales
// ============================================================================

use crate::domain::Operation;
use crate::numeric::ExactDecimal;

/// Largest scale among `values`, 0 when empty.
pub fn max_scale<D: ExactDecimal>(values: &[D]) -> u32 {
    values
        .iter()
        .map(ExactDecimal::fraction_digits)
        .max()
        .unwrap_or(0)
}

/// Sum of the scales of `values`, saturating.
pub fn sum_scale<D: ExactDecimal>(values: &[D]) -> u32 {
    values
        .iter()
        .map(ExactDecimal::fraction_digits)
        .fold(0u32, u32::saturating_add)
}

/// Output scale of `operation` over `values`, before any clamping.
///
/// | operation | scale |
/// |-----------|-------|
/// | add       | max of all scales |
/// | subtract  | max(scale(first), max of the rest) |
/// | multiply  | sum of all scales |
/// | divide    | max(scale(first), max of the rest) |
pub fn output_scale<D: ExactDecimal>(operation: Operation, values: &[D]) -> u32 {
    match operation {
        Operation::Add => max_scale(values),
        Operation::Multiply => sum_scale(values),
        Operation::Subtract | Operation::Divide => match values.split_first() {
            Some((first, rest)) => first.fraction_digits().max(max_scale(rest)),
            None => 0,
        },
    }
}
