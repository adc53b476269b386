// ============================================================================
// Basic Usage Example
// ============================================================================

use decimal_calculator::operands;
use decimal_calculator::prelude::*;
use std::sync::Arc;

fn main() {
    tracing_subscriber::fmt().with_target(false).init();

    println!("=== Decimal Calculator Example ===\n");

    // Calculator with the standard half-up configuration and tracing output
    let calc = DecimalCalculatorBuilder::new()
        .half_up()
        .build(Arc::new(LoggingObserver))
        .expect("standard configuration is valid");

    println!("Mixed operands...");
    let mixed = operands![1, "2.50", '3', 0.25];
    println!("  sum of {:?} = {:?}", mixed, calc.add(&mixed));

    println!("\nBinary floating point vs exact decimal:");
    println!("  0.1 + 0.2 (f64)     = {}", 0.1 + 0.2);
    println!("  0.1 + 0.2 (decimal) = {:?}", calc.add(&operands![0.1, 0.2]));

    println!("\nScale rules:");
    println!("  -2.3 - -3.3 - 0.9 = {:?}", calc.subtract(&operands![-2.3, -3.3, 0.9]));
    println!("  2.3 * 3.3         = {:?}", calc.multiply(&operands![2.3, 3.3]));
    println!("  2 / 3             = {:?}", calc.divide(&operands![2, 3]));
    println!("  2.0 / 3           = {:?}", calc.divide(&operands!["2.0", 3]));

    println!("\nErrors:");
    println!("  2 / 0        -> {:?}", calc.divide(&operands![2, 0]));
    println!("  'f' + 0      -> {:?}", calc.add(&operands!['f', 0]));
    println!("  single value -> {:?}", calc.multiply(&operands![7]));

    // Same operands under banker's rounding
    let bankers = DecimalCalculatorBuilder::bankers()
        .build(Arc::new(NoOpObserver))
        .expect("bankers configuration is valid");

    println!("\n=== Rounding Modes ===");
    for slots in [operands![5, 2], operands![7, 2], operands![-5, 2]] {
        println!(
            "  {:?}: half-up {:?}, half-even {:?}",
            slots,
            calc.divide(&slots),
            bankers.divide(&slots)
        );
    }
}
