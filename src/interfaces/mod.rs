// ============================================================================
// Interfaces Module
// Contains all trait definitions and contracts
// ============================================================================

mod observer;

pub use observer::{
    CalculationEvent, CalculationObserver, LoggingObserver, NoOpObserver, RecordingObserver,
};
