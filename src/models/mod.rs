//! Domain models shared across the whole backend.

pub mod alert;
pub mod environment;
pub mod position;
pub mod signal;

pub use alert::{AlertAction, SignalType, TradingViewAlert};
pub use environment::Environment;
pub use position::{Position, Side};
pub use signal::{Signal, SubScores};
