// Storage module: the output sink and the collector feeding it.

pub mod collector;
pub mod sink;

pub use collector::{Collector, RunSummary};
pub use sink::Sink;
