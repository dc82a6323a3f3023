//! Output
//!
//! Time-series writing and run statistics.

pub mod stats;
pub mod writer;

pub use stats::*;
pub use writer::*;
