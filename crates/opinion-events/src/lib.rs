//! Shared record types for the opinion-dynamics simulation output.
//!
//! This crate contains pure data structures with no simulation logic.
//! The simulation core produces them; analysis tooling reads them back.

pub mod frame;
pub mod summary;
pub mod topology;

// Re-export frame types
pub use frame::{OpinionFrame, Record, VertexAttributes, COORDS_MODE_TRIVIAL, DIM_NAME_VERTEX};

// Re-export summary types
pub use summary::{GroupAverage, OpinionHistogram, RunSummary};

// Re-export topology types
pub use topology::NetworkMetadata;
