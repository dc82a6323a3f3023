//! Run Setup
//!
//! Network construction and user initialization.

pub mod network;
pub mod users;

pub use network::*;
pub use users::*;
