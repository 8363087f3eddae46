//! Domain layer - Records and port definitions
//!
//! Defines the client and command records and the storage trait (port)
//! that adapters implement.

pub mod ports;

pub use ports::*;
