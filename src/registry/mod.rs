//! Registry Module
//!
//! Client key generation and the registry service that sits between the
//! HTTP API and the store.

pub mod key;
pub mod service;

pub use key::{generate_key, KEY_ALPHABET, KEY_LENGTH};
pub use service::*;
