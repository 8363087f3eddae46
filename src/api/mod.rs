//! API Module
//!
//! HTTP/JSON surface of the registry: the REST router and the server
//! that hosts it.

pub mod rest;
pub mod server;

pub use rest::*;
pub use server::*;
