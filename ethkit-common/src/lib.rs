//! Common types for the ethkit account library.
//!
//! This crate provides the plain value types and the error enum shared
//! by the `ethkit` core and its front ends. It contains no cryptography
//! and performs no I/O.

pub mod error;
pub mod types;

pub use error::EthKitError;
pub use types::*;
