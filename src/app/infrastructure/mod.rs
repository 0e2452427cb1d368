//! Infrastructure layer - external integrations and utilities.
//!
//! This module contains code that interfaces with external systems:
//! - Durable key/value store (file-backed and in-memory)
//! - Logging setup
//! - Error types

pub mod error;
pub mod logging;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;
