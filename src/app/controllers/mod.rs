//! Controllers layer - orchestration and coordination.
//!
//! This module contains controllers that coordinate between
//! domain models, services, and the store:
//! - Reading session (selection, fetch lifecycle, resume position)

pub mod reading;
