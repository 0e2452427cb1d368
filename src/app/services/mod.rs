//! Services layer - business operations.
//!
//! This module contains business logic and operations:
//! - Preference persistence
//! - Favorites ledger
//! - Chapter fetching

pub mod favorites;
pub mod fetcher;
pub mod preferences;
