//! Domain layer - core data structures and types.
//!
//! This module contains the fundamental domain models:
//! - Display preferences (theme, tab, font size)
//! - Passages, verses and the reading pointer
//! - The book catalog
//! - Message types for the event system

pub mod books;
pub mod messages;
pub mod passage;
pub mod preferences;

pub use messages::Message;
pub use passage::{ReadingPointer, Verse, VerseCollection};
pub use preferences::{FontSize, Preferences, Tab};
