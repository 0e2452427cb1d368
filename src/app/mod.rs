//! Application layer - organized by Clean Architecture principles.
//!
//! # Structure
//!
//! - `domain/` - Core data structures (Preferences, Verse, ReadingPointer, Message)
//! - `controllers/` - Orchestration (ReadingSession)
//! - `services/` - Business operations (preferences, favorites, fetcher)
//! - `infrastructure/` - External integrations (durable store, logging, error)
//! - `config.rs` - Application configuration
//! - `state.rs` - Main application coordinator

pub mod config;
pub mod controllers;
pub mod domain;
pub mod infrastructure;
pub mod services;
pub mod state;

// Re-exports for convenient external access
pub use config::AppConfig;
pub use controllers::reading::{FetchOutcome, FetchTicket, ReadingSession, ReadingState, SessionEvent};
pub use domain::{FontSize, Message, Preferences, ReadingPointer, Tab, Verse, VerseCollection};
pub use infrastructure::error::{AppError, FetchError, Result, StoreError};
pub use infrastructure::store::{DurableStore, FileStore, MemoryStore};
pub use services::favorites::{AddOutcome, FavoritesLedger};
pub use services::fetcher::{ContentFetcher, HttpFetcher};
pub use services::preferences::PreferenceManager;
pub use state::{AppState, Notice};
