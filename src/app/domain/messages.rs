use super::passage::VerseCollection;
use super::preferences::{FontSize, Tab};
use crate::app::controllers::reading::FetchTicket;
use crate::app::infrastructure::error::FetchError;

/// All state-changing requests understood by `AppState::dispatch`.
/// The shell turns user input into one of these; background fetches report
/// back with `FetchCompleted`.
#[derive(Debug, Clone)]
pub enum Message {
    // Reading
    SelectBook(String),
    SelectChapter(u32),
    FetchCompleted(FetchTicket, Result<VerseCollection, FetchError>),

    // Favorites
    FavoriteVerse(u32),
    RemoveFavorite(String),

    // Preferences
    SetDarkMode(bool),
    ToggleDarkMode,
    SetTab(Tab),
    SetFontSize(FontSize),

    // Settings
    WipeAllData,
}
