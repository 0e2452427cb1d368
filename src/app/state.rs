use std::rc::Rc;

use super::controllers::reading::{FetchOutcome, FetchTicket, ReadingSession, SessionEvent};
use super::domain::messages::Message;
use super::domain::passage::VerseCollection;
use super::domain::preferences::{FontSize, Preferences, Tab};
use super::infrastructure::error::{AppError, FetchError, StoreError};
use super::infrastructure::store::DurableStore;
use super::services::favorites::{AddOutcome, FavoritesLedger};
use super::services::fetcher::ContentFetcher;
use super::services::preferences::PreferenceManager;

/// Dismissible feedback for the user. Nothing here is fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Info(text) | Notice::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

/// Owns one of each component and routes messages between them.
///
/// All mutation happens on the caller's thread. Fetches are handed out as
/// tickets; whoever runs them reports back through `Message::FetchCompleted`
/// or `fetch_now`.
pub struct AppState {
    store: Rc<dyn DurableStore>,
    preferences: PreferenceManager,
    favorites: FavoritesLedger,
    session: ReadingSession,
    notices: Vec<Notice>,
    /// Tickets handed out and not yet completed
    in_flight: usize,
}

impl AppState {
    pub fn new(store: Rc<dyn DurableStore>) -> Self {
        Self {
            preferences: PreferenceManager::new(store.clone()),
            favorites: FavoritesLedger::new(store.clone()),
            session: ReadingSession::new(store.clone()),
            store,
            notices: Vec::new(),
            in_flight: 0,
        }
    }

    /// Load preferences, favorites and the last reading position. Returns
    /// the fetch needed to resume reading, if there is one.
    pub fn startup(&mut self) -> Option<FetchTicket> {
        let prefs = self.preferences.load();
        let font_size = self.preferences.load_font_size();
        let favorites = self.favorites.list().len();
        tracing::info!(
            dark_mode = prefs.dark_mode,
            last_tab = prefs.last_tab.as_str(),
            font_size = font_size.as_str(),
            favorites,
            "startup state loaded"
        );
        let ticket = self.session.restore();
        if ticket.is_some() {
            self.in_flight += 1;
        }
        ticket
    }

    pub fn preferences(&self) -> &Preferences {
        self.preferences.preferences()
    }

    pub fn is_ready(&self) -> bool {
        self.preferences.is_loaded()
    }

    pub fn session(&self) -> &ReadingSession {
        &self.session
    }

    pub fn favorites(&self) -> &[String] {
        self.favorites.entries()
    }

    /// Whether a handed-out fetch has not reported back yet, including
    /// superseded ones.
    pub fn has_fetches_in_flight(&self) -> bool {
        self.in_flight > 0
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn take_session_events(&mut self) -> Vec<SessionEvent> {
        self.session.take_events()
    }

    /// Apply a message. Returns a fetch to run when the message selected a
    /// chapter.
    pub fn dispatch(&mut self, message: Message) -> Option<FetchTicket> {
        tracing::debug!(?message, "dispatch");
        match message {
            Message::SelectBook(book) => {
                self.session.select_book(book);
                None
            }
            Message::SelectChapter(chapter) => self.select_chapter(chapter),
            Message::FetchCompleted(ticket, result) => {
                self.complete_fetch(&ticket, result);
                None
            }
            Message::FavoriteVerse(verse_number) => {
                self.favorite_verse(verse_number);
                None
            }
            Message::RemoveFavorite(entry) => {
                self.remove_favorite(&entry);
                None
            }
            Message::SetDarkMode(dark_mode) => {
                let result = self.preferences.set_dark_mode(dark_mode);
                self.report_preferences_write(result);
                None
            }
            Message::ToggleDarkMode => {
                let dark_mode = !self.preferences().dark_mode;
                let result = self.preferences.set_dark_mode(dark_mode);
                self.report_preferences_write(result);
                None
            }
            Message::SetTab(tab) => {
                self.set_tab(tab);
                None
            }
            Message::SetFontSize(size) => {
                self.set_font_size(size);
                None
            }
            Message::WipeAllData => {
                self.wipe_all_data();
                None
            }
        }
    }

    fn select_chapter(&mut self, chapter: u32) -> Option<FetchTicket> {
        match self.session.select_chapter(chapter) {
            Ok(ticket) => {
                self.in_flight += 1;
                Some(ticket)
            }
            Err(AppError::NoBookSelected) => {
                self.notices
                    .push(Notice::Info("Selecione um livro primeiro.".to_string()));
                None
            }
            Err(err) => {
                self.notices.push(Notice::Error(err.to_string()));
                None
            }
        }
    }

    /// Run `ticket` on this thread and apply the result.
    pub fn fetch_now(&mut self, fetcher: &dyn ContentFetcher, ticket: &FetchTicket) -> FetchOutcome {
        let result = fetcher.fetch(ticket.book(), ticket.chapter());
        self.complete_fetch(ticket, result)
    }

    pub fn complete_fetch(
        &mut self,
        ticket: &FetchTicket,
        result: Result<VerseCollection, FetchError>,
    ) -> FetchOutcome {
        self.in_flight = self.in_flight.saturating_sub(1);
        let outcome = self.session.complete_fetch(ticket, result);
        match &outcome {
            FetchOutcome::Loaded {
                persist_error: Some(_),
                ..
            } => {
                self.notices
                    .push(Notice::Error("Erro ao salvar última leitura.".to_string()));
            }
            FetchOutcome::Failed(_) => {
                self.notices
                    .push(Notice::Error("Falha ao carregar os versículos.".to_string()));
            }
            FetchOutcome::Loaded { .. } | FetchOutcome::Discarded => {}
        }
        outcome
    }

    /// Favorite a verse of the loaded chapter by its number.
    pub fn favorite_verse(&mut self, verse_number: u32) -> Option<AddOutcome> {
        let Some(verse) = self
            .session
            .verses()
            .iter()
            .find(|v| v.verse_number == verse_number)
        else {
            self.notices.push(Notice::Info(format!(
                "Versículo {} não está carregado.",
                verse_number
            )));
            return None;
        };

        let entry = verse.favorite_entry();
        match self.favorites.add(&entry) {
            Ok(AddOutcome::Added) => {
                self.notices
                    .push(Notice::Info("Versículo adicionado aos favoritos!".to_string()));
                Some(AddOutcome::Added)
            }
            Ok(AddOutcome::AlreadyFavorite) => {
                self.notices
                    .push(Notice::Info("Versículo já está nos favoritos".to_string()));
                Some(AddOutcome::AlreadyFavorite)
            }
            Err(err) => {
                tracing::warn!(%err, "could not save favorite");
                self.notices
                    .push(Notice::Error("Não foi possível salvar o favorito.".to_string()));
                None
            }
        }
    }

    pub fn remove_favorite(&mut self, entry: &str) -> bool {
        match self.favorites.remove(entry) {
            Ok(removed) => {
                if removed {
                    self.notices
                        .push(Notice::Info("Versículo removido dos favoritos.".to_string()));
                }
                removed
            }
            Err(err) => {
                tracing::warn!(%err, "could not remove favorite");
                self.notices
                    .push(Notice::Error("Não foi possível remover o favorito.".to_string()));
                false
            }
        }
    }

    /// Re-read favorites from the store
    pub fn reload_favorites(&mut self) -> &[String] {
        self.favorites.list()
    }

    fn set_tab(&mut self, tab: Tab) {
        let result = self.preferences.set_last_tab(tab);
        self.report_preferences_write(result);
    }

    fn set_font_size(&mut self, size: FontSize) {
        if let Err(err) = self.preferences.set_font_size(size) {
            tracing::warn!(%err, "could not save font size");
            self.notices
                .push(Notice::Error("Erro ao salvar tamanho da fonte.".to_string()));
        }
    }

    fn report_preferences_write(&mut self, result: Result<(), StoreError>) {
        if let Err(err) = result {
            tracing::warn!(%err, "could not save preferences");
            self.notices
                .push(Notice::Error("Erro ao salvar preferências.".to_string()));
        }
    }

    /// Clear every key in the store, then reset the in-memory state to what a
    /// fresh start on an empty store would produce. Callers must have asked
    /// the user to confirm.
    pub fn wipe_all_data(&mut self) -> bool {
        match self.store.clear() {
            Ok(()) => {
                self.preferences.reset();
                self.favorites.reset();
                self.session.reset();
                tracing::info!("all data wiped");
                self.notices.push(Notice::Info(
                    "Todos os dados foram removidos com sucesso.".to_string(),
                ));
                true
            }
            Err(err) => {
                tracing::warn!(%err, "could not wipe data");
                self.notices.push(Notice::Error(
                    "Ocorreu um erro ao tentar limpar os dados. Tente novamente.".to_string(),
                ));
                false
            }
        }
    }
}
