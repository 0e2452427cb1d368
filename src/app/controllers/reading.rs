use std::rc::Rc;

use crate::app::domain::passage::{ReadingPointer, VerseCollection};
use crate::app::infrastructure::error::{AppError, FetchError, StoreError};
use crate::app::infrastructure::store::{keys, DurableStore, StoreResult};
use crate::app::services::fetcher::ContentFetcher;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadingState {
    #[default]
    Idle,
    BookSelected,
    Loading,
    Loaded,
    Failed,
}

/// Identifies one fetch. A ticket is only honoured while it is still the
/// latest request for the session's current pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    pointer: ReadingPointer,
}

impl FetchTicket {
    pub fn pointer(&self) -> &ReadingPointer {
        &self.pointer
    }

    pub fn book(&self) -> &str {
        &self.pointer.book
    }

    pub fn chapter(&self) -> u32 {
        self.pointer.chapter
    }
}

/// Observable changes, drained by the caller with `take_events`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    BookSelected { book: String },
    ChapterChanged(ReadingPointer),
    Loaded { pointer: ReadingPointer, verses: usize },
    Failed { pointer: ReadingPointer, error: FetchError },
    Discarded(ReadingPointer),
}

#[derive(Debug)]
pub enum FetchOutcome {
    /// Verses applied. `persist_error` is set when the pointer could not be saved.
    Loaded {
        verses: usize,
        persist_error: Option<StoreError>,
    },
    Failed(FetchError),
    /// Result arrived for a request that was superseded.
    Discarded,
}

/// Current selection, its verses, and the remembered reading position.
pub struct ReadingSession {
    store: Rc<dyn DurableStore>,
    state: ReadingState,
    book: Option<String>,
    chapter: Option<u32>,
    verses: VerseCollection,
    generation: u64,
    last_read: Option<ReadingPointer>,
    events: Vec<SessionEvent>,
}

impl ReadingSession {
    pub fn new(store: Rc<dyn DurableStore>) -> Self {
        Self {
            store,
            state: ReadingState::Idle,
            book: None,
            chapter: None,
            verses: Vec::new(),
            generation: 0,
            last_read: None,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> ReadingState {
        self.state
    }

    pub fn book(&self) -> Option<&str> {
        self.book.as_deref()
    }

    pub fn chapter(&self) -> Option<u32> {
        self.chapter
    }

    pub fn verses(&self) -> &VerseCollection {
        &self.verses
    }

    /// The position last persisted after a successful fetch
    pub fn last_read(&self) -> Option<&ReadingPointer> {
        self.last_read.as_ref()
    }

    /// Current selection when both book and chapter are set
    pub fn pointer(&self) -> Option<ReadingPointer> {
        match (&self.book, self.chapter) {
            (Some(book), Some(chapter)) => Some(ReadingPointer::new(book.clone(), chapter)),
            _ => None,
        }
    }

    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Select a book from any state. Clears the chapter and verses and
    /// invalidates any fetch still in flight.
    pub fn select_book(&mut self, book: impl Into<String>) {
        let book = book.into();
        tracing::debug!(from = ?self.state, %book, "select book");

        self.generation += 1;
        self.chapter = None;
        self.verses.clear();
        self.state = ReadingState::BookSelected;
        self.book = Some(book.clone());
        self.events.push(SessionEvent::BookSelected { book });
    }

    /// Select a chapter of the current book and enter `Loading`.
    ///
    /// The chapter is not range-checked; an out-of-range chapter simply ends
    /// in `Failed` when its fetch completes. A selection made while another
    /// fetch is outstanding supersedes it.
    pub fn select_chapter(&mut self, chapter: u32) -> Result<FetchTicket, AppError> {
        let book = self.book.clone().ok_or(AppError::NoBookSelected)?;
        tracing::debug!(from = ?self.state, %book, chapter, "select chapter");

        self.generation += 1;
        self.chapter = Some(chapter);
        self.verses.clear();
        self.state = ReadingState::Loading;

        let pointer = ReadingPointer::new(book, chapter);
        self.events.push(SessionEvent::ChapterChanged(pointer.clone()));
        Ok(FetchTicket {
            generation: self.generation,
            pointer,
        })
    }

    /// Whether a result for `ticket` would still be applied
    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        self.state == ReadingState::Loading
            && ticket.generation == self.generation
            && self.book.as_deref() == Some(ticket.book())
            && self.chapter == Some(ticket.chapter())
    }

    /// Apply the result of the fetch identified by `ticket`.
    ///
    /// Only a non-empty successful result moves the session to `Loaded` and
    /// persists the pointer. Stale results are dropped untouched.
    pub fn complete_fetch(
        &mut self,
        ticket: &FetchTicket,
        result: Result<VerseCollection, FetchError>,
    ) -> FetchOutcome {
        if !self.is_current(ticket) {
            tracing::debug!(pointer = %ticket.pointer, "discarding superseded fetch result");
            self.events.push(SessionEvent::Discarded(ticket.pointer.clone()));
            return FetchOutcome::Discarded;
        }

        let result = result.and_then(|verses| {
            if verses.is_empty() {
                Err(FetchError::Empty(ticket.pointer.to_string()))
            } else {
                Ok(verses)
            }
        });

        match result {
            Ok(verses) => {
                let count = verses.len();
                self.verses = verses;
                self.state = ReadingState::Loaded;
                let persist_error = self.persist_pointer(&ticket.pointer).err();
                if let Some(err) = &persist_error {
                    tracing::warn!(%err, pointer = %ticket.pointer, "could not save reading position");
                }
                self.events.push(SessionEvent::Loaded {
                    pointer: ticket.pointer.clone(),
                    verses: count,
                });
                FetchOutcome::Loaded {
                    verses: count,
                    persist_error,
                }
            }
            Err(error) => {
                tracing::warn!(%error, pointer = %ticket.pointer, "failed to load chapter");
                self.verses.clear();
                self.state = ReadingState::Failed;
                self.events.push(SessionEvent::Failed {
                    pointer: ticket.pointer.clone(),
                    error: error.clone(),
                });
                FetchOutcome::Failed(error)
            }
        }
    }

    /// Select and fetch a chapter in one step, blocking on `fetcher`.
    pub fn load_chapter(
        &mut self,
        fetcher: &dyn ContentFetcher,
        chapter: u32,
    ) -> Result<FetchOutcome, AppError> {
        let ticket = self.select_chapter(chapter)?;
        let result = fetcher.fetch(ticket.book(), ticket.chapter());
        Ok(self.complete_fetch(&ticket, result))
    }

    /// Replay the stored `lastRead` pointer: select its book, then its
    /// chapter. Returns the ticket of the fetch to run, if any.
    pub fn restore(&mut self) -> Option<FetchTicket> {
        let pointer = match self.store.get(keys::LAST_READ) {
            Ok(Some(json)) => match ReadingPointer::from_record(&json) {
                Ok(pointer) => pointer,
                Err(err) => {
                    tracing::warn!(%err, "malformed lastRead record; starting fresh");
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(%err, "could not read lastRead; starting fresh");
                None
            }
        }?;

        tracing::info!(%pointer, "resuming last read position");
        self.last_read = Some(pointer.clone());
        self.select_book(pointer.book);
        self.select_chapter(pointer.chapter).ok()
    }

    /// Drop all selection state after the store has been wiped.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = ReadingState::Idle;
        self.book = None;
        self.chapter = None;
        self.verses.clear();
        self.last_read = None;
        self.events.clear();
    }

    fn persist_pointer(&mut self, pointer: &ReadingPointer) -> StoreResult<()> {
        let json = pointer.to_record().map_err(|source| StoreError::Encode {
            key: keys::LAST_READ.to_string(),
            source,
        })?;
        self.store.set(keys::LAST_READ, &json)?;
        self.last_read = Some(pointer.clone());
        tracing::info!(%pointer, "reading position saved");
        Ok(())
    }
}
