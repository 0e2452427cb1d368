//! Test doubles shared by the unit tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use super::error::{FetchError, StoreError};
use super::store::{DurableStore, MemoryStore, StoreResult};
use crate::app::domain::passage::{Verse, VerseCollection};
use crate::app::services::fetcher::ContentFetcher;

/// Memory store that counts calls and can be told to fail.
#[derive(Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
    reads: Cell<usize>,
    writes: Cell<usize>,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    pub fn reads(&self) -> usize {
        self.reads.get()
    }

    /// Successful writes only
    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    fn injected(key: &str) -> std::io::Error {
        std::io::Error::other(format!("injected failure for {key}"))
    }
}

impl DurableStore for FlakyStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.reads.set(self.reads.get() + 1);
        if self.fail_reads.get() {
            return Err(StoreError::Read {
                key: key.to_string(),
                source: Self::injected(key),
            });
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        if self.fail_writes.get() {
            return Err(StoreError::Write {
                key: key.to_string(),
                source: Self::injected(key),
            });
        }
        self.writes.set(self.writes.get() + 1);
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.inner.remove(key)
    }

    fn clear(&self) -> StoreResult<()> {
        if self.fail_writes.get() {
            return Err(StoreError::Clear(Self::injected("clear")));
        }
        self.inner.clear()
    }
}

/// Fetcher answering from a fixed table of chapters.
#[derive(Default)]
pub struct ScriptedFetcher {
    chapters: HashMap<(String, u32), Result<VerseCollection, FetchError>>,
    calls: RefCell<Vec<(String, u32)>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chapter(mut self, book: &str, chapter: u32, verses: usize) -> Self {
        self.chapters
            .insert((book.to_string(), chapter), Ok(verses_for(book, chapter, verses)));
        self
    }

    pub fn with_error(mut self, book: &str, chapter: u32, err: FetchError) -> Self {
        self.chapters.insert((book.to_string(), chapter), Err(err));
        self
    }

    pub fn calls(&self) -> Vec<(String, u32)> {
        self.calls.borrow().clone()
    }
}

impl ContentFetcher for ScriptedFetcher {
    fn fetch(&self, book: &str, chapter: u32) -> Result<VerseCollection, FetchError> {
        self.calls.borrow_mut().push((book.to_string(), chapter));
        self.chapters
            .get(&(book.to_string(), chapter))
            .cloned()
            .unwrap_or_else(|| Err(FetchError::Network("404 Not Found".to_string())))
    }
}

/// `count` verses of `book chapter`; Salmos 23:1 carries its real text.
pub fn verses_for(book: &str, chapter: u32, count: usize) -> VerseCollection {
    (1..=count as u32)
        .map(|n| Verse {
            book_name: book.to_string(),
            chapter,
            verse_number: n,
            text: if book == "Salmos" && chapter == 23 && n == 1 {
                "O Senhor é o meu pastor; nada me faltará.".to_string()
            } else {
                format!("Texto de {book} {chapter}:{n}")
            },
        })
        .collect()
}
