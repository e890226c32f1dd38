use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context as _;

use crate::formats::Book;
use crate::writer::write_pretty_json;

pub const BOOKS_FILE: &str = "books.json";
pub const CHAPTER_COUNTS_FILE: &str = "book_chapter_counts.json";

/// Book names and chapter counts of every book written during a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BookIndex {
    chapter_counts: BTreeMap<String, usize>,
}

impl BookIndex {
    pub fn contains(&self, name: &str) -> bool {
        self.chapter_counts.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.chapter_counts.is_empty()
    }

    /// Leaves the index untouched when the name is already recorded.
    pub fn record(&mut self, book: &Book) {
        self.chapter_counts
            .entry(book.book.clone())
            .or_insert(book.chapters.len());
    }

    pub fn book_names(&self) -> Vec<&str> {
        self.chapter_counts.keys().map(String::as_str).collect()
    }

    pub fn chapter_counts(&self) -> &BTreeMap<String, usize> {
        &self.chapter_counts
    }

    /// Writes `books.json` and `book_chapter_counts.json` into `out_dir`.
    /// Writes nothing and returns `false` for an empty index.
    pub fn write(&self, out_dir: &Path) -> anyhow::Result<bool> {
        if self.is_empty() {
            return Ok(false);
        }

        let books_path = out_dir.join(BOOKS_FILE);
        write_pretty_json(&books_path, &self.book_names()).context("write book index")?;
        tracing::info!(path = %books_path.display(), "created {BOOKS_FILE}");

        let counts_path = out_dir.join(CHAPTER_COUNTS_FILE);
        write_pretty_json(&counts_path, &self.chapter_counts)
            .context("write chapter count index")?;
        tracing::info!(path = %counts_path.display(), "created {CHAPTER_COUNTS_FILE}");

        Ok(true)
    }
}
