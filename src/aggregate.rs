use std::collections::BTreeMap;

use crate::formats::{Book, Chapter, Verse};
use crate::record::Record;

/// Collects records of one book by chapter number.
#[derive(Debug, Default)]
pub struct ChapterCollector {
    chapters: BTreeMap<u32, Vec<Verse>>,
    records: usize,
}

impl ChapterCollector {
    pub fn push(&mut self, record: Record) {
        self.records += 1;
        self.chapters.entry(record.chapter).or_default().push(Verse {
            verse: record.verse,
            text: record.text,
        });
    }

    pub fn records(&self) -> usize {
        self.records
    }

    /// Chapters come out ascending; verses are stably sorted so repeated
    /// verse numbers keep their arrival order. `None` when nothing was
    /// collected.
    pub fn into_book(self, name: String) -> Option<Book> {
        if self.chapters.is_empty() {
            return None;
        }

        let chapters = self
            .chapters
            .into_iter()
            .map(|(chapter, mut verses)| {
                verses.sort_by_key(|v| v.verse);
                Chapter { chapter, verses }
            })
            .collect();

        Some(Book {
            book: name,
            chapters,
        })
    }
}
