use std::path::Path;

use crate::error::ConvertError;
use crate::formats::{Book, Chapter, SourceBook, Verse};

/// Reads a structured book file and checks that it carries a usable name.
pub fn read_source_book(path: &Path) -> Result<(String, SourceBook), ConvertError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConvertError::UnreadableFile {
        path: path.to_path_buf(),
        source,
    })?;
    let mut source: SourceBook =
        serde_json::from_str(&contents).map_err(|source| ConvertError::InvalidBookJson {
            path: path.to_path_buf(),
            source,
        })?;

    let Some(name) = source.name.take() else {
        return Err(ConvertError::MissingNameField(path.to_path_buf()));
    };
    if name.trim().is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(ConvertError::UnsafeBookName {
            path: path.to_path_buf(),
            name,
        });
    }

    Ok((name, source))
}

/// Numbers chapters and verses by their 1-based position. `None` when the
/// book has no chapters.
pub fn book_from_source(name: String, source: SourceBook) -> Option<Book> {
    if source.chapters.is_empty() {
        return None;
    }

    let chapters = (1..)
        .zip(source.chapters)
        .map(|(chapter, c)| Chapter {
            chapter,
            verses: (1..)
                .zip(c.verses)
                .map(|(verse, text)| Verse { verse, text })
                .collect(),
        })
        .collect();

    Some(Book {
        book: name,
        chapters,
    })
}
