use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::book_name::{display_name, output_file_stem};
use crate::cli::{JsonArgs, TextArgs};
use crate::error::ConvertError;
use crate::formats::Book;
use crate::index::BookIndex;
use crate::writer::write_pretty_json;
use crate::{json_source, text_source};

/// Counters reported at the end of a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub files_found: usize,
    pub books_written: usize,
    pub files_skipped: usize,
    pub empty_books: usize,
    pub duplicate_books: usize,
    pub lines_skipped: usize,
}

/// Converts every `*.txt` tuple file in `args.source`.
pub fn run_text(args: TextArgs) -> anyhow::Result<RunSummary> {
    let source_dir = PathBuf::from(&args.source);
    let files = discover_sources(&source_dir, "txt")?;

    let mut run = Run::start(PathBuf::from(&args.out), &source_dir, &files, "txt")?;
    for path in &files {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let name = display_name(&stem);
        tracing::info!(book = %name, file = %path.display(), "processing");

        let parsed = match text_source::read_records(path) {
            Ok(parsed) => parsed,
            Err(err) => {
                run.skip_file(err);
                continue;
            }
        };
        run.summary.lines_skipped += parsed.skipped_lines;

        let book = parsed.collector.into_book(name.clone());
        run.emit(path, &name, book, &output_file_stem(&name));
    }

    run.finish()
}

/// Converts every `*.json` structured book in `args.source`.
pub fn run_json(args: JsonArgs) -> anyhow::Result<RunSummary> {
    let source_dir = PathBuf::from(&args.source);
    let files = discover_sources(&source_dir, "json")?;

    let mut run = Run::start(PathBuf::from(&args.out), &source_dir, &files, "json")?;
    for path in &files {
        let (name, source) = match json_source::read_source_book(path) {
            Ok(read) => read,
            Err(err) => {
                run.skip_file(err);
                continue;
            }
        };
        tracing::info!(book = %name, file = %path.display(), "processing");

        let book = json_source::book_from_source(name.clone(), source);
        run.emit(path, &name, book, &name);
    }

    run.finish()
}

/// Files directly inside `dir` with the given extension, sorted by name.
pub fn discover_sources(dir: &Path, extension: &str) -> anyhow::Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(ConvertError::SourceDirectoryMissing(dir.to_path_buf()).into());
    }

    let mut files = Vec::new();
    for entry in
        std::fs::read_dir(dir).with_context(|| format!("read source dir: {}", dir.display()))?
    {
        let entry = entry.with_context(|| format!("read source dir entry: {}", dir.display()))?;
        let path = entry.path();
        if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some(extension) {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}

struct Run {
    out_dir: PathBuf,
    index: BookIndex,
    summary: RunSummary,
}

impl Run {
    fn start(
        out_dir: PathBuf,
        source_dir: &Path,
        files: &[PathBuf],
        extension: &str,
    ) -> anyhow::Result<Self> {
        std::fs::create_dir_all(&out_dir)
            .with_context(|| format!("create output dir: {}", out_dir.display()))?;
        tracing::info!(
            count = files.len(),
            source = %source_dir.display(),
            "found .{extension} files"
        );

        Ok(Self {
            out_dir,
            index: BookIndex::default(),
            summary: RunSummary {
                files_found: files.len(),
                ..RunSummary::default()
            },
        })
    }

    fn skip_file(&mut self, err: ConvertError) {
        let err = anyhow::Error::new(err);
        tracing::warn!(error = %format!("{err:#}"), "skipping file");
        self.summary.files_skipped += 1;
    }

    /// Writes `book` as `<stem>.json` and records it in the index.
    fn emit(&mut self, path: &Path, name: &str, book: Option<Book>, stem: &str) {
        let Some(book) = book else {
            tracing::warn!(
                book = %name,
                file = %path.display(),
                "no chapters found; skipping output for this book"
            );
            self.summary.empty_books += 1;
            return;
        };

        if self.index.contains(&book.book) {
            tracing::warn!(
                book = %name,
                file = %path.display(),
                "book name already written by an earlier file; skipping"
            );
            self.summary.duplicate_books += 1;
            return;
        }

        let out_path = self.out_dir.join(format!("{stem}.json"));
        if let Err(err) = write_pretty_json(&out_path, &book) {
            tracing::warn!(book = %name, error = %format!("{err:#}"), "skipping book");
            self.summary.files_skipped += 1;
            return;
        }
        tracing::debug!(book = %name, path = %out_path.display(), "wrote book");

        self.index.record(&book);
        self.summary.books_written += 1;
    }

    fn finish(self) -> anyhow::Result<RunSummary> {
        let written = self.index.write(&self.out_dir).context("write indices")?;
        if !written {
            tracing::warn!("no books were processed successfully; index files not created");
        }

        let summary = self.summary;
        tracing::info!(
            out = %self.out_dir.display(),
            files = summary.files_found,
            books = summary.books_written,
            skipped_files = summary.files_skipped,
            empty_books = summary.empty_books,
            duplicate_books = summary.duplicate_books,
            skipped_lines = summary.lines_skipped,
            "conversion complete"
        );
        Ok(summary)
    }
}
