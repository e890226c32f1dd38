use std::fs::OpenOptions;
use std::io::{BufRead as _, BufReader};
use std::path::Path;

use crate::aggregate::ChapterCollector;
use crate::error::ConvertError;
use crate::record::parse_line;

const SNIPPET_CHARS: usize = 100;

/// Records collected from one tuple-per-line file.
#[derive(Debug, Default)]
pub struct ParsedFile {
    pub collector: ChapterCollector,
    pub skipped_lines: usize,
}

/// Reads every line of `path`. Malformed lines are logged and skipped; an
/// I/O or decoding error fails the whole file.
pub fn read_records(path: &Path) -> Result<ParsedFile, ConvertError> {
    let unreadable = |source: std::io::Error| ConvertError::UnreadableFile {
        path: path.to_path_buf(),
        source,
    };

    let file = OpenOptions::new()
        .read(true)
        .open(path)
        .map_err(unreadable)?;
    let reader = BufReader::new(file);
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let mut parsed = ParsedFile::default();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(unreadable)?;
        let line_number = index + 1;
        let content = if line_number == 1 {
            line.trim_start_matches('\u{feff}')
        } else {
            line.as_str()
        };

        match parse_line(content) {
            Ok(Some(record)) => parsed.collector.push(record),
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(
                    file = %file_name,
                    line = line_number,
                    snippet = %snippet(content.trim()),
                    error = %err,
                    "skipping malformed line"
                );
                parsed.skipped_lines += 1;
            }
        }
    }

    tracing::debug!(
        file = %file_name,
        records = parsed.collector.records(),
        skipped = parsed.skipped_lines,
        "read source file"
    );
    Ok(parsed)
}

fn snippet(line: &str) -> &str {
    match line.char_indices().nth(SNIPPET_CHARS) {
        Some((end, _)) => &line[..end],
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_keeps_first_hundred_characters() {
        let long = "é".repeat(150);
        assert_eq!(snippet(&long).chars().count(), 100);
        assert_eq!(snippet("short"), "short");
    }

    #[test]
    fn malformed_lines_are_skipped_and_counted() -> anyhow::Result<()> {
        let temp = tempfile::TempDir::new()?;
        let path = temp.path().join("rut.txt");
        std::fs::write(
            &path,
            "\u{feff}(8, 1, 1, \"Aconteció en los días\"),\n\
             \n\
             not a tuple\n\
             (8, 1, 2, \"El nombre de aquel varón\"),\n\
             (8, 1, \"sin versículo\"),\n",
        )?;

        let parsed = read_records(&path)?;
        assert_eq!(parsed.collector.records(), 2);
        assert_eq!(parsed.skipped_lines, 2);
        Ok(())
    }

    #[test]
    fn missing_file_is_unreadable() {
        let err = read_records(Path::new("/nonexistent/rut.txt"));
        assert!(matches!(err, Err(ConvertError::UnreadableFile { .. })));
    }

    #[test]
    fn invalid_utf8_fails_the_whole_file() -> anyhow::Result<()> {
        let temp = tempfile::TempDir::new()?;
        let path = temp.path().join("rut.txt");
        std::fs::write(&path, b"(8, 1, 1, \"ok\"),\n(8, 1, 2, \"\xff\"),\n")?;

        let err = read_records(&path);
        assert!(matches!(err, Err(ConvertError::UnreadableFile { .. })));
        Ok(())
    }
}
