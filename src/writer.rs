use std::fs::OpenOptions;
use std::io::{BufWriter, Write as _};
use std::path::Path;

use anyhow::Context as _;
use serde::Serialize;

const INDENT: &[u8] = b"    ";

/// Writes `value` as UTF-8 JSON indented by four spaces, replacing any
/// existing file. Non-ASCII text is written as-is.
pub fn write_pretty_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(path)
        .with_context(|| format!("create json output: {}", path.display()))?;
    let mut out = BufWriter::new(file);

    let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    value
        .serialize(&mut serializer)
        .with_context(|| format!("serialize json: {}", path.display()))?;
    out.flush()
        .with_context(|| format!("flush json: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_four_space_indent_without_escaping() -> anyhow::Result<()> {
        let temp = tempfile::TempDir::new()?;
        let path = temp.path().join("books.json");

        write_pretty_json(&path, &["Éxodo", "Génesis"])?;
        assert_eq!(
            std::fs::read_to_string(&path)?,
            "[\n    \"Éxodo\",\n    \"Génesis\"\n]"
        );
        Ok(())
    }

    #[test]
    fn replaces_existing_file() -> anyhow::Result<()> {
        let temp = tempfile::TempDir::new()?;
        let path = temp.path().join("books.json");
        std::fs::write(&path, "a much longer previous content that must disappear")?;

        write_pretty_json(&path, &Vec::<String>::new())?;
        assert_eq!(std::fs::read_to_string(&path)?, "[]");
        Ok(())
    }
}
