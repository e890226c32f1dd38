//! Display names for books derived from source file stems.
//!
//! Stems use `_` as a word separator: `genesis`, `1_corintios`,
//! `song_of_solomon`. Every stem yields some name.

const SEPARATOR: char = '_';

#[must_use]
pub fn display_name(stem: &str) -> String {
    if !stem.contains(SEPARATOR) {
        return capitalize(stem);
    }

    let parts: Vec<&str> = stem.split(SEPARATOR).collect();
    let first = parts[0];
    let second = parts[1];

    if is_number(first) && second.chars().next().is_some_and(|c| !c.is_ascii_digit()) {
        return format!("{first} {}", capitalize(second));
    }

    if !is_number(first) {
        return join_capitalized(&parts);
    }

    format!("{} {}", capitalize(first), join_capitalized(&parts[1..]))
}

/// File stem used for a book's output file: `1 Juan` -> `1_Juan`.
#[must_use]
pub fn output_file_stem(name: &str) -> String {
    name.replace(' ', "_")
}

fn is_number(segment: &str) -> bool {
    !segment.is_empty() && segment.chars().all(|c| c.is_ascii_digit())
}

fn join_capitalized(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| capitalize(p))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Upper-cases the first character and lower-cases the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
