use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    pub verse: u32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub chapter: u32,
    pub verses: Vec<Verse>,
}

/// Normalized per-book document written as `<stem>.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub book: String,
    pub chapters: Vec<Chapter>,
}

/// Structured input book (`json` pipeline).
#[derive(Debug, Clone, Deserialize)]
pub struct SourceBook {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub chapters: Vec<SourceChapter>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceChapter {
    #[serde(default)]
    pub verses: Vec<String>,
}
