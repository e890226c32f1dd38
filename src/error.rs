use std::path::PathBuf;

/// Failures of a conversion run. Only `SourceDirectoryMissing` ends the run;
/// the others skip a single file.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("source directory not found: {}", .0.display())]
    SourceDirectoryMissing(PathBuf),

    #[error("read source file: {}", path.display())]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse book json: {}", path.display())]
    InvalidBookJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("book json has no \"name\" field: {}", .0.display())]
    MissingNameField(PathBuf),

    #[error("book name {name:?} cannot be used as a file name: {}", path.display())]
    UnsafeBookName { path: PathBuf, name: String },
}
