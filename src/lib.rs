#![forbid(unsafe_code)]

pub mod aggregate;
pub mod book_name;
pub mod cli;
pub mod convert;
pub mod error;
pub mod formats;
pub mod index;
pub mod json_source;
pub mod logging;
pub mod record;
pub mod text_source;
pub mod writer;
