use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Convert tuple-per-line `.txt` books into normalized JSON.
    Text(TextArgs),
    /// Convert structured `.json` books into normalized JSON.
    Json(JsonArgs),
}

#[derive(Debug, Args)]
pub struct TextArgs {
    /// Directory containing one `.txt` file per book.
    #[arg(long, default_value = "bible-json-master/origen")]
    pub source: String,

    /// Output directory for book files and indices.
    #[arg(long, default_value = "rv1960_output")]
    pub out: String,
}

#[derive(Debug, Args)]
pub struct JsonArgs {
    /// Directory containing one `.json` file per book.
    #[arg(long)]
    pub source: String,

    /// Output directory for book files and indices.
    #[arg(long)]
    pub out: String,
}
