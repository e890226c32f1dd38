use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

fn main() -> ExitCode {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn try_main() -> anyhow::Result<()> {
    bible_normalize::logging::init().context("init logging")?;

    let cli = bible_normalize::cli::Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    match cli.command {
        bible_normalize::cli::Command::Text(args) => {
            bible_normalize::convert::run_text(args).context("text")?;
        }
        bible_normalize::cli::Command::Json(args) => {
            bible_normalize::convert::run_json(args).context("json")?;
        }
    }

    Ok(())
}
