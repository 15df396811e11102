use clap::Parser;

use crate::error::Result;

mod cli;
mod commands;
mod error;
mod settings;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    let settings = settings::load(&cli)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "splitter={level},engine={level}",
            level = settings.level
        ))
        .with_writer(std::io::stderr)
        .init();

    let report = commands::run(cli.command)?;
    let output = if settings.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{output}");
    Ok(())
}
