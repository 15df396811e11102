use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "splitter", about = "Split an expense between group members")]
pub struct Cli {
    /// Optional config file path (TOML).
    #[arg(long)]
    pub config: Option<String>,
    /// Override log level (e.g. debug).
    #[arg(long)]
    pub level: Option<String>,
    /// Pretty-print JSON output.
    #[arg(long)]
    pub pretty: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Split a new expense and print the request body.
    Split {
        /// JSON file with the group members, in display order.
        #[arg(long)]
        members: PathBuf,
        /// Expense total (e.g. 10.00).
        #[arg(long, allow_hyphen_values = true)]
        total: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Member who paid; defaults to the first participant.
        #[arg(long)]
        paid_by: Option<i64>,
        /// Leave a member out of the split (repeatable).
        #[arg(long = "exclude")]
        excluded: Vec<i64>,
        /// Pin a member's share, as ID=AMOUNT (repeatable).
        #[arg(long = "pin", value_parser = parse_pin)]
        pins: Vec<(i64, String)>,
    },
    /// Rebuild the split of a stored expense.
    Import {
        /// JSON file with the group members, in display order.
        #[arg(long)]
        members: PathBuf,
        /// JSON file with the stored expense.
        #[arg(long)]
        expense: PathBuf,
    },
}

fn parse_pin(raw: &str) -> Result<(i64, String), String> {
    let (id, amount) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ID=AMOUNT, got `{raw}`"))?;
    let id = id
        .trim()
        .parse()
        .map_err(|_| format!("invalid member id `{id}`"))?;
    Ok((id, amount.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pin_needs_id_and_amount() {
        assert_eq!(parse_pin("3=4.50"), Ok((3, "4.50".to_string())));
        assert_eq!(parse_pin(" 3 = 4 "), Ok((3, "4".to_string())));
        assert!(parse_pin("3").is_err());
        assert!(parse_pin("x=1").is_err());
    }

    #[test]
    fn split_command_parses() {
        let cli = Cli::try_parse_from([
            "splitter", "--pretty", "split", "--members", "m.json", "--total", "10",
            "--exclude", "2", "--pin", "1=4",
        ])
        .unwrap();
        assert!(cli.pretty);
        match cli.command {
            Command::Split { excluded, pins, total, .. } => {
                assert_eq!(total, "10");
                assert_eq!(excluded, vec![2]);
                assert_eq!(pins, vec![(1, "4".to_string())]);
            }
            Command::Import { .. } => panic!("expected split"),
        }
    }
}
