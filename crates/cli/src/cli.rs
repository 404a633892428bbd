use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Track item quantities in a JSON-backed inventory file.
#[derive(Debug, Parser)]
#[command(name = "stockbook", version)]
pub struct Cli {
    /// Inventory file (falls back to $STOCKBOOK_FILE, then inventory.json).
    #[arg(long, short, global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Add units of an item.
    Add {
        item: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove units of an item; the item is dropped once nothing is left.
    Remove {
        item: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Print the on-hand quantity of an item (0 if unknown).
    Get { item: String },
    /// List items strictly below a quantity threshold.
    Low {
        #[arg(long, short)]
        threshold: Option<u64>,
    },
    /// Print every item and its quantity.
    Report,
    /// Run the demonstration sequence against the inventory file.
    Demo,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_negative_quantity_for_validation() {
        let cli = Cli::try_parse_from(["stockbook", "add", "apple", "-3"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Add {
                item: "apple".to_string(),
                quantity: -3
            }
        );
    }

    #[test]
    fn file_flag_is_global() {
        let cli = Cli::try_parse_from(["stockbook", "low", "--file", "stock.json", "-t", "3"]).unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("stock.json")));
        assert_eq!(cli.command, Command::Low { threshold: Some(3) });
    }
}
