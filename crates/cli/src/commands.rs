use std::io::Write;
use std::path::Path;

use anyhow::Context;

use stockbook_inventory::{DomainError, InventoryStore, PersistenceError};

use crate::cli::Command;
use crate::config::Config;

/// Execute one subcommand against the configured inventory file.
pub fn run<W: Write>(command: &Command, config: &Config, out: &mut W) -> anyhow::Result<()> {
    let path = config.data_file.as_path();

    match command {
        Command::Add { item, quantity } => {
            let mut store = open(path, Access::ReadWrite)?;
            let mut log = Vec::new();
            store
                .add(item, *quantity, Some(&mut log))
                .with_context(|| format!("could not add {quantity} of '{item}'"))?;
            for entry in &log {
                writeln!(out, "{entry}")?;
            }
            persist(&store, path)?;
        }
        Command::Remove { item, quantity } => {
            let mut store = open(path, Access::ReadWrite)?;
            store
                .remove(item, *quantity)
                .with_context(|| format!("could not remove {quantity} of '{item}'"))?;
            persist(&store, path)?;
        }
        Command::Get { item } => {
            let store = open(path, Access::ReadOnly)?;
            writeln!(out, "{}", store.get_quantity(item))?;
        }
        Command::Low { threshold } => {
            let store = open(path, Access::ReadOnly)?;
            let threshold = threshold.unwrap_or(config.low_stock_threshold);
            for item in store.check_low_items(threshold) {
                writeln!(out, "{item}")?;
            }
        }
        Command::Report => {
            let store = open(path, Access::ReadOnly)?;
            write!(out, "{}", store.report())?;
        }
        Command::Demo => demo(config, out)?,
    }

    Ok(())
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Access {
    ReadOnly,
    ReadWrite,
}

/// Load the inventory for a command.
///
/// A missing file always yields an empty store. A malformed file is only
/// tolerated for read-only commands; writing would replace its contents.
fn open(path: &Path, access: Access) -> anyhow::Result<InventoryStore> {
    let mut store = InventoryStore::new();
    match store.load(path) {
        Ok(()) | Err(PersistenceError::NotFound { .. }) => Ok(store),
        Err(err) if err.is_recoverable() && access == Access::ReadOnly => {
            tracing::debug!("continuing with empty inventory: {err}");
            Ok(store)
        }
        Err(err) => Err(err).with_context(|| format!("could not open inventory '{}'", path.display())),
    }
}

fn persist(store: &InventoryStore, path: &Path) -> anyhow::Result<()> {
    store
        .save(path)
        .with_context(|| format!("could not write inventory '{}'", path.display()))
}

/// Fixed walkthrough of every store operation, starting from an empty store.
fn demo<W: Write>(config: &Config, out: &mut W) -> anyhow::Result<()> {
    let path = config.data_file.as_path();
    let mut store = InventoryStore::new();
    let mut log = Vec::new();

    store.add("apple", 10, Some(&mut log))?;
    store.add("banana", 5, Some(&mut log))?;
    match store.add("", -10, Some(&mut log)) {
        Err(err) if err.is_validation() => writeln!(out, "Rejected add: {err}")?,
        other => other?,
    }
    for entry in &log {
        writeln!(out, "{entry}")?;
    }

    store.remove("apple", 3)?;
    // Unknown item: logged as a warning, the demo carries on.
    match store.remove("orange", 1) {
        Ok(()) | Err(DomainError::NotFound(_)) => {}
        Err(err) => return Err(err.into()),
    }

    writeln!(out, "Apple stock: {}", store.get_quantity("apple"))?;
    writeln!(
        out,
        "Low items: {:?}",
        store.check_low_items(config.low_stock_threshold)
    )?;

    persist(&store, path)?;
    store
        .load(path)
        .with_context(|| format!("could not reload inventory '{}'", path.display()))?;
    write!(out, "{}", store.report())?;
    writeln!(out, "Inventory operations completed successfully")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> Config {
        Config {
            data_file: dir.path().join("inventory.json"),
            ..Config::default()
        }
    }

    fn run_to_string(command: Command, config: &Config) -> anyhow::Result<String> {
        let mut out = Vec::new();
        run(&command, config, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn add_persists_and_prints_log_entry() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        let out = run_to_string(
            Command::Add {
                item: "apple".into(),
                quantity: 4,
            },
            &config,
        )
        .unwrap();
        assert!(out.trim_end().ends_with("Added 4 of apple"));

        let out = run_to_string(Command::Get { item: "apple".into() }, &config).unwrap();
        assert_eq!(out, "4\n");
    }

    #[test]
    fn remove_unknown_item_fails() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        let err = run_to_string(
            Command::Remove {
                item: "orange".into(),
                quantity: 1,
            },
            &config,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("Item 'orange' not found in inventory"));
        assert!(!config.data_file.exists());
    }

    #[test]
    fn remove_negative_quantity_restocks() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        std::fs::write(&config.data_file, r#"{"apple": 7}"#).unwrap();

        run_to_string(
            Command::Remove {
                item: "apple".into(),
                quantity: -2,
            },
            &config,
        )
        .unwrap();

        let out = run_to_string(Command::Get { item: "apple".into() }, &config).unwrap();
        assert_eq!(out, "9
");
    }

    #[test]
    fn mutating_a_malformed_file_is_refused() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        std::fs::write(&config.data_file, "{not valid").unwrap();

        let result = run_to_string(
            Command::Add {
                item: "apple".into(),
                quantity: 1,
            },
            &config,
        );
        assert!(result.is_err());
        assert_eq!(std::fs::read_to_string(&config.data_file).unwrap(), "{not valid");

        let out = run_to_string(Command::Report, &config).unwrap();
        assert_eq!(out, "Items Report\n");
    }

    #[test]
    fn low_uses_flag_then_config_threshold() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(&dir);
        std::fs::write(&config.data_file, r#"{"apple": 3, "banana": 10}"#).unwrap();

        let out = run_to_string(Command::Low { threshold: None }, &config).unwrap();
        assert_eq!(out, "apple\n");

        config.low_stock_threshold = 11;
        let out = run_to_string(Command::Low { threshold: None }, &config).unwrap();
        assert_eq!(out, "apple\nbanana\n");

        let out = run_to_string(Command::Low { threshold: Some(1) }, &config).unwrap();
        assert_eq!(out, "");
    }

    #[test]
    fn demo_walks_through_every_operation() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        let out = run_to_string(Command::Demo, &config).unwrap();
        assert!(out.contains("Rejected add: validation failed"));
        assert!(out.contains("Apple stock: 7\n"));
        assert!(out.contains("Low items: []\n"));
        assert!(out.contains("Items Report\napple -> 7\nbanana -> 5\n"));
        assert!(out.ends_with("Inventory operations completed successfully\n"));

        let saved = std::fs::read_to_string(&config.data_file).unwrap();
        assert_eq!(saved, "{\n  \"apple\": 7,\n  \"banana\": 5\n}\n");
    }
}
