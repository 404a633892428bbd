//! Runtime configuration resolved from flags and environment.

use std::path::PathBuf;

use stockbook_inventory::{DEFAULT_INVENTORY_FILE, DEFAULT_LOW_STOCK_THRESHOLD};

pub const FILE_ENV: &str = "STOCKBOOK_FILE";
pub const LOW_THRESHOLD_ENV: &str = "STOCKBOOK_LOW_THRESHOLD";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_file: PathBuf,
    pub low_stock_threshold: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_INVENTORY_FILE),
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}

impl Config {
    /// Resolve from the `--file` flag and the process environment.
    pub fn resolve(file_flag: Option<PathBuf>) -> Self {
        Self::from_lookup(file_flag, |key| std::env::var(key).ok())
    }

    /// Flag beats environment beats default.
    pub fn from_lookup(file_flag: Option<PathBuf>, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let data_file = file_flag
            .or_else(|| lookup(FILE_ENV).filter(|v| !v.trim().is_empty()).map(PathBuf::from))
            .unwrap_or(defaults.data_file);

        let low_stock_threshold = match lookup(LOW_THRESHOLD_ENV) {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(
                    "{LOW_THRESHOLD_ENV}={raw:?} is not a non-negative integer; using {}",
                    defaults.low_stock_threshold
                );
                defaults.low_stock_threshold
            }),
            None => defaults.low_stock_threshold,
        };

        Self {
            data_file,
            low_stock_threshold,
        }
    }
}
