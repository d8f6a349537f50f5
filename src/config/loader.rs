//! Configuration loading functionality.
//!
//! This module provides the [`TableLoader`] type for loading the drill pay
//! table from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{BucketsConfig, PayTable, RateSchedule, TableMetadata};

/// Loads and validates the drill pay table.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/rc_drill_pay/
/// ├── table.yaml          # Table metadata
/// ├── buckets.yaml        # YOS buckets shared by every grade
/// └── rates/
///     └── 2026-01-01.yaml # "1 Drill" amounts effective from this date
/// ```
///
/// # Example
///
/// ```no_run
/// use reserve_offset_engine::config::TableLoader;
///
/// let loader = TableLoader::load("./config/rc_drill_pay").unwrap();
/// println!("Loaded table: {}", loader.table().metadata().name);
/// ```
#[derive(Debug, Clone)]
pub struct TableLoader {
    table: PayTable,
}

impl TableLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/rc_drill_pay")
    ///
    /// # Returns
    ///
    /// Returns a `TableLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML or unknown grades (`ConfigParseError`)
    /// - The table violates its data invariants (`InvalidPayTable`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        // Load table.yaml
        let metadata = Self::load_yaml::<TableMetadata>(&path.join("table.yaml"))?;

        // Load buckets.yaml
        let buckets = Self::load_yaml::<BucketsConfig>(&path.join("buckets.yaml"))?;

        // Load rate schedules from rates/
        let schedules = Self::load_schedules(&path.join("rates"))?;

        // Validate before the table is handed out
        let table = PayTable::new(metadata, buckets.buckets, schedules);
        table.validate()?;

        debug!(
            table = %table.metadata().code,
            buckets = table.buckets().len(),
            schedules = table.schedules().len(),
            "Loaded pay table"
        );

        Ok(Self { table })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all rate schedule files from the rates directory.
    fn load_schedules(rates_dir: &Path) -> EngineResult<Vec<RateSchedule>> {
        let rates_dir_str = rates_dir.display().to_string();

        let entries = fs::read_dir(rates_dir).map_err(|_| EngineError::ConfigNotFound {
            path: rates_dir_str.clone(),
        })?;

        let mut schedules = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: rates_dir_str.clone(),
            })?;

            let path = entry.path();
            // Only .yaml files are schedules
            if path.extension().is_some_and(|ext| ext == "yaml") {
                schedules.push(Self::load_yaml::<RateSchedule>(&path)?);
            }
        }

        if schedules.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rate files found)", rates_dir_str),
            });
        }

        Ok(schedules)
    }

    /// Returns the loaded pay table.
    pub fn table(&self) -> &PayTable {
        &self.table
    }

    /// Consumes the loader and returns the pay table.
    pub fn into_table(self) -> PayTable {
        self.table
    }
}
