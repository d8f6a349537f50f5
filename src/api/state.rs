//! Application state for the offset engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use crate::config::{PayTable, TableLoader};
use crate::error::{EngineError, EngineResult};

/// Shared application state.
///
/// Holds the pay table behind a swappable `Arc`. Handlers take a snapshot
/// with [`AppState::table`] and use it for the whole request; a reload
/// replaces the `Arc` in one step, so a request never sees rows from two
/// table versions.
#[derive(Clone)]
pub struct AppState {
    table: Arc<RwLock<Arc<PayTable>>>,
    config_dir: Option<Arc<PathBuf>>,
}

impl AppState {
    /// Creates a new application state serving the given table.
    pub fn new(table: PayTable) -> Self {
        Self {
            table: Arc::new(RwLock::new(Arc::new(table))),
            config_dir: None,
        }
    }

    /// Loads the table from `path` and remembers the directory for reloads.
    pub fn load<P: Into<PathBuf>>(path: P) -> EngineResult<Self> {
        let path = path.into();
        let table = TableLoader::load(&path)?.into_table();
        Ok(Self {
            config_dir: Some(Arc::new(path)),
            ..Self::new(table)
        })
    }

    /// Returns a snapshot of the current pay table.
    pub fn table(&self) -> Arc<PayTable> {
        self.table
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the current pay table.
    pub fn replace_table(&self, table: PayTable) {
        *self.table.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(table);
    }

    /// Reloads the table from the configured directory and swaps it in.
    ///
    /// On failure the current table stays in service.
    pub fn reload(&self) -> EngineResult<Arc<PayTable>> {
        let dir = self
            .config_dir
            .as_ref()
            .ok_or_else(|| EngineError::ConfigNotFound {
                path: "no table directory configured".to_string(),
            })?;
        let table = TableLoader::load(dir.as_path())?.into_table();
        self.replace_table(table);
        Ok(self.table())
    }
}
