//! Configuration loading and management for the offset engine.
//!
//! This module loads the reserve-component drill pay table from YAML files:
//! table metadata, the YOS buckets, and effective-dated rate schedules.
//!
//! # Example
//!
//! ```no_run
//! use reserve_offset_engine::config::TableLoader;
//!
//! let table = TableLoader::load("./config/rc_drill_pay").unwrap().into_table();
//! println!("Loaded table: {}", table.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::TableLoader;
pub use types::{BucketsConfig, PayTable, RateSchedule, TableMetadata, YosBucket};
