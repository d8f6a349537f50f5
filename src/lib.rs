//! VA disability offset estimator for reserve-component members
//!
//! This crate resolves "1 Drill" base pay from a DFAS-style drill pay table
//! keyed by grade and years of service, and estimates how much VA
//! compensation is recouped for drill periods and active duty days compared
//! with the military pay earned for them.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod coerce;
pub mod config;
pub mod error;
pub mod models;
