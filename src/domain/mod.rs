//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the closed fuel product enum (`FuelType`)
//! - validated price observations (`FuelPriceRecord`)
//! - filter inputs and outputs (`FilterOptions`, `Selection`)
//! - chart-ready aggregates (`ChartPoint`)

pub mod types;

pub use types::*;
