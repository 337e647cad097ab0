//! Input/output helpers.
//!
//! - CSV ingest + row validation (`ingest`)
//! - chart series exports (CSV/JSON) (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
