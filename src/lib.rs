//! `fuel-prices` library crate.
//!
//! The binary (`fuel`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the ingest/aggregation pipeline is reusable by other front-ends
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod filter;
pub mod io;
pub mod plot;
pub mod report;
pub mod tui;
