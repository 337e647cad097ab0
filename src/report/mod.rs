//! Reporting utilities: monthly aggregates and formatted terminal output.

pub mod format;
pub mod monthly;

pub use format::*;
pub use monthly::*;
