//! Filter dimensions: which values can be selected, and which one is picked
//! first.

pub mod options;
pub mod selection;

pub use options::extract_filter_options;
pub use selection::{default_selection, default_selection_with_year};
