//! Terminal plotting for the text commands.

pub mod ascii;

pub use ascii::render_bar_chart;
