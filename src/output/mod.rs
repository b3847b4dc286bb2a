//! Output module for exporting and summarizing run results

mod json;
pub mod stats;

pub use json::{render_document, write_json};
pub use stats::{print_stats, RunStats};
