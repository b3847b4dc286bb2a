//! Run summary for the terminal
//!
//! A compact per-page breakdown printed after a crawl finishes.

use crate::records::{AssetSaveOutcome, RunResult};

/// Per-run record counts
#[derive(Debug, Clone)]
pub struct RunStats {
    /// Number of page entries in the result
    pub pages: usize,

    /// Total records across all pages
    pub total_records: usize,

    /// (page key, record count) in page order
    pub per_page: Vec<(String, usize)>,
}

impl RunStats {
    pub fn from_result(results: &RunResult) -> Self {
        let per_page: Vec<(String, usize)> = results
            .iter()
            .map(|(key, records)| (key.to_string(), records.len()))
            .collect();

        Self {
            pages: per_page.len(),
            total_records: per_page.iter().map(|(_, n)| n).sum(),
            per_page,
        }
    }
}

/// Prints the run summary to stdout
pub fn print_stats(stats: &RunStats, assets: &AssetSaveOutcome) {
    println!("=== Crawl Summary ===\n");

    for (key, count) in &stats.per_page {
        println!("  {}: {} records", key, count);
    }

    println!("\nTotal: {} records across {} pages", stats.total_records, stats.pages);

    if assets.saved {
        if let Some(dir) = &assets.directory {
            println!("Images saved under: {}", dir.display());
        }
    }
}
