//! JSON export of run results
//!
//! The document mirrors the shape downstream consumers already expect:
//! a `data` member mapping `page_<n>` to record arrays, plus an
//! `image_save_info` member when image saving was requested for the run.

use crate::crawler::RunOutput;
use crate::records::{AssetSaveOutcome, RunResult};
use crate::ScrapeError;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Serialize)]
struct ResultDocument<'a> {
    data: &'a RunResult,

    #[serde(skip_serializing_if = "Option::is_none")]
    image_save_info: Option<&'a AssetSaveOutcome>,
}

/// Renders a run's output as a JSON value
pub fn render_document(output: &RunOutput) -> Result<serde_json::Value, ScrapeError> {
    let document = ResultDocument {
        data: &output.results,
        image_save_info: output.assets.saved.then_some(&output.assets),
    };
    Ok(serde_json::to_value(&document)?)
}

/// Writes a run's output as pretty-printed JSON
pub fn write_json(output: &RunOutput, path: &Path) -> Result<(), ScrapeError> {
    let document = ResultDocument {
        data: &output.results,
        image_save_info: output.assets.saved.then_some(&output.assets),
    };

    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &document)?;

    Ok(())
}
