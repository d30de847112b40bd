//! Report synthesis for a finished catalog run.
//!
//! Every report is rendered fully into memory before anything touches the disk,
//! so a failed run never leaves a truncated file behind.
//!
//! - **JSON**: run metadata plus one record per analyzed file
//! - **CSV**: one row per analyzed file
//! - **Summary**: human-readable counts and timing
//! - **Errors**: scan and hash failures, written only when there are any

pub mod csv;
pub mod errors;
pub mod json;
pub mod summary;

use crate::engine::CatalogRun;
use crate::error::Error;
use crate::model::AudioFormat;
use chrono::{DateTime, Local};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Aggregate counts over the analyzed entries of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub in_master: usize,
    pub new: usize,
    pub by_format: BTreeMap<AudioFormat, usize>,
    pub errors: usize,
}

impl Summary {
    pub fn from_run(run: &CatalogRun) -> Self {
        let mut summary = Self {
            total: run.entries.len(),
            errors: run.error_count(),
            ..Self::default()
        };

        for entry in &run.entries {
            if entry.in_master {
                summary.in_master += 1;
            } else {
                summary.new += 1;
            }
            *summary.by_format.entry(entry.record.format).or_default() += 1;
        }

        summary
    }
}

pub const JSON_FILE_NAME: &str = "report.json";
pub const CSV_FILE_NAME: &str = "report_detailed.csv";
pub const SUMMARY_FILE_NAME: &str = "report_summary.txt";
pub const ERRORS_FILE_NAME: &str = "report_errors.txt";

#[derive(Debug, Clone)]
pub struct ReportPaths {
    pub json: PathBuf,
    pub csv: PathBuf,
    pub summary: PathBuf,
    pub errors: Option<PathBuf>,
}

impl ReportPaths {
    pub fn new(output_dir: &Path) -> Self {
        Self {
            json: output_dir.join(JSON_FILE_NAME),
            csv: output_dir.join(CSV_FILE_NAME),
            summary: output_dir.join(SUMMARY_FILE_NAME),
            errors: Some(output_dir.join(ERRORS_FILE_NAME)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        [&self.json, &self.csv, &self.summary]
            .into_iter()
            .chain(self.errors.as_ref())
    }

    pub fn count(&self) -> usize {
        self.iter().count()
    }
}

/// Render and write every report. Existing files are overwritten.
pub fn write_reports(
    run: &CatalogRun,
    generated_at: DateTime<Local>,
    output_dir: &Path,
) -> Result<ReportPaths, Error> {
    let summary = Summary::from_run(run);

    let json_doc = json::render(run, generated_at)?;
    let csv_doc = csv::render(&run.entries)?;
    let summary_doc = summary::render(run, &summary, generated_at);
    let errors_doc = if run.error_count() > 0 {
        Some(errors::render(&run.scan_errors, &run.hash_errors))
    } else {
        None
    };

    fs::create_dir_all(output_dir)?;
    let mut paths = ReportPaths::new(output_dir);

    fs::write(&paths.json, json_doc)?;
    fs::write(&paths.csv, csv_doc)?;
    fs::write(&paths.summary, summary_doc)?;
    match errors_doc {
        Some(doc) => {
            if let Some(path) = &paths.errors {
                fs::write(path, doc)?;
            }
        }
        None => paths.errors = None,
    }

    for path in paths.iter() {
        debug!("Wrote {}", path.display());
    }

    Ok(paths)
}

/// Round to two decimal places for display.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
