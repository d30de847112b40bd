use super::round2;
use crate::engine::CatalogRun;
use crate::error::Error;
use crate::hasher::ContentHash;
use crate::model::{AnalysisEntry, AudioFormat, Recommendation};
use crate::quality::QualityRank;
use chrono::{DateTime, Local, Timelike};
use serde::Serialize;

#[derive(Serialize)]
struct JsonReport<'a> {
    metadata: JsonMetadata,
    files: Vec<JsonFile<'a>>,
}

#[derive(Serialize)]
struct JsonMetadata {
    generated: String,
    master_path: String,
    total_files: usize,
    total_errors: usize,
}

#[derive(Serialize)]
struct JsonFile<'a> {
    source_path: String,
    filename: String,
    format: AudioFormat,
    bitrate_kbps: Option<u32>,
    duration_sec: Option<f64>,
    hash: &'a ContentHash,
    in_master: bool,
    quality_rank: QualityRank,
    recommended_action: Recommendation,
}

impl<'a> From<&'a AnalysisEntry> for JsonFile<'a> {
    fn from(entry: &'a AnalysisEntry) -> Self {
        Self {
            source_path: entry.record.path.to_string_lossy().into_owned(),
            filename: entry.record.file_name(),
            format: entry.record.format,
            bitrate_kbps: entry.metadata.bitrate_kbps,
            duration_sec: entry.metadata.duration_secs.map(round2),
            hash: &entry.hash,
            in_master: entry.in_master,
            quality_rank: entry.quality_rank,
            recommended_action: entry.recommendation,
        }
    }
}

pub fn render(run: &CatalogRun, generated_at: DateTime<Local>) -> Result<String, Error> {
    let report = JsonReport {
        metadata: JsonMetadata {
            generated: local_iso_timestamp(generated_at),
            master_path: run.master_path.to_string_lossy().into_owned(),
            total_files: run.entries.len(),
            total_errors: run.error_count(),
        },
        files: run.entries.iter().map(JsonFile::from).collect(),
    };

    Ok(serde_json::to_string_pretty(&report)?)
}

/// Local wall-clock time without an offset; sub-second digits only when non-zero.
fn local_iso_timestamp(at: DateTime<Local>) -> String {
    let at = at.naive_local();
    if at.nanosecond() / 1_000 == 0 {
        at.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::test_support::{entry, run};
    use chrono::TimeZone;
    use serde_json::Value;

    #[test]
    fn test_render_fields() {
        let generated_at = Local.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let catalog = run(vec![
            entry("/music/master/a.flac", b"X", None, Some(181.23456), true),
            entry("/music/inbox/c.mp3", b"Y", None, None, false),
        ]);

        let doc: Value = serde_json::from_str(&render(&catalog, generated_at).unwrap()).unwrap();

        assert_eq!(doc["metadata"]["master_path"], "/music/master");
        assert_eq!(doc["metadata"]["total_files"], 2);
        assert_eq!(doc["metadata"]["total_errors"], 0);
        assert_eq!(doc["metadata"]["generated"], "2024-03-01T12:00:00");
        assert!(doc["metadata"].get("generated_at").is_none());

        let files = doc["files"].as_array().unwrap();
        assert_eq!(files.len(), 2);

        let a = &files[0];
        assert_eq!(a["source_path"], "/music/master/a.flac");
        assert_eq!(a["filename"], "a.flac");
        assert_eq!(a["format"], ".flac");
        assert!(a["bitrate_kbps"].is_null());
        assert_eq!(a["duration_sec"], 181.23);
        assert_eq!(a["hash"].as_str().unwrap().len(), ContentHash::HEX_LEN);
        assert_eq!(a["in_master"], true);
        assert_eq!(a["quality_rank"], 2);
        assert_eq!(a["recommended_action"], "EXISTS_IN_MASTER");

        let c = &files[1];
        assert!(c["duration_sec"].is_null());
        assert_eq!(c["quality_rank"], 9999);
        assert_eq!(c["recommended_action"], "NEW_IN_MASTER");
    }

    #[test]
    fn test_timestamp_keeps_microseconds() {
        let at = Local
            .with_ymd_and_hms(2024, 3, 1, 12, 0, 5)
            .unwrap()
            .with_nanosecond(250_000_000)
            .unwrap();
        assert_eq!(local_iso_timestamp(at), "2024-03-01T12:00:05.250000");
    }

    #[test]
    fn test_render_empty_run() {
        let generated_at = Local.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let doc: Value =
            serde_json::from_str(&render(&run(vec![]), generated_at).unwrap()).unwrap();
        assert_eq!(doc["files"].as_array().unwrap().len(), 0);
    }
}
