use super::round2;
use crate::error::Error;
use crate::model::AnalysisEntry;

pub const HEADER: [&str; 8] = [
    "source_path",
    "filename",
    "format",
    "bitrate_kbps",
    "duration_sec",
    "in_master",
    "quality_rank",
    "recommended_action",
];

/// One header row, then one row per entry.
///
/// Null bitrate/duration become empty cells. Durations use the shortest text that
/// round-trips the rounded value (`181.0`, `12.35`); membership is `True`/`False`.
pub fn render(entries: &[AnalysisEntry]) -> Result<Vec<u8>, Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADER)?;

    for entry in entries {
        let bitrate = entry
            .metadata
            .bitrate_kbps
            .map(|kbps| kbps.to_string())
            .unwrap_or_default();
        let duration = entry
            .metadata
            .duration_secs
            .map(|secs| format!("{:?}", round2(secs)))
            .unwrap_or_default();

        let source_path = entry.record.path.to_string_lossy().into_owned();
        let filename = entry.record.file_name();
        let quality_rank = entry.quality_rank.to_string();

        writer.write_record([
            source_path.as_str(),
            filename.as_str(),
            entry.record.format.as_str(),
            bitrate.as_str(),
            duration.as_str(),
            if entry.in_master { "True" } else { "False" },
            quality_rank.as_str(),
            entry.recommendation.as_str(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| Error::Io(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::test_support::entry;

    #[test]
    fn test_render_rows() {
        let bytes = render(&[
            entry("/m/a.flac", b"X", None, Some(12.346), true),
            entry("/l/Song, With Comma.mp3", b"Y", Some(128), None, false),
            entry("/l/long.wav", b"Z", Some(1411), Some(181.0), false),
        ])
        .unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "source_path,filename,format,bitrate_kbps,duration_sec,in_master,quality_rank,recommended_action"
        );
        assert_eq!(lines[1], "/m/a.flac,a.flac,.flac,,12.35,True,2,EXISTS_IN_MASTER");
        assert_eq!(
            lines[2],
            "\"/l/Song, With Comma.mp3\",\"Song, With Comma.mp3\",.mp3,128,,False,6,NEW_IN_MASTER"
        );
        assert_eq!(lines[3], "/l/long.wav,long.wav,.wav,1411,181.0,False,1,NEW_IN_MASTER");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_render_empty_has_header_only() {
        let text = String::from_utf8(render(&[]).unwrap()).unwrap();
        assert_eq!(text.lines().count(), 1);
    }
}
