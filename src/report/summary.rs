use super::Summary;
use crate::engine::CatalogRun;
use chrono::{DateTime, Local};
use std::fmt::Write;

const RULE_WIDTH: usize = 60;

pub fn render(run: &CatalogRun, summary: &Summary, generated_at: DateTime<Local>) -> String {
    let rule = "═".repeat(RULE_WIDTH);
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "{:>36}", "AUDIO SYNC REPORT SUMMARY");
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out);
    let _ = writeln!(out, "Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out, "Master: {}", run.master_path.display());
    let _ = writeln!(out);
    let _ = writeln!(out, "Total files scanned: {}", summary.total);
    let _ = writeln!(out, "Files in Master: {}", summary.in_master);
    let _ = writeln!(out, "New files to add: {}", summary.new);
    let _ = writeln!(out);
    let _ = writeln!(out, "By format:");
    for (format, count) in &summary.by_format {
        let _ = writeln!(out, "  {:<6}: {:>5}", format.as_str(), count);
    }
    if summary.errors > 0 {
        let _ = writeln!(out);
        let _ = writeln!(out, "⚠️  Errors encountered: {}", summary.errors);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Processing time: {:.1}s", run.elapsed.as_secs_f64());

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ScanError;
    use crate::report::test_support::{entry, run};
    use chrono::TimeZone;

    #[test]
    fn test_render_summary() {
        let generated_at = Local.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let catalog = run(vec![
            entry("/m/z.wav", b"W", None, None, true),
            entry("/l/b.mp3", b"X", Some(320), None, false),
            entry("/l/a.flac", b"Y", None, None, false),
        ]);
        let text = render(&catalog, &Summary::from_run(&catalog), generated_at);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "═".repeat(60));
        assert_eq!(lines[1], "           AUDIO SYNC REPORT SUMMARY");
        assert_eq!(lines[2], "═".repeat(60));
        assert!(text.contains("Generated: 2024-03-01 12:00:00\n"));
        assert!(text.contains("Master: /music/master\n"));
        assert!(text.contains("Total files scanned: 3\n"));
        assert!(text.contains("Files in Master: 1\n"));
        assert!(text.contains("New files to add: 2\n"));
        assert!(text.ends_with("\nProcessing time: 1.3s\n"));
        assert!(!text.contains("Errors encountered"));

        let flac = text.find("  .flac :     1\n").unwrap();
        let mp3 = text.find("  .mp3  :     1\n").unwrap();
        let wav = text.find("  .wav  :     1\n").unwrap();
        assert!(flac < mp3 && mp3 < wav);
    }

    #[test]
    fn test_render_error_count() {
        let generated_at = Local.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let mut catalog = run(vec![]);
        catalog.scan_errors.push(ScanError::not_found("/gone"));
        let text = render(&catalog, &Summary::from_run(&catalog), generated_at);
        assert!(text.contains("\n\n⚠️  Errors encountered: 1\n\nProcessing time:"));
    }
}
