use crate::model::{HashError, ScanError};
use std::fmt::Write;

/// Scan errors as full messages, then the paths that failed to hash.
pub fn render(scan_errors: &[ScanError], hash_errors: &[HashError]) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== Scan Errors ===");
    for err in scan_errors {
        let _ = writeln!(out, "{}", err);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "=== Hash Errors ===");
    for err in hash_errors {
        let _ = writeln!(out, "{}", err.path.display());
    }

    out
}
