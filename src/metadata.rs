use crate::model::AudioMetadata;
use lofty::prelude::AudioFile;
use std::path::Path;
use tracing::trace;

/// Read bitrate and duration from the file's container properties.
///
/// Any failure to open or parse the file, and any missing field, degrades to
/// `None`. Metadata problems are never reported as errors.
pub fn extract(path: &Path) -> AudioMetadata {
    let tagged_file = match lofty::read_from_path(path) {
        Ok(tagged_file) => tagged_file,
        Err(e) => {
            trace!("No readable audio properties in {}: {}", path.display(), e);
            return AudioMetadata::default();
        }
    };

    let properties = tagged_file.properties();

    // Whole kbps as lofty derives them per container; a stream reporting 0 keeps 0.
    let bitrate_kbps = properties.audio_bitrate().or(properties.overall_bitrate());

    let duration = properties.duration();
    let duration_secs = if duration.is_zero() {
        None
    } else {
        Some(duration.as_secs_f64())
    };

    AudioMetadata {
        bitrate_kbps,
        duration_secs,
    }
}
