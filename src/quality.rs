use crate::model::AudioFormat;
use serde::Serialize;
use std::fmt;

/// Lower is better. Used for sorting and recommendations only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct QualityRank(u32);

impl QualityRank {
    pub const UNCOMPRESSED: QualityRank = QualityRank(1);
    pub const FLAC: QualityRank = QualityRank(2);
    pub const UNKNOWN_BITRATE: QualityRank = QualityRank(9999);

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for QualityRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fixed ranking policy: uncompressed PCM, then FLAC, then lossy by bitrate.
pub fn rank(format: AudioFormat, bitrate_kbps: Option<u32>) -> QualityRank {
    match format {
        AudioFormat::Wav | AudioFormat::Aif | AudioFormat::Aiff => QualityRank::UNCOMPRESSED,
        AudioFormat::Flac => QualityRank::FLAC,
        AudioFormat::M4a | AudioFormat::Aac | AudioFormat::Mp3 => match bitrate_kbps {
            None => QualityRank::UNKNOWN_BITRATE,
            Some(kbps) if kbps >= 320 => QualityRank(3),
            Some(kbps) if kbps >= 256 => QualityRank(4),
            Some(kbps) if kbps >= 192 => QualityRank(5),
            Some(_) => QualityRank(6),
        },
    }
}
