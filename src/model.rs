use crate::hasher::ContentHash;
use crate::quality::QualityRank;
use serde::{Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};

/// Audio container formats recognised by the scanner.
///
/// Reports render a format as its lowercase extension with the leading dot
/// (`.flac`). Variant order matches the order of those strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AudioFormat {
    Aac,
    Aif,
    Aiff,
    Flac,
    M4a,
    Mp3,
    Wav,
}

impl AudioFormat {
    /// Parse a file extension, with or without the leading dot, ignoring case.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        match ext.as_str() {
            "aac" => Some(AudioFormat::Aac),
            "aif" => Some(AudioFormat::Aif),
            "aiff" => Some(AudioFormat::Aiff),
            "flac" => Some(AudioFormat::Flac),
            "m4a" => Some(AudioFormat::M4a),
            "mp3" => Some(AudioFormat::Mp3),
            "wav" => Some(AudioFormat::Wav),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AudioFormat::Aac => ".aac",
            AudioFormat::Aif => ".aif",
            AudioFormat::Aiff => ".aiff",
            AudioFormat::Flac => ".flac",
            AudioFormat::M4a => ".m4a",
            AudioFormat::Mp3 => ".mp3",
            AudioFormat::Wav => ".wav",
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for AudioFormat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Which command-line root a file was discovered under.
///
/// Only `Master` is special: library and archive roots are processed identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RootRole {
    Master,
    Library,
    Archive,
}

impl fmt::Display for RootRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RootRole::Master => f.write_str("master"),
            RootRole::Library => f.write_str("library"),
            RootRole::Archive => f.write_str("archive"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Root {
    pub path: PathBuf,
    pub role: RootRole,
}

impl Root {
    pub fn new(path: impl Into<PathBuf>, role: RootRole) -> Self {
        Self {
            path: path.into(),
            role,
        }
    }
}

/// One discovered audio file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub path: PathBuf,
    pub format: AudioFormat,
    pub size: u64,
    pub role: RootRole,
}

impl FileRecord {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn is_master(&self) -> bool {
        self.role == RootRole::Master
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AudioMetadata {
    pub bitrate_kbps: Option<u32>,
    pub duration_secs: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    ExistsInMaster,
    NewInMaster,
}

impl Recommendation {
    pub fn from_membership(in_master: bool) -> Self {
        if in_master {
            Recommendation::ExistsInMaster
        } else {
            Recommendation::NewInMaster
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::ExistsInMaster => "EXISTS_IN_MASTER",
            Recommendation::NewInMaster => "NEW_IN_MASTER",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file that hashed successfully, before membership is known.
#[derive(Debug, Clone)]
pub struct HashedFile {
    pub record: FileRecord,
    pub hash: ContentHash,
    pub metadata: AudioMetadata,
}

#[derive(Debug, Clone)]
pub struct AnalysisEntry {
    pub record: FileRecord,
    pub hash: ContentHash,
    pub metadata: AudioMetadata,
    pub quality_rank: QualityRank,
    pub in_master: bool,
    pub recommendation: Recommendation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanErrorKind {
    /// The root path given on the command line does not exist.
    NotFound,
    /// An entry exists but could not be read; holds the OS reason.
    Access(String),
}

/// A path the scanner could not enumerate. `Display` gives the error-log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanError {
    pub path: PathBuf,
    pub kind: ScanErrorKind,
}

impl ScanError {
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: ScanErrorKind::NotFound,
        }
    }

    pub fn access(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        Self {
            path: path.into(),
            kind: ScanErrorKind::Access(reason.to_string()),
        }
    }
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ScanErrorKind::NotFound => write!(f, "Path not found: {}", self.path.display()),
            ScanErrorKind::Access(reason) => {
                write!(f, "Cannot access: {} - {}", self.path.display(), reason)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashError {
    pub path: PathBuf,
    pub message: String,
}
