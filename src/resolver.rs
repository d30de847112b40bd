use crate::hasher::ContentHash;
use crate::model::{AnalysisEntry, HashedFile, Recommendation};
use crate::quality;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Content hash → one representative master path.
///
/// When several master files share a hash the last one inserted wins; the
/// others are only counted in `shadowed`, never reported individually.
#[derive(Debug, Default)]
pub struct MasterHashIndex {
    map: HashMap<ContentHash, PathBuf>,
    shadowed: usize,
}

impl MasterHashIndex {
    pub fn build<'a, I>(master_files: I) -> Self
    where
        I: IntoIterator<Item = &'a HashedFile>,
    {
        let mut index = Self::default();
        for file in master_files {
            index.insert(file.hash.clone(), file.record.path.clone());
        }
        index
    }

    pub fn insert(&mut self, hash: ContentHash, path: PathBuf) {
        if let Some(previous) = self.map.insert(hash, path) {
            self.shadowed += 1;
            debug!("Master duplicate replaced as representative: {}", previous.display());
        }
    }

    pub fn contains(&self, hash: &ContentHash) -> bool {
        self.map.contains_key(hash)
    }

    pub fn representative(&self, hash: &ContentHash) -> Option<&Path> {
        self.map.get(hash).map(|p| p.as_path())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Number of master files whose hash was already held by another master file.
    pub fn shadowed(&self) -> usize {
        self.shadowed
    }
}

/// Join a hashed file with its quality rank and master membership.
///
/// `index` must already hold every master hash.
pub fn resolve(file: HashedFile, index: &MasterHashIndex) -> AnalysisEntry {
    let in_master = index.contains(&file.hash);
    let quality_rank = quality::rank(file.record.format, file.metadata.bitrate_kbps);

    AnalysisEntry {
        record: file.record,
        hash: file.hash,
        metadata: file.metadata,
        quality_rank,
        in_master,
        recommendation: Recommendation::from_membership(in_master),
    }
}
