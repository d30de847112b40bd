use crate::model::{Root, RootRole};
use config::{Config, File as ConfigFile};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory the report files are written to.
    pub output_dir: String,
    /// Extra glob patterns pruned during traversal.
    pub ignore_patterns: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: ".".to_string(),
            ignore_patterns: Vec::new(),
        }
    }
}

pub fn load_configuration() -> Result<AppConfig, crate::Error> {
    load_configuration_from("Config")
}

pub fn load_configuration_from(name: &str) -> Result<AppConfig, crate::Error> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name(name).required(false))
        .build()?;
    Ok(builder.try_deserialize::<AppConfig>()?)
}

/// Canonical form used for overlap checks. Paths that don't exist are kept as given
/// so the scanner can report them.
pub fn comparable_path(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Drop secondary roots that overlap the master root or each other.
///
/// A secondary inside the master is already covered by the master scan. Among
/// secondaries, a root nested inside another is removed in favour of the outer one.
pub fn non_overlapping_roots(master: &Path, secondaries: Vec<Root>) -> Vec<Root> {
    let master = comparable_path(master);
    let mut result: Vec<Root> = Vec::new();

    for root in secondaries {
        let root = Root::new(comparable_path(&root.path), root.role);

        if root.path.starts_with(&master) {
            warn!(
                "Skipping {} root {}: inside master root",
                root.role,
                root.path.display()
            );
            continue;
        }

        if let Some(outer) = result.iter().find(|r| root.path.starts_with(&r.path)) {
            warn!(
                "Skipping {} root {}: inside {} root",
                root.role,
                root.path.display(),
                outer.role
            );
            continue;
        }

        result.retain(|r| {
            let nested = r.path.starts_with(&root.path);
            if nested {
                warn!(
                    "Skipping {} root {}: inside {} root",
                    r.role,
                    r.path.display(),
                    root.role
                );
            }
            !nested
        });

        result.push(root);
    }

    result
}

/// Build the ordered root list for a run: master first, then library, then archive.
pub fn build_roots(master: &Path, library: Option<&Path>, archive: Option<&Path>) -> Vec<Root> {
    let secondaries: Vec<Root> = [(library, RootRole::Library), (archive, RootRole::Archive)]
        .into_iter()
        .filter_map(|(path, role)| path.map(|p| Root::new(p, role)))
        .collect();

    let mut roots = vec![Root::new(comparable_path(master), RootRole::Master)];
    roots.extend(non_overlapping_roots(master, secondaries));
    roots
}
