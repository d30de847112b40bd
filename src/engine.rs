use crate::config::{self, AppConfig};
use crate::error::Error;
use crate::hasher;
use crate::metadata;
use crate::model::{AnalysisEntry, FileRecord, HashError, HashedFile, Root, ScanError};
use crate::progress::ProgressReporter;
use crate::report::{self, ReportPaths};
use crate::resolver::{self, MasterHashIndex};
use crate::scanner::{ScanOutcome, Scanner};
use chrono::{DateTime, Local};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub struct CatalogEngine {
    config: AppConfig,
    /// Master path as given, echoed in the reports.
    master_input: PathBuf,
    roots: Vec<Root>,
}

/// Everything one run produced, in final form.
#[derive(Debug)]
pub struct CatalogRun {
    pub master_path: PathBuf,
    pub entries: Vec<AnalysisEntry>,
    pub scan_errors: Vec<ScanError>,
    pub hash_errors: Vec<HashError>,
    pub files_scanned: usize,
    pub master_duplicates: usize,
    pub scan_duration: Duration,
    pub hash_duration: Duration,
    pub elapsed: Duration,
}

impl CatalogRun {
    pub fn error_count(&self) -> usize {
        self.scan_errors.len() + self.hash_errors.len()
    }

    pub fn in_master_count(&self) -> usize {
        self.entries.iter().filter(|e| e.in_master).count()
    }

    pub fn new_count(&self) -> usize {
        self.entries.len() - self.in_master_count()
    }
}

impl CatalogEngine {
    /// `library` and `archive` are optional secondary roots; only `master` feeds the
    /// hash index.
    pub fn new(
        config: AppConfig,
        master: &Path,
        library: Option<&Path>,
        archive: Option<&Path>,
    ) -> Self {
        Self {
            config,
            master_input: master.to_path_buf(),
            roots: config::build_roots(master, library, archive),
        }
    }

    pub fn roots(&self) -> &[Root] {
        &self.roots
    }

    fn master_root(&self) -> &Root {
        // build_roots always puts the master first
        &self.roots[0]
    }

    /// Run the catalog pipeline:
    /// 1. Scan every root
    /// 2. Hash master files and build the complete master index
    /// 3. Hash secondary files
    /// 4. Rank and resolve membership for all files
    pub fn analyze(&self, reporter: &dyn ProgressReporter) -> CatalogRun {
        let run_start = Instant::now();
        let master = self.master_root();
        info!("Master root: {}", master.path.display());
        for root in &self.roots[1..] {
            info!("{} root: {}", root.role, root.path.display());
        }

        // Phase 1: Scan
        info!("Scanning files...");
        reporter.on_scan_start();
        let scan_start = Instant::now();
        let scan = self.scan(reporter);
        let scan_duration = scan_start.elapsed();
        reporter.on_scan_complete(scan.files.len(), scan_duration.as_secs_f64());
        debug!(
            "Scan completed in {:.2}s: {} audio files ({} bytes), {} scan errors",
            scan_duration.as_secs_f64(),
            scan.files.len(),
            scan.files.iter().map(|f| f.size).sum::<u64>(),
            scan.errors.len(),
        );

        let files_scanned = scan.files.len();
        let (master_files, secondary_files): (Vec<FileRecord>, Vec<FileRecord>) =
            scan.files.into_iter().partition(FileRecord::is_master);

        // Phase 2: Hash the master and build its index before any membership check
        info!("Hashing files...");
        reporter.on_hash_start(files_scanned);
        let hash_start = Instant::now();
        let progress = HashProgress::new(reporter, files_scanned);

        let (hashed_master, mut hash_errors) = hash_all(master_files, &progress);
        let index = MasterHashIndex::build(&hashed_master);
        debug!(
            "Master index built: {} distinct hashes, {} shadowed duplicates",
            index.len(),
            index.shadowed(),
        );

        // Phase 3: Hash secondary roots
        let (hashed_secondary, secondary_errors) = hash_all(secondary_files, &progress);
        hash_errors.extend(secondary_errors);
        let hash_duration = hash_start.elapsed();
        reporter.on_hash_complete(progress.done(), hash_duration.as_secs_f64());

        // Phase 4: Classify
        let entries: Vec<AnalysisEntry> = hashed_master
            .into_iter()
            .chain(hashed_secondary)
            .map(|file| resolver::resolve(file, &index))
            .collect();

        let run = CatalogRun {
            master_path: self.master_input.clone(),
            master_duplicates: index.shadowed(),
            entries,
            scan_errors: scan.errors,
            hash_errors,
            files_scanned,
            scan_duration,
            hash_duration,
            elapsed: run_start.elapsed(),
        };

        info!(
            "{} files analyzed: {} in master, {} new, {} errors",
            run.entries.len(),
            run.in_master_count(),
            run.new_count(),
            run.error_count(),
        );

        run
    }

    /// Render every report for `run` into memory, then write them to the
    /// configured output directory.
    pub fn write_reports(
        &self,
        run: &CatalogRun,
        generated_at: DateTime<Local>,
        reporter: &dyn ProgressReporter,
    ) -> Result<ReportPaths, Error> {
        info!("Writing reports...");
        reporter.on_report_start();
        let report_start = Instant::now();

        let paths = report::write_reports(run, generated_at, Path::new(&self.config.output_dir))?;

        reporter.on_report_complete(paths.count(), report_start.elapsed().as_secs_f64());
        Ok(paths)
    }

    /// Master files come first; secondary walks never re-enter the master root.
    fn scan(&self, reporter: &dyn ProgressReporter) -> ScanOutcome {
        let master = self.master_root();
        let master_scanner = Scanner::new(&self.config.ignore_patterns);
        let secondary_scanner = Scanner::new(&self.config.ignore_patterns)
            .with_excluded_dirs(vec![master.path.clone()]);

        let mut outcome = master_scanner.scan_root(master, 0, reporter);
        let found = outcome.files.len();
        outcome.extend(secondary_scanner.scan_roots(&self.roots[1..], found, reporter));
        outcome
    }
}

struct HashProgress<'a> {
    reporter: &'a dyn ProgressReporter,
    total: usize,
    done: AtomicUsize,
}

impl<'a> HashProgress<'a> {
    fn new(reporter: &'a dyn ProgressReporter, total: usize) -> Self {
        Self {
            reporter,
            total,
            done: AtomicUsize::new(0),
        }
    }

    fn tick(&self) {
        let done = self.done.fetch_add(1, Ordering::Relaxed) + 1;
        self.reporter.on_hash_progress(done, self.total);
    }

    fn done(&self) -> usize {
        self.done.load(Ordering::Relaxed)
    }
}

/// Hash and read metadata for every file. Output keeps input order.
fn hash_all(files: Vec<FileRecord>, progress: &HashProgress) -> (Vec<HashedFile>, Vec<HashError>) {
    let results: Vec<Result<HashedFile, HashError>> = files
        .into_par_iter()
        .map(|record| {
            let result = hash_one(record);
            progress.tick();
            result
        })
        .collect();

    let mut hashed = Vec::with_capacity(results.len());
    let mut errors = Vec::new();
    for result in results {
        match result {
            Ok(file) => hashed.push(file),
            Err(err) => errors.push(err),
        }
    }
    (hashed, errors)
}

fn hash_one(record: FileRecord) -> Result<HashedFile, HashError> {
    match hasher::hash_file(&record.path) {
        Ok(hash) => {
            let metadata = metadata::extract(&record.path);
            Ok(HashedFile {
                record,
                hash,
                metadata,
            })
        }
        Err(e) => {
            warn!("Error hashing file '{}': {}", record.path.display(), e);
            Err(HashError {
                path: record.path,
                message: e.to_string(),
            })
        }
    }
}
