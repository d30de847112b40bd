use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "sound-duper")]
#[command(about = "Catalog audio files and find what the master library already has", long_about = None)]
pub struct Cli {
    /// Master library root; the only source of the content hash index
    pub master: PathBuf,

    /// Optional library root to compare against the master
    pub library: Option<PathBuf>,

    /// Optional archive root to compare against the master
    pub archive: Option<PathBuf>,

    /// Directory for report files (overrides `output_dir` in Config.toml)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Don't show progress bars
    #[arg(short, long)]
    pub quiet: bool,
}
