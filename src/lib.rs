pub mod config;
pub mod engine;
pub mod error;
pub mod hasher;
pub mod metadata;
pub mod model;
pub mod progress;
pub mod quality;
pub mod report;
pub mod resolver;
pub mod scanner;

pub use config::AppConfig;
pub use engine::{CatalogEngine, CatalogRun};
pub use error::Error;
pub use progress::{ProgressReporter, SilentReporter};
