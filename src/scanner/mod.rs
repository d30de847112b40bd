pub mod walk;

pub use walk::{ScanOutcome, Scanner};
