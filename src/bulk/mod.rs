mod error;
mod printer;
mod runner;

pub use error::BulkError;
pub use printer::{print_failures, print_run_summary};
pub use runner::{default_concurrency, BulkOptions, BulkRunner, RunSummary};
