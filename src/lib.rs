#[cfg(feature = "cli")]
pub mod bulk;
#[cfg(feature = "cli")]
pub mod config;
pub mod errors;
#[cfg(feature = "cli")]
pub mod executor;
#[cfg(feature = "cli")]
pub mod logging;
#[cfg(feature = "cli")]
pub mod observer;
pub mod parser;
