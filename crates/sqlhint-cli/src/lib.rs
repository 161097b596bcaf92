//! sqlhint CLI library.
//!
//! This module exposes internal types for testing purposes.
//! The main entry point is the `sqlhint` binary.

pub mod cli;
pub mod input;
pub mod logging;
#[cfg(feature = "metadata-provider")]
pub mod metadata;
pub mod output;
pub mod schema;

// Re-export commonly used types
pub use cli::Args;
