//! System abstraction for environment and filesystem operations
//!
//! This module provides a unified trait for the external system interactions
//! needed to locate and read configuration, allowing for easy testing with
//! mock implementations.

use std::io;
use std::path::{Path, PathBuf};

pub mod mock;
pub mod real;

pub use mock::MockSystem;
pub use real::RealSystem;

/// Unified trait for system operations (environment + filesystem)
///
/// # Implementations
/// - `RealSystem`: Production implementation using `dirs` and `std::fs`
/// - `MockSystem`: Test implementation using in-memory storage
pub trait System: Send + Sync {
    /// Get the current user's home directory, if one can be determined
    fn home_dir(&self) -> Option<PathBuf>;

    /// Read entire file contents as a string
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Check if a path points to an existing file
    fn is_file(&self, path: &Path) -> bool;
}
