//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the git operations
//! git-autotag needs, allowing for multiple implementations including real
//! git repositories and mock implementations for testing.
//!
//! The primary abstraction is the [Repository] trait. The concrete
//! implementations are:
//!
//! - [repository::Git2Repository]: a real implementation using the `git2`
//!   crate
//! - [mock::MockRepository]: an in-memory implementation for testing
//!
//! Most code should depend on the [Repository] trait rather than concrete
//! implementations to enable easy testing.

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// Capability surface consumed by the tagging core.
///
/// All methods return [crate::error::Result] so git-specific and application
/// errors are handled uniformly. Implementations map underlying errors (like
/// `git2::Error`) to the appropriate [crate::error::AutotagError] variants.
pub trait Repository: Send + Sync {
    /// Get all tag names in the repository
    fn list_tags(&self) -> Result<Vec<String>>;

    /// Create an annotated tag with the given message at the current HEAD.
    ///
    /// Fails if a tag with the same name already exists.
    fn create_tag(&self, name: &str, message: &str) -> Result<()>;

    /// Fetch tags from a remote
    fn fetch_tags(&self, remote: &str) -> Result<()>;

    /// Pull from a remote: fetch branches and tags, then fast-forward the
    /// current branch when possible
    fn pull(&self, remote: &str) -> Result<()>;

    /// Push a single tag to a remote
    fn push_tag(&self, remote: &str, name: &str) -> Result<()>;

    /// Read a value from the repository's git configuration.
    ///
    /// Returns `Ok(None)` when `section.key` is not set.
    fn config_value(&self, section: &str, key: &str) -> Result<Option<String>>;
}
