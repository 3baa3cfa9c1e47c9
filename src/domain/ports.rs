use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// Whole-file persistence for the flat-file tools.
pub trait Storage: Send + Sync {
    /// `Ok(None)` when the file does not exist.
    fn read_to_string(&self, path: &Path) -> Result<Option<String>>;

    /// Replaces `path` so that readers see either the old or the new content.
    fn write_atomic(&self, path: &Path, data: &[u8]) -> Result<()>;

    /// Copies `path` to its `.bak` sibling, returning the backup path if the source existed.
    fn backup(&self, path: &Path) -> Result<Option<PathBuf>>;
}

/// One connection attempt against a loopback port.
pub trait Prober {
    fn is_busy(&self, port: u16) -> bool;
}
