//! Filesystem seam used by the enable/disable policies.

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

/// The file operations a policy may perform on the commit template.
pub trait FileSystem {
    /// Create `path` and all of its parents; succeeds if it already exists.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
    fn write_file(&self, path: &Path, contents: &[u8]) -> io::Result<()>;
    /// Succeeds iff `path` can be stat'ed.
    fn stat(&self, path: &Path) -> io::Result<()>;
    fn remove_file(&self, path: &Path) -> io::Result<()>;
}

/// [`FileSystem`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        debug!(path = %path.display(), "create directory");
        fs::create_dir_all(path)
    }

    fn write_file(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        debug!(path = %path.display(), bytes = contents.len(), "write file");
        fs::write(path, contents)
    }

    fn stat(&self, path: &Path) -> io::Result<()> {
        fs::metadata(path).map(drop)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        debug!(path = %path.display(), "remove file");
        fs::remove_file(path)
    }
}
