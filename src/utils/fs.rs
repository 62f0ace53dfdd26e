//! File system utility functions
//!
//! Output is always written through a temporary file in the destination
//! directory, so a failed run never leaves a half-written document behind.

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, instrument};

/// Utility struct for file system operations
#[derive(Debug, Default, Clone, Copy)]
pub struct FileSystemUtils;

impl FileSystemUtils {
    /// Create a new file system utilities instance
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Read raw file contents, leaving any decoding to the caller
    #[instrument(skip(self))]
    pub fn read_file<P: AsRef<Path> + std::fmt::Debug>(&self, path: P) -> io::Result<Vec<u8>> {
        let path = path.as_ref();
        debug!("Reading file: {}", path.display());
        fs::read(path)
    }

    /// Remove a file if it exists
    #[instrument(skip(self))]
    pub fn remove_file_if_exists<P: AsRef<Path> + std::fmt::Debug>(
        &self,
        path: P,
    ) -> io::Result<bool> {
        let path = path.as_ref();

        match fs::remove_file(path) {
            Ok(()) => {
                debug!("Removed file: {}", path.display());
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("File does not exist: {}", path.display());
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Write `contents` to `path`, replacing any existing file in one step
    ///
    /// Parent directories are created when missing. The data lands in a
    /// temporary sibling first and is renamed over `path` once fully flushed.
    #[instrument(skip(self, contents))]
    pub fn write_file_atomic<P: AsRef<Path> + std::fmt::Debug, C: AsRef<[u8]>>(
        &self,
        path: P,
        contents: C,
    ) -> io::Result<u64> {
        let path = path.as_ref();
        let contents = contents.as_ref();

        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        if !parent.exists() {
            debug!("Creating directory: {}", parent.display());
            fs::create_dir_all(parent)?;
        }

        let mut temp = NamedTempFile::new_in(parent)?;
        temp.write_all(contents)?;
        temp.as_file().sync_all()?;
        temp.persist(path).map_err(|e| e.error)?;

        debug!("Wrote {} bytes to {}", contents.len(), path.display());
        Ok(contents.len() as u64)
    }

    /// Check if a path exists and is a file
    pub fn is_file<P: AsRef<Path>>(&self, path: P) -> bool {
        path.as_ref().is_file()
    }

    /// Check if a path exists and is a directory
    pub fn is_dir<P: AsRef<Path>>(&self, path: P) -> bool {
        path.as_ref().is_dir()
    }

    /// Check if anything exists at a path
    pub fn exists<P: AsRef<Path>>(&self, path: P) -> bool {
        path.as_ref().exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_remove_file_if_exists() {
        let temp_dir = TempDir::new().unwrap();
        let fs_utils = FileSystemUtils::new();

        let file_path = temp_dir.path().join("transformed.html");

        // File doesn't exist
        let removed = fs_utils.remove_file_if_exists(&file_path).unwrap();
        assert!(!removed);

        // Create file and remove it
        fs::write(&file_path, "<html/>").unwrap();
        let removed = fs_utils.remove_file_if_exists(&file_path).unwrap();
        assert!(removed);
        assert!(!file_path.exists());
    }

    #[test]
    fn test_write_file_atomic_creates_parents() {
        let temp_dir = TempDir::new().unwrap();
        let fs_utils = FileSystemUtils::new();

        let file_path = temp_dir.path().join("reports").join("2024").join("out.html");

        let written = fs_utils.write_file_atomic(&file_path, "<p>ok</p>").unwrap();

        assert_eq!(written, 9);
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "<p>ok</p>");
    }

    #[test]
    fn test_write_file_atomic_replaces_existing_content() {
        let temp_dir = TempDir::new().unwrap();
        let fs_utils = FileSystemUtils::new();

        let file_path = temp_dir.path().join("out.html");
        fs::write(&file_path, "a much longer previous document").unwrap();

        fs_utils.write_file_atomic(&file_path, "short").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "short");
        // No temporary leftovers next to the output
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_read_file_keeps_bytes_as_is() {
        let temp_dir = TempDir::new().unwrap();
        let fs_utils = FileSystemUtils::new();

        // UTF-16LE byte order mark followed by "<a/>"
        let contents = [0xFF, 0xFE, b'<', 0, b'a', 0, b'/', 0, b'>', 0];
        let file_path = temp_dir.path().join("data.xml");
        fs::write(&file_path, contents).unwrap();

        assert_eq!(fs_utils.read_file(&file_path).unwrap(), contents);
        assert!(fs_utils.read_file(temp_dir.path().join("missing.xml")).is_err());
    }

    #[test]
    fn test_is_file_and_is_dir() {
        let temp_dir = TempDir::new().unwrap();
        let fs_utils = FileSystemUtils::new();

        let file_path = temp_dir.path().join("test.xml");
        let dir_path = temp_dir.path().join("testdir");

        fs::write(&file_path, "content").unwrap();
        fs::create_dir(&dir_path).unwrap();

        assert!(fs_utils.is_file(&file_path));
        assert!(!fs_utils.is_dir(&file_path));

        assert!(fs_utils.is_dir(&dir_path));
        assert!(!fs_utils.is_file(&dir_path));
        assert!(fs_utils.exists(&dir_path));

        assert!(!fs_utils.is_file("nonexistent"));
        assert!(!fs_utils.exists("nonexistent"));
    }
}
