use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::ffi::OsString;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.base_path.join(path)
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new(".")
    }
}

pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".bak");
    PathBuf::from(name)
}

impl Storage for LocalStorage {
    fn read_to_string(&self, path: &Path) -> Result<Option<String>> {
        match fs::read_to_string(self.resolve(path)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write_atomic(&self, path: &Path, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);
        let dir = match full_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let prefix = full_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "toolshed".to_string());

        // temp file must live on the same filesystem for the rename to be atomic
        let mut tmp = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(".tmp")
            .tempfile_in(&dir)?;
        tmp.write_all(data)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&full_path).map_err(|e| e.error)?;

        tracing::debug!("Wrote {} bytes to {}", data.len(), full_path.display());
        Ok(())
    }

    fn backup(&self, path: &Path) -> Result<Option<PathBuf>> {
        let full_path = self.resolve(path);
        if !full_path.exists() {
            return Ok(None);
        }
        let bak = backup_path(&full_path);
        fs::copy(&full_path, &bak)?;
        tracing::debug!("Backed up {} to {}", full_path.display(), bak.display());
        Ok(Some(bak))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());
        assert!(storage.read_to_string(Path::new("nope.txt")).unwrap().is_none());
    }

    #[test]
    fn test_write_atomic_replaces_content() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());
        let path = Path::new("todos.txt");

        storage.write_atomic(path, b"first\n").unwrap();
        storage.write_atomic(path, b"second\n").unwrap();

        assert_eq!(storage.read_to_string(path).unwrap().unwrap(), "second\n");
        // no stray temp files left behind
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_write_atomic_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());
        storage.write_atomic(Path::new("nested/data.json"), b"{}").unwrap();
        assert!(dir.path().join("nested/data.json").exists());
    }

    #[test]
    fn test_backup() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());
        let path = Path::new("data.json");

        assert!(storage.backup(path).unwrap().is_none());

        storage.write_atomic(path, b"v1").unwrap();
        let bak = storage.backup(path).unwrap().unwrap();
        assert_eq!(bak, dir.path().join("data.json.bak"));
        assert_eq!(fs::read_to_string(bak).unwrap(), "v1");
    }
}
