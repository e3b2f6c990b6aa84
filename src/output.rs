use crate::error::RenderError;
use std::path::{Path, PathBuf};

/// A directory that rendered invoices are written into. Created on first use; creating it
/// again when it already exists is fine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDir {
    path: PathBuf,
}

impl OutputDir {
    pub fn create<P: Into<PathBuf>>(path: P) -> Result<OutputDir, RenderError> {
        let path = path.into();
        std::fs::create_dir_all(&path)?;
        Ok(OutputDir { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write one artifact, replacing any earlier file of the same name, and return its path
    pub fn write(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, RenderError> {
        let path = self.path.join(filename);
        std::fs::write(&path, bytes)?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "wrote invoice");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn creating_twice_is_fine() {
        let dir = std::env::temp_dir().join("invoice-gen-output-twice");
        let first = OutputDir::create(&dir).unwrap();
        let second = OutputDir::create(&dir).unwrap();
        assert_eq!(first, second);
        assert!(dir.is_dir());
    }

    #[test]
    fn writes_land_in_the_directory() {
        let dir = OutputDir::create(std::env::temp_dir().join("invoice-gen-output-write")).unwrap();
        let path = dir.write("empty.pdf", b"%PDF-").unwrap();
        assert_eq!(path, dir.path().join("empty.pdf"));
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-".to_vec());
    }
}
