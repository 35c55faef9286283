use std::path::{Path, PathBuf};

use crate::{Manifest, Result};

/// A valobj.toml file with both raw content and parsed manifest.
pub struct ValobjToml {
    path: PathBuf,
    manifest: Manifest,
}

impl ValobjToml {
    /// Open and parse a valobj.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let manifest = Manifest::from_file(&path)?;
        Ok(Self { path, manifest })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the raw content.
    pub fn content(&self) -> &str {
        self.manifest.source().src()
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("valobj.toml");
        std::fs::write(&path, "[[value-object]]\nname = \"Age\"\n").unwrap();

        let file = ValobjToml::open(&path).unwrap();
        assert_eq!(file.path(), path);
        assert!(file.content().contains("Age"));
        assert_eq!(file.manifest().value_objects().len(), 1);
        assert_eq!(
            file.manifest().value_objects()[0]
                .declaration
                .location
                .file
                .as_deref(),
            Some(path.display().to_string().as_str())
        );
    }

    #[test]
    fn test_open_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = ValobjToml::open(dir.path().join("valobj.toml")).err().unwrap();
        assert!(matches!(*err, Error::Io { .. }));
    }
}
