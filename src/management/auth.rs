use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{Error, Result, types::Credential};

/// The single JSON file holding the OAuth token between invocations.
///
/// No locking and no atomic rename: concurrent invocations against the same
/// file are unsupported.
#[derive(Debug, Clone)]
pub struct CredentialCache {
    path: PathBuf,
}

impl CredentialCache {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored token. It is not checked for expiry.
    pub async fn load(&self) -> Result<Credential> {
        let content = match async_fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::MissingCredentials(self.path.clone()));
            }
            Err(e) => return Err(Error::Io(e)),
        };

        serde_json::from_str(&content).map_err(|source| Error::CorruptCredentials {
            path: self.path.clone(),
            source,
        })
    }

    /// Overwrites the file with `credential`.
    pub async fn save(&self, credential: &Credential) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(credential)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    /// Deletes the file. Returns `false` when there was nothing to delete.
    pub async fn clear(&self) -> Result<bool> {
        match async_fs::remove_file(&self.path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(Error::Io(e)),
        }
    }
}
