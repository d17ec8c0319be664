//! Persistence of the last-seen revision

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[cfg(test)]
use mockall::automock;
use tracing::{debug, info};

use crate::check::error::StoreError;
use crate::check::revision::RevisionId;

/// Trait for storing and retrieving the last-seen revision
#[cfg_attr(test, automock)]
pub trait VersionStore: Send + Sync {
    /// Reads the stored revision
    ///
    /// # Returns
    /// * `Ok(Some(revision))` - The store exists and was read
    /// * `Ok(None)` - The store does not exist yet
    /// * `Err(StoreError::Unreadable)` - The store exists but cannot be read
    fn load(&self) -> Result<Option<String>, StoreError>;

    /// Overwrites an existing store with `revision`
    fn save(&self, revision: &RevisionId) -> Result<(), StoreError>;

    /// Creates the store holding `revision` and applies its file mode
    fn create(&self, revision: &RevisionId) -> Result<(), StoreError>;
}

/// Store kept in a single text file holding exactly the revision string
pub struct FileVersionStore {
    path: PathBuf,
    mode: u32,
}

impl FileVersionStore {
    pub fn new(path: impl Into<PathBuf>, mode: u32) -> Self {
        Self {
            path: path.into(),
            mode,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, revision: &RevisionId) -> Result<(), StoreError> {
        std::fs::write(&self.path, revision.as_str()).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }

    #[cfg(unix)]
    fn apply_mode(&self) -> Result<(), StoreError> {
        use std::os::unix::fs::PermissionsExt;

        std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(self.mode)).map_err(
            |source| StoreError::Permissions {
                path: self.path.clone(),
                source,
            },
        )
    }

    #[cfg(not(unix))]
    fn apply_mode(&self) -> Result<(), StoreError> {
        debug!("File mode {:o} not applied on this platform", self.mode);
        Ok(())
    }
}

impl VersionStore for FileVersionStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        // Non-UTF-8 contents still count as readable
        match std::fs::read(&self.path) {
            Ok(bytes) => {
                debug!("Read save file {:?}", self.path);
                Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Save file {:?} does not exist", self.path);
                Ok(None)
            }
            Err(source) => Err(StoreError::Unreadable {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn save(&self, revision: &RevisionId) -> Result<(), StoreError> {
        self.write(revision)?;
        info!("Updated save file {:?} to {}", self.path, revision);
        Ok(())
    }

    fn create(&self, revision: &RevisionId) -> Result<(), StoreError> {
        self.write(revision)?;
        info!("Created save file {:?} with {}", self.path, revision);
        self.apply_mode()
    }
}
