//! Per-mount private area preparation.
//!
//! Every host path in the table gets a mount dir under `<profile>/mnt`:
//!
//! ```text
//! <profile>/mnt/home\user\Download/
//!     ScratchDB/                    scratch directory
//!     DOWNLOAD -> /home/user/Download
//! ```

use std::path::{Path, PathBuf};

use crate::config::MountsConfig;
use crate::error::Result;
use crate::utils::{backslash_join, ensure_dir, ensure_symlink};

/// Prepares the on-disk scaffolding backing a mount entry.
#[derive(Debug, Clone)]
pub struct Bootstrapper {
    mnt_dir: PathBuf,
    scratch_dir_name: String,
    download_link_name: String,
}

impl Bootstrapper {
    /// Create a bootstrapper from the mount configuration.
    pub fn new(config: &MountsConfig) -> Self {
        Self {
            mnt_dir: config.mnt_dir(),
            scratch_dir_name: config.scratch_dir_name.clone(),
            download_link_name: config.download_link_name.clone(),
        }
    }

    /// Canonical mount dir for a host path, without touching the filesystem.
    pub fn mount_dir_for(&self, host_path: &str) -> PathBuf {
        self.mnt_dir.join(backslash_join(host_path))
    }

    /// Prepare the mount dir for a host path and return it.
    ///
    /// Creates the scratch directory and the download link if they are missing.
    /// Safe to call repeatedly.
    pub fn bootstrap(&self, host_path: &str) -> Result<PathBuf> {
        let mount_dir = self.mount_dir_for(host_path);

        ensure_dir(&mount_dir.join(&self.scratch_dir_name))?;
        ensure_symlink(Path::new(host_path), &mount_dir.join(&self.download_link_name))?;

        tracing::debug!("bootstrapped {} -> {}", host_path, mount_dir.display());
        Ok(mount_dir)
    }
}
