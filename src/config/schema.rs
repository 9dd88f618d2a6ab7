//! Configuration schema for the drive mount table.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, MountsError};

/// Header written at the top of every mount table file.
pub const DEFAULT_MOUNTS_FILE_HEADER: &str =
    "# drive-mounts table, managed automatically. Do not edit.";

/// Default sandbox-visible mounts root.
pub const DEFAULT_SANDBOX_MOUNTS_DIR: &str = "/tmp/sandbox/volumes";

/// Default name of the scratch directory inside each mount dir.
pub const DEFAULT_SCRATCH_DIR_NAME: &str = "ScratchDB";

/// Default name of the symlink inside each mount dir that points at the host path.
pub const DEFAULT_DOWNLOAD_LINK_NAME: &str = "DOWNLOAD";

fn default_profile_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("drive-mounts")
        .join("profile")
}

fn default_sandbox_mounts_dir() -> PathBuf {
    PathBuf::from(DEFAULT_SANDBOX_MOUNTS_DIR)
}

fn default_mounts_file_header() -> String {
    DEFAULT_MOUNTS_FILE_HEADER.to_string()
}

fn default_scratch_dir_name() -> String {
    DEFAULT_SCRATCH_DIR_NAME.to_string()
}

fn default_download_link_name() -> String {
    DEFAULT_DOWNLOAD_LINK_NAME.to_string()
}

/// Main drive mount configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MountsConfig {
    /// Profile root of the sandboxed application. Mount dirs live under `<profileDir>/mnt`.
    #[serde(default = "default_profile_dir")]
    pub profile_dir: PathBuf,

    /// Mount table file (default: `<profileDir>/etc/mounts`).
    #[serde(default)]
    pub mounts_file: Option<PathBuf>,

    /// Comment line(s) written before the entries.
    #[serde(default = "default_mounts_file_header")]
    pub mounts_file_header: String,

    /// Root under which the sandbox exposes one directory per drive letter.
    #[serde(default = "default_sandbox_mounts_dir")]
    pub sandbox_mounts_dir: PathBuf,

    /// The same root seen from the host, without the sandbox chroot segment
    /// (default: `<profileDir>/dosdevices`).
    #[serde(default)]
    pub live_mounts_dir: Option<PathBuf>,

    /// Scratch directory created inside each mount dir.
    #[serde(default = "default_scratch_dir_name")]
    pub scratch_dir_name: String,

    /// Symlink inside each mount dir pointing at the host path.
    #[serde(default = "default_download_link_name")]
    pub download_link_name: String,
}

impl Default for MountsConfig {
    fn default() -> Self {
        Self {
            profile_dir: default_profile_dir(),
            mounts_file: None,
            mounts_file_header: default_mounts_file_header(),
            sandbox_mounts_dir: default_sandbox_mounts_dir(),
            live_mounts_dir: None,
            scratch_dir_name: default_scratch_dir_name(),
            download_link_name: default_download_link_name(),
        }
    }
}

impl MountsConfig {
    /// Create a configuration rooted at the given profile directory.
    pub fn with_profile_dir(profile_dir: impl Into<PathBuf>) -> Self {
        Self {
            profile_dir: profile_dir.into(),
            ..Self::default()
        }
    }

    /// Path of the mount table file.
    pub fn mounts_file(&self) -> PathBuf {
        self.mounts_file
            .clone()
            .unwrap_or_else(|| self.profile_dir.join("etc").join("mounts"))
    }

    /// Directory holding the per-mount private areas.
    pub fn mnt_dir(&self) -> PathBuf {
        self.profile_dir.join("mnt")
    }

    /// Host-side view of the live sandbox mounts root.
    pub fn live_mounts_dir(&self) -> PathBuf {
        self.live_mounts_dir
            .clone()
            .unwrap_or_else(|| self.profile_dir.join("dosdevices"))
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), MountsError> {
        require_absolute("profileDir", &self.profile_dir)?;
        require_absolute("mountsFile", &self.mounts_file())?;
        require_absolute("sandboxMountsDir", &self.sandbox_mounts_dir)?;
        require_absolute("liveMountsDir", &self.live_mounts_dir())?;

        validate_header(&self.mounts_file_header)?;

        validate_child_name("scratchDirName", &self.scratch_dir_name)?;
        validate_child_name("downloadLinkName", &self.download_link_name)?;
        if self.scratch_dir_name == self.download_link_name {
            return Err(ConfigError::ValidationError(format!(
                "scratchDirName and downloadLinkName must differ (both '{}')",
                self.scratch_dir_name
            ))
            .into());
        }

        Ok(())
    }
}

fn require_absolute(field: &str, path: &Path) -> Result<(), MountsError> {
    if path.is_absolute() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(format!(
            "{} must be an absolute path, got '{}'",
            field,
            path.display()
        ))
        .into())
    }
}

/// Every header line must be a comment, otherwise reloading the table would parse it as an entry.
fn validate_header(header: &str) -> Result<(), MountsError> {
    if header.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "mountsFileHeader cannot be empty".to_string(),
        )
        .into());
    }

    for line in header.lines() {
        if !line.trim_start().starts_with('#') {
            return Err(ConfigError::ValidationError(format!(
                "mountsFileHeader line '{}' must start with '#'",
                line
            ))
            .into());
        }
    }

    Ok(())
}

fn validate_child_name(field: &str, name: &str) -> Result<(), MountsError> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !name.contains('/') => Ok(()),
        _ => Err(ConfigError::ValidationError(format!(
            "{} must be a single path component, got '{}'",
            field, name
        ))
        .into()),
    }
}
