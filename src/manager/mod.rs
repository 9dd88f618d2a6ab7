//! Mount manager - owns the mount table and its on-disk scaffolding.

pub mod bootstrap;
pub mod live;
pub mod translate;

use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::Serialize;
use uuid::Uuid;

use crate::config::MountsConfig;
use crate::drive::DriveLetter;
use crate::error::{MountsError, Result};
use crate::table::{parse_mounts_table, render_mounts_table, MountEntry, MountTable};
use crate::utils::{ensure_dir, local_path_from_mount_dir};

pub use bootstrap::Bootstrapper;
pub use live::{get_mounts_mapping, LiveMounts};
pub use translate::convert_to_local_path;

/// A mount table entry as presented to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MountInfo {
    /// Drive name, e.g. `"C:"`.
    pub drive: String,
    pub identifier: String,
    /// Host path recovered from the mount dir.
    pub local_path: String,
    pub mount_dir: PathBuf,
}

/// The mount manager - main entry point for mount table operations.
///
/// The in-memory table is loaded once and only replaced as a whole by
/// [`MountsManager::set_mounts`] or [`MountsManager::reload`]. External edits to
/// the table file are not observed until `reload` is called.
pub struct MountsManager {
    config: MountsConfig,
    bootstrapper: Bootstrapper,
    table: RwLock<MountTable>,
}

impl MountsManager {
    /// Load the mount table described by the configuration.
    ///
    /// Fails with [`MountsError::ConfigMissing`] if the table file does not exist.
    pub fn load(config: MountsConfig) -> Result<Self> {
        config.validate()?;

        let table = read_table(&config.mounts_file())?;
        tracing::info!(
            "loaded {} mount(s) from {}",
            table.len(),
            config.mounts_file().display()
        );

        Ok(Self {
            bootstrapper: Bootstrapper::new(&config),
            table: RwLock::new(table),
            config,
        })
    }

    /// Write a header-only table file if none exists yet.
    ///
    /// Returns `true` if a file was created.
    pub fn initialize_mounts_file(config: &MountsConfig) -> Result<bool> {
        config.validate()?;

        let path = config.mounts_file();
        if path.exists() {
            return Ok(false);
        }

        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        write_table(&path, &render_mounts_table(&MountTable::new(), &config.mounts_file_header))?;
        tracing::info!("created empty mount table {}", path.display());
        Ok(true)
    }

    /// Get the configuration.
    pub fn config(&self) -> &MountsConfig {
        &self.config
    }

    /// Re-read the table file, replacing the in-memory table.
    pub fn reload(&self) -> Result<()> {
        let table = read_table(&self.config.mounts_file())?;
        *self.table.write() = table;
        Ok(())
    }

    /// Host paths in drive order, recovered from each entry's mount dir.
    pub fn mounts(&self) -> Vec<String> {
        self.table
            .read()
            .mount_dirs()
            .map(local_path_from_mount_dir)
            .collect()
    }

    /// Replace the mount table with the given host paths, in drive order.
    ///
    /// Each path is bootstrapped; entries whose mount dir was already in the
    /// table keep their identifier, the rest get a fresh one. The table file is
    /// rewritten before the in-memory table is swapped.
    pub fn set_mounts<S: AsRef<str>>(&self, paths: &[S]) -> Result<()> {
        if paths.len() > DriveLetter::COUNT {
            return Err(MountsError::TooManyMounts {
                count: paths.len(),
                max: DriveLetter::COUNT,
            });
        }
        for path in paths {
            validate_host_path(path.as_ref())?;
        }

        let mut new_table = MountTable::new();
        {
            let current = self.table.read();
            for path in paths {
                let mount_dir = self.bootstrapper.bootstrap(path.as_ref())?;
                let identifier = match current.identifier_for(&mount_dir) {
                    Some(existing) => existing.to_string(),
                    None => {
                        let minted = Uuid::now_v7().to_string();
                        tracing::debug!("new mount {} gets {}", mount_dir.display(), minted);
                        minted
                    }
                };
                new_table.insert(MountEntry::new(identifier, mount_dir));
            }
        }

        let content = render_mounts_table(&new_table, &self.config.mounts_file_header);
        write_table(&self.config.mounts_file(), &content)?;

        tracing::info!(
            "wrote {} mount(s) to {}",
            new_table.len(),
            self.config.mounts_file().display()
        );
        *self.table.write() = new_table;
        Ok(())
    }

    /// Ordered entries with their drive letters.
    pub fn entries(&self) -> Vec<MountInfo> {
        self.table
            .read()
            .iter()
            .zip(DriveLetter::all())
            .map(|(entry, drive)| MountInfo {
                drive: drive.to_string(),
                identifier: entry.identifier.clone(),
                local_path: local_path_from_mount_dir(&entry.mount_dir),
                mount_dir: entry.mount_dir.clone(),
            })
            .collect()
    }

    /// Translate a sandbox path into a resolved host path using the current table.
    pub fn convert_to_local_path(&self, sandbox_path: &str) -> Result<PathBuf> {
        convert_to_local_path(&self.config.sandbox_mounts_dir, &self.mounts(), sandbox_path)
    }
}

fn read_table(path: &Path) -> Result<MountTable> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(parse_mounts_table(&content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(MountsError::ConfigMissing(path.to_path_buf()))
        }
        Err(e) => Err(MountsError::filesystem(path, e)),
    }
}

/// Write through a sibling temp file so a crash leaves either the old or the new table.
fn write_table(path: &Path, content: &str) -> Result<()> {
    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    std::fs::write(&tmp_path, content).map_err(|e| MountsError::filesystem(&tmp_path, e))?;
    std::fs::rename(&tmp_path, path).map_err(|e| MountsError::filesystem(path, e))
}

/// The table is whitespace-delimited, so host paths cannot contain whitespace.
fn validate_host_path(path: &str) -> Result<()> {
    let reason = if path.split('/').all(str::is_empty) {
        Some("path has no segments")
    } else if path.chars().any(char::is_whitespace) {
        Some("path contains whitespace")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(MountsError::InvalidHostPath {
            path: path.to_string(),
            reason: reason.to_string(),
        }),
        None => {
            if path.contains('\\') {
                tracing::warn!("host path {} contains '\\' and will not round-trip", path);
            }
            Ok(())
        }
    }
}
