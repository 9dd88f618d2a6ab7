//! Discovery of the drives the sandbox has actually materialized.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{MountsError, Result};
use crate::utils::resolve_lenient;

/// Reverse mapping from resolved host path to drive name (`"C:"`, `"D:"`, ...).
pub type LiveMounts = BTreeMap<PathBuf, String>;

/// List the children of the live mounts root and resolve each one.
///
/// A missing root yields an empty mapping: the sandbox may simply not be running.
/// Drives whose host directory has gone away still map to the path their link names.
pub fn get_mounts_mapping(live_mounts_dir: &Path) -> Result<LiveMounts> {
    let mut mapping = LiveMounts::new();

    let entries = match std::fs::read_dir(live_mounts_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(
                "live mounts dir {} does not exist",
                live_mounts_dir.display()
            );
            return Ok(mapping);
        }
        Err(e) => return Err(MountsError::filesystem(live_mounts_dir, e)),
    };

    for entry in entries {
        let entry = entry.map_err(|e| MountsError::filesystem(live_mounts_dir, e))?;
        let drive = entry.file_name().to_string_lossy().into_owned();

        let real_path = resolve_lenient(&entry.path());
        if real_path.exists() {
            tracing::debug!("live drive {} -> {}", drive, real_path.display());
        } else {
            tracing::warn!("live drive {} points at missing {}", drive, real_path.display());
        }
        mapping.insert(real_path, drive);
    }

    Ok(mapping)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::symlink;

    #[test]
    fn test_missing_root_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mapping = get_mounts_mapping(&dir.path().join("not-started")).unwrap();
        assert!(mapping.is_empty());
    }

    #[test]
    fn test_resolves_drive_links() {
        let root = tempfile::tempdir().unwrap();
        let host = tempfile::tempdir().unwrap();
        let c_target = host.path().join("c");
        let d_target = host.path().join("d");
        std::fs::create_dir(&c_target).unwrap();
        std::fs::create_dir(&d_target).unwrap();

        symlink(&c_target, root.path().join("C:")).unwrap();
        symlink(&d_target, root.path().join("D:")).unwrap();

        let mapping = get_mounts_mapping(root.path()).unwrap();
        assert_eq!(mapping.len(), 2);
        assert_eq!(
            mapping.get(&std::fs::canonicalize(&c_target).unwrap()),
            Some(&"C:".to_string())
        );
        assert_eq!(
            mapping.get(&std::fs::canonicalize(&d_target).unwrap()),
            Some(&"D:".to_string())
        );
    }

    #[test]
    fn test_drive_with_deleted_host_dir_is_recorded() {
        let root = tempfile::tempdir().unwrap();
        let host = tempfile::tempdir().unwrap();
        symlink(host.path(), root.path().join("C:")).unwrap();
        symlink("/deleted/host/dir", root.path().join("D:")).unwrap();

        let mapping = get_mounts_mapping(root.path()).unwrap();
        assert_eq!(mapping.len(), 2);
        assert_eq!(
            mapping.get(&std::fs::canonicalize(host.path()).unwrap()),
            Some(&"C:".to_string())
        );
        assert_eq!(
            mapping.get(Path::new("/deleted/host/dir")),
            Some(&"D:".to_string())
        );
    }
}
