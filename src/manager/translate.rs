//! Sandbox path to host path translation.

use std::path::{Component, Path, PathBuf};

use crate::drive::DriveLetter;
use crate::error::{MountsError, Result};

/// Translate `<sandbox mounts dir>/<Letter>:/<link>/<rest>` into a resolved host path.
///
/// `local_paths` are the host paths in table order; drive `C:` is index 0.
/// The `<link>` segment is the download link every mount dir carries and is dropped.
pub fn convert_to_local_path(
    sandbox_mounts_dir: &Path,
    local_paths: &[String],
    sandbox_path: &str,
) -> Result<PathBuf> {
    let relative = Path::new(sandbox_path)
        .strip_prefix(sandbox_mounts_dir)
        .map_err(|_| {
            MountsError::invariant(format!(
                "'{}' is not under the sandbox mounts dir {}",
                sandbox_path,
                sandbox_mounts_dir.display()
            ))
        })?;

    let mut components = relative.components();
    let drive = match components.next() {
        Some(Component::Normal(marker)) => DriveLetter::from_marker(&marker.to_string_lossy())?,
        _ => {
            return Err(MountsError::invariant(format!(
                "'{}' has no drive marker",
                sandbox_path
            )))
        }
    };

    let local_path = local_paths.get(drive.index()).ok_or_else(|| {
        MountsError::invariant(format!(
            "drive {} requested but only {} mount(s) configured",
            drive,
            local_paths.len()
        ))
    })?;

    // Skip the download link segment.
    components.next();

    let mut joined = PathBuf::from(local_path);
    joined.extend(components);

    let resolved = std::fs::canonicalize(&joined).map_err(|source| MountsError::PathResolution {
        path: joined.clone(),
        source,
    })?;

    tracing::debug!("{} -> {}", sandbox_path, resolved.display());
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT: &str = "/tmp/sandbox/volumes";

    fn host_dirs(count: usize) -> (Vec<tempfile::TempDir>, Vec<String>) {
        let dirs: Vec<tempfile::TempDir> =
            (0..count).map(|_| tempfile::tempdir().unwrap()).collect();
        let paths = dirs
            .iter()
            .map(|d| d.path().to_str().unwrap().to_string())
            .collect();
        (dirs, paths)
    }

    #[test]
    fn test_letter_indexing() {
        let (dirs, paths) = host_dirs(3);
        for dir in &dirs {
            std::fs::create_dir_all(dir.path().join("a")).unwrap();
            std::fs::write(dir.path().join("a").join("b"), "").unwrap();
        }

        for (letter, dir) in ["C:", "D:", "E:"].iter().zip(&dirs) {
            let resolved =
                convert_to_local_path(Path::new(ROOT), &paths, &format!("{}/{}/X/a/b", ROOT, letter))
                    .unwrap();
            assert_eq!(
                resolved,
                std::fs::canonicalize(dir.path().join("a").join("b")).unwrap()
            );
        }
    }

    #[test]
    fn test_dot_segments_are_resolved() {
        let (dirs, paths) = host_dirs(1);
        std::fs::create_dir_all(dirs[0].path().join("a")).unwrap();

        let resolved =
            convert_to_local_path(Path::new(ROOT), &paths, &format!("{}/C:/X/a/./../a", ROOT))
                .unwrap();
        assert_eq!(resolved, std::fs::canonicalize(dirs[0].path().join("a")).unwrap());
    }

    #[test]
    fn test_drive_root_resolves_to_mount() {
        let (dirs, paths) = host_dirs(1);
        let resolved =
            convert_to_local_path(Path::new(ROOT), &paths, &format!("{}/C:/X", ROOT)).unwrap();
        assert_eq!(resolved, std::fs::canonicalize(dirs[0].path()).unwrap());
    }

    #[test]
    fn test_wrong_prefix_is_invariant_violation() {
        let (_dirs, paths) = host_dirs(1);
        let result = convert_to_local_path(Path::new(ROOT), &paths, "/elsewhere/C:/X/a");
        assert!(matches!(result, Err(MountsError::InvariantViolation(_))));

        let result =
            convert_to_local_path(Path::new(ROOT), &paths, "/tmp/sandbox/volumesX/C:/X/a");
        assert!(matches!(result, Err(MountsError::InvariantViolation(_))));
    }

    #[test]
    fn test_out_of_range_drive_is_invariant_violation() {
        let (_dirs, paths) = host_dirs(1);
        let result = convert_to_local_path(Path::new(ROOT), &paths, &format!("{}/D:/X/a", ROOT));
        assert!(matches!(result, Err(MountsError::InvariantViolation(_))));

        let result = convert_to_local_path(Path::new(ROOT), &paths, &format!("{}/c:/X/a", ROOT));
        assert!(matches!(result, Err(MountsError::InvariantViolation(_))));

        let result = convert_to_local_path(Path::new(ROOT), &paths, ROOT);
        assert!(matches!(result, Err(MountsError::InvariantViolation(_))));
    }

    #[test]
    fn test_missing_component_is_resolution_error() {
        let (_dirs, paths) = host_dirs(1);
        let result =
            convert_to_local_path(Path::new(ROOT), &paths, &format!("{}/C:/X/missing", ROOT));
        assert!(matches!(result, Err(MountsError::PathResolution { .. })));
    }
}
