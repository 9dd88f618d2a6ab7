//! Path normalization and idempotent filesystem helpers.

use std::path::{Component, Path, PathBuf};

use crate::error::{MountsError, Result};

/// Expand ~ to the home directory.
pub fn expand_home(path: &str) -> String {
    if path.starts_with("~/") {
        if let Some(home) = dirs::home_dir() {
            return format!("{}{}", home.display(), &path[1..]);
        }
    } else if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home.display().to_string();
        }
    }
    path.to_string()
}

/// Join the segments of a `/`-separated path with `\`, dropping empty segments.
///
/// `/home/user/Download` becomes `home\user\Download`.
pub fn backslash_join(path: &str) -> String {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("\\")
}

/// Lexically normalize a path: drop `.` components and fold `..` into the parent.
/// Symlinks are not consulted.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other),
        }
    }
    normalized
}

/// Recover the sandbox-facing local path from a mount dir.
///
/// Takes the last segment of the normalized mount dir, keeps its leading `/`
/// and turns backslashes back into slashes: `/p/mnt/home\user\Download`
/// becomes `/home/user/Download`. A host path that itself contained `\`
/// does not survive this.
pub fn local_path_from_mount_dir(mount_dir: &Path) -> String {
    let normalized = normalize_lexically(mount_dir);
    let normalized = normalized.to_string_lossy();
    let leaf = match normalized.rfind('/') {
        Some(pos) => normalized[pos..].to_string(),
        None => format!("/{}", normalized),
    };
    leaf.replace('\\', "/")
}

/// Create a directory and all missing ancestors. Existing directories are fine.
pub fn ensure_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|e| MountsError::filesystem(path, e))
}

/// Create a symlink at `link` pointing to `target`.
///
/// Anything already present at `link` (link, file or directory) is left alone.
pub fn ensure_symlink(target: &Path, link: &Path) -> Result<()> {
    if link.symlink_metadata().is_ok() {
        tracing::debug!("{} already exists, leaving it", link.display());
        return Ok(());
    }

    match create_symlink(target, link) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(MountsError::filesystem(link, e)),
    }
}

#[cfg(unix)]
fn create_symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(not(unix))]
fn create_symlink(_target: &Path, _link: &Path) -> std::io::Result<()> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "symlinks are only supported on unix",
    ))
}

/// Symlink hops followed before giving up, as in the kernel's ELOOP limit.
const MAX_SYMLINK_HOPS: usize = 40;

/// Resolve a path like `realpath` without requiring it to exist.
///
/// Links are followed as far as they go; the longest existing prefix is
/// canonicalized and the missing remainder is joined lexically.
pub fn resolve_lenient(path: &Path) -> PathBuf {
    resolve_lenient_hops(&normalize_lexically(path), 0)
}

fn resolve_lenient_hops(path: &Path, hops: usize) -> PathBuf {
    if let Ok(resolved) = std::fs::canonicalize(path) {
        return resolved;
    }

    if hops < MAX_SYMLINK_HOPS && is_symlink(path) {
        if let Ok(target) = std::fs::read_link(path) {
            let base = path.parent().unwrap_or_else(|| Path::new("/"));
            return resolve_lenient_hops(&normalize_lexically(&base.join(target)), hops + 1);
        }
    }

    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => resolve_lenient_hops(parent, hops).join(name),
        _ => path.to_path_buf(),
    }
}

/// Check if a path is a symlink.
pub(crate) fn is_symlink(path: &Path) -> bool {
    path.symlink_metadata()
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false)
}
