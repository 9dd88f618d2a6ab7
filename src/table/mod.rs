//! Ordered mount table.
//!
//! Position in the table is significant: entry `i` is exposed as drive `'C' + i`.

pub mod fstab;

use std::path::{Path, PathBuf};

pub use fstab::{parse_mounts_table, render_mounts_table, FSTAB_TRAILING_FIELDS, UUID_PREFIX};

/// One row of the mount table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountEntry {
    /// Opaque identifier, stable while the same mount dir stays in the table.
    pub identifier: String,
    /// Bootstrapped mount dir (`<profile>/mnt/<backslashed host path>`).
    pub mount_dir: PathBuf,
}

impl MountEntry {
    /// Create a new entry.
    pub fn new(identifier: impl Into<String>, mount_dir: impl Into<PathBuf>) -> Self {
        Self {
            identifier: identifier.into(),
            mount_dir: mount_dir.into(),
        }
    }
}

/// Ordered sequence of mount entries, keyed by mount dir.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MountTable {
    entries: Vec<MountEntry>,
}

impl MountTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry at the end of the table.
    ///
    /// A mount dir that is already present keeps its position and takes the new identifier.
    pub fn insert(&mut self, entry: MountEntry) {
        match self
            .entries
            .iter_mut()
            .find(|existing| existing.mount_dir == entry.mount_dir)
        {
            Some(existing) => {
                tracing::warn!(
                    "duplicate mount dir {} in table, keeping first position",
                    entry.mount_dir.display()
                );
                existing.identifier = entry.identifier;
            }
            None => self.entries.push(entry),
        }
    }

    /// Identifier recorded for a mount dir, if any.
    pub fn identifier_for(&self, mount_dir: &Path) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.mount_dir == mount_dir)
            .map(|entry| entry.identifier.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MountEntry> {
        self.entries.iter()
    }

    /// Mount dirs in table order.
    pub fn mount_dirs(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().map(|entry| entry.mount_dir.as_path())
    }
}

impl<'a> IntoIterator for &'a MountTable {
    type Item = &'a MountEntry;
    type IntoIter = std::slice::Iter<'a, MountEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<MountEntry> for MountTable {
    fn from_iter<I: IntoIterator<Item = MountEntry>>(iter: I) -> Self {
        let mut table = MountTable::new();
        for entry in iter {
            table.insert(entry);
        }
        table
    }
}
