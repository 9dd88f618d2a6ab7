//! fstab-style serialization of the mount table.
//!
//! ```text
//! # header
//! UUID=<identifier> <mount dir> auto defaults,rw 0 0
//! ```
//!
//! Only the first two fields carry meaning; the rest are written verbatim.

use std::path::PathBuf;

use super::{MountEntry, MountTable};

/// Prefix of the identifier field.
pub const UUID_PREFIX: &str = "UUID=";

/// Fields written after the mount dir on every entry line.
pub const FSTAB_TRAILING_FIELDS: &str = "auto defaults,rw 0 0";

/// Parse a mount table file.
///
/// Blank lines and `#` comments are skipped. Lines without a `UUID=` field
/// followed by a path are skipped with a warning.
pub fn parse_mounts_table(content: &str) -> MountTable {
    let mut table = MountTable::new();

    for (number, line) in content.lines().enumerate() {
        let trimmed = line.trim_start();
        if trimmed.trim_end().is_empty() || trimmed.starts_with('#') {
            continue;
        }

        match parse_entry_line(line) {
            Some(entry) => {
                tracing::debug!(
                    "mount table line {}: {} -> {}",
                    number + 1,
                    entry.identifier,
                    entry.mount_dir.display()
                );
                table.insert(entry);
            }
            None => {
                tracing::warn!("skipping malformed mount table line {}: {:?}", number + 1, line);
            }
        }
    }

    table
}

fn parse_entry_line(line: &str) -> Option<MountEntry> {
    let mut fields = line.split_whitespace();
    let identifier = fields.next()?.strip_prefix(UUID_PREFIX)?;
    let mount_dir = fields.next()?;

    if identifier.is_empty() {
        return None;
    }

    Some(MountEntry::new(identifier, PathBuf::from(mount_dir)))
}

/// Serialize a mount table: header, one line per entry, trailing newline.
pub fn render_mounts_table(table: &MountTable, header: &str) -> String {
    let mut lines = Vec::with_capacity(table.len() + 2);
    lines.push(header.trim_end_matches('\n').to_string());

    for entry in table {
        lines.push(format!(
            "{}{} {} {}",
            UUID_PREFIX,
            entry.identifier,
            entry.mount_dir.display(),
            FSTAB_TRAILING_FIELDS
        ));
    }

    lines.push(String::new());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_parse_skips_comments_and_blank_lines() {
        let content = "# header\n\
                       \n\
                       UUID=aaa /p/mnt/home\\user\\Download auto defaults,rw 0 0\n\
                       \t  \n\
                       \x20  # indented comment\n\
                       UUID=bbb /p/mnt/data auto defaults,rw 0 0\n";

        let table = parse_mounts_table(content);
        let entries: Vec<&MountEntry> = table.iter().collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].identifier, "aaa");
        assert_eq!(
            entries[0].mount_dir,
            Path::new("/p/mnt/home\\user\\Download")
        );
        assert_eq!(entries[1].identifier, "bbb");
        assert_eq!(entries[1].mount_dir, Path::new("/p/mnt/data"));
    }

    #[test]
    fn test_parse_skips_malformed_lines() {
        let content = "UUID=aaa\n\
                       LABEL=x /p/mnt/x auto defaults,rw 0 0\n\
                       UUID= /p/mnt/empty auto defaults,rw 0 0\n\
                       UUID=ccc /p/mnt/c\n";

        let table = parse_mounts_table(content);
        assert_eq!(table.len(), 1);
        assert_eq!(table.identifier_for(Path::new("/p/mnt/c")), Some("ccc"));
    }

    #[test]
    fn test_render_format() {
        let table: MountTable = vec![
            MountEntry::new("id-1", "/p/mnt/a"),
            MountEntry::new("id-2", "/p/mnt/b"),
        ]
        .into_iter()
        .collect();

        let rendered = render_mounts_table(&table, "# header");
        assert_eq!(
            rendered,
            "# header\n\
             UUID=id-1 /p/mnt/a auto defaults,rw 0 0\n\
             UUID=id-2 /p/mnt/b auto defaults,rw 0 0\n"
        );
    }

    #[test]
    fn test_render_empty_table() {
        assert_eq!(render_mounts_table(&MountTable::new(), "# header\n"), "# header\n");
    }

    #[test]
    fn test_rendered_table_parses_back_in_order() {
        let table: MountTable = vec![
            MountEntry::new("z", "/p/mnt/z"),
            MountEntry::new("a", "/p/mnt/a"),
        ]
        .into_iter()
        .collect();

        let parsed = parse_mounts_table(&render_mounts_table(&table, "# one\n# two"));
        assert_eq!(parsed, table);
    }
}
