//! CLI parsing.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

/// Drive Mounts - manage the virtual drive letters of a sandboxed application
#[derive(Parser, Debug)]
#[command(name = "dmounts")]
#[command(about = "Manage the drive letter mount table of a sandboxed application")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true)]
    pub debug: bool,

    /// Path to settings file (default: ~/.dmounts-settings.json)
    #[arg(short = 's', long = "settings", global = true)]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Create an empty mount table if none exists
    Init,

    /// Show the configured drives
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Replace the configured drives; the first path becomes C:
    Set {
        /// Host directories in drive order
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Translate a sandbox path into a host path
    Resolve {
        /// Path under the sandbox mounts dir, e.g. /tmp/sandbox/volumes/C:/DOWNLOAD/file
        sandbox_path: String,
    },

    /// Show the drives the sandbox has actually mounted
    Live {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print the drive name for a table position (0 -> C:)
    Letter { index: usize },
}

impl Cli {
    /// Parse CLI arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Get the settings file path, if one was given explicitly.
    pub fn explicit_settings_path(&self) -> Option<&Path> {
        self.settings.as_deref()
    }

    /// Get the settings file path.
    pub fn get_settings_path(&self) -> Option<PathBuf> {
        self.settings.clone().or_else(crate::config::default_settings_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_set() {
        let cli = Cli::try_parse_from(["dmounts", "set", "/a", "/b"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Set {
                paths: vec!["/a".to_string(), "/b".to_string()]
            }
        );
        assert!(!cli.debug);
    }

    #[test]
    fn test_set_requires_paths() {
        assert!(Cli::try_parse_from(["dmounts", "set"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["dmounts", "list", "--json", "-d", "-s", "/etc/dm.json"]).unwrap();
        assert_eq!(cli.command, Command::List { json: true });
        assert!(cli.debug);
        assert_eq!(cli.explicit_settings_path(), Some(Path::new("/etc/dm.json")));
    }

    #[test]
    fn test_parse_letter() {
        let cli = Cli::try_parse_from(["dmounts", "letter", "3"]).unwrap();
        assert_eq!(cli.command, Command::Letter { index: 3 });
        assert!(Cli::try_parse_from(["dmounts", "letter", "-1"]).is_err());
    }
}
