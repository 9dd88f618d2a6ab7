//! Drive Mounts - virtual drive letters for a sandboxed application.
//!
//! The sandbox sees drives `C:`, `D:`, ... each backed by a host directory:
//! - the ordered letter to directory table is persisted in an fstab-style file
//! - every mapped directory gets a private mount dir with a scratch directory
//!   and a link back to the host directory
//! - sandbox paths under the mounts root translate back to resolved host paths

pub mod cli;
pub mod config;
pub mod drive;
pub mod error;
pub mod manager;
pub mod table;
pub mod utils;

pub use config::MountsConfig;
pub use drive::{drive_index_to_letter, DriveLetter};
pub use error::{ConfigError, MountsError, Result};
pub use manager::{LiveMounts, MountInfo, MountsManager};
pub use table::{MountEntry, MountTable};

/// Re-export commonly used items.
pub mod prelude {
    pub use crate::config::MountsConfig;
    pub use crate::drive::{drive_index_to_letter, DriveLetter};
    pub use crate::error::{MountsError, Result};
    pub use crate::manager::MountsManager;
}
