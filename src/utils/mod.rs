//! Utility modules.

pub mod debug;
pub mod path;

pub use debug::{init_logging, DMOUNTS_DEBUG_ENV, DMOUNTS_LOG_ENV};
pub use path::{
    backslash_join, ensure_dir, ensure_symlink, expand_home, local_path_from_mount_dir,
    normalize_lexically, resolve_lenient,
};

pub(crate) use path::is_symlink;
