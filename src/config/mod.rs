//! Configuration module.

pub mod loader;
pub mod schema;

pub use loader::{
    default_settings_path, load_config, parse_config, resolve_config, PROFILE_DIR_ENV,
};
pub use schema::{
    MountsConfig, DEFAULT_DOWNLOAD_LINK_NAME, DEFAULT_MOUNTS_FILE_HEADER,
    DEFAULT_SANDBOX_MOUNTS_DIR, DEFAULT_SCRATCH_DIR_NAME,
};
