//! Settings discovery: an explicit file, `~/.dmounts-settings.json`, or built-in defaults,
//! followed by environment overrides.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::config::schema::MountsConfig;
use crate::error::{ConfigError, MountsError};

/// Settings file looked up in the home directory.
const DEFAULT_SETTINGS_FILE: &str = ".dmounts-settings.json";

/// Overrides `profileDir` from whichever settings were loaded.
pub const PROFILE_DIR_ENV: &str = "DMOUNTS_PROFILE_DIR";

pub fn default_settings_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(DEFAULT_SETTINGS_FILE))
}

/// Read and validate a settings file.
pub fn load_config(path: &Path) -> Result<MountsConfig, MountsError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::FileNotFound(path.display().to_string()).into())
        }
        Err(e) => {
            return Err(ConfigError::ParseError(format!(
                "cannot read {}: {}",
                path.display(),
                e
            ))
            .into())
        }
    };

    parse_config(&content)
}

/// Parse and validate settings JSON.
pub fn parse_config(json: &str) -> Result<MountsConfig, MountsError> {
    let config: MountsConfig = serde_json::from_str(json)
        .map_err(|e| ConfigError::ParseError(format!("invalid settings JSON: {}", e)))?;

    config.validate()?;
    Ok(config)
}

/// Resolve the effective configuration.
///
/// An explicit settings file must exist. Without one, the home-directory file is
/// used when present and defaults otherwise. `DMOUNTS_PROFILE_DIR` is applied last.
pub fn resolve_config(explicit: Option<&Path>) -> Result<MountsConfig, MountsError> {
    let config = match explicit {
        Some(path) => load_config(path)?,
        None => match default_settings_path() {
            Some(path) if path.is_file() => load_config(&path)?,
            _ => MountsConfig::default(),
        },
    };

    let config = apply_profile_override(config, std::env::var_os(PROFILE_DIR_ENV));
    config.validate()?;
    Ok(config)
}

/// Replace the profile dir, keeping explicitly configured table and live paths.
fn apply_profile_override(mut config: MountsConfig, profile_dir: Option<OsString>) -> MountsConfig {
    if let Some(profile_dir) = profile_dir.filter(|dir| !dir.is_empty()) {
        tracing::debug!("profile dir overridden by {}", PROFILE_DIR_ENV);
        config.profile_dir = PathBuf::from(profile_dir);
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{DEFAULT_DOWNLOAD_LINK_NAME, DEFAULT_SCRATCH_DIR_NAME};

    #[test]
    fn test_parse_minimal_config() {
        let config = parse_config(r#"{"profileDir": "/srv/profile"}"#).unwrap();
        assert_eq!(config.profile_dir, PathBuf::from("/srv/profile"));
        assert_eq!(config.mounts_file(), PathBuf::from("/srv/profile/etc/mounts"));
        assert_eq!(config.scratch_dir_name, DEFAULT_SCRATCH_DIR_NAME);
        assert_eq!(config.download_link_name, DEFAULT_DOWNLOAD_LINK_NAME);
    }

    #[test]
    fn test_parse_full_config() {
        let json = r##"{
            "profileDir": "/srv/profile",
            "mountsFile": "/srv/etc/fstab",
            "mountsFileHeader": "# managed",
            "sandboxMountsDir": "/tmp/app/volumes",
            "liveMountsDir": "/srv/app/volumes",
            "scratchDirName": "AppDB",
            "downloadLinkName": "APPDOWNLOAD"
        }"##;

        let config = parse_config(json).unwrap();
        assert_eq!(config.mounts_file(), PathBuf::from("/srv/etc/fstab"));
        assert_eq!(config.mounts_file_header, "# managed");
        assert_eq!(config.sandbox_mounts_dir, PathBuf::from("/tmp/app/volumes"));
        assert_eq!(config.live_mounts_dir(), PathBuf::from("/srv/app/volumes"));
        assert_eq!(config.scratch_dir_name, "AppDB");
        assert_eq!(config.download_link_name, "APPDOWNLOAD");
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(parse_config("not json").is_err());
        assert!(parse_config(r#"{"profileDir": }"#).is_err());
    }

    #[test]
    fn test_parse_rejects_non_comment_header() {
        let json = r#"{"profileDir": "/srv/profile", "mountsFileHeader": "header"}"#;
        assert!(matches!(
            parse_config(json),
            Err(MountsError::Config(ConfigError::ValidationError(_)))
        ));
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = resolve_config(Some(&dir.path().join("absent.json")));
        assert!(matches!(
            result,
            Err(MountsError::Config(ConfigError::FileNotFound(_)))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"profileDir": "/srv/profile"}"#).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.profile_dir, PathBuf::from("/srv/profile"));
    }

    #[test]
    fn test_profile_override() {
        let config = parse_config(r#"{"profileDir": "/srv/profile"}"#).unwrap();

        let unchanged = apply_profile_override(config.clone(), None);
        assert_eq!(unchanged.profile_dir, PathBuf::from("/srv/profile"));

        let unchanged = apply_profile_override(config.clone(), Some(OsString::new()));
        assert_eq!(unchanged.profile_dir, PathBuf::from("/srv/profile"));

        let overridden = apply_profile_override(config, Some(OsString::from("/var/profile")));
        assert_eq!(overridden.mounts_file(), PathBuf::from("/var/profile/etc/mounts"));
    }
}
