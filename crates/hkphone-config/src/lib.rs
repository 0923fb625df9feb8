use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use hkphone_core::{ErrorCode, ErrorMessages, PhoneField};
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "hkphone";
const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub field: FieldConfig,
    pub messages: ErrorMessages,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldConfig {
    pub required: bool,
    pub empty_value: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            field: FieldConfig {
                required: true,
                empty_value: String::new(),
            },
            messages: ErrorMessages::default(),
        }
    }
}

impl AppConfig {
    pub fn phone_field(&self) -> PhoneField {
        PhoneField::new()
            .required(self.field.required)
            .empty_value(self.field.empty_value.clone())
            .messages(self.messages.clone())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file permissions too permissive: {0}")]
    InsecurePermissions(PathBuf),
    #[error("invalid messages.{0} value: message cannot be blank")]
    InvalidMessage(ErrorCode),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    field: Option<FieldFile>,
    messages: Option<MessagesFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldFile {
    required: Option<bool>,
    empty_value: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct MessagesFile {
    required: Option<String>,
    invalid: Option<String>,
    disguise: Option<String>,
    prefix: Option<String>,
}

/// Loads the configuration.
///
/// An explicit `config_path` must point at an existing file. Without one the
/// default location is tried and a missing file yields [`AppConfig::default`].
pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let explicit = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir | ConfigError::InvalidConfigPath(_)) if !explicit => {
            return Ok(AppConfig::default());
        }
        Err(err) => return Err(err),
    };
    Ok(load_at_path(&path, explicit)?.unwrap_or_default())
}

/// `custom` when given, else `$XDG_CONFIG_HOME/hkphone/config.toml`, else
/// `~/.config/hkphone/config.toml`.
pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = custom {
        return non_empty(path);
    }
    Ok(config_base_dir()?.join(APP_DIR).join(CONFIG_FILENAME))
}

fn config_base_dir() -> Result<PathBuf> {
    match env::var_os("XDG_CONFIG_HOME") {
        Some(dir) => non_empty(PathBuf::from(dir)),
        None => dirs::home_dir()
            .map(|home| home.join(".config"))
            .ok_or(ConfigError::MissingHomeDir),
    }
}

fn non_empty(path: PathBuf) -> Result<PathBuf> {
    if path.as_os_str().is_empty() {
        Err(ConfigError::InvalidConfigPath(path))
    } else {
        Ok(path)
    }
}

fn load_at_path(path: &Path, must_exist: bool) -> Result<Option<AppConfig>> {
    match (path.exists(), must_exist) {
        (false, true) => return Err(ConfigError::MissingConfigFile(path.to_path_buf())),
        (false, false) => return Ok(None),
        (true, _) => {}
    }

    ensure_permissions(path)?;
    let read_err = |source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    };
    let contents = fs::read_to_string(path).map_err(read_err)?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    merge_config(parsed).map(Some)
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(field) = parsed.field {
        if let Some(required) = field.required {
            config.field.required = required;
        }
        if let Some(empty_value) = field.empty_value {
            config.field.empty_value = empty_value;
        }
    }

    if let Some(messages) = parsed.messages {
        let overrides = [
            (ErrorCode::Required, messages.required),
            (ErrorCode::Invalid, messages.invalid),
            (ErrorCode::Disguise, messages.disguise),
            (ErrorCode::Prefix, messages.prefix),
        ];
        for (code, message) in overrides {
            let Some(message) = message else {
                continue;
            };
            let trimmed = message.trim();
            if trimmed.is_empty() {
                return Err(ConfigError::InvalidMessage(code));
            }
            config.messages.set(code, trimmed);
        }
    }

    Ok(config)
}

/// Rejects config files readable or writable by group or others.
#[cfg(unix)]
fn ensure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mode = fs::metadata(path)
        .map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?
        .permissions()
        .mode();
    if mode & 0o077 == 0 {
        Ok(())
    } else {
        Err(ConfigError::InsecurePermissions(path.to_path_buf()))
    }
}

#[cfg(not(unix))]
fn ensure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{
        load, load_at_path, merge_config, resolve_config_path, AppConfig, ConfigError,
        ConfigFile, FieldFile, MessagesFile,
    };
    use hkphone_core::{ErrorCode, PhoneError};
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn restrict_permissions(path: &Path) {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(path).expect("metadata").permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms).expect("chmod");
        }
    }

    #[test]
    fn defaults_require_value_and_use_builtin_messages() {
        let config = AppConfig::default();
        assert!(config.field.required);
        assert_eq!(config.field.empty_value, "");
        assert_eq!(
            config.messages.invalid,
            PhoneError::InvalidFormat.to_string()
        );
    }

    #[test]
    fn merge_config_applies_values() {
        let parsed = ConfigFile {
            field: Some(FieldFile {
                required: Some(false),
                empty_value: Some("-".to_string()),
            }),
            messages: Some(MessagesFile {
                prefix: Some("  Bad prefix.  ".to_string()),
                ..MessagesFile::default()
            }),
        };
        let merged = merge_config(parsed).expect("merge");
        assert!(!merged.field.required);
        assert_eq!(merged.field.empty_value, "-");
        assert_eq!(merged.messages.prefix, "Bad prefix.");
        assert_eq!(
            merged.messages.disguise,
            PhoneError::DisguisedEmergencyNumber.to_string()
        );
    }

    #[test]
    fn merge_config_rejects_blank_messages() {
        let parsed = ConfigFile {
            field: None,
            messages: Some(MessagesFile {
                invalid: Some("   ".to_string()),
                ..MessagesFile::default()
            }),
        };
        let err = merge_config(parsed).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidMessage(ErrorCode::Invalid)));
        assert!(err.to_string().contains("messages.invalid"));
    }

    #[test]
    fn phone_field_reflects_config() {
        let parsed = ConfigFile {
            field: Some(FieldFile {
                required: Some(false),
                empty_value: Some("none".to_string()),
            }),
            messages: None,
        };
        let field = merge_config(parsed).expect("merge").phone_field();
        assert!(!field.is_required());
        assert_eq!(field.clean(None).unwrap(), "none");
        assert_eq!(field.clean(Some("852 6123 4567")).unwrap(), "6123-4567");
    }

    #[test]
    fn resolve_config_path_rejects_empty_custom_path() {
        let err = resolve_config_path(Some(PathBuf::new())).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfigPath(_)));
    }

    #[test]
    fn load_requires_explicit_file() {
        let temp = TempDir::new().expect("tempdir");
        let missing = temp.path().join("config.toml");
        let err = load(Some(missing)).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn load_at_path_skips_missing_optional_file() {
        let temp = TempDir::new().expect("tempdir");
        let missing = temp.path().join("config.toml");
        assert!(load_at_path(&missing, false).expect("load").is_none());
    }

    #[test]
    fn load_at_path_parses_toml() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "[field]\nrequired = false\nempty_value = \"n/a\"\n\n[messages]\ndisguise = \"請勿輸入緊急號碼。\"\n",
        )
        .expect("write config");
        restrict_permissions(&path);

        let config = load_at_path(&path, true).expect("load").expect("config");
        assert!(!config.field.required);
        assert_eq!(config.field.empty_value, "n/a");
        assert_eq!(config.messages.disguise, "請勿輸入緊急號碼。");
    }

    #[test]
    fn load_at_path_rejects_unknown_keys() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "[field]\nstrict = true\n").expect("write config");
        restrict_permissions(&path);

        let err = load_at_path(&path, true).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn load_at_path_rejects_world_readable_file() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "").expect("write config");
        let mut perms = fs::metadata(&path).expect("metadata").permissions();
        perms.set_mode(0o644);
        fs::set_permissions(&path, perms).expect("chmod");

        let err = load_at_path(&path, true).unwrap_err();
        assert!(matches!(err, ConfigError::InsecurePermissions(_)));
    }
}
