//! Configuration loader with file resolution and environment override support.

use super::error::{ConfigError, ConfigResult};
use super::schema::Config;
use std::path::{Path, PathBuf};

/// Environment variable prefix for overrides
const ENV_PREFIX: &str = "CANTACT";

/// Config file name looked up in the current directory
const LOCAL_CONFIG_FILE_NAME: &str = "cantact.toml";

/// Config file name inside the per-user config directory
const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable for explicit config path
const CONFIG_PATH_ENV: &str = "CANTACT_CONFIG";

/// Configuration loader with resolution and override logic.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Resolved config file path (if any)
    pub config_path: Option<PathBuf>,
    /// The loaded configuration
    pub config: Config,
}

impl ConfigLoader {
    /// Load configuration using standard resolution order.
    ///
    /// Resolution priority (highest to lowest):
    /// 1. `CANTACT_CONFIG` environment variable (explicit path)
    /// 2. `./cantact.toml` (current directory)
    /// 3. `~/.config/cantact/config.toml` (XDG on Linux/macOS)
    /// 4. `%APPDATA%\cantact\config.toml` (Windows)
    /// 5. Built-in defaults (no file required)
    ///
    /// Environment variables override any config file values.
    pub fn load() -> ConfigResult<Self> {
        let config_path = resolve_config_path();

        let mut config = if let Some(ref path) = config_path {
            load_from_file(path)?
        } else {
            Config::default()
        };

        apply_env_overrides(&mut config)?;
        config.validate()?;

        Ok(Self {
            config_path,
            config,
        })
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref().to_path_buf();
        let mut config = load_from_file(&path)?;
        apply_env_overrides(&mut config)?;
        config.validate()?;

        Ok(Self {
            config_path: Some(path),
            config,
        })
    }

    /// Create a loader with default configuration (no file).
    pub fn with_defaults() -> Self {
        let mut config = Config::default();
        // Still apply env overrides even with defaults
        if apply_env_overrides(&mut config).is_err() || config.validate().is_err() {
            config = Config::default();
        }

        Self {
            config_path: None,
            config,
        }
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Consume the loader and return the configuration.
    pub fn into_config(self) -> Config {
        self.config
    }
}

/// Resolve the configuration file path using standard locations.
pub fn resolve_config_path() -> Option<PathBuf> {
    // 1. Explicit environment variable
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    // 2. Current directory
    let cwd_config = PathBuf::from(LOCAL_CONFIG_FILE_NAME);
    if cwd_config.exists() {
        return Some(cwd_config);
    }

    // 3. XDG config directory (Linux/macOS) or APPDATA (Windows)
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return Some(path);
        }
    }

    None
}

/// Get the platform-specific config directory.
fn get_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var("APPDATA").ok().map(PathBuf::from)
    }

    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var("HOME")
                    .ok()
                    .map(|h| PathBuf::from(h).join(".config"))
            })
    }
}

/// Get the default per-user config file path.
pub fn get_default_config_path() -> Option<PathBuf> {
    get_config_dir().map(|d| d.join("cantact").join(CONFIG_FILE_NAME))
}

/// Load configuration from a file.
fn load_from_file(path: &Path) -> ConfigResult<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&content).map_err(ConfigError::ParseError)
}

/// Apply environment variable overrides to the configuration.
///
/// Environment variables follow the pattern: `CANTACT_<SECTION>_<KEY>`
/// For example:
/// - `CANTACT_DEVICE_PORT=/dev/ttyACM0`
/// - `CANTACT_DEVICE_BITRATE=250000`
/// - `CANTACT_LOGGING_LEVEL=debug`
fn apply_env_overrides(config: &mut Config) -> ConfigResult<()> {
    if let Ok(val) = std::env::var(format!("{}_DEVICE_PORT", ENV_PREFIX)) {
        config.device.port = Some(val);
    }
    if let Ok(val) = std::env::var(format!("{}_DEVICE_BAUD_RATE", ENV_PREFIX)) {
        config.device.baud_rate = val.parse().map_err(|_| {
            ConfigError::env_parse(format!("{}_DEVICE_BAUD_RATE", ENV_PREFIX), "Invalid baud rate")
        })?;
    }
    if let Ok(val) = std::env::var(format!("{}_DEVICE_BITRATE", ENV_PREFIX)) {
        config.device.bitrate = val.parse().map_err(|_| {
            ConfigError::env_parse(format!("{}_DEVICE_BITRATE", ENV_PREFIX), "Invalid bitrate")
        })?;
    }
    if let Ok(val) = std::env::var(format!("{}_LOGGING_LEVEL", ENV_PREFIX)) {
        config.logging.level = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use std::io::Write;

    #[test]
    #[serial]
    fn test_default_loader() {
        let loader = ConfigLoader::with_defaults();
        assert_eq!(loader.config().device.bitrate, 500_000);
        assert!(loader.config_path.is_none());
    }

    #[test]
    #[serial]
    fn test_env_override() {
        env::set_var("CANTACT_DEVICE_BITRATE", "125000");
        env::set_var("CANTACT_DEVICE_PORT", "/dev/ttyACM7");

        let loader = ConfigLoader::with_defaults();
        assert_eq!(loader.config().device.bitrate, 125_000);
        assert_eq!(loader.config().device.port.as_deref(), Some("/dev/ttyACM7"));

        env::remove_var("CANTACT_DEVICE_BITRATE");
        env::remove_var("CANTACT_DEVICE_PORT");
    }

    #[test]
    #[serial]
    fn test_bad_env_value_is_reported() {
        env::set_var("CANTACT_DEVICE_BAUD_RATE", "fast");

        let mut config = Config::default();
        let err = apply_env_overrides(&mut config).unwrap_err();
        assert!(matches!(err, ConfigError::EnvParseError { .. }));

        // with_defaults falls back instead of failing
        assert_eq!(ConfigLoader::with_defaults().config().device.baud_rate, 115_200);

        env::remove_var("CANTACT_DEVICE_BAUD_RATE");
    }

    #[test]
    #[serial]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[device]\nport = \"COM3\"\nbitrate = 1000000").unwrap();

        let loader = ConfigLoader::load_from(file.path()).unwrap();
        assert_eq!(loader.config().device.port.as_deref(), Some("COM3"));
        assert_eq!(loader.config().device.bitrate, 1_000_000);
        assert_eq!(loader.config_path.as_deref(), Some(file.path()));
    }

    #[test]
    #[serial]
    fn test_load_from_rejects_invalid_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[device]\nbitrate = 0").unwrap();

        let err = ConfigLoader::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }

    #[test]
    #[serial]
    fn test_load_from_missing_file() {
        let err = ConfigLoader::load_from("/nonexistent/cantact.toml").unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }

    #[test]
    #[serial]
    fn test_explicit_path_env_wins() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nlevel = \"trace\"").unwrap();
        env::set_var("CANTACT_CONFIG", file.path());

        assert_eq!(resolve_config_path().as_deref(), Some(file.path()));
        let loader = ConfigLoader::load().unwrap();
        assert_eq!(loader.config().logging.level, "trace");

        env::remove_var("CANTACT_CONFIG");
    }
}
