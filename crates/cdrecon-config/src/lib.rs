use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use cdrecon_core::rules::Tolerances;
use cdrecon_core::CoreError;
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "cdrecon";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_DURATION_TOLERANCE: f64 = 5.0;
pub const DEFAULT_TIME_TOLERANCE: f64 = 5.0;
pub const MIN_TOLERANCE: f64 = 1.0;
pub const MAX_TOLERANCE: f64 = 10.0;
pub const DEFAULT_DELIMITER: u8 = b',';

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub tolerances: ToleranceConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToleranceConfig {
    pub duration: f64,
    pub time: f64,
}

impl ToleranceConfig {
    pub fn to_tolerances(&self) -> std::result::Result<Tolerances, CoreError> {
        Tolerances::new(self.duration, self.time)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputConfig {
    pub dir: Option<PathBuf>,
    pub delimiter: u8,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tolerances: ToleranceConfig {
                duration: DEFAULT_DURATION_TOLERANCE,
                time: DEFAULT_TIME_TOLERANCE,
            },
            output: OutputConfig {
                dir: None,
                delimiter: DEFAULT_DELIMITER,
            },
        }
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
    #[error("invalid {name} tolerance {value}: expected a value between 1 and 10 seconds")]
    InvalidTolerance { name: &'static str, value: f64 },
    #[error("invalid delimiter {0:?}: expected a single ASCII character")]
    InvalidDelimiter(String),
    #[error("invalid output dir: {0}")]
    InvalidOutputDir(PathBuf),
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

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    tolerances: Option<TolerancesFile>,
    output: Option<OutputFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TolerancesFile {
    duration: Option<f64>,
    time: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct OutputFile {
    dir: Option<PathBuf>,
    delimiter: Option<String>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

/// Tolerances accepted from users are whole-range checked here; the matcher
/// itself only requires them to be non-negative.
pub fn validate_tolerance_range(name: &'static str, value: f64) -> Result<f64> {
    if !(MIN_TOLERANCE..=MAX_TOLERANCE).contains(&value) {
        return Err(ConfigError::InvalidTolerance { name, value });
    }
    Ok(value)
}

pub fn parse_delimiter(raw: &str) -> Result<u8> {
    if raw == "\\t" || raw.eq_ignore_ascii_case("tab") {
        return Ok(b'\t');
    }
    match raw.as_bytes() {
        [byte] if byte.is_ascii() && !byte.is_ascii_alphanumeric() && *byte != b'"' => Ok(*byte),
        _ => Err(ConfigError::InvalidDelimiter(raw.to_string())),
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(tolerances) = parsed.tolerances {
        if let Some(duration) = tolerances.duration {
            config.tolerances.duration = validate_tolerance_range("duration", duration)?;
        }
        if let Some(time) = tolerances.time {
            config.tolerances.time = validate_tolerance_range("time", time)?;
        }
    }

    if let Some(output) = parsed.output {
        if let Some(dir) = output.dir {
            if dir.as_os_str().is_empty() {
                return Err(ConfigError::InvalidOutputDir(dir));
            }
            config.output.dir = Some(dir);
        }
        if let Some(delimiter) = output.delimiter {
            config.output.delimiter = parse_delimiter(&delimiter)?;
        }
    }

    Ok(config)
}
