// Configuration loading and parsing (coach.toml, credentials.toml).

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::request::{FAMILIARITY_MAX, FAMILIARITY_MIN};

/// Environment variable that overrides `credentials.toml`.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error(
        "no API key configured: set GEMINI_API_KEY or add gemini_api_key to config/credentials.toml"
    )]
    MissingCredential,

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub llm: LlmConfig,
    pub form: FormConfig,
    /// Always non-empty once loaded.
    pub api_key: String,
}

// ---------------------------------------------------------------------------
// coach.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire coach.toml file.
#[derive(Debug, Clone, Deserialize)]
struct CoachFile {
    llm: LlmConfig,
    #[serde(default)]
    form: FormConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// Gemini model identifier, e.g. `gemini-2.5-flash`.
    pub model: String,
    /// Base URL of the Generative Language API, without a trailing slash.
    pub api_base: String,
    pub max_output_tokens: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FormConfig {
    /// Initial position of the familiarity slider.
    pub default_familiarity: u8,
}

impl Default for FormConfig {
    fn default() -> Self {
        FormConfig {
            default_familiarity: 5,
        }
    }
}

// ---------------------------------------------------------------------------
// credentials.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Default)]
struct CredentialsFile {
    gemini_api_key: Option<String>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/coach.toml` and (optionally)
/// `config/credentials.toml`, relative to `base_dir`.
///
/// `env_api_key` takes precedence over the credentials file when it is
/// present and non-empty. Does not copy defaults; see `load_config()`.
pub fn load_config_from(
    base_dir: &Path,
    env_api_key: Option<String>,
) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    // --- coach.toml (required) ---
    let coach_path = config_dir.join("coach.toml");
    let coach_text = read_file(&coach_path)?;
    let coach_file: CoachFile =
        toml::from_str(&coach_text).map_err(|e| ConfigError::ParseError {
            path: coach_path.clone(),
            source: e,
        })?;

    // --- credentials.toml (optional) ---
    let credentials_path = config_dir.join("credentials.toml");
    let credentials: CredentialsFile = if credentials_path.exists() {
        let cred_text = read_file(&credentials_path)?;
        toml::from_str(&cred_text).map_err(|e| ConfigError::ParseError {
            path: credentials_path.clone(),
            source: e,
        })?
    } else {
        CredentialsFile::default()
    };

    let api_key = match env_api_key.filter(|k| !k.trim().is_empty()) {
        Some(key) => {
            debug!("using API key from {API_KEY_ENV}");
            key
        }
        None => credentials.gemini_api_key.unwrap_or_default(),
    };

    let config = Config {
        llm: coach_file.llm,
        form: coach_file.form,
        api_key: api_key.trim().to_string(),
    };

    validate(&config)?;

    Ok(config)
}

/// Seed `config/` from `defaults/`: every shipped file without a
/// counterpart in `config/` is copied, `.example` templates stay behind.
/// Returns the paths written.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    match (defaults_dir.is_dir(), config_dir.is_dir()) {
        (false, true) => return Ok(Vec::new()),
        (false, false) => {
            return Err(seed_error(format!(
                "no defaults/ or config/ directory under {}",
                base_dir.display()
            )))
        }
        _ => {}
    }

    fs::create_dir_all(&config_dir)
        .map_err(|e| seed_error(format!("cannot create {}: {e}", config_dir.display())))?;
    let listing = fs::read_dir(&defaults_dir)
        .map_err(|e| seed_error(format!("cannot list {}: {e}", defaults_dir.display())))?;

    let mut seeded = Vec::new();
    for entry in listing {
        let source = entry
            .map_err(|e| seed_error(format!("cannot list {}: {e}", defaults_dir.display())))?
            .path();
        let Some(name) = source.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !source.is_file() || name.ends_with(".example") {
            continue;
        }

        let target = config_dir.join(name);
        if seed_file(&source, &target)? {
            info!("seeded {} from defaults", target.display());
            seeded.push(target);
        }
    }

    Ok(seeded)
}

/// Load from the working directory after seeding defaults, with the API key
/// override taken from `GEMINI_API_KEY`.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|e| seed_error(format!("no working directory: {e}")))?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd, std::env::var(API_KEY_ENV).ok())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

/// Copy `source` to `target`. `Ok(false)` when `target` already exists.
fn seed_file(source: &Path, target: &Path) -> Result<bool, ConfigError> {
    let mut dest = match OpenOptions::new().write(true).create_new(true).open(target) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(seed_error(format!("cannot create {}: {e}", target.display()))),
    };
    let bytes =
        fs::read(source).map_err(|e| seed_error(format!("cannot read {}: {e}", source.display())))?;
    dest.write_all(&bytes)
        .map_err(|e| seed_error(format!("cannot write {}: {e}", target.display())))?;
    Ok(true)
}

fn seed_error(message: String) -> ConfigError {
    ConfigError::DefaultsCopyError { message }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.llm.model.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "llm.model".into(),
            message: "must not be empty".into(),
        });
    }

    if config.llm.api_base.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "llm.api_base".into(),
            message: "must not be empty".into(),
        });
    }

    if config.llm.max_output_tokens == 0 {
        return Err(ConfigError::ValidationError {
            field: "llm.max_output_tokens".into(),
            message: "must be greater than 0".into(),
        });
    }

    let fam = config.form.default_familiarity;
    if !(FAMILIARITY_MIN..=FAMILIARITY_MAX).contains(&fam) {
        return Err(ConfigError::ValidationError {
            field: "form.default_familiarity".into(),
            message: format!(
                "must be between {FAMILIARITY_MIN} and {FAMILIARITY_MAX} inclusive, got {fam}"
            ),
        });
    }

    if config.api_key.is_empty() {
        return Err(ConfigError::MissingCredential);
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
