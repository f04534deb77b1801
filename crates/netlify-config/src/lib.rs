//! Configuration for the Netlify datasource.
//!
//! Two entry points produce a `netlify_core::Settings`:
//!
//! - TOML profiles on disk (plus `NETLIFY_`-prefixed env overrides), with
//!   token resolution through env var, system keyring, then plaintext.
//! - [`load_instance_settings`], which reads the host's per-instance JSON
//!   blob and its decrypted secure map.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use netlify_core::Settings;

/// Keyring service name under which tokens are stored.
pub const KEYRING_SERVICE: &str = "netlify-datasource";

/// Secure-map key holding the personal access token.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no access token configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("{key} is missing")]
    MissingSecret { key: String },

    #[error("profile '{name}' not found in config")]
    UnknownProfile { name: String },

    #[error("failed to unmarshal settings JSONData: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when none is named on the command line.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named datasource profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Look up a profile, falling back to `default_profile` when `name` is `None`.
    pub fn profile(&self, name: Option<&str>) -> Result<(&str, &Profile), ConfigError> {
        let name = name
            .or(self.default_profile.as_deref())
            .unwrap_or("default");
        self.profiles
            .get_key_value(name)
            .map(|(k, p)| (k.as_str(), p))
            .ok_or_else(|| ConfigError::UnknownProfile { name: name.into() })
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named datasource profile.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    /// API root; the public Netlify API when unset.
    pub base_url: Option<String>,

    /// Account slug or id for account-scoped queries.
    pub account_id: Option<String>,

    /// Site queried when the site selector is empty.
    pub site_id: Option<String>,

    /// Access token (plaintext, prefer keyring or env var).
    pub token: Option<String>,

    /// Environment variable name containing the access token.
    pub token_env: Option<String>,

    /// Extra CA certificate (PEM).
    pub ca_cert: Option<PathBuf>,

    /// Override of `defaults.timeout`.
    pub timeout: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "netlify-datasource", "netlify-datasource").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("netlify-datasource");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config from an explicit file path + environment.
///
/// A missing file is not an error; defaults and env overrides still apply.
/// Env keys nest on a double underscore: `NETLIFY_DEFAULTS__TIMEOUT=5`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("NETLIFY_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the access token: profile env var, then keyring, then plaintext.
pub fn resolve_access_token(
    profile: &Profile,
    profile_name: &str,
) -> Result<SecretString, ConfigError> {
    if let Some(ref env_name) = profile.token_env {
        if let Ok(val) = std::env::var(env_name) {
            debug!(profile = profile_name, source = "env", "resolved access token");
            return Ok(SecretString::from(val));
        }
    }

    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/token")) {
        if let Ok(secret) = entry.get_password() {
            debug!(profile = profile_name, source = "keyring", "resolved access token");
            return Ok(SecretString::from(secret));
        }
    }

    if let Some(ref token) = profile.token {
        debug!(profile = profile_name, source = "config", "resolved access token");
        return Ok(SecretString::from(token.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Build datasource `Settings` from a profile with an already-resolved token.
pub fn profile_settings(
    profile: &Profile,
    defaults: &Defaults,
    token: SecretString,
) -> Result<Settings, ConfigError> {
    let mut settings = Settings::new(token);

    if let Some(ref base_url) = profile.base_url {
        validate_base_url(base_url)?;
        settings.base_url.clone_from(base_url);
    }
    if let Some(ref account_id) = profile.account_id {
        settings.account_id.clone_from(account_id);
    }
    if let Some(ref site_id) = profile.site_id {
        settings.site_id.clone_from(site_id);
    }
    settings.timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));
    settings.ca_cert.clone_from(&profile.ca_cert);

    Ok(settings)
}

/// Build datasource `Settings` from a profile, resolving its token.
pub fn profile_to_settings(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<Settings, ConfigError> {
    let token = resolve_access_token(profile, profile_name)?;
    profile_settings(profile, defaults, token)
}

fn validate_base_url(raw: &str) -> Result<(), ConfigError> {
    let url: url::Url = raw.parse().map_err(|_| ConfigError::Validation {
        field: "base_url".into(),
        reason: format!("invalid URL: {raw}"),
    })?;
    if matches!(url.scheme(), "http" | "https") {
        Ok(())
    } else {
        Err(ConfigError::Validation {
            field: "base_url".into(),
            reason: format!("expected an http(s) URL, got scheme '{}'", url.scheme()),
        })
    }
}

// ── Host instance settings ──────────────────────────────────────────

/// Non-secret half of the host's per-instance settings.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InstanceSettings {
    pub base_url: String,
    pub site_id: String,
    pub account_id: String,
}

/// Decode host instance settings.
///
/// `json_data` is the plain JSON blob (`baseUrl`, `siteId`, `accountId`);
/// `secure` is the decrypted secret map and must contain `accessToken`.
/// An empty `baseUrl` selects the public Netlify API.
pub fn load_instance_settings(
    json_data: &[u8],
    secure: &HashMap<String, String>,
) -> Result<Settings, ConfigError> {
    let instance: InstanceSettings = serde_json::from_slice(json_data)?;

    let token = secure
        .get(ACCESS_TOKEN_KEY)
        .ok_or_else(|| ConfigError::MissingSecret {
            key: ACCESS_TOKEN_KEY.into(),
        })?;

    let mut settings = Settings::new(SecretString::from(token.clone()));
    if !instance.base_url.is_empty() {
        validate_base_url(&instance.base_url)?;
        settings.base_url = instance.base_url;
    }
    settings.site_id = instance.site_id;
    settings.account_id = instance.account_id;
    Ok(settings)
}
