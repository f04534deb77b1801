//! CLI configuration: a thin wrapper around `netlify_config` that applies
//! `GlobalOpts` flag overrides (--base-url, --token, --site, ...).

use std::time::Duration;

use secrecy::SecretString;

use netlify_core::Settings;

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use netlify_config::{Config, config_path, load_config, save_config};

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build datasource `Settings` from the config file, profile and CLI flags.
///
/// Flag values take priority over profile values. Without a matching
/// profile the token must come from `--token` / `NETLIFY_ACCESS_TOKEN`.
pub fn resolve_settings(global: &GlobalOpts) -> Result<Settings, CliError> {
    let cfg = load_config()?;
    let profile_name = active_profile_name(global, &cfg);

    let mut settings = if let Some(profile) = cfg.profiles.get(&profile_name) {
        let token = match global.token {
            Some(ref token) => SecretString::from(token.clone()),
            None => netlify_config::resolve_access_token(profile, &profile_name)?,
        };
        netlify_config::profile_settings(profile, &cfg.defaults, token)?
    } else {
        if global.profile.is_some() {
            let mut available: Vec<&str> = cfg.profiles.keys().map(String::as_str).collect();
            available.sort_unstable();
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: available.join(", "),
            });
        }
        let token = global.token.clone().ok_or(CliError::NoCredentials {
            profile: profile_name,
        })?;
        let mut settings = Settings::new(SecretString::from(token));
        settings.timeout = Duration::from_secs(cfg.defaults.timeout);
        settings
    };

    if let Some(ref base_url) = global.base_url {
        settings.base_url.clone_from(base_url);
    }
    if let Some(ref account_id) = global.account_id {
        settings.account_id.clone_from(account_id);
    }
    if let Some(ref site) = global.site {
        settings.site_id.clone_from(site);
    }
    if let Some(secs) = global.timeout {
        settings.timeout = Duration::from_secs(secs);
    }

    Ok(settings)
}
