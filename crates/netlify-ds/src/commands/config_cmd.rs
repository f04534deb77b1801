//! Config subcommand handlers.

use serde::Serialize;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

/// Settings as shown to the user; the token itself never leaves `Settings`.
#[derive(Debug, Serialize)]
struct ShownSettings {
    profile: String,
    base_url: String,
    account_id: String,
    site_id: String,
    timeout_secs: u64,
    ca_cert: Option<String>,
    token: &'static str,
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            let settings = config::resolve_settings(global)?;
            let shown = ShownSettings {
                profile: config::active_profile_name(global, &cfg),
                base_url: settings.base_url,
                account_id: settings.account_id,
                site_id: settings.site_id,
                timeout_secs: settings.timeout.as_secs(),
                ca_cert: settings.ca_cert.map(|p| p.display().to_string()),
                token: "<redacted>",
            };
            let rendered = output::render_value(global.output, &shown)?;
            output::print_output(&rendered, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Profiles => {
            let cfg = config::load_config()?;
            let active = config::active_profile_name(global, &cfg);
            let mut names: Vec<String> = cfg
                .profiles
                .keys()
                .map(|name| {
                    if *name == active {
                        format!("{name} *")
                    } else {
                        name.clone()
                    }
                })
                .collect();
            names.sort();
            let rendered = output::render_ids(global.output, "PROFILE", &names)?;
            output::print_output(&rendered, global.quiet);
            Ok(())
        }

        ConfigCommand::Use { name } => {
            let mut cfg: Config = config::load_config()?;
            if !cfg.profiles.contains_key(&name) {
                let mut available: Vec<&str> = cfg.profiles.keys().map(String::as_str).collect();
                available.sort_unstable();
                return Err(CliError::ProfileNotFound {
                    available: available.join(", "),
                    name,
                });
            }
            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("Default profile set to '{name}'");
            }
            Ok(())
        }
    }
}
