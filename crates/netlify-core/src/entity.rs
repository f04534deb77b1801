// ── Queryable resource kinds ──

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// One of the seven resource kinds a query can select.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Entity {
    Builds,
    Deployments,
    Forms,
    FormSubmissions,
    BuildsAccount,
    Sites,
    Accounts,
}

/// Whether an entity is partitioned by site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// One request per site id, merged through the fan-out.
    PerSite,
    /// A single account-wide request; the site selector is ignored.
    Account,
}

impl Entity {
    pub fn scope(self) -> Scope {
        match self {
            Self::Builds | Self::Deployments | Self::Forms | Self::FormSubmissions => Scope::PerSite,
            Self::BuildsAccount | Self::Sites | Self::Accounts => Scope::Account,
        }
    }

    /// Name given to the data frame built for this entity.
    pub fn frame_name(self) -> &'static str {
        match self {
            Self::Builds => "builds",
            Self::Deployments => "deployments",
            Self::Forms => "forms",
            Self::FormSubmissions => "form_submissions",
            Self::BuildsAccount => "build_account_details",
            Self::Sites => "sites",
            Self::Accounts => "accounts",
        }
    }

    /// Noun used in upstream error messages ("failed to get ...").
    pub fn description(self) -> &'static str {
        match self {
            Self::Builds => "builds",
            Self::Deployments => "deployments",
            Self::Forms => "forms",
            Self::FormSubmissions => "forms submissions",
            Self::BuildsAccount => "build account details",
            Self::Sites => "sites",
            Self::Accounts => "accounts",
        }
    }
}
