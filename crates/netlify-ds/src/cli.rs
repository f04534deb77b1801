//! Clap derive structures for the `netlify-ds` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// netlify-ds -- query Netlify builds, deploys, forms and sites
#[derive(Debug, Parser)]
#[command(
    name = "netlify-ds",
    version,
    about = "Query Netlify builds, deployments, forms and sites as tables",
    long_about = "Runs datasource queries against the Netlify API from the command line.\n\n\
        Per-site entities accept a brace list of site ids ({a,b,c}) and are\n\
        fetched concurrently, one request per site.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config profile to use
    #[arg(long, short = 'p', env = "NETLIFY_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API base URL (overrides profile)
    #[arg(long, env = "NETLIFY_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Personal access token
    #[arg(long, env = "NETLIFY_ACCESS_TOKEN", global = true, hide_env = true)]
    pub token: Option<String>,

    /// Account slug for account-scoped entities
    #[arg(long, env = "NETLIFY_ACCOUNT_ID", global = true)]
    pub account_id: Option<String>,

    /// Default site id, used when a query has no site selector
    #[arg(long, short = 's', env = "NETLIFY_SITE_ID", global = true)]
    pub site: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "NETLIFY_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "NETLIFY_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Tab-separated rows, no header (scripting)
    Plain,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a datasource query and print the resulting frame
    #[command(alias = "q")]
    Query(QueryArgs),

    /// List the ids of every site the token can see
    Sites,

    /// Call a raw resource path (as the query editor does)
    Resource(ResourceArgs),

    /// Check that the token can reach the Netlify API
    Health,

    /// Inspect CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Entity to query: builds, deployments, forms, form-submissions,
    /// builds-account, sites, accounts
    #[arg(long, short = 'e', required_unless_present = "request")]
    pub entity: Option<String>,

    /// Site selector: a single id or a brace list such as {a,b,c}
    #[arg(long, default_value = "")]
    pub site_id: String,

    /// Columns to select (accepted for compatibility, not applied)
    #[arg(long = "field", short = 'f', value_delimiter = ',')]
    pub fields: Vec<String>,

    /// Reference id attached to the query
    #[arg(long, default_value = "A")]
    pub ref_id: String,

    /// Run a full query request read from a JSON file instead
    #[arg(long, conflicts_with_all = ["entity", "site_id", "fields", "ref_id"])]
    pub request: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ResourceArgs {
    /// Resource path, e.g. /sites
    pub path: String,

    /// HTTP method
    #[arg(long, short = 'X', default_value = "GET")]
    pub method: String,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display the resolved settings (token redacted)
    Show,

    /// Print the config file path
    Path,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
