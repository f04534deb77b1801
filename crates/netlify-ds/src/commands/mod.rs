//! Command dispatch: bridges CLI args -> datasource calls -> output formatting.

pub mod config_cmd;
pub mod health;
pub mod query;
pub mod resource;

use netlify_core::{CancellationToken, Datasource};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a datasource-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    datasource: &Datasource,
    global: &GlobalOpts,
    cancel: &CancellationToken,
) -> Result<(), CliError> {
    match cmd {
        Command::Query(args) => query::handle(datasource, args, global, cancel).await,
        Command::Sites => resource::sites(datasource, global).await,
        Command::Resource(args) => resource::handle(datasource, args, global).await,
        Command::Health => health::handle(datasource, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
