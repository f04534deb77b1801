use netlify_core::Datasource;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

pub async fn handle(datasource: &Datasource, global: &GlobalOpts) -> Result<(), CliError> {
    let result = datasource.check_health().await;
    if !result.is_ok() {
        return Err(CliError::Unhealthy {
            message: result.message,
        });
    }

    let rendered = match global.output {
        OutputFormat::Table | OutputFormat::Plain => result.message,
        format => output::render_value(format, &result)?,
    };
    output::print_output(&rendered, global.quiet);
    Ok(())
}
