//! Resource command handlers (`sites`, `resource`).

use netlify_core::{Datasource, ResourceRequest, ResourceResponse};

use crate::cli::{GlobalOpts, ResourceArgs};
use crate::error::CliError;
use crate::output;

/// List site ids through the `/sites` resource.
pub async fn sites(datasource: &Datasource, global: &GlobalOpts) -> Result<(), CliError> {
    let response = checked(datasource.call_resource(&ResourceRequest::get("/sites")).await)?;
    let ids: Vec<String> = serde_json::from_str(&response.body)?;
    let rendered = output::render_ids(global.output, "ID", &ids)?;
    output::print_output(&rendered, global.quiet);
    Ok(())
}

/// Forward a raw resource call and print its body.
pub async fn handle(
    datasource: &Datasource,
    args: ResourceArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let request = ResourceRequest {
        method: args.method.to_ascii_uppercase(),
        path: args.path,
    };
    let response = checked(datasource.call_resource(&request).await)?;
    output::print_output(&response.body, global.quiet);
    Ok(())
}

fn checked(response: ResourceResponse) -> Result<ResourceResponse, CliError> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(CliError::Resource {
            status: response.status,
            body: response.body,
        })
    }
}
