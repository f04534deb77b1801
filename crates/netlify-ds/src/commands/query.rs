//! Query command handler.

use serde_json::{Value, json};

use netlify_core::{
    CancellationToken, DataQuery, DataResponse, Datasource, QueryDataRequest,
};

use crate::cli::{GlobalOpts, QueryArgs};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    datasource: &Datasource,
    args: QueryArgs,
    global: &GlobalOpts,
    cancel: &CancellationToken,
) -> Result<(), CliError> {
    let request = match args.request {
        Some(ref path) => {
            let raw = std::fs::read(path)?;
            serde_json::from_slice::<QueryDataRequest>(&raw)?
        }
        None => QueryDataRequest {
            queries: vec![DataQuery {
                ref_id: args.ref_id.clone(),
                json: query_json(&args),
            }],
        },
    };

    tracing::debug!(queries = request.queries.len(), "running query request");
    let response = datasource.query_data(&request, cancel).await;

    let mut first_error = None;
    for (ref_id, result) in response.responses {
        if let Err(err) = print_response(&ref_id, result, global) {
            // The first failure is reported by main; later ones only here.
            if first_error.is_some() {
                eprintln!("{err}");
            } else {
                first_error = Some(err);
            }
        }
    }

    if cancel.is_cancelled() {
        return Err(CliError::Cancelled);
    }
    first_error.map_or(Ok(()), Err)
}

/// Query payload in the editor's shape.
fn query_json(args: &QueryArgs) -> Value {
    let mut query = json!({
        "entity": args.entity.clone().unwrap_or_default(),
        "siteId": args.site_id,
    });
    if !args.fields.is_empty() {
        query["parsingOptions"] = json!({ "selectedFields": args.fields });
    }
    query
}

fn print_response(ref_id: &str, response: DataResponse, global: &GlobalOpts) -> Result<(), CliError> {
    if let Some(error) = response.error {
        return Err(CliError::QueryFailed {
            ref_id: ref_id.to_owned(),
            status: error.status,
            message: error.message,
        });
    }

    for frame in &response.frames {
        output::print_notices(frame, global.quiet);
        let rendered = output::render_frame(global.output, frame)?;
        output::print_output(&rendered, global.quiet);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(entity: &str, site_id: &str, fields: &[&str]) -> QueryArgs {
        QueryArgs {
            entity: Some(entity.into()),
            site_id: site_id.into(),
            fields: fields.iter().map(|f| (*f).to_owned()).collect(),
            ref_id: "A".into(),
            request: None,
        }
    }

    #[test]
    fn payload_uses_editor_field_names() {
        let query = query_json(&args("builds", "{a,b}", &[]));
        assert_eq!(query, json!({"entity": "builds", "siteId": "{a,b}"}));
    }

    #[test]
    fn selected_fields_are_nested_under_parsing_options() {
        let query = query_json(&args("sites", "", &["id", "name"]));
        assert_eq!(
            query["parsingOptions"]["selectedFields"],
            json!(["id", "name"])
        );
    }
}
