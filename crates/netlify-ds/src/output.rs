//! Output formatting: table, JSON, YAML, plain.
//!
//! Frames have a dynamic column set, so tables are assembled with tabled's
//! `Builder` from the frame's field names rather than a `Tabled` derive.

use std::io::{self, Write};

use serde::Serialize;
use tabled::{builder::Builder, settings::Style};

use netlify_core::{Frame, Severity};

use crate::cli::OutputFormat;
use crate::error::CliError;

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a frame in the chosen format.
///
/// Structured formats serialize the whole frame (name, columns, notices);
/// `plain` prints tab-separated rows without a header.
pub fn render_frame(format: OutputFormat, frame: &Frame) -> Result<String, CliError> {
    match format {
        OutputFormat::Table => {
            if frame.fields.is_empty() {
                return Ok(format!("{}: no rows", frame.name));
            }
            let header = frame.fields.iter().map(|f| f.name.clone());
            Ok(render_table(header, frame.rows()))
        }
        OutputFormat::Json => render_json(frame, false),
        OutputFormat::JsonCompact => render_json(frame, true),
        OutputFormat::Yaml => render_yaml(frame),
        OutputFormat::Plain => Ok(frame
            .rows()
            .into_iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

/// Render a flat list of identifiers under one column header.
pub fn render_ids(format: OutputFormat, header: &str, ids: &[String]) -> Result<String, CliError> {
    match format {
        OutputFormat::Table => Ok(render_table(
            std::iter::once(header.to_owned()),
            ids.iter().map(|id| vec![id.clone()]),
        )),
        OutputFormat::Json => render_json(ids, false),
        OutputFormat::JsonCompact => render_json(ids, true),
        OutputFormat::Yaml => render_yaml(ids),
        OutputFormat::Plain => Ok(ids.join("\n")),
    }
}

/// Render any serializable value; tables fall back to pretty JSON.
pub fn render_value<T: Serialize + ?Sized>(
    format: OutputFormat,
    data: &T,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Table | OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact | OutputFormat::Plain => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

/// Print frame notices to stderr so they never mix with piped data.
pub fn print_notices(frame: &Frame, quiet: bool) {
    if quiet {
        return;
    }
    for notice in &frame.meta.notices {
        let label = match notice.severity {
            Severity::Info => "info",
            Severity::Warning => "warning",
        };
        eprintln!("{label}: {}", notice.text);
    }
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<H, R>(header: H, rows: R) -> String
where
    H: IntoIterator<Item = String>,
    R: IntoIterator<Item = Vec<String>>,
{
    let mut builder = Builder::default();
    builder.push_record(header);
    for row in rows {
        builder.push_record(row);
    }
    builder.build().with(Style::rounded()).to_string()
}

fn render_json<T: Serialize + ?Sized>(data: &T, compact: bool) -> Result<String, CliError> {
    let out = if compact {
        serde_json::to_string(data)?
    } else {
        serde_json::to_string_pretty(data)?
    };
    Ok(out)
}

fn render_yaml<T: Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    Ok(serde_yaml::to_string(data)?)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use serde_json::json;

    use super::*;

    fn sample() -> Frame {
        Frame::from_records(
            "builds",
            &[
                json!({"id": "b1", "done": true}),
                json!({"id": "b2", "done": null}),
            ],
        )
        .unwrap()
    }

    #[test]
    fn table_has_header_and_rows() {
        let out = render_frame(OutputFormat::Table, &sample()).unwrap();
        assert!(out.contains("id"));
        assert!(out.contains("done"));
        assert!(out.contains("b1"));
        assert!(out.contains("true"));
    }

    #[test]
    fn plain_is_tab_separated() {
        let out = render_frame(OutputFormat::Plain, &sample()).unwrap();
        assert_eq!(out, "b1\ttrue\nb2\t");
    }

    #[test]
    fn json_keeps_frame_name() {
        let out = render_frame(OutputFormat::JsonCompact, &sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["name"], "builds");
        assert_eq!(value["fields"][0]["name"], "id");
    }

    #[test]
    fn empty_frame_table_says_so() {
        let frame = Frame::from_records::<serde_json::Value>("forms", &[]).unwrap();
        assert_eq!(
            render_frame(OutputFormat::Table, &frame).unwrap(),
            "forms: no rows"
        );
    }

    #[test]
    fn ids_plain_one_per_line() {
        let ids = vec!["s1".to_owned(), "s2".to_owned()];
        assert_eq!(render_ids(OutputFormat::Plain, "ID", &ids).unwrap(), "s1\ns2");
    }
}
