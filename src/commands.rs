/*!
 * CLI subcommand implementations
 *
 * Each command drives a `ReportBridge` and writes its answer to `out`.
 * None of them can see a transport error: the bridge has already folded
 * those into failure results, empty lists or `false`.
 */

use report_connect::ReportBridge;
use report_interface::ReportRequest;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::{BridgeError, Result};
use crate::output;

/// Arguments of the `generate` subcommand
#[derive(Debug, Clone, Default)]
pub struct GenerateArgs {
    pub template_id: String,
    pub output_format: String,
    /// Raw `key=value` pairs
    pub params: Vec<String>,
    pub include_charts: bool,
    pub output: Option<PathBuf>,
}

/// Split a `key=value` pair; the value may itself contain `=`
pub fn parse_param(raw: &str) -> Result<(String, String)> {
    let (key, value) = raw.split_once('=').ok_or_else(|| {
        BridgeError::InvalidArgument(format!("parameter '{}' is not key=value", raw))
    })?;

    let key = key.trim();
    if key.is_empty() {
        return Err(BridgeError::InvalidArgument(format!(
            "parameter '{}' has an empty name",
            raw
        )));
    }

    Ok((key.to_string(), value.to_string()))
}

/// Parse every pair; a repeated key keeps its last value
pub fn parse_params(raw: &[String]) -> Result<HashMap<String, String>> {
    raw.iter().map(|p| parse_param(p)).collect()
}

/// Where to write a generated report
///
/// An explicit path wins. Otherwise only the final component of the
/// server-supplied filename is used, so a server cannot direct writes
/// outside the working directory.
pub fn resolve_output_path(
    explicit: Option<&Path>,
    server_filename: &str,
    template_id: &str,
    output_format: &str,
) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    match Path::new(server_filename).file_name() {
        Some(name) => PathBuf::from(name),
        None => PathBuf::from(format!(
            "{}.{}",
            template_id,
            output_format.to_ascii_lowercase()
        )),
    }
}

pub async fn run_health(bridge: &ReportBridge, out: &mut dyn Write, json: bool) -> Result<()> {
    let healthy = bridge.check_health().await;

    if json {
        writeln!(
            out,
            "{}",
            output::health_json(bridge.server_address(), bridge.is_connected(), healthy)
        )?;
    } else if healthy {
        writeln!(out, "ReportServer at {} is healthy", bridge.server_address())?;
    } else {
        writeln!(
            out,
            "ReportServer at {} is not healthy",
            bridge.server_address()
        )?;
    }

    if healthy {
        Ok(())
    } else {
        Err(BridgeError::Unhealthy(bridge.server_address().to_string()))
    }
}

pub async fn run_templates(bridge: &ReportBridge, out: &mut dyn Write, json: bool) -> Result<()> {
    let templates = bridge.available_report_templates().await;
    info!("{} templates available", templates.len());

    if json {
        writeln!(out, "{}", output::templates_json(&templates))?;
    } else if templates.is_empty() {
        writeln!(out, "No report templates available")?;
    } else {
        writeln!(out, "{}", output::templates_table(&templates))?;
    }

    Ok(())
}

/// Generate a report and write it to disk, returning the path written
pub async fn run_generate(
    bridge: &ReportBridge,
    args: &GenerateArgs,
    out: &mut dyn Write,
    json: bool,
) -> Result<PathBuf> {
    let request = ReportRequest::new(&args.template_id, &args.output_format)
        .with_parameters(parse_params(&args.params)?)
        .include_charts(args.include_charts);

    let document = bridge
        .generate_report(&request)
        .await
        .into_document()
        .map_err(|message| {
            warn!("Report '{}' failed: {}", args.template_id, message);
            BridgeError::ReportFailed(message)
        })?;

    let path = resolve_output_path(
        args.output.as_deref(),
        &document.filename,
        &args.template_id,
        &args.output_format,
    );

    tokio::fs::write(&path, &document.data).await?;

    info!(
        "Wrote {} bytes ({}) to {}",
        document.data.len(),
        document.mime_type,
        path.display()
    );
    if json {
        writeln!(
            out,
            "{}",
            output::report_json(&path, document.data.len(), &document.mime_type)
        )?;
    } else {
        writeln!(
            out,
            "Wrote {} ({} bytes, {})",
            path.display(),
            document.data.len(),
            document.mime_type
        )?;
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_param() {
        assert_eq!(
            parse_param("month=3").unwrap(),
            ("month".to_string(), "3".to_string())
        );
        assert_eq!(
            parse_param("filter=a=b").unwrap(),
            ("filter".to_string(), "a=b".to_string())
        );
        assert_eq!(
            parse_param("note=").unwrap(),
            ("note".to_string(), String::new())
        );
        assert!(parse_param("month").is_err());
        assert!(parse_param("=3").is_err());
    }

    #[test]
    fn test_parse_params_last_wins() {
        let params = parse_params(&["month=3".to_string(), "month=4".to_string()]).unwrap();
        assert_eq!(params.len(), 1);
        assert_eq!(params["month"], "4");
    }

    #[test]
    fn test_resolve_output_path() {
        assert_eq!(
            resolve_output_path(Some(Path::new("/tmp/x.pdf")), "invoice.pdf", "invoice", "PDF"),
            PathBuf::from("/tmp/x.pdf")
        );
        assert_eq!(
            resolve_output_path(None, "invoice.pdf", "invoice", "PDF"),
            PathBuf::from("invoice.pdf")
        );
        assert_eq!(
            resolve_output_path(None, "../../etc/passwd", "invoice", "PDF"),
            PathBuf::from("passwd")
        );
        assert_eq!(
            resolve_output_path(None, "", "invoice", "PDF"),
            PathBuf::from("invoice.pdf")
        );
    }
}
