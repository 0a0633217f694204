/*!
 * Human and machine readable rendering of bridge answers
 */

use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};
use report_interface::{ParameterDefinition, ReportTemplate};
use serde_json::json;
use std::path::Path;

/// Create a styled data table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn header(title: &str) -> Cell {
    Cell::new(title)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// One row per template: id, name, formats and declared parameters
pub fn templates_table(templates: &[ReportTemplate]) -> Table {
    let mut table = create_table();
    table.set_header(vec![
        header("ID"),
        header("Name"),
        header("Formats"),
        header("Parameters"),
    ]);

    for template in templates {
        let params: Vec<String> = template
            .required_parameters
            .iter()
            .map(describe_parameter)
            .collect();

        table.add_row(vec![
            Cell::new(&template.id).add_attribute(Attribute::Bold),
            Cell::new(&template.name),
            Cell::new(template.supported_formats.join(", ")),
            Cell::new(params.join("\n")).fg(Color::DarkGrey),
        ]);
    }

    table
}

/// `name: type`, marked `*` when required or showing the default otherwise
pub fn describe_parameter(param: &ParameterDefinition) -> String {
    match (param.required, param.effective_default()) {
        (true, _) => format!("{}: {} *", param.name, param.param_type),
        (false, Some(default)) => format!("{}: {} = {}", param.name, param.param_type, default),
        (false, None) => format!("{}: {}", param.name, param.param_type),
    }
}

pub fn templates_json(templates: &[ReportTemplate]) -> serde_json::Value {
    json!({ "templates": templates })
}

pub fn health_json(server_address: &str, connected: bool, healthy: bool) -> serde_json::Value {
    json!({
        "server": server_address,
        "connected": connected,
        "healthy": healthy,
    })
}

pub fn report_json(path: &Path, bytes: usize, mime_type: &str) -> serde_json::Value {
    json!({
        "path": path.display().to_string(),
        "bytes": bytes,
        "mime_type": mime_type,
    })
}
