//! Value records exchanged across the report service boundary
//!
//! Every record here is plain data: it is copied across the wire, handed to
//! the caller and never retained by the bridge.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single parameter declared by a report template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDefinition {
    /// Identifier the caller uses as a key in the parameter map
    pub name: String,

    /// Human readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Open type tag such as "string", "number" or "date"
    #[serde(rename = "type")]
    pub param_type: String,

    /// Whether the caller must supply a value
    #[serde(default)]
    pub required: bool,

    /// Value used by the server when an optional parameter is omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl ParameterDefinition {
    /// Create an optional parameter with no description or default
    pub fn new(name: impl Into<String>, param_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            param_type: param_type.into(),
            required: false,
            default_value: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// The default value, but only when the parameter is optional
    pub fn effective_default(&self) -> Option<&str> {
        if self.required {
            None
        } else {
            self.default_value.as_deref()
        }
    }
}

/// A parameterized report definition published by the server
///
/// Both sequences are always present and keep declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReportTemplate {
    pub id: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub required_parameters: Vec<ParameterDefinition>,

    #[serde(default)]
    pub supported_formats: Vec<String>,
}

impl ReportTemplate {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_parameter(mut self, parameter: ParameterDefinition) -> Self {
        self.add_required_parameter(parameter);
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.add_supported_format(format);
        self
    }

    /// Append a parameter after those already declared
    pub fn add_required_parameter(&mut self, parameter: ParameterDefinition) {
        self.required_parameters.push(parameter);
    }

    /// Append an output format after those already declared
    pub fn add_supported_format(&mut self, format: impl Into<String>) {
        self.supported_formats.push(format.into());
    }

    /// Look up a declared parameter by name
    pub fn parameter(&self, name: &str) -> Option<&ParameterDefinition> {
        self.required_parameters.iter().find(|p| p.name == name)
    }

    /// Format tags are compared ASCII case-insensitively ("pdf" matches "PDF")
    pub fn supports_format(&self, format: &str) -> bool {
        self.supported_formats
            .iter()
            .any(|f| f.eq_ignore_ascii_case(format))
    }

    /// Names of required parameters that have no entry in `parameters`
    ///
    /// Advisory only. The server remains the authority on validation.
    pub fn missing_parameters(&self, parameters: &HashMap<String, String>) -> Vec<&str> {
        self.required_parameters
            .iter()
            .filter(|p| p.required && !parameters.contains_key(&p.name))
            .map(|p| p.name.as_str())
            .collect()
    }
}

/// Rendered report content returned on success
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDocument {
    pub data: Vec<u8>,
    pub mime_type: String,
    pub filename: String,
}

/// Outcome of a report generation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ReportResult {
    Success(ReportDocument),
    Failure { message: String },
}

impl ReportResult {
    pub fn success(
        data: impl Into<Vec<u8>>,
        mime_type: impl Into<String>,
        filename: impl Into<String>,
    ) -> Self {
        ReportResult::Success(ReportDocument {
            data: data.into(),
            mime_type: mime_type.into(),
            filename: filename.into(),
        })
    }

    pub fn failure(message: impl Into<String>) -> Self {
        ReportResult::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ReportResult::Success(_))
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ReportResult::Failure { message } => Some(message),
            ReportResult::Success(_) => None,
        }
    }

    pub fn document(&self) -> Option<&ReportDocument> {
        match self {
            ReportResult::Success(doc) => Some(doc),
            ReportResult::Failure { .. } => None,
        }
    }

    pub fn report_data(&self) -> Option<&[u8]> {
        self.document().map(|d| d.data.as_slice())
    }

    pub fn report_mime_type(&self) -> Option<&str> {
        self.document().map(|d| d.mime_type.as_str())
    }

    pub fn report_filename(&self) -> Option<&str> {
        self.document().map(|d| d.filename.as_str())
    }

    /// Consume the result, yielding the document or the failure message
    pub fn into_document(self) -> Result<ReportDocument, String> {
        match self {
            ReportResult::Success(doc) => Ok(doc),
            ReportResult::Failure { message } => Err(message),
        }
    }
}

/// Arguments of a single `generate_report` call
///
/// Parameter values always travel as strings regardless of the declared
/// parameter type.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReportRequest {
    pub template_id: String,
    #[serde(default)]
    pub parameters: HashMap<String, String>,
    pub output_format: String,
    #[serde(default)]
    pub include_charts: bool,
}

impl ReportRequest {
    pub fn new(template_id: impl Into<String>, output_format: impl Into<String>) -> Self {
        Self {
            template_id: template_id.into(),
            output_format: output_format.into(),
            ..Default::default()
        }
    }

    /// Set a single parameter, replacing any earlier value for the key
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    pub fn with_parameters(mut self, parameters: HashMap<String, String>) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn include_charts(mut self, include: bool) -> Self {
        self.include_charts = include;
        self
    }
}
