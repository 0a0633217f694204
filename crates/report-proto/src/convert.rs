//! Conversions between wire messages and domain records
//!
//! Records cross the wire unchanged in both directions. The one shape the
//! generated structs cannot rule out is a `ReportResult` without an
//! `outcome`; decoding reports it as `ServiceError::InvalidResponse`.

use crate::report::v1 as wire;
use crate::report::v1::report_result::Outcome;
use report_interface::{
    ParameterDefinition, ReportDocument, ReportRequest, ReportResult, ReportTemplate,
    ServiceError,
};

impl From<&ReportRequest> for wire::GenerateReportRequest {
    fn from(request: &ReportRequest) -> Self {
        Self {
            template_id: request.template_id.clone(),
            parameters: request.parameters.clone(),
            output_format: request.output_format.clone(),
            include_charts: request.include_charts,
        }
    }
}

impl From<wire::GenerateReportRequest> for ReportRequest {
    fn from(request: wire::GenerateReportRequest) -> Self {
        Self {
            template_id: request.template_id,
            parameters: request.parameters,
            output_format: request.output_format,
            include_charts: request.include_charts,
        }
    }
}

impl From<ReportResult> for wire::ReportResult {
    fn from(result: ReportResult) -> Self {
        let outcome = match result {
            ReportResult::Success(doc) => Outcome::Document(wire::ReportDocument {
                data: doc.data,
                mime_type: doc.mime_type,
                filename: doc.filename,
            }),
            ReportResult::Failure { message } => Outcome::Failure(wire::ReportFailure { message }),
        };

        Self {
            outcome: Some(outcome),
        }
    }
}

impl TryFrom<wire::ReportResult> for ReportResult {
    type Error = ServiceError;

    fn try_from(result: wire::ReportResult) -> Result<Self, Self::Error> {
        match result.outcome {
            Some(Outcome::Document(doc)) => Ok(ReportResult::Success(ReportDocument {
                data: doc.data,
                mime_type: doc.mime_type,
                filename: doc.filename,
            })),
            Some(Outcome::Failure(failure)) => Ok(ReportResult::Failure {
                message: failure.message,
            }),
            None => Err(ServiceError::InvalidResponse(
                "report result carries neither a document nor a failure".to_string(),
            )),
        }
    }
}

impl From<ParameterDefinition> for wire::ParameterDefinition {
    fn from(param: ParameterDefinition) -> Self {
        Self {
            name: param.name,
            description: param.description,
            r#type: param.param_type,
            required: param.required,
            default_value: param.default_value,
        }
    }
}

impl From<wire::ParameterDefinition> for ParameterDefinition {
    fn from(param: wire::ParameterDefinition) -> Self {
        Self {
            name: param.name,
            description: param.description,
            param_type: param.r#type,
            required: param.required,
            default_value: param.default_value,
        }
    }
}

impl From<ReportTemplate> for wire::ReportTemplate {
    fn from(template: ReportTemplate) -> Self {
        Self {
            id: template.id,
            name: template.name,
            description: template.description,
            required_parameters: template
                .required_parameters
                .into_iter()
                .map(Into::into)
                .collect(),
            supported_formats: template.supported_formats,
        }
    }
}

impl From<wire::ReportTemplate> for ReportTemplate {
    fn from(template: wire::ReportTemplate) -> Self {
        Self {
            id: template.id,
            name: template.name,
            description: template.description,
            required_parameters: template
                .required_parameters
                .into_iter()
                .map(Into::into)
                .collect(),
            supported_formats: template.supported_formats,
        }
    }
}

impl From<Vec<ReportTemplate>> for wire::ListTemplatesResponse {
    fn from(templates: Vec<ReportTemplate>) -> Self {
        Self {
            templates: templates.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<wire::ListTemplatesResponse> for Vec<ReportTemplate> {
    fn from(response: wire::ListTemplatesResponse) -> Self {
        response.templates.into_iter().map(Into::into).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_template() -> ReportTemplate {
        ReportTemplate::new("invoice", "Invoice")
            .with_description("Monthly invoice")
            .with_parameter(
                ParameterDefinition::new("month", "number")
                    .with_description("Month of year")
                    .required(true),
            )
            .with_parameter(
                ParameterDefinition::new("currency", "string").with_default_value("EUR"),
            )
            .with_format("PDF")
            .with_format("HTML")
    }

    #[test]
    fn test_template_survives_the_wire() {
        let template = sample_template();
        let encoded = wire::ReportTemplate::from(template.clone());

        assert_eq!(encoded.required_parameters[0].r#type, "number");
        assert_eq!(encoded.required_parameters[1].description, None);

        let decoded = ReportTemplate::from(encoded);
        assert_eq!(decoded, template);
    }

    #[test]
    fn test_result_variants_map_to_outcome() {
        let ok = wire::ReportResult::from(ReportResult::success(
            vec![7u8; 10],
            "application/pdf",
            "x.pdf",
        ));
        assert!(matches!(ok.outcome, Some(Outcome::Document(ref d)) if d.data.len() == 10));

        let failed = wire::ReportResult::from(ReportResult::failure("boom"));
        assert_eq!(
            ReportResult::try_from(failed).unwrap(),
            ReportResult::failure("boom")
        );
    }

    #[test]
    fn test_missing_outcome_is_rejected() {
        let err = ReportResult::try_from(wire::ReportResult { outcome: None }).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidResponse(_)));
    }

    #[test]
    fn test_blank_identifiers_pass_through() {
        let mut encoded = wire::ReportTemplate::from(sample_template());
        encoded.id.clear();
        encoded.required_parameters[0].name = String::new();

        let decoded = ReportTemplate::from(encoded);
        assert_eq!(decoded.id, "");
        assert_eq!(decoded.required_parameters[0].name, "");
        assert_eq!(decoded.required_parameters.len(), 2);
    }

    #[test]
    fn test_request_keeps_parameters_as_strings() {
        let request = ReportRequest::new("invoice", "PDF")
            .param("month", "3")
            .param("from", "2024-01-01")
            .include_charts(true);

        let encoded = wire::GenerateReportRequest::from(&request);
        assert_eq!(encoded.parameters["month"], "3");
        assert!(encoded.include_charts);
        assert_eq!(ReportRequest::from(encoded), request);
    }

    #[test]
    fn test_template_list_order() {
        let templates = vec![
            ReportTemplate::new("", "Draft"),
            ReportTemplate::new("invoice", "Invoice"),
            ReportTemplate::default(),
            ReportTemplate::new("summary", "Summary"),
        ];
        let response = wire::ListTemplatesResponse::from(templates.clone());
        let decoded: Vec<ReportTemplate> = response.into();
        assert_eq!(decoded, templates);
    }
}
