//! Validation error to HTTP error conversion.

use validator::{ValidationErrors, ValidationErrorsKind};

use crate::handler::response::ValidationErrorDetail;
use crate::handler::{Error, ErrorKind};

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        let details = flatten_validation_errors(&errors);

        let summary = details
            .iter()
            .map(|detail| detail.field.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        ErrorKind::BadRequest
            .with_message("Request validation failed.")
            .with_context(format!("invalid fields: {summary}"))
            .with_validation(details)
    }
}

/// Flattens nested validation errors into field-level details.
pub(crate) fn flatten_validation_errors(errors: &ValidationErrors) -> Vec<ValidationErrorDetail> {
    let mut details = Vec::new();
    collect_validation_errors(errors, "", &mut details);
    details
}

fn collect_validation_errors(
    errors: &ValidationErrors,
    prefix: &str,
    details: &mut Vec<ValidationErrorDetail>,
) {
    for (field, kind) in errors.errors() {
        let field_path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    details.push(ValidationErrorDetail {
                        field: field_path.clone(),
                        code: error.code.to_string(),
                        message: error
                            .message
                            .as_ref()
                            .map(ToString::to_string)
                            .unwrap_or_else(|| format!("validation failed: {}", error.code)),
                        params: if error.params.is_empty() {
                            None
                        } else {
                            Some(
                                error
                                    .params
                                    .iter()
                                    .map(|(key, value)| (key.to_string(), value.clone()))
                                    .collect(),
                            )
                        },
                    });
                }
            }
            ValidationErrorsKind::Struct(nested) => {
                collect_validation_errors(nested, &field_path, details);
            }
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_validation_errors(
                        nested,
                        &format!("{field_path}[{index}]"),
                        details,
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;

    #[derive(Debug, Validate)]
    struct Sample {
        #[validate(length(min = 3, max = 10))]
        name: String,
        #[validate(range(min = 1, max = 5))]
        level: u32,
    }

    #[test]
    fn test_flatten_reports_each_field() {
        let sample = Sample {
            name: "ab".into(),
            level: 9,
        };

        let errors = sample.validate().unwrap_err();
        let details = flatten_validation_errors(&errors);

        let fields: Vec<_> = details.iter().map(|d| d.field.as_str()).collect();
        assert!(fields.contains(&"name"));
        assert!(fields.contains(&"level"));
    }

    #[test]
    fn test_error_conversion_is_bad_request() {
        let sample = Sample {
            name: "ab".into(),
            level: 9,
        };

        let error: Error = sample.validate().unwrap_err().into();
        assert_eq!(error.kind(), ErrorKind::BadRequest);
    }
}
