use domain_types::errors;
use error_stack::report;

type Error = error_stack::Report<errors::ConnectorError>;

pub fn missing_field_err(
    message: &'static str,
) -> Box<dyn Fn() -> error_stack::Report<errors::ConnectorError> + 'static> {
    Box::new(move || {
        errors::ConnectorError::MissingRequiredField {
            field_name: message,
        }
        .into()
    })
}

/// Checks that `value` can be placed in a url path segment without escaping.
pub fn validate_url_safe_identifier(
    field_name: &'static str,
    value: &str,
    max_length: usize,
) -> Result<(), Error> {
    if value.is_empty() {
        return Err(missing_field_err(field_name)());
    }

    if value.len() > max_length {
        return Err(report!(errors::ConnectorError::InvalidRequestField {
            field_name,
            reason: format!("must be at most {max_length} characters"),
        }));
    }

    match value
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '~')))
    {
        Some(invalid) => Err(report!(errors::ConnectorError::InvalidRequestField {
            field_name,
            reason: format!("character `{invalid}` is not url safe"),
        })),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_generated_style_ids() {
        assert!(validate_url_safe_identifier("id", "TXN_1712345678901_a1B2c3", 38).is_ok());
    }

    #[test]
    fn rejects_empty_long_and_unsafe_ids() {
        let empty = validate_url_safe_identifier("id", "", 38).unwrap_err();
        assert!(matches!(
            empty.current_context(),
            errors::ConnectorError::MissingRequiredField { field_name: "id" }
        ));

        assert!(validate_url_safe_identifier("id", &"a".repeat(39), 38).is_err());
        assert!(validate_url_safe_identifier("id", "TXN/1", 38).is_err());
        assert!(validate_url_safe_identifier("id", "TXN 1", 38).is_err());
        assert!(validate_url_safe_identifier("id", "TXN?x=1", 38).is_err());
    }
}
