use crate::utils::error::{CourseError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: impl ToString, reason: impl Into<String>) -> CourseError {
    CourseError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// The course service base URL. Item URLs are built as `{base}/{id}`, so a
/// query string or fragment on the base would end up in the wrong place.
pub fn validate_endpoint(field: &str, endpoint: &str) -> Result<()> {
    if endpoint.trim().is_empty() {
        return Err(invalid(field, endpoint, "URL cannot be empty"));
    }

    let url = Url::parse(endpoint)
        .map_err(|e| invalid(field, endpoint, format!("Invalid URL format: {}", e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(
            field,
            endpoint,
            format!("Unsupported URL scheme: {}", url.scheme()),
        ));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid(
            field,
            endpoint,
            "Endpoint must not carry a query string or fragment",
        ));
    }
    Ok(())
}

pub fn validate_positive_number(field: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(invalid(
            field,
            value,
            format!("Value must be at least {}", min_value),
        ));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(invalid(
            field,
            value,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_endpoint() {
        assert!(validate_endpoint("api_endpoint", "https://example.com/api/courses").is_ok());
        assert!(validate_endpoint("api_endpoint", "http://localhost:8080/api/courses/").is_ok());
        assert!(validate_endpoint("api_endpoint", "  ").is_err());
        assert!(validate_endpoint("api_endpoint", "not a url").is_err());
        assert!(validate_endpoint("api_endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_endpoint_with_query_is_rejected() {
        let err = validate_endpoint("api_endpoint", "http://localhost/api/courses?page=1")
            .unwrap_err();
        match err {
            CourseError::InvalidConfigValueError { field, reason, .. } => {
                assert_eq!(field, "api_endpoint");
                assert!(reason.contains("query string"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(validate_endpoint("api_endpoint", "http://localhost/api/courses#top").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("timeout_seconds", 30, 1).is_ok());
        assert!(validate_positive_number("timeout_seconds", 0, 1).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("notification_ms", 5000, 500, 60_000).is_ok());
        assert!(validate_range("notification_ms", 500, 500, 60_000).is_ok());
        assert!(validate_range("notification_ms", 100, 500, 60_000).is_err());
    }
}
