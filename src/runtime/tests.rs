#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;

#[test]
fn test_errors_accumulate_and_merge() {
    let mut err = ValidationErrors::new();
    assert!(err.is_empty());
    err.push(ValidationError::missing_attribute("body", "name"));

    let mut nested = ValidationErrors::new();
    nested.push(ValidationError::invalid_range("body.child.age", &-1i64, 0.0, true));
    nested.push(ValidationError::invalid_pattern("body.child.code", "x!", "^[a-z]+$"));
    err.merge(nested);

    assert_eq!(err.len(), 3);
    let paths: Vec<&str> = err.iter().map(ValidationError::path).collect();
    assert_eq!(paths, vec!["body", "body.child.age", "body.child.code"]);
    assert!(err.into_result().is_err());
}

#[test]
fn test_empty_aggregate_is_ok() {
    assert_eq!(ValidationErrors::new().into_result(), Ok(()));
}

#[test]
fn test_error_messages() {
    let e = ValidationError::invalid_enum_value("body.kind", "blue", &["red", "green"]);
    assert_eq!(
        e.to_string(),
        "body.kind: value \"blue\" must be one of \"red\", \"green\""
    );

    let e = ValidationError::invalid_length("body.name", "ab", 2, 3, true);
    assert_eq!(
        e.to_string(),
        "body.name: length of \"ab\" is 2, must be greater than or equal to 3"
    );

    let e = ValidationError::invalid_range("body.count", &11i64, 10.0, false);
    assert_eq!(
        e.to_string(),
        "body.count: value 11 must be less than or equal to 10"
    );
}

#[test]
fn test_aggregate_display_lists_every_error() {
    let mut err = ValidationErrors::new();
    err.push(ValidationError::missing_attribute("body", "a"));
    err.push(ValidationError::missing_attribute("body", "b"));
    let text = err.to_string();
    assert!(text.starts_with("2 validation errors:"));
    assert!(text.contains("missing required attribute \"a\""));
    assert!(text.contains("missing required attribute \"b\""));
}

#[test]
fn test_format_names_round_trip() {
    for format in Format::ALL {
        assert_eq!(format.name().parse::<Format>().unwrap(), format);
    }
    assert_eq!(
        "zip-code".parse::<Format>(),
        Err(UnknownFormat("zip-code".to_string()))
    );
}

#[test]
fn test_format_serde_names() {
    let f: Format = serde_json::from_value(serde_json::json!("date-time")).unwrap();
    assert_eq!(f, Format::DateTime);
    assert_eq!(serde_json::to_value(Format::Rfc1123).unwrap(), "rfc1123");
}

#[test]
fn test_validate_format_accepts_valid_values() {
    let cases = [
        (Format::Date, "2024-02-29"),
        (Format::DateTime, "2024-02-29T10:00:00Z"),
        (Format::Uuid, "67e55044-10b1-426f-9247-bb680e5fe0c8"),
        (Format::Email, "alice@example.com"),
        (Format::Hostname, "api.example-1.com"),
        (Format::Ipv4, "192.168.0.1"),
        (Format::Ipv6, "::1"),
        (Format::Ip, "10.0.0.1"),
        (Format::Uri, "https://example.com/a?b=c"),
        (Format::Mac, "01:23:45:67:89:ab"),
        (Format::Cidr, "10.0.0.0/8"),
        (Format::Regexp, "^[a-z]+$"),
        (Format::Json, "{\"a\": [1, 2]}"),
        (Format::Rfc1123, "Mon, 02 Jan 2006 15:04:05 GMT"),
    ];
    for (format, value) in cases {
        assert!(
            validate_format(format, value).is_ok(),
            "{format} should accept {value:?}"
        );
    }
}

#[test]
fn test_validate_format_rejects_invalid_values() {
    let cases = [
        (Format::Date, "2023-02-29"),
        (Format::DateTime, "yesterday"),
        (Format::Uuid, "not-a-uuid"),
        (Format::Email, "no-at-sign"),
        (Format::Hostname, "-bad-.com"),
        (Format::Ipv4, "256.1.1.1"),
        (Format::Ipv6, "192.168.0.1"),
        (Format::Ip, "localhost"),
        (Format::Uri, "not a uri"),
        (Format::Mac, "01:23:45"),
        (Format::Cidr, "10.0.0.0/33"),
        (Format::Regexp, "(unclosed"),
        (Format::Json, "{"),
        (Format::Rfc1123, "2006-01-02"),
    ];
    for (format, value) in cases {
        assert!(
            validate_format(format, value).is_err(),
            "{format} should reject {value:?}"
        );
    }
}

#[test]
fn test_validate_pattern_uses_cache() {
    assert!(validate_pattern("^[a-z]+$", "abc"));
    assert!(!validate_pattern("^[a-z]+$", "ABC"));
    // Same pattern again hits the cache.
    assert!(validate_pattern("^[a-z]+$", "xyz"));
}

#[test]
fn test_invalid_pattern_never_matches() {
    assert!(!validate_pattern("(unclosed", "anything"));
}
