//! Input validation for profile identifiers.
//!
//! Profile URLs and ORCID iDs come from configuration and are interpolated
//! into request URLs, so they are checked once at startup.

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Validation error types
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid ORCID iD: {0}")]
    InvalidOrcidId(String),

    #[error("ORCID iD checksum mismatch: {0}")]
    OrcidChecksum(String),
}

fn orcid_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[0-9]{4}-[0-9]{4}-[0-9]{4}-[0-9]{3}[0-9X]$").expect("ORCID pattern is a valid regex")
    })
}

/// Validate an http(s) URL.
///
/// Returns the trimmed URL on success.
pub fn validate_url(url: &str) -> Result<String, ValidationError> {
    let url = url.trim();

    if url.is_empty() {
        return Err(ValidationError::InvalidUrl("empty URL".to_string()));
    }

    let parsed =
        url::Url::parse(url).map_err(|e| ValidationError::InvalidUrl(format!("{}: {}", url, e)))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ValidationError::InvalidUrl(format!(
                "unsupported scheme '{}' in {}",
                other, url
            )))
        }
    }

    if parsed.host_str().is_none() {
        return Err(ValidationError::InvalidUrl(format!("missing host in {}", url)));
    }

    Ok(url.to_string())
}

/// Validate an ORCID iD of the form `0000-0002-1825-0097`.
///
/// The last character is an ISO 7064 11,2 check digit (`X` stands for 10).
pub fn validate_orcid_id(id: &str) -> Result<String, ValidationError> {
    let id = id.trim();

    if !orcid_pattern().is_match(id) {
        return Err(ValidationError::InvalidOrcidId(id.to_string()));
    }

    let digits: Vec<char> = id.chars().filter(|c| *c != '-').collect();
    let (body, check) = digits.split_at(15);

    let total = body
        .iter()
        .filter_map(|c| c.to_digit(10))
        .fold(0u32, |acc, d| (acc + d) * 2);
    let expected = match (12 - total % 11) % 11 {
        10 => 'X',
        n => char::from_digit(n, 10).unwrap_or('?'),
    };

    if check[0] != expected {
        return Err(ValidationError::OrcidChecksum(id.to_string()));
    }

    Ok(id.to_string())
}
