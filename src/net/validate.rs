//! Input validation performed before any request leaves the client.

use std::sync::LazyLock;

use regex::Regex;

use super::error::RequestFailure;

/// UniProt accession format (6 or 10 characters).
static ACCESSION: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"^(?:[OPQ][0-9][A-Z0-9]{3}[0-9]|[A-NR-Z][0-9](?:[A-Z][A-Z0-9]{2}[0-9]){1,2})$",
    )
    .ok()
});

/// Longest accepted accession.
const MAX_ACCESSION_LEN: usize = 10;

fn required<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str, RequestFailure> {
    value.ok_or_else(|| {
        RequestFailure::Validation(format!("Missing required parameter: {name}"))
    })
}

/// Validate a free-text search query, returning it trimmed.
///
/// # Errors
///
/// [`RequestFailure::Validation`] when the query is missing or blank.
pub fn validate_query(query: Option<&str>) -> Result<&str, RequestFailure> {
    let query = required(query, "query")?.trim();
    if query.is_empty() {
        return Err(RequestFailure::Validation(
            "Search query cannot be empty".to_owned(),
        ));
    }
    Ok(query)
}

/// Validate a UniProt accession, returning it trimmed and upper-cased.
///
/// # Errors
///
/// [`RequestFailure::Validation`] when the accession is missing, blank or
/// not a well-formed UniProt accession.
pub fn validate_identifier(
    identifier: Option<&str>,
) -> Result<String, RequestFailure> {
    let id = required(identifier, "uniprot_id")?.trim();
    if id.is_empty() {
        return Err(RequestFailure::Validation(
            "UniProt ID cannot be empty".to_owned(),
        ));
    }

    let normalized = id.to_ascii_uppercase();
    let well_formed = normalized.len() <= MAX_ACCESSION_LEN
        && normalized.chars().all(|c| c.is_ascii_alphanumeric())
        && ACCESSION
            .as_ref()
            .is_some_and(|re| re.is_match(&normalized));
    if !well_formed {
        return Err(RequestFailure::Validation(format!(
            "Invalid UniProt ID format: {id}"
        )));
    }
    Ok(normalized)
}
