//! Source Document Validator - Schema Checks
//!
//! Strict checks against the published timestamp file schema. Validation
//! is advisory: reconciliation accepts partially populated sources, and the
//! report only tells a curator which sources need fixing.

use crate::models::{SourceDocument, SourceEvent};
use ffx_common::timecode::parse_hms;
use ffx_common::ContentType;
use serde::Serialize;

/// Outcome of validating a document or a single event
///
/// Serializes as `{"valid": bool, "errors": [...]}`; `valid` is true exactly
/// when `errors` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

/// Strict two-digit `HH:MM:SS`
fn is_strict_hms(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 8
        && bytes[2] == b':'
        && bytes[5] == b':'
        && [0, 1, 3, 4, 6, 7].iter().all(|&i| bytes[i].is_ascii_digit())
}

/// `tt` followed by one or more digits
fn is_imdb_id(text: &str) -> bool {
    text.strip_prefix("tt")
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Validate a single source event
pub fn validate_event(event: &SourceEvent) -> ValidationReport {
    let mut errors = Vec::new();

    let start = present(&event.start);
    let end = present(&event.end);

    if start.is_none() {
        errors.push("Missing start time".to_string());
    }
    if end.is_none() {
        errors.push("Missing end time".to_string());
    }
    if present(&event.content_type).is_none() {
        errors.push("Missing type".to_string());
    }
    if event.severity.is_none() {
        errors.push("Missing severity".to_string());
    }

    if let Some(start) = start {
        if !is_strict_hms(start) {
            errors.push("Invalid start time format (expected HH:MM:SS)".to_string());
        }
    }
    if let Some(end) = end {
        if !is_strict_hms(end) {
            errors.push("Invalid end time format (expected HH:MM:SS)".to_string());
        }
    }

    if let Some(label) = present(&event.content_type) {
        let known = label
            .parse::<ContentType>()
            .map(|t| t.is_known())
            .unwrap_or(false);
        if !known {
            let names: Vec<&str> = ContentType::KNOWN.iter().map(ContentType::as_str).collect();
            errors.push(format!(
                "Invalid type: {}. Must be one of: {}",
                label,
                names.join(", ")
            ));
        }
    }

    if let Some(severity) = event.severity {
        if !(1..=10).contains(&severity) {
            errors.push("Severity must be integer between 1-10".to_string());
        }
    }

    if let Some(confidence) = event.confidence {
        if !(0.0..=1.0).contains(&confidence) {
            errors.push("Confidence must be between 0 and 1".to_string());
        }
    }

    if let (Some(start), Some(end)) = (start, end) {
        if let (Ok(start), Ok(end)) = (parse_hms(start), parse_hms(end)) {
            if end <= start {
                errors.push("End time must be after start time".to_string());
            }
        }
    }

    ValidationReport::from_errors(errors)
}

/// Validate a whole source document
///
/// Event errors are reported as `Timestamp {index}: {errors}`.
pub fn validate_document(document: &SourceDocument) -> ValidationReport {
    let mut errors = Vec::new();

    if present(&document.title).is_none() {
        errors.push("Missing title".to_string());
    }
    match present(&document.imdb_id) {
        None => errors.push("Missing imdb_id".to_string()),
        Some(id) if !is_imdb_id(id) => {
            errors.push("Invalid imdb_id format (expected tt followed by numbers)".to_string())
        }
        Some(_) => {}
    }

    for (index, event) in document.timestamps.iter().enumerate() {
        let report = validate_event(event);
        if !report.is_valid() {
            errors.push(format!("Timestamp {}: {}", index, report.errors.join(", ")));
        }
    }

    ValidationReport::from_errors(errors)
}
