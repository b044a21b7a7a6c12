//! Quality Scorer - Overall Quality Score Calculation
//!
//! Fixed linear rubric over a finished document:
//! coverage (0.3), type variety (0.2), mean confidence (0.3) and
//! verification rate (0.2).

use crate::models::MergedDocument;
use crate::round2;
use std::collections::HashSet;

const COVERAGE_WEIGHT: f64 = 0.3;
const VARIETY_WEIGHT: f64 = 0.2;
const CONFIDENCE_WEIGHT: f64 = 0.3;
const VERIFICATION_WEIGHT: f64 = 0.2;

/// Event count at which coverage saturates
const COVERAGE_TARGET: f64 = 20.0;

/// Distinct types at which variety saturates
const VARIETY_TARGET: f64 = 5.0;

/// Calculate the quality score (0.0-1.0, 2 decimals) of a merged document
///
/// Documents without events score 0.0.
pub fn quality_score(document: &MergedDocument) -> f64 {
    let events = &document.events;
    if events.is_empty() {
        return 0.0;
    }
    let count = events.len() as f64;

    let coverage = (count / COVERAGE_TARGET).min(1.0);

    let distinct_types: HashSet<_> = events.iter().map(|e| e.content_type).collect();
    let variety = (distinct_types.len() as f64 / VARIETY_TARGET).min(1.0);

    let mean_confidence = (events.iter().map(|e| e.confidence).sum::<f64>() / count).clamp(0.0, 1.0);

    let verified = events.iter().filter(|e| e.verified).count() as f64;
    let verification = verified / count;

    round2(
        COVERAGE_WEIGHT * coverage
            + VARIETY_WEIGHT * variety
            + CONFIDENCE_WEIGHT * mean_confidence
            + VERIFICATION_WEIGHT * verification,
    )
}
