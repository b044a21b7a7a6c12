//! Timeline statistics

use crate::models::MergedDocument;
use ffx_common::timecode::format_hms;
use ffx_common::ContentType;
use serde::Serialize;
use std::collections::BTreeMap;

/// Event counts by severity band
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeverityBands {
    /// Severity 1-3
    pub low: usize,
    /// Severity 4-6
    pub medium: usize,
    /// Severity 7-10
    pub high: usize,
}

/// Summary of a merged timeline
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimelineStats {
    pub total: usize,
    pub by_type: BTreeMap<ContentType, usize>,
    pub by_severity: SeverityBands,
    /// Sum of event durations in seconds
    pub total_filter_secs: u64,
    /// `total_filter_secs` as `HH:MM:SS`
    pub total_filter_time: String,
    pub verified: usize,
    pub unverified: usize,
}

/// Compute statistics for a merged document
pub fn timeline_stats(document: &MergedDocument) -> TimelineStats {
    let mut stats = TimelineStats::default();

    for event in &document.events {
        stats.total += 1;
        *stats.by_type.entry(event.content_type).or_insert(0) += 1;

        match event.severity {
            0..=3 => stats.by_severity.low += 1,
            4..=6 => stats.by_severity.medium += 1,
            _ => stats.by_severity.high += 1,
        }

        // Inverted ranges contribute nothing
        stats.total_filter_secs += event.end.saturating_sub(event.start);

        if event.verified {
            stats.verified += 1;
        } else {
            stats.unverified += 1;
        }
    }

    stats.total_filter_time = format_hms(stats.total_filter_secs);
    stats
}
