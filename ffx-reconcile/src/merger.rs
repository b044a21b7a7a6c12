//! Event Merger - Agreement-Weighted Cluster Collapse
//!
//! Each cluster becomes one event. Times and severity are integer means of
//! the members; confidence grows with the number of distinct sources that
//! reported the scene and is capped at 0.95.

use crate::grouper::Cluster;
use crate::models::MergedEvent;
use crate::round2;
use tracing::debug;

/// Confidence of an event only one source reported
pub const SINGLE_SOURCE_CONFIDENCE: f64 = 0.5;

/// Confidence added per distinct agreeing source
pub const CONFIDENCE_PER_SOURCE: f64 = 0.15;

/// Upper bound on merged confidence
pub const MAX_CONFIDENCE: f64 = 0.95;

/// Distinct sources needed for an event to count as verified
pub const VERIFIED_MIN_SOURCES: usize = 3;

/// Maximum descriptions kept in a merged description
pub const MAX_DESCRIPTIONS: usize = 3;

/// Characters kept from each description before dedup
pub const DESCRIPTION_MAX_CHARS: usize = 100;

/// Separator between merged descriptions
pub const DESCRIPTION_SEPARATOR: &str = " | ";

/// Confidence for `distinct_sources` agreeing sources
pub fn agreement_confidence(distinct_sources: usize) -> f64 {
    let raw = SINGLE_SOURCE_CONFIDENCE + CONFIDENCE_PER_SOURCE * distinct_sources as f64;
    round2(raw.min(MAX_CONFIDENCE))
}

/// Collapse one cluster into a merged event
pub fn merge_cluster(cluster: &Cluster) -> MergedEvent {
    if cluster.len() == 1 {
        let event = cluster.first();
        return MergedEvent {
            start: event.start,
            end: event.end,
            content_type: event.content_type,
            severity: event.severity,
            description: event.description.clone(),
            confidence: SINGLE_SOURCE_CONFIDENCE,
            verified: false,
            sources_count: 1,
            sources: [event.source_name.clone()].into_iter().collect(),
        };
    }

    let members = cluster.members();
    let sources: std::collections::BTreeSet<String> = cluster
        .distinct_sources()
        .into_iter()
        .map(str::to_string)
        .collect();

    let start = truncated_mean(members.iter().map(|e| e.start));
    let end = truncated_mean(members.iter().map(|e| e.end));
    let severity = truncated_mean(members.iter().map(|e| u64::from(e.severity))) as u32;

    let merged = MergedEvent {
        start,
        end,
        content_type: cluster.content_type(),
        severity,
        description: combine_descriptions(cluster),
        confidence: agreement_confidence(sources.len()),
        verified: sources.len() >= VERIFIED_MIN_SOURCES,
        sources_count: sources.len(),
        sources,
    };

    debug!(
        "Merged {} {} events from {} sources at {}s (confidence {:.2})",
        members.len(),
        merged.content_type,
        merged.sources_count,
        merged.start,
        merged.confidence
    );

    merged
}

/// Integer mean, truncated
///
/// Hour fields are unbounded, so the sum is kept in `u128`. The mean is at
/// most the largest value and always fits back in `u64`.
fn truncated_mean(values: impl Iterator<Item = u64>) -> u64 {
    let (sum, count) = values.fold((0u128, 0u128), |(sum, count), v| {
        (sum + u128::from(v), count + 1)
    });
    if count == 0 {
        return 0;
    }
    (sum / count) as u64
}

/// Up to three distinct truncated descriptions in first-seen order
fn combine_descriptions(cluster: &Cluster) -> String {
    let mut picked: Vec<String> = Vec::with_capacity(MAX_DESCRIPTIONS);
    for member in cluster.members() {
        let truncated: String = member.description.chars().take(DESCRIPTION_MAX_CHARS).collect();
        if truncated.is_empty() || picked.contains(&truncated) {
            continue;
        }
        picked.push(truncated);
        if picked.len() == MAX_DESCRIPTIONS {
            break;
        }
    }
    picked.join(DESCRIPTION_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouper::{group_events, TaggedEvent, DEFAULT_WINDOW_SECS};
    use ffx_common::timecode::parse_hms;
    use ffx_common::ContentType;

    fn event(start: u64, end: u64, severity: u32, description: &str, source: &str) -> TaggedEvent {
        TaggedEvent {
            start,
            end,
            content_type: ContentType::Violence,
            severity,
            description: description.to_string(),
            source_name: source.to_string(),
            source_index: 0,
        }
    }

    fn single_cluster(events: Vec<TaggedEvent>) -> Cluster {
        let mut clusters = group_events(events, DEFAULT_WINDOW_SECS);
        assert_eq!(clusters.len(), 1);
        clusters.remove(0)
    }

    #[test]
    fn test_singleton_pass_through() {
        let cluster = single_cluster(vec![event(100, 130, 9, "Shootout", "IMDb")]);
        let merged = merge_cluster(&cluster);
        assert_eq!(merged.start, 100);
        assert_eq!(merged.end, 130);
        assert_eq!(merged.severity, 9);
        assert_eq!(merged.description, "Shootout");
        assert_eq!(merged.confidence, 0.5);
        assert_eq!(merged.sources_count, 1);
        assert!(!merged.verified);
        assert!(merged.sources.contains("IMDb"));
    }

    #[test]
    fn test_three_source_agreement() {
        let cluster = single_cluster(vec![
            event(590, 620, 6, "Fight in bar", "IMDb"),
            event(610, 640, 8, "Bar brawl", "Reddit"),
            event(605, 630, 7, "Fight in bar", "Kids-In-Mind"),
        ]);
        let merged = merge_cluster(&cluster);
        assert_eq!(merged.start, 601); // (590 + 610 + 605) / 3
        assert_eq!(merged.end, 630);
        assert_eq!(merged.severity, 7);
        assert_eq!(merged.confidence, 0.95);
        assert!(merged.verified);
        assert_eq!(merged.sources_count, 3);
        assert_eq!(merged.description, "Fight in bar | Bar brawl");
    }

    #[test]
    fn test_same_source_counts_once() {
        let cluster = single_cluster(vec![
            event(100, 110, 4, "a", "IMDb"),
            event(105, 115, 5, "b", "IMDb"),
        ]);
        let merged = merge_cluster(&cluster);
        assert_eq!(merged.sources_count, 1);
        assert_eq!(merged.confidence, 0.65);
        assert!(!merged.verified);
        // Means still use every member
        assert_eq!(merged.start, 102);
        assert_eq!(merged.severity, 4);
    }

    #[test]
    fn test_two_sources_not_verified() {
        let cluster = single_cluster(vec![
            event(100, 110, 5, "a", "A"),
            event(101, 111, 5, "b", "B"),
        ]);
        let merged = merge_cluster(&cluster);
        assert_eq!(merged.confidence, 0.8);
        assert!(!merged.verified);
    }

    #[test]
    fn test_confidence_capped() {
        assert_eq!(agreement_confidence(1), 0.65);
        assert_eq!(agreement_confidence(2), 0.8);
        assert_eq!(agreement_confidence(3), 0.95);
        assert_eq!(agreement_confidence(10), 0.95);
    }

    #[test]
    fn test_description_limits() {
        let long = "x".repeat(150);
        let cluster = single_cluster(vec![
            event(0, 10, 5, &long, "A"),
            event(1, 10, 5, &format!("{}tail", "x".repeat(100)), "B"),
            event(2, 10, 5, "", "C"),
            event(3, 10, 5, "two", "D"),
            event(4, 10, 5, "three", "E"),
            event(5, 10, 5, "four", "F"),
        ]);
        let merged = merge_cluster(&cluster);
        let parts: Vec<&str> = merged.description.split(DESCRIPTION_SEPARATOR).collect();
        // The two long descriptions collapse after truncation
        assert_eq!(parts, vec!["x".repeat(100).as_str(), "two", "three"]);
    }

    #[test]
    fn test_means_of_huge_times_do_not_overflow() {
        let base = parse_hms("4000000000000000:00:00").unwrap();
        let cluster = single_cluster(vec![
            event(base, base + 30, 5, "a", "A"),
            event(base + 5, base + 35, 6, "b", "B"),
        ]);
        let merged = merge_cluster(&cluster);
        assert_eq!(merged.start, base + 2);
        assert_eq!(merged.end, base + 32);
        assert_eq!(merged.severity, 5);
        assert_eq!(merged.sources_count, 2);
    }

    #[test]
    fn test_truncated_mean_at_u64_max() {
        assert_eq!(truncated_mean([u64::MAX, u64::MAX, u64::MAX].into_iter()), u64::MAX);
        assert_eq!(truncated_mean([u64::MAX, u64::MAX - 1].into_iter()), u64::MAX - 1);
        assert_eq!(truncated_mean(std::iter::empty()), 0);
    }

    #[test]
    fn test_truncation_is_char_based() {
        let accented = "é".repeat(120);
        let cluster = single_cluster(vec![
            event(0, 10, 5, &accented, "A"),
            event(1, 10, 5, &accented, "B"),
        ]);
        let merged = merge_cluster(&cluster);
        assert_eq!(merged.description.chars().count(), 100);
    }
}
