//! Event Grouper - Sequential Window Clustering
//!
//! Events are sorted by start time and swept once. A cluster stays open
//! while the next event has the same type as the cluster's first member and
//! starts no more than `window_secs` after that first member. The anchor is
//! the first member's start and never moves, so a slow drift of events
//! spaced under the window apart still splits once it passes the window.

use ffx_common::ContentType;
use std::collections::BTreeSet;
use tracing::debug;

/// Default grouping window in seconds
pub const DEFAULT_WINDOW_SECS: u64 = ffx_common::config::DEFAULT_GROUP_WINDOW_SECS;

/// A source event with parsed times and its origin attached
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedEvent {
    pub start: u64,
    pub end: u64,
    pub content_type: ContentType,
    pub severity: u32,
    pub description: String,
    pub source_name: String,
    pub source_index: usize,
}

/// Non-empty set of same-type events believed to describe one scene
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    members: Vec<TaggedEvent>,
}

impl Cluster {
    /// Open a cluster with its first member
    pub fn new(first: TaggedEvent) -> Self {
        Self {
            members: vec![first],
        }
    }

    fn push(&mut self, event: TaggedEvent) {
        self.members.push(event);
    }

    pub fn first(&self) -> &TaggedEvent {
        &self.members[0]
    }

    pub fn members(&self) -> &[TaggedEvent] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Never true: a cluster is opened with its first member
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn content_type(&self) -> ContentType {
        self.first().content_type
    }

    /// Distinct source names contributing to this cluster
    pub fn distinct_sources(&self) -> BTreeSet<&str> {
        self.members.iter().map(|e| e.source_name.as_str()).collect()
    }
}

/// Partition events into clusters of the same scene
///
/// # Arguments
/// * `events` - Source-tagged events in source-then-appearance order
/// * `window_secs` - Maximum start distance from a cluster's first member
///
/// # Returns
/// * Clusters in ascending order of their first member's start; every input
///   event lands in exactly one cluster
pub fn group_events(mut events: Vec<TaggedEvent>, window_secs: u64) -> Vec<Cluster> {
    // Stable: equal starts keep input order
    events.sort_by_key(|e| e.start);

    let mut events = events.into_iter();
    let Some(first) = events.next() else {
        return Vec::new();
    };

    let mut clusters = Vec::new();
    let mut cluster_start = first.start;
    let mut current = Cluster::new(first);

    for event in events {
        let within_window = event.start - cluster_start <= window_secs;
        if within_window && event.content_type == current.content_type() {
            current.push(event);
        } else {
            clusters.push(current);
            cluster_start = event.start;
            current = Cluster::new(event);
        }
    }
    clusters.push(current);

    debug!(
        "Grouped events into {} clusters (window {}s)",
        clusters.len(),
        window_secs
    );

    clusters
}
