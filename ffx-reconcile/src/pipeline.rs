//! Reconciliation Pipeline
//!
//! Flatten & tag → group → merge → sort → confidence rollup → assemble.
//!
//! Film-level fields (`title`, `imdb_id`, `runtime_minutes`) come from the
//! first source document; later documents never override them.

use crate::grouper::{group_events, TaggedEvent, DEFAULT_WINDOW_SECS};
use crate::merger::merge_cluster;
use crate::models::{
    DocumentMetadata, MergedDocument, MergedEvent, SourceDocument, DEFAULT_TITLE, DOCUMENT_VERSION,
};
use crate::round2;
use chrono::{DateTime, Utc};
use ffx_common::config::ReconcileConfig;
use ffx_common::timecode::parse_hms;
use ffx_common::{time, Error, Result};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Per-run reconciliation parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileOptions {
    /// Grouping window in seconds
    pub window_secs: u64,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            window_secs: DEFAULT_WINDOW_SECS,
        }
    }
}

impl From<&ReconcileConfig> for ReconcileOptions {
    fn from(config: &ReconcileConfig) -> Self {
        Self {
            window_secs: config.group_window_secs,
        }
    }
}

/// Reconcile source documents for one film into a single timeline
///
/// # Returns
/// * `Ok(None)` when `sources` is empty (nothing to reconcile)
/// * `Err(Error::TimeFormat)` when any event carries a malformed time
pub fn reconcile(
    sources: &[SourceDocument],
    options: &ReconcileOptions,
) -> Result<Option<MergedDocument>> {
    reconcile_at(sources, options, time::now())
}

/// [`reconcile`] with an explicit `last_updated` timestamp
pub fn reconcile_at(
    sources: &[SourceDocument],
    options: &ReconcileOptions,
    now: DateTime<Utc>,
) -> Result<Option<MergedDocument>> {
    let Some(base) = sources.first() else {
        debug!("No source documents supplied; nothing to reconcile");
        return Ok(None);
    };

    let platforms: BTreeSet<String> = sources
        .iter()
        .flat_map(|s| s.platforms.iter().cloned())
        .collect();

    let source_names: Vec<String> = sources
        .iter()
        .enumerate()
        .map(|(index, source)| source.source_name_or_placeholder(index))
        .collect();

    let tagged = tag_events(sources)?;
    let input_count = tagged.len();

    let clusters = group_events(tagged, options.window_secs);
    let mut events: Vec<MergedEvent> = clusters.iter().map(merge_cluster).collect();
    events.sort_by_key(|e| e.start);

    let confidence_score = mean_confidence(&events);

    info!(
        "Reconciled {} events from {} sources into {} (confidence {:.2})",
        input_count,
        sources.len(),
        events.len(),
        confidence_score
    );

    Ok(Some(MergedDocument {
        title: base
            .title
            .clone()
            .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        imdb_id: base.imdb_id.clone().unwrap_or_default(),
        runtime_minutes: base.runtime_minutes.unwrap_or(0),
        platforms,
        events,
        metadata: DocumentMetadata {
            last_updated: time::to_iso8601_z(&now),
            source_names,
            confidence_score,
            version: DOCUMENT_VERSION,
        },
    }))
}

/// Flatten every source's events, parsing times and attaching the source
/// name and index
pub fn tag_events(sources: &[SourceDocument]) -> Result<Vec<TaggedEvent>> {
    let mut tagged = Vec::new();

    for (source_index, source) in sources.iter().enumerate() {
        let source_name = source.source_name_or_placeholder(source_index);

        for (event_index, event) in source.timestamps.iter().enumerate() {
            let field = |value: &Option<String>, name: &str| -> Result<u64> {
                let text = value.as_deref().ok_or_else(|| {
                    Error::InvalidInput(format!(
                        "{}: timestamp {} has no {} time",
                        source_name, event_index, name
                    ))
                })?;
                parse_hms(text)
            };

            tagged.push(TaggedEvent {
                start: field(&event.start, "start")?,
                end: field(&event.end, "end")?,
                content_type: event.content_type(),
                severity: event.severity(),
                description: event.description().to_string(),
                source_name: source_name.clone(),
                source_index,
            });
        }
    }

    Ok(tagged)
}

/// Mean event confidence, 2 decimals; 0.0 for an empty timeline
pub fn mean_confidence(events: &[MergedEvent]) -> f64 {
    if events.is_empty() {
        return 0.0;
    }
    round2(events.iter().map(|e| e.confidence).sum::<f64>() / events.len() as f64)
}
