//! ffx-reconcile library - Timestamp Reconciliation Engine
//!
//! Merges independently produced content-warning timestamp lists for one
//! film into a single deduplicated, confidence-scored timeline.
//!
//! Architecture: Grouper → Merger → Pipeline, with quality scoring,
//! validation, statistics and playback queries over the result.

pub mod files;
pub mod grouper;
pub mod merger;
pub mod models;
pub mod pipeline;
pub mod quality;
pub mod stats;
pub mod timeline;
pub mod validation;

pub use models::{MergedDocument, MergedEvent, SourceDocument, SourceEvent};
pub use pipeline::{reconcile, reconcile_at, ReconcileOptions};
pub use quality::quality_score;

/// Round to 2 decimal places
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
