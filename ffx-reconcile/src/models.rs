//! Wire types for source and merged timestamp documents
//!
//! Source documents are treated as partially populated: every field is
//! optional and missing values fall back to documented defaults. Unknown
//! fields are ignored, so a merged document can be fed back in as a source.

use ffx_common::timecode::serde_hms;
use ffx_common::ContentType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Severity used when a source omits it
pub const DEFAULT_SEVERITY: i64 = 5;

/// Confidence used when a source omits it
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// Title used when the first source omits it
pub const DEFAULT_TITLE: &str = "Unknown";

/// Version stamped on freshly reconciled documents
pub const DOCUMENT_VERSION: u32 = 1;

/// One producer's timestamp list for a film
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceDocument {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub imdb_id: Option<String>,

    #[serde(default)]
    pub runtime_minutes: Option<u32>,

    #[serde(default)]
    pub platforms: Vec<String>,

    #[serde(default)]
    pub timestamps: Vec<SourceEvent>,

    #[serde(default)]
    pub metadata: Option<SourceMetadata>,
}

impl SourceDocument {
    /// Declared source name, if present and non-blank
    pub fn source_name(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.source.as_deref())
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Declared source name, or the positional placeholder `Source {index}`
    pub fn source_name_or_placeholder(&self, index: usize) -> String {
        self.source_name()
            .map(str::to_string)
            .unwrap_or_else(|| format!("Source {}", index))
    }
}

/// Producer metadata attached to a source document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceMetadata {
    #[serde(default)]
    pub source: Option<String>,
}

/// One timestamped content event as reported by a source
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceEvent {
    #[serde(default)]
    pub start: Option<String>,

    #[serde(default)]
    pub end: Option<String>,

    /// Raw category label; see [`SourceEvent::content_type`]
    #[serde(default, rename = "type")]
    pub content_type: Option<String>,

    #[serde(default)]
    pub severity: Option<i64>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub confidence: Option<f64>,
}

impl SourceEvent {
    /// Category of this event
    ///
    /// Accepts canonical names and upstream section identifiers
    /// (`gore` -> violence); anything else, or a missing label, is
    /// `unknown`.
    pub fn content_type(&self) -> ContentType {
        let Some(label) = self.content_type.as_deref() else {
            return ContentType::Unknown;
        };
        label
            .parse::<ContentType>()
            .ok()
            .or_else(|| ContentType::from_section_id(label))
            .unwrap_or(ContentType::Unknown)
    }

    /// Severity clamped to 1..=10, defaulting to 5
    pub fn severity(&self) -> u32 {
        self.severity.unwrap_or(DEFAULT_SEVERITY).clamp(1, 10) as u32
    }

    pub fn confidence(&self) -> f64 {
        self.confidence.unwrap_or(DEFAULT_CONFIDENCE)
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

/// One reconciled event in the output timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedEvent {
    /// Start position in seconds, `HH:MM:SS` on the wire
    #[serde(with = "serde_hms")]
    pub start: u64,

    /// End position in seconds, `HH:MM:SS` on the wire
    #[serde(with = "serde_hms")]
    pub end: u64,

    #[serde(rename = "type")]
    pub content_type: ContentType,

    pub severity: u32,

    #[serde(default)]
    pub description: String,

    /// Agreement-based confidence (0.5-0.95)
    pub confidence: f64,

    #[serde(default)]
    pub verified: bool,

    /// Number of distinct sources that reported this event
    pub sources_count: usize,

    #[serde(default)]
    pub sources: BTreeSet<String>,
}

/// Run-level metadata of a merged document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// ISO-8601 UTC with trailing `Z`
    pub last_updated: String,

    /// Source names in input order
    #[serde(rename = "sources")]
    pub source_names: Vec<String>,

    /// Mean event confidence, 2 decimals
    pub confidence_score: f64,

    pub version: u32,
}

/// The single reconciled timeline for a film
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedDocument {
    pub title: String,

    pub imdb_id: String,

    pub runtime_minutes: u32,

    pub platforms: BTreeSet<String>,

    /// Sorted by start ascending
    #[serde(rename = "timestamps")]
    pub events: Vec<MergedEvent>,

    pub metadata: DocumentMetadata,
}
