//! Playback-position queries over a merged timeline

use crate::models::MergedEvent;
use ffx_common::ContentType;

/// Default look-ahead for [`upcoming_segments`], in seconds
pub const DEFAULT_LOOKAHEAD_SECS: u64 = 60;

/// Which segments a viewer wants filtered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentFilter {
    pub types: Vec<ContentType>,
    pub min_severity: u32,
}

impl Default for SegmentFilter {
    fn default() -> Self {
        Self {
            types: vec![
                ContentType::Nudity,
                ContentType::Profanity,
                ContentType::Violence,
            ],
            min_severity: 1,
        }
    }
}

impl SegmentFilter {
    pub fn accepts(&self, event: &MergedEvent) -> bool {
        self.types.contains(&event.content_type) && event.severity >= self.min_severity
    }
}

/// Segment playing at a given position
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveSegment<'a> {
    pub event: &'a MergedEvent,
    /// Seconds until the segment ends
    pub remaining_secs: u64,
}

/// First accepted segment covering `position` (`start <= position < end`)
pub fn active_segment<'a>(
    events: &'a [MergedEvent],
    position: u64,
    filter: &SegmentFilter,
) -> Option<ActiveSegment<'a>> {
    events
        .iter()
        .filter(|e| filter.accepts(e))
        .find(|e| e.start <= position && position < e.end)
        .map(|event| ActiveSegment {
            event,
            remaining_secs: event.end - position,
        })
}

/// Segments starting after `position` and within `lookahead_secs`, by start
pub fn upcoming_segments(
    events: &[MergedEvent],
    position: u64,
    lookahead_secs: u64,
) -> Vec<&MergedEvent> {
    let horizon = position.saturating_add(lookahead_secs);
    let mut upcoming: Vec<&MergedEvent> = events
        .iter()
        .filter(|e| e.start > position && e.start <= horizon)
        .collect();
    upcoming.sort_by_key(|e| e.start);
    upcoming
}
