//! Managed-region marker scanning.
//!
//! A plain substring search. The first start marker wins, and the region
//! closes at the first end marker that follows it. An end marker that only
//! appears before the start marker does not form a region.

/// Opening sentinel of the managed region.
pub const START_MARKER: &str = "<!-- align-agents-start -->";

/// Closing sentinel of the managed region.
pub const END_MARKER: &str = "<!-- align-agents-end -->";

/// Byte offsets of a managed region inside some content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagedRegion {
    /// Offset of the first byte of the start marker.
    pub start: usize,
    /// Offset one past the last byte of the end marker.
    pub end: usize,
}

impl ManagedRegion {
    /// Content before the start marker.
    pub fn before<'a>(&self, content: &'a str) -> &'a str {
        &content[..self.start]
    }

    /// Content after the end marker.
    pub fn after<'a>(&self, content: &'a str) -> &'a str {
        &content[self.end..]
    }

    /// Raw text between the two markers, including the separating newlines.
    pub fn inner<'a>(&self, content: &'a str) -> &'a str {
        &content[self.start + START_MARKER.len()..self.end - END_MARKER.len()]
    }
}

/// Locate the managed region in `content`.
pub fn find_managed_region(content: &str) -> Option<ManagedRegion> {
    let start = content.find(START_MARKER)?;
    let search_from = start + START_MARKER.len();
    let end_rel = content[search_from..].find(END_MARKER)?;
    let end = search_from + end_rel + END_MARKER.len();
    Some(ManagedRegion { start, end })
}

/// Wrap `body` in the managed-region markers, each on its own line.
pub fn wrap_managed(body: &str) -> String {
    format!("{}\n{}\n{}", START_MARKER, body, END_MARKER)
}
