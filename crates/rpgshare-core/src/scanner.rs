//! Tag scanner — finds the share marker in a raw log line.
//!
//! This is the hot path: most lines carry no marker and must be rejected with
//! a single substring search.

/// Marker emitted by the game mod in front of every share payload.
pub const DEFAULT_MARKER: &str = "[RPGShare]";

/// Locates `marker` in log lines and returns the payload that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagScanner {
    marker: String,
}

impl TagScanner {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Return the trimmed text after the first occurrence of the marker, or
    /// `None` when the line has no marker. An empty payload (marker at end of
    /// line) still counts as a match and is left for the decoder to reject.
    pub fn scan<'a>(&self, line: &'a str) -> Option<&'a str> {
        let start = line.find(self.marker.as_str())?;
        Some(line[start + self.marker.len()..].trim())
    }
}

impl Default for TagScanner {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER)
    }
}
