//! The immutable, time-ordered sequence of recorded snapshots.

use std::io::Read;
use std::path::Path;

use crate::{HistoryError, Result, Snapshot};

/// Every recorded snapshot, indexed `0..len()` by logical time.
///
/// Built once at session start and never mutated afterwards. Navigators and
/// views share it behind an `Arc`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct History {
    snapshots: Vec<Snapshot>,
}

impl History {
    pub fn new(snapshots: Vec<Snapshot>) -> Self {
        Self { snapshots }
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// The snapshot at `index`.
    ///
    /// # Panics
    ///
    /// Panics when `index >= len()`. Callers clamp before asking; an
    /// out-of-range index here is a bug in the caller.
    pub fn at(&self, index: usize) -> &Snapshot {
        match self.snapshots.get(index) {
            Some(snapshot) => snapshot,
            None => panic!(
                "snapshot index {index} out of range for history of length {}",
                self.snapshots.len()
            ),
        }
    }

    /// Non-panicking form of [`History::at`].
    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.iter()
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// Parse a recorded log: a JSON array of snapshots, or JSON Lines with one
    /// snapshot per non-blank line.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let trimmed = text.trim_start();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }

        if trimmed.starts_with('[') {
            let snapshots: Vec<Snapshot> = serde_json::from_str(trimmed)?;
            tracing::debug!(snapshots = snapshots.len(), "loaded JSON history");
            return Ok(Self::new(snapshots));
        }

        let mut snapshots = Vec::new();
        for (i, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let snapshot = serde_json::from_str(line)
                .map_err(|source| HistoryError::JsonLine { line: i + 1, source })?;
            snapshots.push(snapshot);
        }
        tracing::debug!(snapshots = snapshots.len(), "loaded JSON Lines history");
        Ok(Self::new(snapshots))
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::from_json_str(&text)
    }

    /// Load a recorded log from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| HistoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let history = Self::from_json_str(&text)?;
        tracing::info!(path = %path.display(), snapshots = history.len(), "history loaded");
        Ok(history)
    }
}

impl From<Vec<Snapshot>> for History {
    fn from(snapshots: Vec<Snapshot>) -> Self {
        Self::new(snapshots)
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a Snapshot;
    type IntoIter = std::slice::Iter<'a, Snapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshots.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_and_get() {
        let history = History::new(vec![Snapshot::new("s0", vec![]), Snapshot::new("s1", vec![])]);
        assert_eq!(history.len(), 2);
        assert_eq!(history.at(1).action, "s1");
        assert!(history.get(2).is_none());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_at_out_of_range_fails_fast() {
        let history = History::default();
        history.at(0);
    }

    #[test]
    fn test_empty_text_is_empty_history() {
        assert!(History::from_json_str("").unwrap().is_empty());
        assert!(History::from_json_str("  \n").unwrap().is_empty());
        assert!(History::from_json_str("[]").unwrap().is_empty());
    }

    #[test]
    fn test_json_lines() {
        let text = "{\"Action\":\"a\",\"Sites\":null}\n\n{\"Action\":\"b\",\"Sites\":[]}\n";
        let history = History::from_json_str(text).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history.at(1).action, "b");
    }

    #[test]
    fn test_json_lines_reports_line_number() {
        let text = "{\"Action\":\"a\"}\n{\"Action\":\n";
        match History::from_json_str(text) {
            Err(HistoryError::JsonLine { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected JsonLine error, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_array() {
        assert!(matches!(
            History::from_json_str("[{\"Action\": 3}]"),
            Err(HistoryError::Json(_))
        ));
    }
}
