//! Atom and site identifiers as recorded by the causal-tree producer.
//!
//! An [`AtomId`] names one atom across every site: the creating site plus that
//! site's Lamport timestamp at creation. Recorded logs carry the site either as
//! a numeric sitemap index (what the tree itself stores) or as a textual site
//! name, so [`SiteRef`] accepts both and displays whichever was recorded.
//!
//! Timestamp 0 is never handed out to a real atom, which is why the zero id
//! doubles as the "no causal predecessor" sentinel (see [`AtomId::root`]).

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize};

/// The site half of an [`AtomId`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SiteRef {
    /// Position of the creating site in the recording site's sitemap.
    Index(u16),
    /// Site recorded by name.
    Name(String),
}

impl fmt::Display for SiteRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteRef::Index(i) => write!(f, "{i}"),
            SiteRef::Name(name) => f.write_str(name),
        }
    }
}

impl From<u16> for SiteRef {
    fn from(i: u16) -> Self {
        SiteRef::Index(i)
    }
}

impl From<&str> for SiteRef {
    fn from(name: &str) -> Self {
        SiteRef::Name(name.to_string())
    }
}

impl From<String> for SiteRef {
    fn from(name: String) -> Self {
        SiteRef::Name(name)
    }
}

/// Unique identifier of an atom across all sites.
///
/// Identity is `(site, timestamp)`. The yarn `index` is carried along when the
/// producer recorded it but takes no part in equality, hashing or ordering.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AtomId {
    #[serde(rename = "Site", alias = "site")]
    pub site: SiteRef,
    /// Order of creation within the creating site's yarn.
    #[serde(rename = "Index", alias = "index", default)]
    pub index: u32,
    /// Lamport timestamp of the creating site when the atom was made.
    #[serde(rename = "Timestamp", alias = "timestamp")]
    pub timestamp: u32,
}

impl AtomId {
    pub fn new(site: impl Into<SiteRef>, timestamp: u32) -> Self {
        Self {
            site: site.into(),
            index: 0,
            timestamp,
        }
    }

    /// Attach the yarn index recorded by the producer.
    pub fn with_index(mut self, index: u32) -> Self {
        self.index = index;
        self
    }

    /// The zero id, used as the "no causal predecessor" sentinel.
    pub fn root() -> Self {
        Self::new(SiteRef::Index(0), 0)
    }

    /// Check if this is the sentinel (timestamp 0).
    pub fn is_root(&self) -> bool {
        self.timestamp == 0
    }
}

// ── Identity ────────────────────────────────────────────────────────────────

impl PartialEq for AtomId {
    fn eq(&self, other: &Self) -> bool {
        self.site == other.site && self.timestamp == other.timestamp
    }
}

impl Eq for AtomId {}

impl Hash for AtomId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.site.hash(state);
        self.timestamp.hash(state);
    }
}

/// Older timestamps first; for equal timestamps the larger site sorts first.
impl Ord for AtomId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.timestamp
            .cmp(&other.timestamp)
            .then_with(|| other.site.cmp(&self.site))
    }
}

impl PartialOrd for AtomId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// `S{site}@T{timestamp}`, no padding: `SA@T7`, `S0@T12`.
impl fmt::Display for AtomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}@T{}", self.site, self.timestamp)
    }
}

/// Deserialize a cause reference, folding `null` and the zero id into `None`.
pub(crate) fn deserialize_cause<'de, D>(deserializer: D) -> Result<Option<AtomId>, D::Error>
where
    D: Deserializer<'de>,
{
    let cause = Option::<AtomId>::deserialize(deserializer)?;
    Ok(cause.filter(|id| !id.is_root()))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_named_site() {
        assert_eq!(AtomId::new("A", 7).to_string(), "SA@T7");
    }

    #[test]
    fn test_display_indexed_site_is_unpadded() {
        assert_eq!(AtomId::new(0u16, 1).to_string(), "S0@T1");
        assert_eq!(AtomId::new(3u16, 12).to_string(), "S3@T12");
    }

    #[test]
    fn test_root_sentinel() {
        assert!(AtomId::root().is_root());
        assert_eq!(AtomId::root().to_string(), "S0@T0");
        assert!(!AtomId::new(0u16, 1).is_root());
    }

    #[test]
    fn test_index_ignored_for_identity() {
        let a = AtomId::new(1u16, 4).with_index(2);
        let b = AtomId::new(1u16, 4);
        assert_eq!(a, b);
    }

    #[test]
    fn test_ordering_timestamp_then_site_descending() {
        let older = AtomId::new(0u16, 1);
        let newer = AtomId::new(0u16, 2);
        assert!(older < newer);

        let low_site = AtomId::new(0u16, 5);
        let high_site = AtomId::new(1u16, 5);
        assert!(high_site < low_site);
    }

    #[test]
    fn test_deserialize_producer_shape() {
        let id: AtomId = serde_json::from_str(r#"{"Site":1,"Index":0,"Timestamp":3}"#).unwrap();
        assert_eq!(id, AtomId::new(1u16, 3));

        let named: AtomId = serde_json::from_str(r#"{"site":"A","timestamp":7}"#).unwrap();
        assert_eq!(named.site, SiteRef::Name("A".into()));
        assert_eq!(named.index, 0);
    }
}
