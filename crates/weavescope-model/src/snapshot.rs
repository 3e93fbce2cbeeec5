//! One recorded state of the whole replicated system.

use std::borrow::Cow;

use serde::{Deserialize, Deserializer, Serialize};

use crate::ids::{AtomId, SiteRef, deserialize_cause};

/// One historical state of every site at a logical time step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// What produced this snapshot (e.g. "insert 'a' at site 0").
    #[serde(rename = "Action", alias = "action", default)]
    pub action: String,
    /// Participating sites; position is the site's list index.
    #[serde(rename = "Sites", alias = "sites", default, deserialize_with = "null_as_empty")]
    pub sites: Vec<Site>,
}

impl Snapshot {
    pub fn new(action: impl Into<String>, sites: Vec<Site>) -> Self {
        Self {
            action: action.into(),
            sites,
        }
    }

    /// Get a site by its list index.
    pub fn site(&self, index: usize) -> Option<&Site> {
        self.sites.get(index)
    }

    /// Total atoms across every site's weave.
    pub fn atom_count(&self) -> usize {
        self.sites.iter().map(|s| s.weave.len()).sum()
    }
}

/// A single participant's local view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Site {
    #[serde(rename = "SiteID", alias = "site_id")]
    pub site_id: String,
    /// Site identifiers known to this site; position = compact site index.
    #[serde(rename = "Sitemap", alias = "sitemap", default, deserialize_with = "null_as_empty")]
    pub sitemap: Vec<String>,
    /// This site's local causal log.
    #[serde(rename = "Weave", alias = "weave", default, deserialize_with = "null_as_empty")]
    pub weave: Vec<Atom>,
}

impl Site {
    pub fn new(site_id: impl Into<String>, sitemap: Vec<String>, weave: Vec<Atom>) -> Self {
        Self {
            site_id: site_id.into(),
            sitemap,
            weave,
        }
    }

    /// Position of this site's own id within its sitemap.
    ///
    /// A well-formed site lists itself exactly once; anything else is a
    /// data-integrity problem surfaced as [`SiteRank::NotFound`].
    pub fn rank_in_sitemap(&self) -> SiteRank {
        match self.sitemap.iter().position(|id| *id == self.site_id) {
            Some(position) => SiteRank::At(position),
            None => SiteRank::NotFound,
        }
    }

    /// The site identifier an id's site half names, as seen from this site.
    ///
    /// Numeric indexes are positions in *this* site's sitemap, so the same
    /// `S1` can name different sites in different weaves. `None` when the
    /// index runs past the end of the sitemap.
    pub fn resolve_site<'a>(&'a self, site: &'a SiteRef) -> Option<&'a str> {
        match site {
            SiteRef::Index(i) => self.sitemap.get(usize::from(*i)).map(String::as_str),
            SiteRef::Name(name) => Some(name),
        }
    }

    /// How many times this site's own id appears in its sitemap.
    pub fn self_occurrences(&self) -> usize {
        self.sitemap.iter().filter(|id| **id == self.site_id).count()
    }
}

/// Free-function form of [`Site::rank_in_sitemap`].
pub fn site_rank_in_sitemap(site: &Site) -> SiteRank {
    site.rank_in_sitemap()
}

/// Where a site sits in its own sitemap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SiteRank {
    At(usize),
    /// The site's id is missing from its sitemap (malformed data).
    NotFound,
}

impl SiteRank {
    pub fn position(self) -> Option<usize> {
        match self {
            SiteRank::At(position) => Some(position),
            SiteRank::NotFound => None,
        }
    }

    pub fn is_found(self) -> bool {
        matches!(self, SiteRank::At(_))
    }
}

/// One causal log entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    #[serde(rename = "ID", alias = "id")]
    pub id: AtomId,
    /// Opaque payload; the producer records operations as short strings.
    #[serde(rename = "Value", alias = "value", default)]
    pub value: serde_json::Value,
    /// Causal predecessor, `None` for the "no predecessor" sentinel.
    #[serde(rename = "Cause", alias = "cause", default, deserialize_with = "deserialize_cause")]
    pub cause: Option<AtomId>,
}

impl Atom {
    pub fn new(id: AtomId, value: impl Into<serde_json::Value>, cause: Option<AtomId>) -> Self {
        Self {
            id,
            value: value.into(),
            cause: cause.filter(|c| !c.is_root()),
        }
    }

    pub fn cause(&self) -> Option<&AtomId> {
        self.cause.as_ref()
    }

    /// Display form of the cause; the sentinel renders as the zero id.
    pub fn cause_label(&self) -> String {
        match &self.cause {
            Some(cause) => cause.to_string(),
            None => AtomId::root().to_string(),
        }
    }

    /// Strings verbatim, anything else as compact JSON.
    pub fn value_label(&self) -> Cow<'_, str> {
        match &self.value {
            serde_json::Value::String(s) => Cow::Borrowed(s),
            other => Cow::Owned(other.to_string()),
        }
    }
}

/// The producer writes empty slices as `null`.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
