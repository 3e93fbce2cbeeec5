//! Structural checks over a recorded history.
//!
//! Nothing here rejects data. A malformed site still renders (without its
//! highlight) so the rest of the snapshot stays inspectable; the report just
//! tells the developer where the recording went wrong.

use std::collections::HashSet;
use std::fmt;

use thiserror::Error;

use crate::{AtomId, History, Site, SiteRef};

/// One data-integrity violation found in a history.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IntegrityIssue {
    /// A site's own id is absent from its sitemap.
    #[error("t={snapshot} list #{site}: site {site_id} is missing from its own sitemap")]
    SiteMissingFromSitemap {
        snapshot: usize,
        site: usize,
        site_id: String,
    },

    /// A site's own id appears more than once in its sitemap.
    #[error("t={snapshot} list #{site}: site {site_id} appears {count} times in its own sitemap")]
    SiteDuplicatedInSitemap {
        snapshot: usize,
        site: usize,
        site_id: String,
        count: usize,
    },

    /// A numeric site index points past the end of the owning site's sitemap.
    #[error("t={snapshot} list #{site}: {id} names sitemap entry {index}, but the sitemap has {len} entries")]
    SiteIndexOutOfRange {
        snapshot: usize,
        site: usize,
        id: AtomId,
        index: u16,
        len: usize,
    },

    /// A cause references no atom recorded at or before this snapshot.
    #[error("t={snapshot} list #{site}: atom {atom} has unresolved cause {cause}")]
    UnresolvedCause {
        snapshot: usize,
        site: usize,
        atom: AtomId,
        cause: AtomId,
    },
}

/// Result of [`History::check_integrity`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntegrityReport {
    pub issues: Vec<IntegrityIssue>,
    pub snapshots_checked: usize,
    pub atoms_checked: usize,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

impl fmt::Display for IntegrityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "checked {} snapshots, {} atoms: {} issue(s)",
            self.snapshots_checked,
            self.atoms_checked,
            self.issues.len()
        )?;
        for issue in &self.issues {
            writeln!(f, "  {issue}")?;
        }
        Ok(())
    }
}

impl History {
    /// Walk every snapshot and report sitemap and cause violations.
    ///
    /// A cause resolves when some site, in this snapshot or any earlier one,
    /// has recorded an atom with that id. Ids are compared as
    /// `(site identifier, timestamp)` after resolving numeric site indexes
    /// through the sitemap of the site whose weave holds them.
    pub fn check_integrity(&self) -> IntegrityReport {
        let mut report = IntegrityReport::default();
        let mut recorded: HashSet<(&str, u32)> = HashSet::new();

        for (t, snapshot) in self.iter().enumerate() {
            for site in &snapshot.sites {
                recorded.extend(
                    site.weave
                        .iter()
                        .filter_map(|atom| site.resolve_site(&atom.id.site).map(|s| (s, atom.id.timestamp))),
                );
            }

            for (i, site) in snapshot.sites.iter().enumerate() {
                match site.self_occurrences() {
                    0 => report.issues.push(IntegrityIssue::SiteMissingFromSitemap {
                        snapshot: t,
                        site: i,
                        site_id: site.site_id.clone(),
                    }),
                    1 => {}
                    count => report.issues.push(IntegrityIssue::SiteDuplicatedInSitemap {
                        snapshot: t,
                        site: i,
                        site_id: site.site_id.clone(),
                        count,
                    }),
                }

                for atom in &site.weave {
                    report.atoms_checked += 1;
                    if site.resolve_site(&atom.id.site).is_none() {
                        report.issues.extend(out_of_range(t, i, site, &atom.id));
                    }

                    let Some(cause) = atom.cause() else {
                        continue;
                    };
                    let Some(cause_site) = site.resolve_site(&cause.site) else {
                        report.issues.extend(out_of_range(t, i, site, cause));
                        continue;
                    };
                    if !recorded.contains(&(cause_site, cause.timestamp)) {
                        report.issues.push(IntegrityIssue::UnresolvedCause {
                            snapshot: t,
                            site: i,
                            atom: atom.id.clone(),
                            cause: cause.clone(),
                        });
                    }
                }
            }
            report.snapshots_checked += 1;
        }

        if !report.is_clean() {
            tracing::warn!(issues = report.issues.len(), "history has integrity issues");
        }
        report
    }
}

fn out_of_range(snapshot: usize, site: usize, owner: &Site, id: &AtomId) -> Option<IntegrityIssue> {
    let &SiteRef::Index(index) = &id.site else {
        return None;
    };
    Some(IntegrityIssue::SiteIndexOutOfRange {
        snapshot,
        site,
        id: id.clone(),
        index,
        len: owner.sitemap.len(),
    })
}
