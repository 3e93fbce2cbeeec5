//! Read-only snapshot model for recorded causal-tree histories.
//!
//! A recording is a sequence of [`Snapshot`]s, one per logical time step. Each
//! snapshot lists every participating [`Site`]; each site carries its sitemap
//! (the ordered site ids it knows about) and its weave (its local, causally
//! linked log of [`Atom`]s).
//!
//! Nothing in this crate mutates CRDT state. The [`History`] is materialized
//! once and only read afterwards.
//!
//! # Data integrity
//!
//! Malformed recordings are surfaced, never papered over:
//!
//! - [`Site::rank_in_sitemap`] returns [`SiteRank::NotFound`] when a site is
//!   missing from its own sitemap
//! - [`History::check_integrity`] lists every sitemap and cause violation

mod error;
mod history;
pub mod ids;
mod integrity;
mod snapshot;

pub use error::HistoryError;
pub use history::History;
pub use ids::{AtomId, SiteRef};
pub use integrity::{IntegrityIssue, IntegrityReport};
pub use snapshot::{Atom, Site, SiteRank, Snapshot, site_rank_in_sitemap};

/// Result type for history loading.
pub type Result<T> = std::result::Result<T, HistoryError>;
