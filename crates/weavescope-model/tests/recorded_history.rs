//! Loading real recorded logs from disk.

use std::io::Write;
use std::path::PathBuf;

use weavescope_model::{AtomId, History, HistoryError, SiteRank};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

#[test]
fn test_load_producer_fixture() {
    let history = History::load(fixture("two_sites.json")).unwrap();
    assert_eq!(history.len(), 5);
    assert_eq!(history.at(0).action, "new tree at site 0");
    assert!(history.at(0).sites[0].weave.is_empty());

    let last = history.at(4);
    assert_eq!(last.sites.len(), 2);
    assert_eq!(last.atom_count(), 4);
    assert_eq!(last.sites[1].rank_in_sitemap(), SiteRank::At(1));

    let b = &last.sites[1].weave[1];
    assert_eq!(b.id.to_string(), "S1@T2");
    assert_eq!(b.value_label(), "insert b");
    assert_eq!(b.cause(), Some(&AtomId::new(0u16, 1)));
    assert_eq!(b.id.index, 0);
}

#[test]
fn test_fixture_satisfies_cause_invariant() {
    let history = History::load(fixture("two_sites.json")).unwrap();
    let report = history.check_integrity();
    assert!(report.is_clean(), "{report}");
    assert_eq!(report.snapshots_checked, 5);
}

#[test]
fn test_every_fixture_site_ranks_itself() {
    let history = History::load(fixture("two_sites.json")).unwrap();
    for snapshot in &history {
        for site in &snapshot.sites {
            assert!(site.rank_in_sitemap().is_found(), "{} missing", site.site_id);
        }
    }
}

#[test]
fn test_load_json_lines_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, r#"{{"action":"start","sites":[{{"site_id":"A","sitemap":["A"],"weave":[]}}]}}"#).unwrap();
    writeln!(
        file,
        r#"{{"action":"insert","sites":[{{"site_id":"A","sitemap":["A"],"weave":[{{"id":{{"site":"A","timestamp":7}},"value":"x","cause":null}}]}}]}}"#
    )
    .unwrap();

    let history = History::load(file.path()).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history.at(1).sites[0].weave[0].id.to_string(), "SA@T7");
    assert!(history.check_integrity().is_clean());
}

#[test]
fn test_missing_file_names_path() {
    let err = History::load("/nonexistent/weavescope/log.json").unwrap_err();
    assert!(matches!(err, HistoryError::Io { .. }));
    assert!(err.to_string().contains("/nonexistent/weavescope/log.json"));
}

#[test]
fn test_from_reader() {
    let text = br#"[{"Action":"only","Sites":[]}]"#;
    let history = History::from_reader(&text[..]).unwrap();
    assert_eq!(history.len(), 1);
}
