//! Snapshot → text frame.
//!
//! Rendering is pure: a [`Frame`] is a list of lines made of toned spans, with
//! no terminal escape codes. [`crate::view`] decides what a tone looks like.

use weavescope_model::{Site, SiteRank, Snapshot};
use weavescope_nav::TimeNavigator;

/// Semantic styling for a span.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tone {
    Plain,
    /// The `t = i / n` header.
    Title,
    /// Action text and section headings.
    Heading,
    /// The viewing site's own sitemap row.
    Highlight,
    /// Secondary detail (causes, empty markers, hints).
    Dim,
    /// Data-integrity problems.
    Warning,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub tone: Tone,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn styled(text: impl Into<String>, tone: Tone) -> Self {
        Self::new().push(text, tone)
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::styled(text, Tone::Plain)
    }

    pub fn push(mut self, text: impl Into<String>, tone: Tone) -> Self {
        self.spans.push(Span {
            text: text.into(),
            tone,
        });
        self
    }

    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// A rendered screen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    pub lines: Vec<Line>,
}

impl Frame {
    /// Newline-terminated text with tones dropped.
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(&line.text());
            out.push('\n');
        }
        out
    }

    /// Furthest a window of `rows` lines can scroll without running past the end.
    pub fn max_scroll(&self, rows: usize) -> usize {
        self.lines.len().saturating_sub(rows)
    }

    /// The lines visible through a window of `rows` lines starting at `offset`.
    ///
    /// `offset` is clamped to [`max_scroll`](Self::max_scroll).
    pub fn viewport(&self, offset: usize, rows: usize) -> Viewport<'_> {
        let first = offset.min(self.max_scroll(rows));
        let last = (first + rows).min(self.lines.len());
        Viewport {
            lines: &self.lines[first..last],
            first,
            total: self.lines.len(),
        }
    }
}

/// A window onto a [`Frame`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport<'a> {
    pub lines: &'a [Line],
    /// Index of the first visible line.
    pub first: usize,
    /// Line count of the whole frame.
    pub total: usize,
}

impl Viewport<'_> {
    pub fn is_clipped(&self) -> bool {
        self.lines.len() < self.total
    }

    /// `lines 21-40 of 57`, 1-based and inclusive.
    pub fn position_label(&self) -> String {
        format!(
            "lines {}-{} of {}",
            self.first + 1,
            self.first + self.lines.len(),
            self.total
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Mark the viewing site's own sitemap row.
    pub highlight_self: bool,
    /// Include the atom value column.
    pub show_values: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            highlight_self: true,
            show_values: true,
        }
    }
}

const INDENT: &str = "    ";

/// Render snapshot `index` of a history holding `total` snapshots.
pub fn render_snapshot(index: usize, total: usize, snapshot: &Snapshot, options: &RenderOptions) -> Frame {
    let last = total.saturating_sub(1);
    let mut lines = vec![
        Line::styled(format!("t = {index} / {last}"), Tone::Title).push(format!("  {}", snapshot.action), Tone::Heading),
    ];

    for (i, site) in snapshot.sites.iter().enumerate() {
        lines.push(Line::new());
        lines.push(Line::styled(format!("List #{i}"), Tone::Heading));
        render_sitemap(site, options, &mut lines);
        render_weave(site, options, &mut lines);
    }

    Frame { lines }
}

/// The placeholder frame for a history with no snapshots.
pub fn render_empty() -> Frame {
    Frame {
        lines: vec![Line::styled("no snapshots recorded", Tone::Dim)],
    }
}

/// Whatever the navigator is looking at right now.
pub fn render_current(navigator: &TimeNavigator, options: &RenderOptions) -> Frame {
    match (navigator.cursor(), navigator.current()) {
        (Some(index), Some(snapshot)) => render_snapshot(index, navigator.len(), snapshot, options),
        _ => render_empty(),
    }
}

fn render_sitemap(site: &Site, options: &RenderOptions, lines: &mut Vec<Line>) {
    lines.push(Line::styled("  Sitemap", Tone::Heading));

    let rank = site.rank_in_sitemap();
    if rank == SiteRank::NotFound {
        lines.push(Line::styled(
            format!("{INDENT}! {} not in sitemap", site.site_id),
            Tone::Warning,
        ));
    }

    for (i, entry) in site.sitemap.iter().enumerate() {
        let is_self = options.highlight_self && rank.position() == Some(i);
        let (marker, tone) = if is_self { ('>', Tone::Highlight) } else { (' ', Tone::Plain) };
        lines.push(Line::styled(format!("{INDENT}{marker} {i}  {entry}"), tone));
    }
}

fn render_weave(site: &Site, options: &RenderOptions, lines: &mut Vec<Line>) {
    lines.push(Line::styled("  Weave", Tone::Heading));

    if site.weave.is_empty() {
        lines.push(Line::styled(format!("{INDENT}(empty)"), Tone::Dim));
        return;
    }

    let rows: Vec<(String, String, String)> = site
        .weave
        .iter()
        .map(|atom| (atom.id.to_string(), atom.value_label().into_owned(), atom.cause_label()))
        .collect();
    let id_width = rows.iter().map(|(id, _, _)| id.chars().count()).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, v, _)| v.chars().count()).max().unwrap_or(0);

    for (id, value, cause) in rows {
        let mut line = Line::plain(format!("{INDENT}{id:<id_width$}  "));
        if options.show_values {
            line = line.push(format!("{value:<value_width$}  "), Tone::Plain);
        }
        lines.push(line.push(cause, Tone::Dim));
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use weavescope_model::{Atom, AtomId};

    use super::*;

    fn snapshot() -> Snapshot {
        let weave = vec![
            Atom::new(AtomId::new(0u16, 1), "insert a", None),
            Atom::new(AtomId::new(1u16, 12), "delete", Some(AtomId::new(0u16, 1))),
        ];
        Snapshot::new(
            "insert b at site 1",
            vec![Site::new("bb", vec!["aa".into(), "bb".into()], weave)],
        )
    }

    #[test]
    fn test_highlighted_sitemap_and_weave() {
        let frame = render_snapshot(3, 5, &snapshot(), &RenderOptions::default());
        let expected = "\
t = 3 / 4  insert b at site 1

List #0
  Sitemap
      0  aa
    > 1  bb
  Weave
    S0@T1   insert a  S0@T0
    S1@T12  delete    S0@T1
";
        assert_eq!(frame.to_plain_text(), expected);
        assert_eq!(frame.lines[5].spans[0].tone, Tone::Highlight);
    }

    #[test]
    fn test_unhighlighted_without_values() {
        let options = RenderOptions {
            highlight_self: false,
            show_values: false,
        };
        let frame = render_snapshot(0, 1, &snapshot(), &options);
        let text = frame.to_plain_text();
        assert!(text.contains("      1  bb\n"));
        assert!(text.contains("    S1@T12  S0@T1\n"));
        assert!(!text.contains("delete"));
        assert!(frame.lines.iter().flat_map(|l| &l.spans).all(|s| s.tone != Tone::Highlight));
    }

    #[test]
    fn test_missing_self_flagged() {
        let snap = Snapshot::new("fork", vec![Site::new("cc", vec!["aa".into()], Vec::new())]);
        let frame = render_snapshot(0, 1, &snap, &RenderOptions::default());
        let warning = frame
            .lines
            .iter()
            .find(|l| l.spans.iter().any(|s| s.tone == Tone::Warning))
            .expect("integrity marker");
        assert_eq!(warning.text(), "    ! cc not in sitemap");
        assert!(frame.to_plain_text().contains("    (empty)\n"));
    }

    fn numbered(n: usize) -> Frame {
        Frame {
            lines: (0..n).map(|i| Line::plain(format!("line {i}"))).collect(),
        }
    }

    #[test]
    fn test_viewport_clips_to_rows() {
        let frame = numbered(40);
        let top = frame.viewport(0, 20);
        assert_eq!(top.lines.len(), 20);
        assert_eq!(top.lines[0].text(), "line 0");
        assert!(top.is_clipped());
        assert_eq!(top.position_label(), "lines 1-20 of 40");

        let scrolled = frame.viewport(5, 20);
        assert_eq!(scrolled.first, 5);
        assert_eq!(scrolled.lines[19].text(), "line 24");
    }

    #[test]
    fn test_viewport_offset_clamped_to_bottom() {
        let frame = numbered(40);
        assert_eq!(frame.max_scroll(20), 20);
        let bottom = frame.viewport(usize::MAX, 20);
        assert_eq!(bottom.first, 20);
        assert_eq!(bottom.lines.last().map(Line::text).as_deref(), Some("line 39"));
    }

    #[test]
    fn test_short_frame_fits_unclipped() {
        let frame = numbered(3);
        let view = frame.viewport(7, 20);
        assert_eq!(view.first, 0);
        assert_eq!(view.lines.len(), 3);
        assert!(!view.is_clipped());
    }

    #[test]
    fn test_empty_history_frame() {
        assert_eq!(render_empty().to_plain_text(), "no snapshots recorded\n");
    }
}
