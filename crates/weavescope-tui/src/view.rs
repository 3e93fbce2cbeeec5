//! Terminal painting for rendered frames.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{self, ClearType};
use crossterm::{cursor, queue};
use weavescope_nav::{ViewChange, ViewObserver};

use crate::input::Scroll;
use crate::render::{Frame, Line, RenderOptions, Tone, render_snapshot};

/// Foreground colors per [`Tone`]. Tokyo Night inspired.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Theme {
    pub fg: Color,
    pub title: Color,
    pub heading: Color,
    pub highlight: Color,
    pub dim: Color,
    pub warning: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: Color::Rgb { r: 0xc8, g: 0xcc, b: 0xd9 },
            title: Color::Rgb { r: 0x7a, g: 0xa2, b: 0xf7 },
            heading: Color::Rgb { r: 0xbb, g: 0x79, b: 0xe8 },
            highlight: Color::Rgb { r: 0x9e, g: 0xce, b: 0x6a },
            dim: Color::Rgb { r: 0x44, g: 0x4b, b: 0x59 },
            warning: Color::Rgb { r: 0xf7, g: 0x61, b: 0x6a },
        }
    }
}

impl Theme {
    pub fn color(&self, tone: Tone) -> Color {
        match tone {
            Tone::Plain => self.fg,
            Tone::Title => self.title,
            Tone::Heading => self.heading,
            Tone::Highlight => self.highlight,
            Tone::Dim => self.dim,
            Tone::Warning => self.warning,
        }
    }
}

/// Rows kept free below the snapshot body: a blank line and the hint line.
const FOOTER_ROWS: usize = 2;
/// The bottom row, where the goto prompt is drawn.
const PROMPT_ROWS: usize = 1;

/// What is on the terminal: the current frame and how far it is scrolled.
///
/// Shared between the [`TerminalView`] observer (new snapshots) and the
/// terminal input source (scroll keys, resizes).
pub struct Screen<W: Write> {
    out: W,
    theme: Theme,
    footer: Option<String>,
    frame: Frame,
    scroll: usize,
    fixed_rows: Option<u16>,
}

/// A [`Screen`] handle for single-threaded sharing.
pub type SharedScreen<W> = Rc<RefCell<Screen<W>>>;

impl<W: Write> Screen<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            theme: Theme::default(),
            footer: None,
            frame: Frame::default(),
            scroll: 0,
            fixed_rows: None,
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    /// Paint into a terminal of exactly `rows` rows instead of asking the tty.
    pub fn with_rows(mut self, rows: u16) -> Self {
        self.fixed_rows = Some(rows);
        self
    }

    pub fn shared(self) -> SharedScreen<W> {
        Rc::new(RefCell::new(self))
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll
    }

    /// Replace the frame, back at the top, and paint it.
    pub fn show(&mut self, frame: Frame) -> io::Result<()> {
        self.frame = frame;
        self.scroll = 0;
        self.paint()
    }

    /// Move the window over the current frame. Repaints only if it moved.
    pub fn scroll(&mut self, scroll: Scroll) -> io::Result<()> {
        let rows = self.body_rows()?;
        let delta = match scroll {
            Scroll::Line(n) => i64::from(n),
            Scroll::Page(n) => i64::from(n).saturating_mul(rows as i64),
        };
        let max = self.frame.max_scroll(rows) as i64;
        // max came from a usize, so the clamped value fits
        let next = (self.scroll as i64).saturating_add(delta).clamp(0, max) as usize;
        if next == self.scroll {
            return Ok(());
        }
        self.scroll = next;
        self.paint()
    }

    /// Clear the terminal and draw the visible part of the frame plus the footer.
    pub fn paint(&mut self) -> io::Result<()> {
        let rows = self.body_rows()?;
        let viewport = self.frame.viewport(self.scroll, rows);
        self.scroll = viewport.first;

        queue!(self.out, cursor::MoveTo(0, 0), terminal::Clear(ClearType::All))?;
        for line in viewport.lines {
            paint_line(&mut self.out, line, &self.theme)?;
        }
        if let Some(footer) = &self.footer {
            let mut hint = Line::styled(footer.as_str(), Tone::Dim);
            if viewport.is_clipped() {
                hint = hint.push(format!(" · {}", viewport.position_label()), Tone::Dim);
            }
            paint_line(&mut self.out, &Line::new(), &self.theme)?;
            paint_line(&mut self.out, &hint, &self.theme)?;
        }
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn body_rows(&self) -> io::Result<usize> {
        let rows = match self.fixed_rows {
            Some(rows) => rows,
            None => terminal::size()?.1,
        };
        let reserved = PROMPT_ROWS + if self.footer.is_some() { FOOTER_ROWS } else { 0 };
        Ok(usize::from(rows).saturating_sub(reserved).max(1))
    }
}

/// Lines end in `\r\n` since raw mode disables output newline translation.
fn paint_line(out: &mut impl Write, line: &Line, theme: &Theme) -> io::Result<()> {
    for span in &line.spans {
        let bold = matches!(span.tone, Tone::Title | Tone::Heading | Tone::Highlight);
        queue!(out, SetForegroundColor(theme.color(span.tone)))?;
        if bold {
            queue!(out, SetAttribute(Attribute::Bold))?;
        }
        queue!(out, Print(&span.text), SetAttribute(Attribute::Reset), ResetColor)?;
    }
    queue!(out, Print("\r\n"))
}

/// A [`ViewObserver`] that shows every newly selected snapshot on a [`Screen`].
pub struct TerminalView<W: Write> {
    screen: SharedScreen<W>,
    total: usize,
    options: RenderOptions,
}

impl<W: Write> TerminalView<W> {
    pub fn new(screen: SharedScreen<W>, total: usize, options: RenderOptions) -> Self {
        Self { screen, total, options }
    }
}

impl<W: Write> ViewObserver for TerminalView<W> {
    fn view_changed(&mut self, change: &ViewChange<'_>) {
        let frame = render_snapshot(change.index, self.total, change.snapshot, &self.options);
        if let Err(e) = self.screen.borrow_mut().show(frame) {
            tracing::warn!(index = change.index, error = %e, "failed to paint snapshot");
        }
    }
}
