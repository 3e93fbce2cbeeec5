//! Live keyboard input from the controlling terminal.

use std::io::{self, Stdout, Write};

use crossterm::event::{self, Event};
use crossterm::style::Print;
use crossterm::terminal::{
    self, ClearType, DisableLineWrap, EnableLineWrap, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{cursor, execute, queue};
use weavescope_nav::{Command, InputError, InputSource};

use super::dispatch::{KeyDispatcher, KeyOutcome};
use super::map::KeyMap;
use crate::view::SharedScreen;

/// An [`InputSource`] reading key presses from the terminal.
///
/// Attaching switches the terminal into raw mode on the alternate screen;
/// detaching restores it. The goto prompt is drawn on the bottom row. Scroll
/// keys and resizes are applied to the attached screen, if any.
pub struct TerminalInput {
    dispatcher: KeyDispatcher,
    out: Stdout,
    screen: Option<SharedScreen<Stdout>>,
    attached: bool,
}

impl TerminalInput {
    pub fn new(keymap: KeyMap) -> Self {
        Self {
            dispatcher: KeyDispatcher::new(keymap),
            out: io::stdout(),
            screen: None,
            attached: false,
        }
    }

    pub fn with_screen(mut self, screen: SharedScreen<Stdout>) -> Self {
        self.screen = Some(screen);
        self
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    fn draw_prompt(&mut self) -> io::Result<()> {
        let (_, rows) = terminal::size()?;
        queue!(
            self.out,
            cursor::MoveTo(0, rows.saturating_sub(1)),
            terminal::Clear(ClearType::CurrentLine)
        )?;
        match self.dispatcher.goto_prompt() {
            Some(text) => queue!(self.out, Print(format!("go to: {text}")), cursor::Show)?,
            None => queue!(self.out, cursor::Hide)?,
        }
        self.out.flush()
    }

    /// Redraw for a new terminal size: the screen first, then the open prompt.
    fn repaint(&mut self) -> io::Result<()> {
        if let Some(screen) = &self.screen {
            screen.borrow_mut().paint()?;
        }
        if self.dispatcher.goto_prompt().is_some() {
            self.draw_prompt()?;
        }
        Ok(())
    }
}

impl InputSource for TerminalInput {
    fn attach(&mut self) -> Result<(), InputError> {
        if self.attached {
            return Err(InputError::AlreadyAttached);
        }
        terminal::enable_raw_mode()?;
        if let Err(e) = execute!(self.out, EnterAlternateScreen, DisableLineWrap, cursor::Hide) {
            if let Err(restore) = terminal::disable_raw_mode() {
                tracing::warn!(error = %restore, "failed to leave raw mode after attach failure");
            }
            return Err(e.into());
        }
        self.attached = true;
        tracing::debug!("terminal input attached");
        Ok(())
    }

    fn next_command(&mut self) -> Result<Option<Command>, InputError> {
        if !self.attached {
            return Err(InputError::NotAttached);
        }
        loop {
            let key = match event::read()? {
                Event::Key(key) => key,
                Event::Resize(..) => {
                    self.repaint()?;
                    continue;
                }
                _ => continue,
            };
            let was_editing = self.dispatcher.goto_prompt().is_some();
            let outcome = self.dispatcher.dispatch(&key);
            if was_editing || self.dispatcher.goto_prompt().is_some() {
                self.draw_prompt()?;
            }
            match outcome {
                KeyOutcome::Command(command) => return Ok(Some(command)),
                KeyOutcome::Quit => return Ok(None),
                KeyOutcome::Scroll(scroll) => {
                    if let Some(screen) = &self.screen {
                        screen.borrow_mut().scroll(scroll)?;
                    }
                }
                KeyOutcome::Consumed | KeyOutcome::Ignored => {}
            }
        }
    }

    fn detach(&mut self) -> Result<(), InputError> {
        if !self.attached {
            return Ok(());
        }
        self.attached = false;
        let restored = execute!(self.out, cursor::Show, EnableLineWrap, LeaveAlternateScreen);
        terminal::disable_raw_mode()?;
        tracing::debug!("terminal input detached");
        Ok(restored?)
    }
}
