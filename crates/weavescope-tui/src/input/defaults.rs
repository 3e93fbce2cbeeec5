//! Default key bindings: the out-of-box binding table.
//!
//! Config files append to this table; a later binding for the same key wins.

use crossterm::event::KeyCode;
use weavescope_nav::Command;

use super::binding::{Binding, KeyAction, KeySpec, Scroll};

/// Build the default binding table.
pub fn default_bindings() -> Vec<Binding> {
    let mut b = Vec::with_capacity(20);

    // ====================================================================
    // Stepping
    // ====================================================================

    b.push(Binding::nav(KeySpec::plain(KeyCode::Left), Command::JumpBy(-1), "Back 1"));
    b.push(Binding::nav(KeySpec::plain(KeyCode::Right), Command::JumpBy(1), "Forward 1"));
    b.push(Binding::nav(KeySpec::char(','), Command::JumpBy(-1), "Back 1"));
    b.push(Binding::nav(KeySpec::char('.'), Command::JumpBy(1), "Forward 1"));
    b.push(Binding::nav(KeySpec::char('['), Command::JumpBy(-10), "Back 10"));
    b.push(Binding::nav(KeySpec::char(']'), Command::JumpBy(10), "Forward 10"));
    b.push(Binding::nav(KeySpec::char('{'), Command::JumpBy(-100), "Back 100"));
    b.push(Binding::nav(KeySpec::char('}'), Command::JumpBy(100), "Forward 100"));

    // ====================================================================
    // Absolute jumps
    // ====================================================================

    b.push(Binding::nav(KeySpec::plain(KeyCode::Home), Command::JumpTo(0), "First snapshot"));
    b.push(Binding::nav(KeySpec::plain(KeyCode::End), Command::JumpTo(i64::MAX), "Last snapshot"));
    b.push(Binding::new(KeySpec::char('g'), KeyAction::BeginGoto, "Go to snapshot"));
    b.push(Binding::new(KeySpec::char(':'), KeyAction::BeginGoto, "Go to snapshot"));

    // ====================================================================
    // Scrolling within a snapshot
    // ====================================================================

    b.push(Binding::new(KeySpec::plain(KeyCode::Up), KeyAction::Scroll(Scroll::Line(-1)), "Scroll"));
    b.push(Binding::new(KeySpec::plain(KeyCode::Down), KeyAction::Scroll(Scroll::Line(1)), "Scroll"));
    b.push(Binding::new(KeySpec::plain(KeyCode::PageUp), KeyAction::Scroll(Scroll::Page(-1)), "Scroll"));
    b.push(Binding::new(KeySpec::plain(KeyCode::PageDown), KeyAction::Scroll(Scroll::Page(1)), "Scroll"));

    // ====================================================================
    // Session
    // ====================================================================

    b.push(Binding::new(KeySpec::char('q'), KeyAction::Quit, "Quit"));
    b.push(Binding::new(KeySpec::plain(KeyCode::Esc), KeyAction::Quit, "Quit"));
    b.push(Binding::new(KeySpec::ctrl('c'), KeyAction::Quit, "Quit"));

    b
}
