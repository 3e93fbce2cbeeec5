//! Keyboard input: key bindings, the goto field, and the terminal source.
//!
//! ```text
//! crossterm KeyEvent → KeyDispatcher (KeyMap / GotoField) → KeyOutcome
//!                          ↓
//!                    TerminalInput::next_command → Command
//! ```

mod binding;
mod defaults;
mod dispatch;
mod goto;
mod map;
mod terminal;

pub use binding::{Binding, KeyAction, KeySpec, KeySpecError, Scroll};
pub use defaults::default_bindings;
pub use dispatch::{KeyDispatcher, KeyOutcome};
pub use goto::{GotoField, GotoOutcome};
pub use map::KeyMap;
pub use terminal::TerminalInput;
