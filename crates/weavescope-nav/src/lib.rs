//! Time-travel navigation over a recorded causal-tree history.
//!
//! [`TimeNavigator`] owns the time cursor. Input collaborators translate raw
//! input into [`Command`]s; the navigator clamps every request into range and,
//! only when the cursor actually moved, tells each registered
//! [`ViewObserver`] about the new `(index, snapshot)`.
//!
//! ```text
//! InputSource ──Command──▶ TimeNavigator ──ViewChange──▶ ViewObserver(s)
//!   (keys, scripts)          (clamp, cursor)               (renderers)
//! ```
//!
//! Everything is synchronous and single-threaded. Commands are applied
//! strictly in the order the source delivers them.

mod command;
mod input;
mod navigator;
mod session;

pub use command::{Command, CommandParseError, parse_commands};
pub use input::{InputError, InputSource, ScriptedInput};
pub use navigator::{
    NavState, ObserverId, TimeNavigator, Transition, ViewChange, ViewObserver, observer_fn,
};
pub use session::{NavigatorSession, SessionStats};
