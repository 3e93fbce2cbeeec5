//! Terminal front end for stepping through recorded causal-tree histories.
//!
//! - [`render`]: snapshot → [`render::Frame`], pure text with semantic tones
//! - [`view`]: the scrollable [`view::Screen`] and the [`view::TerminalView`] observer
//! - [`input`]: key bindings, the goto field, and the terminal [`input::TerminalInput`] source
//! - [`config`]: RON viewer config
//! - [`logging`]: tracing subscriber setup for the binary

pub mod config;
pub mod input;
pub mod logging;
pub mod render;
pub mod view;

pub use config::{ConfigError, ViewerConfig};
pub use render::{Frame, RenderOptions, Viewport, render_current, render_snapshot};
pub use view::{Screen, SharedScreen, TerminalView};
