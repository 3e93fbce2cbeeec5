//! Input sources: where navigation commands come from.
//!
//! A source is handed to the navigator's session explicitly instead of the
//! navigator reaching into a process-wide event loop. The session attaches it
//! on start, pulls commands one at a time, and detaches it exactly once when
//! the session ends.

use std::collections::VecDeque;

use thiserror::Error;

use crate::Command;

/// Errors raised by input sources.
#[derive(Error, Debug)]
pub enum InputError {
    /// The underlying device or terminal failed.
    #[error("input I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `next_command` was called on a source that is not attached.
    #[error("input source is not attached")]
    NotAttached,

    /// `attach` was called twice without a `detach` in between.
    #[error("input source is already attached")]
    AlreadyAttached,
}

/// A stream of navigation commands with an explicit subscription lifecycle.
pub trait InputSource {
    /// Start listening (acquire the device, install handlers, ...).
    fn attach(&mut self) -> Result<(), InputError>;

    /// Block until the next command. `Ok(None)` means the source is closed
    /// and the session should end.
    fn next_command(&mut self) -> Result<Option<Command>, InputError>;

    /// Stop listening and release whatever `attach` acquired.
    fn detach(&mut self) -> Result<(), InputError>;
}

/// An in-memory source that replays a fixed list of commands, then closes.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    pending: VecDeque<Command>,
    attached: bool,
    attach_count: usize,
    detach_count: usize,
}

impl ScriptedInput {
    pub fn new(commands: impl IntoIterator<Item = Command>) -> Self {
        Self {
            pending: commands.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn attach_count(&self) -> usize {
        self.attach_count
    }

    pub fn detach_count(&self) -> usize {
        self.detach_count
    }

    /// Commands not yet delivered.
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl InputSource for ScriptedInput {
    fn attach(&mut self) -> Result<(), InputError> {
        if self.attached {
            return Err(InputError::AlreadyAttached);
        }
        self.attached = true;
        self.attach_count += 1;
        Ok(())
    }

    fn next_command(&mut self) -> Result<Option<Command>, InputError> {
        if !self.attached {
            return Err(InputError::NotAttached);
        }
        Ok(self.pending.pop_front())
    }

    fn detach(&mut self) -> Result<(), InputError> {
        self.attached = false;
        self.detach_count += 1;
        Ok(())
    }
}
