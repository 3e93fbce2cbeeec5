//! A navigator bound to one input source for the length of a debugging session.

use crate::{InputError, InputSource, TimeNavigator};

/// Counters for a finished [`NavigatorSession::run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Commands delivered by the source.
    pub commands: usize,
    /// Commands that actually moved the cursor.
    pub moves: usize,
}

/// Pumps commands from an [`InputSource`] into a [`TimeNavigator`].
///
/// The source is attached when `run` starts and detached exactly once when it
/// returns, whether the source closed, errored, or a panic unwound through.
pub struct NavigatorSession<S: InputSource> {
    navigator: TimeNavigator,
    source: S,
}

impl<S: InputSource> NavigatorSession<S> {
    pub fn new(navigator: TimeNavigator, source: S) -> Self {
        Self { navigator, source }
    }

    pub fn navigator(&self) -> &TimeNavigator {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut TimeNavigator {
        &mut self.navigator
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Apply commands in delivery order until the source closes.
    pub fn run(&mut self) -> Result<SessionStats, InputError> {
        self.run_with(|_| {})
    }

    /// Like [`run`](Self::run), calling `on_attached` once the source is
    /// attached and before the first command is pulled.
    pub fn run_with<F>(&mut self, on_attached: F) -> Result<SessionStats, InputError>
    where
        F: FnOnce(&TimeNavigator),
    {
        let mut attachment = Attachment::acquire(&mut self.source)?;
        tracing::info!(snapshots = self.navigator.len(), "session started");
        on_attached(&self.navigator);

        let mut stats = SessionStats::default();
        while let Some(command) = attachment.source.next_command()? {
            stats.commands += 1;
            let transition = self.navigator.apply(command);
            tracing::debug!(%command, ?transition, "command applied");
            if transition.is_moved() {
                stats.moves += 1;
            }
        }

        attachment.release()?;
        tracing::info!(commands = stats.commands, moves = stats.moves, "session ended");
        Ok(stats)
    }

    /// End the session: dispose the navigator and hand back the source.
    pub fn close(mut self) -> S {
        self.navigator.dispose();
        self.source
    }
}

/// Keeps a source attached; detaches on drop unless released explicitly.
struct Attachment<'a, S: InputSource> {
    source: &'a mut S,
    released: bool,
}

impl<'a, S: InputSource> Attachment<'a, S> {
    fn acquire(source: &'a mut S) -> Result<Self, InputError> {
        source.attach()?;
        Ok(Self { source, released: false })
    }

    fn release(mut self) -> Result<(), InputError> {
        self.released = true;
        self.source.detach()
    }
}

impl<S: InputSource> Drop for Attachment<'_, S> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = self.source.detach() {
            tracing::warn!(error = %e, "failed to detach input source");
        }
    }
}
