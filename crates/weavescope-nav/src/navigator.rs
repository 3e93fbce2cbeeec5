//! The time cursor and its state machine.
//!
//! ```text
//!            len() == 0                      len() > 0
//!   new ──────────────▶ Empty        new ──────────────▶ At(0)
//!                        │ any command                    │ jump_by / jump_to
//!                        └─▶ Empty (no-op)                ▼
//!                                             clamp(target, 0, len-1)
//!                                                         │
//!                                     changed? ──yes──▶ At(target) + notify
//!                                         │
//!                                         no ──▶ unchanged, no notification
//! ```

use std::sync::Arc;

use weavescope_model::{History, Snapshot};

use crate::Command;

/// Where the cursor is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavState {
    /// The history has no snapshots; there is no valid cursor.
    Empty,
    /// The cursor points at a valid snapshot index.
    At(usize),
}

impl NavState {
    pub fn index(self) -> Option<usize> {
        match self {
            NavState::Empty => None,
            NavState::At(i) => Some(i),
        }
    }
}

/// What a navigation command did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Moved { from: usize, to: usize },
    /// Clamped target equalled the cursor, the history is empty, or the
    /// navigator was disposed.
    Unchanged,
}

impl Transition {
    pub fn is_moved(self) -> bool {
        matches!(self, Transition::Moved { .. })
    }
}

/// Payload of a "view changed" notification.
#[derive(Clone, Copy, Debug)]
pub struct ViewChange<'a> {
    pub index: usize,
    pub snapshot: &'a Snapshot,
}

/// A presentation collaborator. Only told about actual cursor changes.
pub trait ViewObserver {
    fn view_changed(&mut self, change: &ViewChange<'_>);
}

impl<F> ViewObserver for F
where
    F: FnMut(&ViewChange<'_>),
{
    fn view_changed(&mut self, change: &ViewChange<'_>) {
        self(change)
    }
}

/// Box a closure as a [`ViewObserver`].
pub fn observer_fn<F>(f: F) -> Box<dyn ViewObserver>
where
    F: FnMut(&ViewChange<'_>) + 'static,
{
    Box::new(f)
}

/// Handle returned by [`TimeNavigator::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Owns the time cursor over a shared, read-only [`History`].
///
/// The cursor is always either a valid index into the history or
/// [`NavState::Empty`]; every request is clamped, never rejected.
pub struct TimeNavigator {
    history: Arc<History>,
    state: NavState,
    observers: Vec<(ObserverId, Box<dyn ViewObserver>)>,
    next_observer: u64,
    disposed: bool,
}

impl TimeNavigator {
    /// Start at `At(0)`, or `Empty` for an empty history.
    pub fn new(history: Arc<History>) -> Self {
        let state = if history.is_empty() { NavState::Empty } else { NavState::At(0) };
        tracing::debug!(snapshots = history.len(), ?state, "navigator created");
        Self {
            history,
            state,
            observers: Vec::new(),
            next_observer: 0,
            disposed: false,
        }
    }

    pub fn history(&self) -> &Arc<History> {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    pub fn cursor(&self) -> Option<usize> {
        self.state.index()
    }

    /// The snapshot under the cursor.
    pub fn current(&self) -> Option<&Snapshot> {
        self.cursor().map(|i| self.history.at(i))
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Register a view observer. It is called after every cursor change.
    pub fn subscribe(&mut self, observer: Box<dyn ViewObserver>) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, observer));
        id
    }

    /// Remove an observer. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _)| *oid != id);
        self.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Move by `delta` snapshots, clamped into range.
    pub fn jump_by(&mut self, delta: i64) -> Transition {
        let Some(current) = self.live_cursor("jump_by") else {
            return Transition::Unchanged;
        };
        let target = i64::try_from(current).unwrap_or(i64::MAX).saturating_add(delta);
        self.move_to(current, target)
    }

    /// Move to `absolute`, clamped into range.
    pub fn jump_to(&mut self, absolute: i64) -> Transition {
        let Some(current) = self.live_cursor("jump_to") else {
            return Transition::Unchanged;
        };
        self.move_to(current, absolute)
    }

    pub fn apply(&mut self, command: Command) -> Transition {
        match command {
            Command::JumpBy(delta) => self.jump_by(delta),
            Command::JumpTo(absolute) => self.jump_to(absolute),
        }
    }

    /// Release observers. Navigating afterwards is a programmer error.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.observers.clear();
        self.disposed = true;
        tracing::debug!(cursor = ?self.state, "navigator disposed");
    }

    /// Cursor index if the navigator is live and non-empty.
    fn live_cursor(&self, op: &'static str) -> Option<usize> {
        debug_assert!(!self.disposed, "{op} called on a disposed TimeNavigator");
        if self.disposed {
            tracing::warn!(op, "navigation after dispose ignored");
            return None;
        }
        self.state.index()
    }

    fn clamp(&self, target: i64) -> usize {
        let last = i64::try_from(self.history.len().saturating_sub(1)).unwrap_or(i64::MAX);
        // target is in [0, last] and last came from a usize
        target.clamp(0, last) as usize
    }

    fn move_to(&mut self, from: usize, target: i64) -> Transition {
        let to = self.clamp(target);
        if to == from {
            tracing::trace!(target, cursor = from, "clamped target equals cursor");
            return Transition::Unchanged;
        }

        self.state = NavState::At(to);
        tracing::debug!(from, to, target, "cursor moved");

        let history = Arc::clone(&self.history);
        let change = ViewChange {
            index: to,
            snapshot: history.at(to),
        };
        for (_, observer) in &mut self.observers {
            observer.view_changed(&change);
        }

        Transition::Moved { from, to }
    }
}

impl std::fmt::Debug for TimeNavigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimeNavigator")
            .field("snapshots", &self.history.len())
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .field("disposed", &self.disposed)
            .finish()
    }
}
