//! Transient notification lifecycle.
//!
//! Every toast advances through an explicit phase machine:
//!
//! ```text
//! hidden -> entering -> visible -> leaving -> removed
//! ```
//!
//! Each timed transition is a scheduled task holding an abort handle, so a
//! later notification supersedes earlier ones deterministically: anything
//! that has not started leaving is pushed straight into its exit transition
//! and its pending timer is cancelled. Overlap is therefore bounded to the
//! exit window instead of depending on timer interleaving.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::AbortHandle;

/// Display phases of a single toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    /// Inserted but not yet transitioning in.
    Hidden,
    /// Entrance transition in progress.
    Entering,
    /// Fully shown for the display window.
    Visible,
    /// Exit transition in progress.
    Leaving,
    /// Gone from the notification region.
    Removed,
}

impl ToastPhase {
    /// The next phase in the lifecycle; `Removed` is terminal.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Hidden => Self::Entering,
            Self::Entering => Self::Visible,
            Self::Visible => Self::Leaving,
            Self::Leaving | Self::Removed => Self::Removed,
        }
    }

    /// Whether the toast carries its shown styling.
    #[must_use]
    pub const fn is_shown(self) -> bool {
        matches!(self, Self::Entering | Self::Visible)
    }

    /// Whether the toast still occupies the notification region.
    #[must_use]
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Removed)
    }
}

/// How long each timed phase lasts.
#[derive(Debug, Clone, Copy)]
pub struct ToastTimings {
    /// Gap between insertion and the entrance transition.
    pub entrance: Duration,
    /// How long the toast stays fully visible.
    pub display: Duration,
    /// Length of the entrance and exit transitions.
    pub transition: Duration,
}

impl Default for ToastTimings {
    fn default() -> Self {
        Self {
            entrance: Duration::from_millis(10),
            display: Duration::from_secs(3),
            transition: Duration::from_millis(300),
        }
    }
}

impl ToastTimings {
    /// How long a toast rests in the given phase, if the phase is timed.
    const fn dwell(&self, phase: ToastPhase) -> Option<Duration> {
        match phase {
            ToastPhase::Hidden => Some(self.entrance),
            ToastPhase::Entering | ToastPhase::Leaving => Some(self.transition),
            ToastPhase::Visible => Some(self.display),
            ToastPhase::Removed => None,
        }
    }
}

/// Unique handle for a scheduled toast.
pub type ToastId = u64;

/// A snapshot of one toast for rendering.
#[derive(Debug, Clone)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub phase: ToastPhase,
}

struct Entry {
    toast: Toast,
    timer: Option<AbortHandle>,
}

#[derive(Default)]
struct State {
    next_id: ToastId,
    entries: Vec<Entry>,
}

/// Schedules toast phase transitions and supersedes stale toasts.
///
/// Cheaply cloneable; all clones share the same notification region.
#[derive(Clone)]
pub struct Toaster {
    inner: Arc<Inner>,
}

struct Inner {
    timings: ToastTimings,
    state: Mutex<State>,
}

impl Default for Toaster {
    fn default() -> Self {
        Self::new()
    }
}

impl Toaster {
    /// A toaster with production timings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_timings(ToastTimings::default())
    }

    /// A toaster with explicit timings (tests use very short ones).
    #[must_use]
    pub fn with_timings(timings: ToastTimings) -> Self {
        Self {
            inner: Arc::new(Inner {
                timings,
                state: Mutex::new(State::default()),
            }),
        }
    }

    /// Show a message, superseding any toast that has not started leaving.
    ///
    /// Must be called from within a Tokio runtime; the phase transitions are
    /// scheduled as runtime tasks.
    pub fn notify(&self, message: impl Into<String>) -> ToastId {
        let mut state = self.lock();

        // Push every still-showing toast straight into its exit.
        let superseded: Vec<ToastId> = state
            .entries
            .iter()
            .filter(|e| matches!(
                e.toast.phase,
                ToastPhase::Hidden | ToastPhase::Entering | ToastPhase::Visible
            ))
            .map(|e| e.toast.id)
            .collect();
        for id in superseded {
            self.transition(&mut state, id, ToastPhase::Leaving);
        }

        let id = state.next_id;
        state.next_id += 1;
        state.entries.push(Entry {
            toast: Toast {
                id,
                message: message.into(),
                phase: ToastPhase::Hidden,
            },
            timer: None,
        });
        self.schedule(&mut state, id, self.inner.timings.entrance, ToastPhase::Hidden);
        id
    }

    /// Snapshot of toasts still occupying the notification region,
    /// oldest first.
    #[must_use]
    pub fn active(&self) -> Vec<Toast> {
        self.lock().entries.iter().map(|e| e.toast.clone()).collect()
    }

    /// Current phase of a toast, if it has not been removed.
    #[must_use]
    pub fn phase(&self, id: ToastId) -> Option<ToastPhase> {
        self.lock()
            .entries
            .iter()
            .find(|e| e.toast.id == id)
            .map(|e| e.toast.phase)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Advance a toast to the next phase and schedule the one after.
    ///
    /// `from` is the phase the timer was scheduled for; a timer that lost a
    /// race against a supersession is stale and ignored.
    fn advance(&self, id: ToastId, from: ToastPhase) {
        let mut state = self.lock();
        let Some(current) = state
            .entries
            .iter()
            .find(|e| e.toast.id == id)
            .map(|e| e.toast.phase)
        else {
            return;
        };
        if current != from {
            return;
        }
        self.transition(&mut state, id, current.next());
    }

    /// Move a toast into `phase`, cancelling its pending timer and
    /// scheduling the next transition (or dropping the entry on removal).
    fn transition(&self, state: &mut State, id: ToastId, phase: ToastPhase) {
        let Some(pos) = state.entries.iter().position(|e| e.toast.id == id) else {
            return;
        };
        if let Some(entry) = state.entries.get_mut(pos) {
            if let Some(timer) = entry.timer.take() {
                timer.abort();
            }
            entry.toast.phase = phase;
        }
        if phase == ToastPhase::Removed {
            state.entries.remove(pos);
            return;
        }
        if let Some(dwell) = self.inner.timings.dwell(phase) {
            self.schedule(state, id, dwell, phase);
        }
    }

    /// Spawn the timer that advances `id` out of `from` after `delay`.
    fn schedule(&self, state: &mut State, id: ToastId, delay: Duration, from: ToastPhase) {
        let toaster = self.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            toaster.advance(id, from);
        })
        .abort_handle();

        if let Some(entry) = state.entries.iter_mut().find(|e| e.toast.id == id) {
            entry.timer = Some(handle);
        }
    }
}
