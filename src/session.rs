use std::time::{Duration, Instant};
use tracing::debug;

pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(150);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Idle,
    Interacting,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragTransition {
    /// First event of a burst: Idle -> Interacting.
    Started,
    /// Further event while already interacting; the settle window restarts.
    Continued,
}

/// Debounced "user is dragging the selector" tracker for one chart.
///
/// The renderer only reports index changes, never a gesture end, so the
/// session settles once `settle_delay` passes without a drag event. Hosts
/// either run a timer and call [`settle`](Self::settle) when it fires, or
/// call [`poll`](Self::poll) every frame.
#[derive(Clone, Debug)]
pub struct InteractionSession {
    state: SessionState,
    settle_delay: Duration,
    last_event: Option<Instant>,
}

impl Default for InteractionSession {
    fn default() -> Self {
        Self::new(DEFAULT_SETTLE_DELAY)
    }
}

impl InteractionSession {
    pub fn new(settle_delay: Duration) -> Self {
        Self {
            state: SessionState::Idle,
            settle_delay,
            last_event: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_interacting(&self) -> bool {
        self.state == SessionState::Interacting
    }

    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    pub fn record_drag(&mut self, now: Instant) -> DragTransition {
        self.last_event = Some(now);
        match self.state {
            SessionState::Idle => {
                debug!("drag started");
                self.state = SessionState::Interacting;
                DragTransition::Started
            }
            SessionState::Interacting => DragTransition::Continued,
        }
    }

    /// When the session settles if no further drag arrives.
    pub fn settle_deadline(&self) -> Option<Instant> {
        match self.state {
            SessionState::Interacting => self.last_event.map(|t| t + self.settle_delay),
            SessionState::Idle => None,
        }
    }

    /// Settles if the quiet period has elapsed by `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.settle_deadline() {
            Some(deadline) if now >= deadline => self.settle(),
            _ => false,
        }
    }

    /// Interacting -> Idle. Returns false when already idle.
    pub fn settle(&mut self) -> bool {
        if self.state == SessionState::Idle {
            return false;
        }
        debug!("drag settled");
        self.state = SessionState::Idle;
        self.last_event = None;
        true
    }
}
