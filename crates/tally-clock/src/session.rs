use tally_core::SessionId;
use tokio::time::Instant;

/// Clock state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Idle,
    Running,
    Paused,
}

/// The single tracked activity owned by a [`crate::SessionClock`].
#[derive(Debug, Clone)]
pub struct TrackingSession {
    /// Gateway-assigned id; `None` while no session is open.
    pub session_id: Option<SessionId>,
    pub state: ClockState,
    /// Seconds counted before the current running interval began.
    pub accumulated_seconds: u64,
    /// Start of the current running interval; set only while `Running`.
    pub run_started_at: Option<Instant>,
}

impl TrackingSession {
    pub fn idle() -> Self {
        Self {
            session_id: None,
            state: ClockState::Idle,
            accumulated_seconds: 0,
            run_started_at: None,
        }
    }

    /// Elapsed seconds as of `now`, re-derived from the interval start so
    /// missed ticks do not lose time.
    pub fn elapsed_at(&self, now: Instant) -> u64 {
        match self.run_started_at {
            Some(started) => self.accumulated_seconds + now.duration_since(started).as_secs(),
            None => self.accumulated_seconds,
        }
    }

    pub fn is_open(&self) -> bool {
        self.session_id.is_some()
    }
}

impl Default for TrackingSession {
    fn default() -> Self {
        Self::idle()
    }
}

/// Format seconds as `hh:mm:ss` for display and session summaries.
pub fn format_hms(seconds: u64) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}
