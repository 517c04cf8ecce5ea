use crate::notice::Notice;
use crate::session::{format_hms, ClockState, TrackingSession};
use std::sync::Arc;
use std::time::Duration;
use tally_core::config::ClockConfig;
use tally_core::{ActorId, SessionId};
use tally_gateway::Gateway;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Owns exactly one [`TrackingSession`] for the current actor.
///
/// All operations take `&mut self`, so calls are serialized: nothing can
/// observe the session id before the creation request has resolved. Invalid
/// transitions are silent no-ops; gateway failures are converted into
/// warning notices and never abort a local transition, except `start`,
/// which stays `Idle` when the session row cannot be created.
pub struct SessionClock<G: Gateway> {
    gateway: Arc<G>,
    actor: Option<ActorId>,
    session: TrackingSession,
    tick_interval: Duration,
    tick: Option<JoinHandle<()>>,
    elapsed_tx: watch::Sender<u64>,
    notice_tx: mpsc::UnboundedSender<Notice>,
}

impl<G: Gateway> SessionClock<G> {
    /// Create an idle clock. The returned receiver delivers user-visible
    /// notices to the view layer.
    pub fn new(gateway: Arc<G>, config: &ClockConfig) -> (Self, mpsc::UnboundedReceiver<Notice>) {
        let (notice_tx, notice_rx) = mpsc::unbounded_channel();
        let (elapsed_tx, _) = watch::channel(0);
        let clock = Self {
            gateway,
            actor: None,
            session: TrackingSession::idle(),
            tick_interval: config.tick_interval,
            tick: None,
            elapsed_tx,
            notice_tx,
        };
        (clock, notice_rx)
    }

    pub fn state(&self) -> ClockState {
        self.session.state
    }

    pub fn session_id(&self) -> Option<&SessionId> {
        self.session.session_id.as_ref()
    }

    pub fn actor(&self) -> Option<&ActorId> {
        self.actor.as_ref()
    }

    /// Elapsed seconds as of now, independent of tick cadence.
    pub fn elapsed(&self) -> u64 {
        self.session.elapsed_at(Instant::now())
    }

    /// Live elapsed-seconds feed, updated once per tick while running.
    pub fn subscribe_elapsed(&self) -> watch::Receiver<u64> {
        self.elapsed_tx.subscribe()
    }

    /// Store the authenticated actor and auto-start tracking.
    pub async fn sign_in(&mut self, actor: ActorId) {
        info!(actor = %actor, "actor signed in");
        self.actor = Some(actor);
        if !self.session.is_open() {
            self.start().await;
        }
    }

    /// Stop tracking (best-effort persist) and forget the actor.
    pub async fn sign_out(&mut self) {
        if self.session.is_open() {
            self.stop().await;
        }
        if let Some(actor) = self.actor.take() {
            info!(actor = %actor, "actor signed out");
        }
    }

    /// Open a new session and begin ticking. No-op unless an actor is
    /// signed in and no session is open. Stays `Idle` on gateway failure.
    pub async fn start(&mut self) {
        if self.session.is_open() || self.session.state != ClockState::Idle {
            return;
        }
        let Some(actor) = self.actor.clone() else {
            return;
        };
        match self.gateway.create_session_record(&actor).await {
            Ok(id) => {
                info!(session = %id, actor = %actor, "tracking session opened");
                self.session.session_id = Some(id);
                self.session.accumulated_seconds = 0;
                self.session.run_started_at = Some(Instant::now());
                self.session.state = ClockState::Running;
                self.elapsed_tx.send_replace(0);
                self.arm_tick();
            }
            Err(err) => {
                warn!(error = %err, "failed to open tracking session");
                self.notify(Notice::warning(format!("could not start tracking: {err}")));
            }
        }
    }

    /// Freeze the elapsed count. No-op unless `Running`.
    pub fn pause(&mut self) {
        if self.session.state != ClockState::Running {
            return;
        }
        self.disarm_tick();
        self.session.accumulated_seconds = self.session.elapsed_at(Instant::now());
        self.session.run_started_at = None;
        self.session.state = ClockState::Paused;
        self.elapsed_tx.send_replace(self.session.accumulated_seconds);
        debug!(elapsed = self.session.accumulated_seconds, "tracking paused");
    }

    /// Restart the tick from the frozen baseline. No-op unless a session
    /// is open and the clock is not already running.
    pub fn resume(&mut self) {
        if self.session.state == ClockState::Running || !self.session.is_open() {
            return;
        }
        self.session.run_started_at = Some(Instant::now());
        self.session.state = ClockState::Running;
        self.arm_tick();
        debug!(baseline = self.session.accumulated_seconds, "tracking resumed");
    }

    /// Persist the final elapsed time (best-effort) and reset to `Idle`.
    /// Valid whenever a session id exists, whether running or paused.
    /// Local state always resets, even when persistence fails.
    pub async fn stop(&mut self) {
        let Some(id) = self.session.session_id.clone() else {
            return;
        };
        let Some(actor) = self.actor.clone() else {
            return;
        };
        self.disarm_tick();
        let elapsed = self.session.elapsed_at(Instant::now());
        let summary = format!("Tracked {}", format_hms(elapsed));
        match self
            .gateway
            .update_session_record(&id, &actor, elapsed, &summary)
            .await
        {
            Ok(()) => info!(session = %id, elapsed, "tracking session closed"),
            Err(err) => {
                warn!(error = %err, elapsed, "failed to persist tracking session");
                self.notify(Notice::warning(format!(
                    "could not save {} of tracked time: {err}",
                    format_hms(elapsed)
                )));
            }
        }
        self.session = TrackingSession::idle();
        self.elapsed_tx.send_replace(0);
    }

    /// Convenience dispatcher for the single track/pause control.
    pub async fn toggle(&mut self) {
        match self.session.state {
            ClockState::Paused => self.resume(),
            ClockState::Running => self.pause(),
            ClockState::Idle if self.session.is_open() => self.resume(),
            ClockState::Idle => self.start().await,
        }
    }

    fn arm_tick(&mut self) {
        // Never two tick tasks at once.
        self.disarm_tick();
        let Some(started) = self.session.run_started_at else {
            return;
        };
        let baseline = self.session.accumulated_seconds;
        let tx = self.elapsed_tx.clone();
        let period = self.tick_interval;
        self.tick = Some(tokio::spawn(async move {
            let mut tick = interval(period);
            tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
            tick.tick().await;
            loop {
                let now = tick.tick().await;
                tx.send_replace(baseline + now.duration_since(started).as_secs());
            }
        }));
    }

    fn disarm_tick(&mut self) {
        if let Some(handle) = self.tick.take() {
            handle.abort();
        }
    }

    fn notify(&self, notice: Notice) {
        // The view may have dropped the receiver; notices are best-effort.
        let _ = self.notice_tx.send(notice);
    }
}

impl<G: Gateway> Drop for SessionClock<G> {
    fn drop(&mut self) {
        self.disarm_tick();
    }
}
