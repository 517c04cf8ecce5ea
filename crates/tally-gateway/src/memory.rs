use crate::store::RecordStore;
use crate::traits::Gateway;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;
use tally_core::records::{Invoice, Quote, Receipt, Subscription, Task, TimeEntry, TrackingRecord};
use tally_core::{ActorId, GatewayError, GatewayResult, RecordId, SessionId};
use tracing::debug;
use uuid::Uuid;

/// In-memory gateway used by tests and local runs.
///
/// Mirrors the managed backend's behavior: session rows plus one typed
/// collection per domain table, all scoped by actor. A closed session is
/// promoted to a [`TimeEntry`] row, the same way the hosted backend's
/// function does it.
#[derive(Default)]
pub struct MemoryGateway {
    sessions: RwLock<HashMap<SessionId, TrackingRecord>>,
    pub tasks: RecordStore<Task>,
    pub time_entries: RecordStore<TimeEntry>,
    pub invoices: RecordStore<Invoice>,
    pub quotes: RecordStore<Quote>,
    pub receipts: RecordStore<Receipt>,
    pub subscriptions: RecordStore<Subscription>,
    fail_next: AtomicBool,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next gateway call fail with a network error.
    pub fn fail_next_call(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    fn take_fault(&self) -> GatewayResult<()> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            Err(GatewayError::Network("injected fault".into()))
        } else {
            Ok(())
        }
    }

    /// The open session row for an actor, if any.
    pub fn open_session_for(&self, actor: &ActorId) -> Option<TrackingRecord> {
        self.sessions
            .read()
            .unwrap()
            .values()
            .find(|r| r.open && &r.actor == actor)
            .cloned()
    }

    pub fn session(&self, id: &SessionId) -> Option<TrackingRecord> {
        self.sessions.read().unwrap().get(id).cloned()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.read().unwrap().len()
    }
}

#[async_trait]
impl Gateway for MemoryGateway {
    async fn create_session_record(&self, actor: &ActorId) -> GatewayResult<SessionId> {
        self.take_fault()?;
        if self.open_session_for(actor).is_some() {
            return Err(GatewayError::Storage(format!(
                "actor {actor} already has an open session"
            )));
        }
        let id = SessionId::new(Uuid::new_v4().to_string());
        let record = TrackingRecord::open_for(id.clone(), actor.clone());
        self.sessions.write().unwrap().insert(id.clone(), record);
        debug!(session = %id, actor = %actor, "session row created");
        Ok(id)
    }

    async fn update_session_record(
        &self,
        id: &SessionId,
        actor: &ActorId,
        elapsed_seconds: u64,
        summary: &str,
    ) -> GatewayResult<()> {
        self.take_fault()?;
        let started_at;
        {
            let mut sessions = self.sessions.write().unwrap();
            let record = sessions
                .get_mut(id)
                .ok_or_else(|| GatewayError::RecordNotFound { id: id.to_string() })?;
            if &record.actor != actor {
                return Err(GatewayError::Unauthorized);
            }
            record.elapsed_seconds = elapsed_seconds;
            record.summary = summary.to_string();
            record.open = false;
            record.updated_at = Utc::now();
            started_at = record.created_at;
        }
        self.time_entries.insert(TimeEntry {
            id: RecordId::generate(),
            actor: actor.clone(),
            task_id: None,
            seconds: elapsed_seconds,
            note: summary.to_string(),
            started_at,
        });
        debug!(session = %id, elapsed_seconds, "session row closed");
        Ok(())
    }
}
