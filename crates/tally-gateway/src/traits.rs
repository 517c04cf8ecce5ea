use async_trait::async_trait;
use tally_core::{ActorId, GatewayResult, SessionId};

/// Contract the session clock consumes. Implemented by the managed backend
/// client in production and by [`crate::MemoryGateway`] in tests.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Open a new tracking session row for the actor.
    async fn create_session_record(&self, actor: &ActorId) -> GatewayResult<SessionId>;

    /// Record the final elapsed time against an open session row and close it.
    async fn update_session_record(
        &self,
        id: &SessionId,
        actor: &ActorId,
        elapsed_seconds: u64,
        summary: &str,
    ) -> GatewayResult<()>;
}
