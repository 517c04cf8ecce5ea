use crate::memory::MemoryGateway;
use crate::store::RecordStore;
use crate::traits::Gateway;
use tally_core::records::{Task, TaskStatus};
use tally_core::{ActorId, GatewayError};

fn actor() -> ActorId {
    ActorId::new("actor-1")
}

// ========== Session Rows ==========

#[tokio::test]
async fn test_create_session_record() {
    let gw = MemoryGateway::new();
    let id = gw.create_session_record(&actor()).await.unwrap();
    let record = gw.session(&id).unwrap();
    assert!(record.open);
    assert_eq!(record.actor, actor());
}

#[tokio::test]
async fn test_one_open_session_per_actor() {
    let gw = MemoryGateway::new();
    gw.create_session_record(&actor()).await.unwrap();
    let err = gw.create_session_record(&actor()).await.unwrap_err();
    assert!(matches!(err, GatewayError::Storage(_)));
    // A different actor is unaffected.
    assert!(gw
        .create_session_record(&ActorId::new("actor-2"))
        .await
        .is_ok());
}

#[tokio::test]
async fn test_update_closes_session() {
    let gw = MemoryGateway::new();
    let id = gw.create_session_record(&actor()).await.unwrap();
    gw.update_session_record(&id, &actor(), 90, "Tracked 00:01:30")
        .await
        .unwrap();
    let record = gw.session(&id).unwrap();
    assert!(!record.open);
    assert_eq!(record.elapsed_seconds, 90);
    // Closing again is allowed to reopen a new session.
    assert!(gw.create_session_record(&actor()).await.is_ok());
}

#[tokio::test]
async fn test_update_promotes_time_entry() {
    let gw = MemoryGateway::new();
    let id = gw.create_session_record(&actor()).await.unwrap();
    gw.update_session_record(&id, &actor(), 42, "morning work")
        .await
        .unwrap();
    let entries = gw.time_entries.list_by_actor(&actor());
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].seconds, 42);
    assert_eq!(entries[0].note, "morning work");
}

#[tokio::test]
async fn test_update_unknown_session() {
    let gw = MemoryGateway::new();
    let err = gw
        .update_session_record(&tally_core::SessionId::new("nope"), &actor(), 1, "")
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::RecordNotFound { .. }));
}

#[tokio::test]
async fn test_update_wrong_actor() {
    let gw = MemoryGateway::new();
    let id = gw.create_session_record(&actor()).await.unwrap();
    let err = gw
        .update_session_record(&id, &ActorId::new("intruder"), 1, "")
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Unauthorized));
}

// ========== Fault Injection ==========

#[tokio::test]
async fn test_fail_next_call_is_one_shot() {
    let gw = MemoryGateway::new();
    gw.fail_next_call();
    let err = gw.create_session_record(&actor()).await.unwrap_err();
    assert!(matches!(err, GatewayError::Network(_)));
    // The fault is consumed; the retry succeeds.
    assert!(gw.create_session_record(&actor()).await.is_ok());
}

#[tokio::test]
async fn test_fail_next_on_update() {
    let gw = MemoryGateway::new();
    let id = gw.create_session_record(&actor()).await.unwrap();
    gw.fail_next_call();
    assert!(gw
        .update_session_record(&id, &actor(), 10, "")
        .await
        .is_err());
    // The row is untouched.
    assert!(gw.session(&id).unwrap().open);
    assert!(gw.time_entries.list().is_empty());
}

// ========== Record Store ==========

#[test]
fn test_store_insert_get_remove() {
    let store: RecordStore<Task> = RecordStore::new();
    let task = Task::new(actor(), "t");
    let id = task.id.clone();
    store.insert(task);
    assert_eq!(store.count(), 1);
    assert!(store.get(&id).is_some());
    assert!(store.remove(&id).is_some());
    assert_eq!(store.count(), 0);
}

#[test]
fn test_store_list_by_actor() {
    let store: RecordStore<Task> = RecordStore::new();
    store.insert(Task::new(ActorId::new("alice"), "a"));
    store.insert(Task::new(ActorId::new("alice"), "b"));
    store.insert(Task::new(ActorId::new("bob"), "c"));
    assert_eq!(store.list_by_actor(&ActorId::new("alice")).len(), 2);
    assert_eq!(store.list().len(), 3);
}

#[test]
fn test_store_update() {
    let store: RecordStore<Task> = RecordStore::new();
    let task = Task::new(actor(), "t");
    let id = task.id.clone();
    store.insert(task);
    let updated = store
        .update(&id, |t| t.status = TaskStatus::Done)
        .unwrap();
    assert_eq!(updated.status, TaskStatus::Done);
    assert!(store.update(&tally_core::RecordId::new("nope"), |_| {}).is_none());
}
