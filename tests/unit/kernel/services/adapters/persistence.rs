use super::*;
use crate::kernel::persistence::{read_snapshot, CURRENT_PROJECT_KEY, PROJECTS_KEY};
use crate::kernel::services::adapters::MemoryStore;
use crate::kernel::services::ports::{StoreError, StoreResult};
use crate::kernel::state::{Project, ProjectId};
use serde_json::Value;

fn snapshot(names: &[&str]) -> PersistedState {
    let projects: Vec<Project> = names
        .iter()
        .map(|n| Project::new(ProjectId::new(*n), *n))
        .collect();
    PersistedState {
        current_project_id: projects.first().map(|p| p.id.clone()),
        projects,
    }
}

struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> StoreResult<Option<Value>> {
        Err(StoreError::Unavailable)
    }

    fn set(&self, _key: &str, _value: Value) -> StoreResult<()> {
        Err(StoreError::Unavailable)
    }
}

#[test]
fn test_flush_settles_last_snapshot() {
    let store = Arc::new(MemoryStore::new());
    let mut service = PersistenceService::new(store.clone()).unwrap();

    service.persist(snapshot(&["a"]));
    service.persist(snapshot(&["a", "b"]));
    let last = service.persist(snapshot(&["a", "b", "c"]));
    service.flush();

    let persisted = read_snapshot(store.as_ref()).unwrap();
    assert_eq!(persisted.projects.len(), 3);
    assert_eq!(
        store.get(CURRENT_PROJECT_KEY).unwrap(),
        Some(Value::String("a".to_string()))
    );

    let mut saw_last = false;
    while let Ok(msg) = service.try_recv() {
        if msg == (PersistMessage::Saved { generation: last }) {
            saw_last = true;
        }
    }
    assert!(saw_last);
}

#[test]
fn test_generations_increase() {
    let mut service = PersistenceService::new(Arc::new(MemoryStore::new())).unwrap();
    let first = service.persist(snapshot(&["a"]));
    let second = service.persist(snapshot(&["b"]));
    assert!(second > first);
    service.flush();
}

#[test]
fn test_write_older_than_settled_is_skipped() {
    let store = Arc::new(MemoryStore::new());
    let mut service = PersistenceService::new(store.clone()).unwrap();
    *service.settled.lock().unwrap() = 10;

    let generation = service.persist(snapshot(&["a"]));
    service.flush();

    assert_eq!(service.try_recv(), Ok(PersistMessage::Skipped { generation }));
    assert_eq!(store.get(PROJECTS_KEY).unwrap(), None);
    assert_eq!(store.get(CURRENT_PROJECT_KEY).unwrap(), None);
}

#[test]
fn test_failures_are_reported_not_raised() {
    let mut service = PersistenceService::new(Arc::new(FailingStore)).unwrap();
    let generation = service.persist(snapshot(&["a"]));
    service.flush();

    match service.try_recv() {
        Ok(PersistMessage::Failed { generation: g, error }) => {
            assert_eq!(g, generation);
            assert_eq!(error, "Store unavailable");
        }
        other => panic!("unexpected message: {:?}", other),
    }
}
