use crate::control::api::{ApiError, ControlPlaneClient};
use crate::control::models::{SyncCommand, SyncStrategy};
use crate::plog;
use crate::store::EntityStore;

use std::sync::mpsc::Sender;
use std::sync::Arc;

/// Lifecycle of one submitted sync command. Requested is always sent before
/// the matching Succeeded/Failed; overlapping submits for the same
/// application each get their own pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    Requested {
        application_id: String,
        strategy: SyncStrategy,
    },
    Succeeded {
        application_id: String,
    },
    Failed {
        application_id: String,
        error: String,
    },
}

/// The network call behind a sync, separated out so tests can stub it.
pub trait SyncBackend: Send + Sync {
    fn perform_sync(&self, command: &SyncCommand) -> Result<(), ApiError>;
}

impl SyncBackend for ControlPlaneClient {
    fn perform_sync(&self, command: &SyncCommand) -> Result<(), ApiError> {
        self.sync_application(command).map(|_| ())
    }
}

pub struct SyncDispatcher {
    backend: Arc<dyn SyncBackend>,
    tx: Sender<SyncEvent>,
}

impl SyncDispatcher {
    pub fn new(backend: Arc<dyn SyncBackend>, tx: Sender<SyncEvent>) -> Self {
        Self { backend, tx }
    }

    /// Submits a sync for the given application. Returns false without
    /// emitting anything when the id is empty or not present in the store;
    /// otherwise emits Requested synchronously, then resolves the command on
    /// a background thread. Duplicate submits are not coalesced.
    pub fn submit(&self, store: &EntityStore, application_id: &str, strategy: SyncStrategy) -> bool {
        if application_id.is_empty() || store.get_application(application_id).is_none() {
            plog!(warn, "sync rejected: unknown application '{}'", application_id);
            return false;
        }

        let command = SyncCommand::new(application_id, strategy);
        plog!(
            info,
            "sync requested: app={} strategy={:?} command={}",
            command.application_id,
            command.strategy,
            command.id
        );

        let _ = self.tx.send(SyncEvent::Requested {
            application_id: command.application_id.clone(),
            strategy: command.strategy,
        });

        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        std::thread::spawn(move || {
            let event = match backend.perform_sync(&command) {
                Ok(()) => SyncEvent::Succeeded {
                    application_id: command.application_id.clone(),
                },
                Err(e) => {
                    plog!(error, "sync failed: app={} {}", command.application_id, e);
                    SyncEvent::Failed {
                        application_id: command.application_id.clone(),
                        error: e.to_string(),
                    }
                }
            };
            let _ = tx.send(event);
        });

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::models::{Application, HealthStatus, SyncState};
    use crate::store::EntitySnapshot;
    use std::sync::mpsc;
    use std::sync::Mutex;
    use std::time::Duration;

    struct StubBackend {
        calls: Mutex<Vec<SyncCommand>>,
        fail_with: Option<String>,
    }

    impl StubBackend {
        fn ok() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_with: None,
            }
        }

        fn failing(reason: &str) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_with: Some(reason.to_string()),
            }
        }
    }

    impl SyncBackend for StubBackend {
        fn perform_sync(&self, command: &SyncCommand) -> Result<(), ApiError> {
            self.calls.lock().unwrap().push(command.clone());
            match &self.fail_with {
                Some(reason) => Err(ApiError::Transport(reason.clone())),
                None => Ok(()),
            }
        }
    }

    fn store_with_app(id: &str) -> EntityStore {
        let mut store = EntityStore::default();
        store.replace_all(EntitySnapshot {
            applications: vec![Application {
                id: id.to_string(),
                name: "Foo".to_string(),
                kind: None,
                environment_id: None,
                piped_id: None,
                description: None,
                disabled: false,
                updated_at: None,
            }],
            live_states: vec![crate::control::models::ApplicationLiveState {
                application_id: id.to_string(),
                health: HealthStatus::Healthy,
                sync: SyncState::Synced,
                reported_at: None,
            }],
            environments: Vec::new(),
            pipeds: Vec::new(),
        });
        store
    }

    fn recv(rx: &mpsc::Receiver<SyncEvent>) -> SyncEvent {
        rx.recv_timeout(Duration::from_secs(2)).expect("no event")
    }

    #[test]
    fn test_submit_emits_requested_before_resolution() {
        let (tx, rx) = mpsc::channel();
        let dispatcher = SyncDispatcher::new(Arc::new(StubBackend::ok()), tx);
        let store = store_with_app("app-1");

        assert!(dispatcher.submit(&store, "app-1", SyncStrategy::Auto));

        assert_eq!(
            recv(&rx),
            SyncEvent::Requested {
                application_id: "app-1".to_string(),
                strategy: SyncStrategy::Auto,
            }
        );
        assert_eq!(
            recv(&rx),
            SyncEvent::Succeeded {
                application_id: "app-1".to_string(),
            }
        );
    }

    #[test]
    fn test_submit_with_selected_strategy() {
        let (tx, rx) = mpsc::channel();
        let dispatcher = SyncDispatcher::new(Arc::new(StubBackend::ok()), tx);
        let store = store_with_app("app-1");

        assert!(dispatcher.submit(&store, "app-1", SyncStrategy::Pipeline));

        assert_eq!(
            recv(&rx),
            SyncEvent::Requested {
                application_id: "app-1".to_string(),
                strategy: SyncStrategy::Pipeline,
            }
        );
    }

    #[test]
    fn test_submit_unknown_or_empty_id_emits_nothing() {
        let (tx, rx) = mpsc::channel();
        let dispatcher = SyncDispatcher::new(Arc::new(StubBackend::ok()), tx);
        let store = store_with_app("app-1");

        assert!(!dispatcher.submit(&store, "", SyncStrategy::Auto));
        assert!(!dispatcher.submit(&store, "app-404", SyncStrategy::Auto));

        assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
    }

    #[test]
    fn test_failure_resolves_to_failed_event() {
        let (tx, rx) = mpsc::channel();
        let dispatcher = SyncDispatcher::new(Arc::new(StubBackend::failing("connection refused")), tx);
        let store = store_with_app("app-1");

        assert!(dispatcher.submit(&store, "app-1", SyncStrategy::Auto));

        assert!(matches!(recv(&rx), SyncEvent::Requested { .. }));
        match recv(&rx) {
            SyncEvent::Failed {
                application_id,
                error,
            } => {
                assert_eq!(application_id, "app-1");
                assert!(error.contains("connection refused"));
            }
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[test]
    fn test_sequential_submits_are_independent() {
        let (tx, rx) = mpsc::channel();
        let backend = Arc::new(StubBackend::ok());
        let dispatcher = SyncDispatcher::new(backend.clone(), tx);
        let store = store_with_app("app-1");

        assert!(dispatcher.submit(&store, "app-1", SyncStrategy::Auto));
        assert!(dispatcher.submit(&store, "app-1", SyncStrategy::Auto));

        let events: Vec<SyncEvent> = (0..4).map(|_| recv(&rx)).collect();
        let requested = events
            .iter()
            .filter(|e| matches!(e, SyncEvent::Requested { .. }))
            .count();
        let succeeded = events
            .iter()
            .filter(|e| matches!(e, SyncEvent::Succeeded { .. }))
            .count();
        assert_eq!(requested, 2);
        assert_eq!(succeeded, 2);
        assert_eq!(backend.calls.lock().unwrap().len(), 2);
    }
}
