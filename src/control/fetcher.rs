use crate::plog;
use crate::store::EntitySnapshot;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use super::api::ControlPlaneClient;
use super::config::ControlPlaneConfig;

#[derive(Debug, Default)]
struct FetcherState {
    snapshot: EntitySnapshot,
    error: Option<String>,
    dirty: bool,
}

/// Polls the control plane on a background thread and keeps the latest
/// entity snapshot for the draw loop to pick up. `kick()` forces the next
/// cycle immediately (used right after a sync succeeds).
pub struct EntityFetcher {
    state: Arc<Mutex<FetcherState>>,
    stop: Arc<AtomicBool>,
    kick: Arc<AtomicBool>,
    _handle: JoinHandle<()>,
}

impl EntityFetcher {
    pub fn spawn(config: &ControlPlaneConfig) -> Self {
        let state = Arc::new(Mutex::new(FetcherState::default()));
        let stop = Arc::new(AtomicBool::new(false));
        let kick = Arc::new(AtomicBool::new(false));

        let client = ControlPlaneClient::new(config);
        let poll_interval = config.poll_interval;
        let state_clone = Arc::clone(&state);
        let stop_clone = Arc::clone(&stop);
        let kick_clone = Arc::clone(&kick);

        let handle = std::thread::spawn(move || {
            Self::poll_loop(client, poll_interval, state_clone, stop_clone, kick_clone);
        });

        Self {
            state,
            stop,
            kick,
            _handle: handle,
        }
    }

    fn poll_loop(
        client: ControlPlaneClient,
        interval_secs: u64,
        state: Arc<Mutex<FetcherState>>,
        stop: Arc<AtomicBool>,
        kick: Arc<AtomicBool>,
    ) {
        loop {
            if stop.load(Ordering::Relaxed) {
                break;
            }

            match Self::fetch_snapshot(&client) {
                Ok(snapshot) => {
                    plog!(
                        info,
                        "fetched {} applications, {} live states, {} pipeds",
                        snapshot.applications.len(),
                        snapshot.live_states.len(),
                        snapshot.pipeds.len()
                    );
                    let mut s = state.lock().unwrap();
                    s.snapshot = snapshot;
                    s.error = None;
                    s.dirty = true;
                }
                Err(e) => {
                    plog!(error, "fetch error: {}", e);
                    let mut s = state.lock().unwrap();
                    s.error = Some(e);
                    s.dirty = true;
                }
            }

            for _ in 0..(interval_secs * 10) {
                if stop.load(Ordering::Relaxed) {
                    return;
                }
                if kick.swap(false, Ordering::Relaxed) {
                    break;
                }
                std::thread::sleep(std::time::Duration::from_millis(100));
            }
        }
    }

    fn fetch_snapshot(client: &ControlPlaneClient) -> Result<EntitySnapshot, String> {
        let applications = client.list_applications().map_err(|e| e.to_string())?;

        // Live state is fetched per application; one missing state must not
        // sink the whole cycle.
        let mut live_states = Vec::with_capacity(applications.len());
        for app in &applications {
            match client.get_live_state(&app.id) {
                Ok(Some(state)) => live_states.push(state),
                Ok(None) => {}
                Err(e) => plog!(warn, "live state for {} unavailable: {}", app.id, e),
            }
        }

        let environments = client.list_environments().map_err(|e| e.to_string())?;
        let pipeds = client.list_pipeds().map_err(|e| e.to_string())?;

        Ok(EntitySnapshot {
            applications,
            live_states,
            environments,
            pipeds,
        })
    }

    pub fn take_dirty(&self) -> bool {
        let mut s = self.state.lock().unwrap();
        let was_dirty = s.dirty;
        s.dirty = false;
        was_dirty
    }

    pub fn snapshot(&self) -> EntitySnapshot {
        self.state.lock().unwrap().snapshot.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.state.lock().unwrap().error.clone()
    }

    pub fn kick(&self) {
        self.kick.store(true, Ordering::Relaxed);
    }
}

impl Drop for EntityFetcher {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}
