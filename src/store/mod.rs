use std::collections::BTreeMap;

use crate::control::models::{Application, ApplicationLiveState, Environment, Piped};

/// Normalized read-model of the control plane, replaced wholesale by the
/// background fetcher and read by the views. Nothing here mutates single
/// records in place.
#[derive(Debug, Default, Clone)]
pub struct EntityStore {
    applications: BTreeMap<String, Application>,
    live_states: BTreeMap<String, ApplicationLiveState>,
    environments: BTreeMap<String, Environment>,
    pipeds: BTreeMap<String, Piped>,
}

/// One fetch cycle's worth of entities, built off-thread by the fetcher.
#[derive(Debug, Default, Clone)]
pub struct EntitySnapshot {
    pub applications: Vec<Application>,
    pub live_states: Vec<ApplicationLiveState>,
    pub environments: Vec<Environment>,
    pub pipeds: Vec<Piped>,
}

impl EntityStore {
    pub fn replace_all(&mut self, snapshot: EntitySnapshot) {
        self.applications = snapshot
            .applications
            .into_iter()
            .map(|a| (a.id.clone(), a))
            .collect();
        self.live_states = snapshot
            .live_states
            .into_iter()
            .map(|s| (s.application_id.clone(), s))
            .collect();
        self.environments = snapshot
            .environments
            .into_iter()
            .map(|e| (e.id.clone(), e))
            .collect();
        self.pipeds = snapshot
            .pipeds
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect();
    }

    pub fn get_application(&self, id: &str) -> Option<&Application> {
        self.applications.get(id)
    }

    pub fn get_live_state(&self, application_id: &str) -> Option<&ApplicationLiveState> {
        self.live_states.get(application_id)
    }

    pub fn get_environment(&self, id: &str) -> Option<&Environment> {
        self.environments.get(id)
    }

    pub fn get_piped(&self, id: &str) -> Option<&Piped> {
        self.pipeds.get(id)
    }

    pub fn applications(&self) -> impl Iterator<Item = &Application> {
        self.applications.values()
    }

    pub fn pipeds(&self) -> impl Iterator<Item = &Piped> {
        self.pipeds.values()
    }

    pub fn application_count(&self) -> usize {
        self.applications.len()
    }

    /// Joined read used by the detail view. None only when the application
    /// itself is absent; every other missing join target degrades to a
    /// placeholder value instead.
    pub fn application_detail(&self, application_id: &str) -> Option<ApplicationDetail> {
        let app = self.applications.get(application_id)?;
        let live = self.live_states.get(application_id);

        let environment_name = app
            .environment_id
            .as_deref()
            .and_then(|id| self.environments.get(id))
            .map(|e| e.name.clone())
            .unwrap_or_default();

        let piped_name = app
            .piped_id
            .as_deref()
            .and_then(|id| self.pipeds.get(id))
            .map(|p| p.name.clone())
            .unwrap_or_default();

        Some(ApplicationDetail {
            id: app.id.clone(),
            name: app.name.clone(),
            kind: app.kind_label().to_string(),
            description: app.description.clone().unwrap_or_default(),
            health_label: live.map(|s| s.health.label()).unwrap_or("Unknown").to_string(),
            sync_label: live.map(|s| s.sync.label()).unwrap_or("Unknown").to_string(),
            environment_name,
            piped_name,
            updated_display: app.last_updated_display(),
        })
    }
}

/// Display-ready projection of one application and its joined entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationDetail {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub description: String,
    pub health_label: String,
    pub sync_label: String,
    pub environment_name: String,
    pub piped_name: String,
    pub updated_display: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::models::{HealthStatus, SyncState};

    fn make_application(id: &str, name: &str) -> Application {
        Application {
            id: id.to_string(),
            name: name.to_string(),
            kind: Some("KUBERNETES".to_string()),
            environment_id: Some("env-1".to_string()),
            piped_id: Some("piped-1".to_string()),
            description: None,
            disabled: false,
            updated_at: None,
        }
    }

    fn make_snapshot() -> EntitySnapshot {
        EntitySnapshot {
            applications: vec![make_application("app-1", "Foo")],
            live_states: vec![ApplicationLiveState {
                application_id: "app-1".to_string(),
                health: HealthStatus::Healthy,
                sync: SyncState::Synced,
                reported_at: None,
            }],
            environments: vec![Environment {
                id: "env-1".to_string(),
                name: "staging".to_string(),
                description: None,
            }],
            pipeds: vec![Piped {
                id: "piped-1".to_string(),
                name: "piped-a".to_string(),
                description: None,
                version: Some("v0.9.0".to_string()),
                disabled: false,
                started_at: None,
            }],
        }
    }

    #[test]
    fn test_detail_joins_all_entities() {
        let mut store = EntityStore::default();
        store.replace_all(make_snapshot());

        let detail = store.application_detail("app-1").unwrap();
        assert_eq!(detail.name, "Foo");
        assert_eq!(detail.health_label, "Healthy");
        assert_eq!(detail.sync_label, "Synced");
        assert_eq!(detail.environment_name, "staging");
        assert_eq!(detail.piped_name, "piped-a");
    }

    #[test]
    fn test_detail_without_live_state_is_unknown() {
        let mut snapshot = make_snapshot();
        snapshot.live_states.clear();
        let mut store = EntityStore::default();
        store.replace_all(snapshot);

        let detail = store.application_detail("app-1").unwrap();
        assert_eq!(detail.health_label, "Unknown");
        assert_eq!(detail.sync_label, "Unknown");
    }

    #[test]
    fn test_detail_missing_join_targets_render_empty() {
        let mut snapshot = make_snapshot();
        snapshot.environments.clear();
        snapshot.pipeds.clear();
        let mut store = EntityStore::default();
        store.replace_all(snapshot);

        let detail = store.application_detail("app-1").unwrap();
        assert_eq!(detail.environment_name, "");
        assert_eq!(detail.piped_name, "");
    }

    #[test]
    fn test_detail_absent_application() {
        let mut store = EntityStore::default();
        store.replace_all(make_snapshot());
        assert!(store.application_detail("nope").is_none());
        assert!(store.application_detail("").is_none());
    }

    #[test]
    fn test_replace_all_drops_stale_entries() {
        let mut store = EntityStore::default();
        store.replace_all(make_snapshot());
        assert!(store.get_application("app-1").is_some());

        let mut next = make_snapshot();
        next.applications = vec![make_application("app-2", "Bar")];
        store.replace_all(next);
        assert!(store.get_application("app-1").is_none());
        assert!(store.get_application("app-2").is_some());
    }
}
