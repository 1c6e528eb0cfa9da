use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
    Unknown,
}

impl HealthStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Healthy => "Healthy",
            Self::Unhealthy => "Unhealthy",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SyncState {
    Synced,
    OutOfSync,
    Deploying,
    Unknown,
}

impl SyncState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Synced => "Synced",
            Self::OutOfSync => "Out of Sync",
            Self::Deploying => "Deploying",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for SyncState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// How the control plane reconciles desired and live state for one sync.
/// Auto lets the piped decide between a quick sync and the full pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SyncStrategy {
    Auto,
    QuickSync,
    Pipeline,
}

impl SyncStrategy {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Auto => "Sync",
            Self::QuickSync => "Quick Sync",
            Self::Pipeline => "Pipeline Sync",
        }
    }

    pub fn menu_label(&self) -> &'static str {
        match self {
            Self::Auto => "Auto",
            Self::QuickSync => "Quick Sync",
            Self::Pipeline => "Pipeline Sync",
        }
    }

    pub const ALL: [SyncStrategy; 3] = [Self::Auto, Self::QuickSync, Self::Pipeline];
}

impl Default for SyncStrategy {
    fn default() -> Self {
        Self::Auto
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default, alias = "envId")]
    pub environment_id: Option<String>,
    #[serde(default)]
    pub piped_id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Application {
    pub fn kind_label(&self) -> &str {
        self.kind.as_deref().unwrap_or("-")
    }

    pub fn last_updated_display(&self) -> String {
        relative_time(self.updated_at)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationLiveState {
    pub application_id: String,
    #[serde(default = "unknown_health", alias = "healthStatus")]
    pub health: HealthStatus,
    #[serde(default = "unknown_sync", alias = "syncStatus")]
    pub sync: SyncState,
    #[serde(default)]
    pub reported_at: Option<DateTime<Utc>>,
}

fn unknown_health() -> HealthStatus {
    HealthStatus::Unknown
}

fn unknown_sync() -> SyncState {
    SyncState::Unknown
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    pub id: String,
    pub name: String,
    #[serde(default, alias = "desc")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Piped {
    pub id: String,
    pub name: String,
    #[serde(default, alias = "desc")]
    pub description: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
}

impl Piped {
    pub fn version_label(&self) -> &str {
        self.version.as_deref().unwrap_or("-")
    }

    pub fn started_display(&self) -> String {
        relative_time(self.started_at)
    }
}

/// Transient command value: created at submit time, carried through the
/// requested/succeeded/failed lifecycle, never stored.
#[derive(Debug, Clone)]
pub struct SyncCommand {
    pub id: Uuid,
    pub application_id: String,
    pub strategy: SyncStrategy,
}

impl SyncCommand {
    pub fn new(application_id: &str, strategy: SyncStrategy) -> Self {
        Self {
            id: Uuid::new_v4(),
            application_id: application_id.to_string(),
            strategy,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationsResponse {
    pub applications: Vec<Application>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnvironmentsResponse {
    pub environments: Vec<Environment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PipedsResponse {
    pub pipeds: Vec<Piped>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResponse {
    #[serde(default)]
    pub command_id: Option<String>,
}

/// Returned once when a piped key is recreated; the secret is shown to the
/// operator and never kept anywhere else.
#[derive(Debug, Clone, Deserialize)]
pub struct PipedKey {
    pub id: String,
    pub key: String,
}

fn relative_time(ts: Option<DateTime<Utc>>) -> String {
    match ts {
        Some(dt) => {
            let secs = Utc::now().signed_duration_since(dt).num_seconds().max(0);
            if secs < 60 {
                format!("{}s ago", secs)
            } else if secs < 3600 {
                format!("{}m ago", secs / 60)
            } else if secs < 86400 {
                format!("{}h ago", secs / 3600)
            } else {
                format!("{}d ago", secs / 86400)
            }
        }
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_strategy_is_auto() {
        assert_eq!(SyncStrategy::default(), SyncStrategy::Auto);
    }

    #[test]
    fn test_strategy_labels() {
        assert_eq!(SyncStrategy::Auto.label(), "Sync");
        assert_eq!(SyncStrategy::Pipeline.label(), "Pipeline Sync");
        assert_eq!(SyncStrategy::QuickSync.menu_label(), "Quick Sync");
    }

    #[test]
    fn test_application_deserialize() {
        let json = r#"{
            "id": "app-1",
            "name": "Foo",
            "kind": "KUBERNETES",
            "envId": "env-1",
            "pipedId": "piped-1",
            "updatedAt": "2024-03-01T12:00:00Z"
        }"#;
        let app: Application = serde_json::from_str(json).unwrap();
        assert_eq!(app.id, "app-1");
        assert_eq!(app.name, "Foo");
        assert_eq!(app.environment_id.as_deref(), Some("env-1"));
        assert_eq!(app.piped_id.as_deref(), Some("piped-1"));
        assert!(!app.disabled);
    }

    #[test]
    fn test_live_state_deserialize_defaults() {
        let json = r#"{"applicationId": "app-1"}"#;
        let state: ApplicationLiveState = serde_json::from_str(json).unwrap();
        assert_eq!(state.health, HealthStatus::Unknown);
        assert_eq!(state.sync, SyncState::Unknown);

        let json = r#"{
            "applicationId": "app-1",
            "healthStatus": "HEALTHY",
            "syncStatus": "SYNCED"
        }"#;
        let state: ApplicationLiveState = serde_json::from_str(json).unwrap();
        assert_eq!(state.health, HealthStatus::Healthy);
        assert_eq!(state.sync, SyncState::Synced);
    }

    #[test]
    fn test_sync_command_is_fresh_per_submit() {
        let a = SyncCommand::new("app-1", SyncStrategy::Auto);
        let b = SyncCommand::new("app-1", SyncStrategy::Auto);
        assert_ne!(a.id, b.id);
        assert_eq!(a.application_id, "app-1");
    }
}
