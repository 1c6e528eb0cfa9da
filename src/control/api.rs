use crate::plog;

use super::config::ControlPlaneConfig;
use super::models::{
    Application, ApplicationLiveState, ApplicationsResponse, Environment, EnvironmentsResponse,
    Piped, PipedKey, PipedsResponse, SyncCommand, SyncResponse,
};

const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("{label} parse error: {message}")]
    Parse { label: String, message: String },
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

/// Truncates to at most `max` bytes, backing off to a char boundary so a
/// multibyte body never panics the slice.
fn clip(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

fn parse_json<T: serde::de::DeserializeOwned>(body: &str, label: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| {
        plog!(error, "{} parse error: {} — body: {}", label, e, clip(body, 500));
        ApiError::Parse {
            label: label.to_string(),
            message: e.to_string(),
        }
    })
}

pub struct ControlPlaneClient {
    agent: ureq::Agent,
    base_url: String,
    api_key: String,
}

impl ControlPlaneClient {
    pub fn new(config: &ControlPlaneConfig) -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS)))
            .http_status_as_error(false)
            .build()
            .new_agent();

        Self {
            agent,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    pub fn list_applications(&self) -> Result<Vec<Application>, ApiError> {
        let url = format!("{}/applications", self.base_url);
        let resp = self.get(&url)?;
        let list: ApplicationsResponse = parse_json(&resp, "list_applications")?;
        plog!(info, "parsed {} applications", list.applications.len());
        Ok(list.applications)
    }

    /// 404 means the piped has not reported live state yet; callers get None
    /// and render the status as Unknown.
    pub fn get_live_state(&self, application_id: &str) -> Result<Option<ApplicationLiveState>, ApiError> {
        let url = format!("{}/applications/{}/livestate", self.base_url, application_id);
        match self.get(&url) {
            Ok(resp) => Ok(Some(parse_json(&resp, "get_live_state")?)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn list_environments(&self) -> Result<Vec<Environment>, ApiError> {
        let url = format!("{}/environments", self.base_url);
        let resp = self.get(&url)?;
        let list: EnvironmentsResponse = parse_json(&resp, "list_environments")?;
        Ok(list.environments)
    }

    pub fn list_pipeds(&self) -> Result<Vec<Piped>, ApiError> {
        let url = format!("{}/pipeds", self.base_url);
        let resp = self.get(&url)?;
        let list: PipedsResponse = parse_json(&resp, "list_pipeds")?;
        Ok(list.pipeds)
    }

    pub fn sync_application(&self, command: &SyncCommand) -> Result<Option<String>, ApiError> {
        let url = format!(
            "{}/applications/{}/sync",
            self.base_url, command.application_id
        );
        let body = serde_json::json!({ "syncStrategy": command.strategy });
        let resp = self.send(&url, "POST", Some(&body))?;
        let sync: SyncResponse = parse_json(&resp, "sync_application")?;
        plog!(
            info,
            "sync accepted for {}: command={}",
            command.application_id,
            sync.command_id.as_deref().unwrap_or("-")
        );
        Ok(sync.command_id)
    }

    pub fn enable_piped(&self, piped_id: &str) -> Result<(), ApiError> {
        let url = format!("{}/pipeds/{}/enable", self.base_url, piped_id);
        self.send(&url, "PUT", None).map(|_| ())
    }

    pub fn disable_piped(&self, piped_id: &str) -> Result<(), ApiError> {
        let url = format!("{}/pipeds/{}/disable", self.base_url, piped_id);
        self.send(&url, "PUT", None).map(|_| ())
    }

    pub fn recreate_piped_key(&self, piped_id: &str) -> Result<PipedKey, ApiError> {
        let url = format!("{}/pipeds/{}/recreate-key", self.base_url, piped_id);
        let resp = self.send(&url, "POST", None)?;
        let key: PipedKey = parse_json(&resp, "recreate_piped_key")?;
        plog!(info, "recreated key for piped {}", key.id);
        Ok(key)
    }

    fn get(&self, url: &str) -> Result<String, ApiError> {
        plog!(info, "GET {}", url);
        let resp = self
            .agent
            .get(url)
            .header("Authorization", &format!("Bearer {}", self.api_key))
            .header("User-Agent", "p9s/0.1")
            .header("Accept", "application/json")
            .call()
            .map_err(|e| {
                plog!(error, "request error: {}", e);
                ApiError::Transport(e.to_string())
            })?;

        Self::read_body(resp)
    }

    fn send(
        &self,
        url: &str,
        method: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<String, ApiError> {
        plog!(info, "{} {}", method, url);
        let req = match method {
            "PUT" => self.agent.put(url),
            _ => self.agent.post(url),
        };
        let req = req
            .header("Authorization", &format!("Bearer {}", self.api_key))
            .header("User-Agent", "p9s/0.1")
            .header("Accept", "application/json");

        let result = match body {
            Some(json) => req.send_json(json),
            None => req.send_empty(),
        };

        let resp = result.map_err(|e| {
            plog!(error, "request error: {}", e);
            ApiError::Transport(e.to_string())
        })?;

        Self::read_body(resp)
    }

    fn read_body(resp: ureq::http::Response<ureq::Body>) -> Result<String, ApiError> {
        let status = resp.status().as_u16();

        if !(200..300).contains(&status) {
            let body = resp
                .into_body()
                .read_to_string()
                .unwrap_or_else(|_| "(unreadable body)".to_string());
            plog!(error, "HTTP {}: {}", status, clip(&body, 200));
            return Err(ApiError::Status {
                status,
                body: clip(&body, 200).to_string(),
            });
        }

        resp.into_body()
            .read_to_string()
            .map_err(|e| ApiError::Transport(format!("read body failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_backs_off_to_char_boundary() {
        let body: String = "€".repeat(200);
        let clipped = clip(&body, 500);
        assert!(clipped.len() <= 500);
        assert_eq!(clipped.len() % 3, 0);
        assert!(clipped.chars().all(|c| c == '€'));

        assert_eq!(clip("short", 500), "short");
        assert_eq!(clip("abcdef", 3), "abc");
    }

    #[test]
    fn test_parse_json_multibyte_body_reports_parse_error() {
        let body: String = "€".repeat(200);
        let result: Result<SyncResponse, ApiError> = parse_json(&body, "sync_application");
        match result.err() {
            Some(ApiError::Parse { label, .. }) => assert_eq!(label, "sync_application"),
            other => panic!("expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_not_found_detection() {
        let err = ApiError::Status {
            status: 404,
            body: "not found".to_string(),
        };
        assert!(err.is_not_found());

        let err = ApiError::Status {
            status: 500,
            body: "boom".to_string(),
        };
        assert!(!err.is_not_found());
        assert!(!ApiError::Transport("timeout".to_string()).is_not_found());
    }
}
