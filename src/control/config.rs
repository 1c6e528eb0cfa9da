use crate::plog;

use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_BASE_URL: &str = "https://pipecd.example.com/api/v1";
const DEFAULT_POLL_INTERVAL: u64 = 15;

#[derive(Debug, Clone)]
pub struct ControlPlaneConfig {
    pub api_key: String,
    pub base_url: String,
    pub poll_interval: u64,
}

#[derive(Deserialize)]
struct ConfigFile {
    control_plane: Option<ControlPlaneSection>,
}

#[derive(Deserialize)]
struct ControlPlaneSection {
    api_key: Option<String>,
    base_url: Option<String>,
    poll_interval: Option<u64>,
}

impl ControlPlaneConfig {
    pub fn load() -> Option<Self> {
        let section = config_path().and_then(|p| read_config_file(&p));
        let api_key = resolve_api_key(section.as_ref())?;

        let config = Self {
            api_key,
            base_url: section
                .as_ref()
                .and_then(|s| s.base_url.clone())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            poll_interval: section
                .as_ref()
                .and_then(|s| s.poll_interval)
                .unwrap_or(DEFAULT_POLL_INTERVAL),
        };

        plog!(
            info,
            "config loaded: base_url={} poll={}s key={}",
            config.base_url,
            config.poll_interval,
            mask_key(&config.api_key),
        );

        Some(config)
    }
}

/// Keeps a short prefix and suffix of the key for the log, counted in chars
/// so unusual keys cannot split a multibyte character.
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let head_len = 6.min(chars.len());
    let tail_start = chars.len().saturating_sub(4).max(head_len);
    let head: String = chars[..head_len].iter().collect();
    let tail: String = chars[tail_start..].iter().collect();
    format!("{}...{}", head, tail)
}

fn resolve_api_key(section: Option<&ControlPlaneSection>) -> Option<String> {
    if let Ok(key) = std::env::var("P9S_API_KEY") {
        if !key.is_empty() {
            return Some(key);
        }
    }

    section
        .and_then(|s| s.api_key.clone())
        .filter(|k| !k.is_empty())
}

fn read_config_file(path: &Path) -> Option<ControlPlaneSection> {
    let content = std::fs::read_to_string(path).ok()?;
    let file: ConfigFile = toml::from_str(&content).ok()?;
    file.control_plane
}

fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".p9s").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path() {
        let path = config_path();
        assert!(path.is_some());
        assert!(path.unwrap().ends_with(".p9s/config.toml"));
    }

    #[test]
    fn test_read_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[control_plane]\napi_key = \"pk-test\"\nbase_url = \"http://localhost:9082\"\npoll_interval = 5\n",
        )
        .unwrap();

        let section = read_config_file(&path).unwrap();
        assert_eq!(section.api_key.as_deref(), Some("pk-test"));
        assert_eq!(section.base_url.as_deref(), Some("http://localhost:9082"));
        assert_eq!(section.poll_interval, Some(5));
    }

    #[test]
    fn test_mask_key_keeps_only_ends() {
        assert_eq!(mask_key("pk-1234567890abcd"), "pk-123...abcd");
        assert_eq!(mask_key("abc"), "abc...");
        // Multibyte keys must not split a character.
        assert_eq!(mask_key("€€€€€€€€€€"), "€€€€€€...€€€€");
    }

    #[test]
    fn test_read_config_file_missing_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[other]\nkey = \"x\"\n").unwrap();
        assert!(read_config_file(&path).is_none());
    }
}
