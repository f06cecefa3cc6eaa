use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use engine_logging::{engine_info, engine_warn};
use picker_core::{LoginConfig, DEFAULT_PAGE_SIZE};
use picker_engine::{FeedSettings, TransportSettings, MEDIA_URL_ENDPOINT};
use serde::{Deserialize, Serialize};

/// Settings read from `picker.ron`. Every field may be omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    pub client_id: String,
    pub redirect_uri: String,
    pub endpoint: String,
    pub page_size: u32,
    pub token_dir: PathBuf,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for PickerConfig {
    fn default() -> Self {
        let transport = TransportSettings::default();
        Self {
            client_id: String::new(),
            redirect_uri: String::new(),
            endpoint: MEDIA_URL_ENDPOINT.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            token_dir: PathBuf::from(".picker"),
            connect_timeout_secs: transport.connect_timeout.as_secs(),
            request_timeout_secs: transport.request_timeout.as_secs(),
        }
    }
}

impl PickerConfig {
    pub fn feed_settings(&self) -> FeedSettings {
        FeedSettings {
            endpoint: self.endpoint.clone(),
            page_size: self.page_size.max(1),
        }
    }

    pub fn transport_settings(&self) -> TransportSettings {
        TransportSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..TransportSettings::default()
        }
    }

    pub fn login_config(&self) -> LoginConfig {
        LoginConfig {
            client_id: self.client_id.clone(),
            redirect_uri: self.redirect_uri.clone(),
        }
    }
}

/// Loads the config file, falling back to defaults when it is missing or broken.
pub fn load_config(path: &Path) -> PickerConfig {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            engine_info!("No config at {:?}, using defaults", path);
            return PickerConfig::default();
        }
        Err(err) => {
            engine_warn!("Failed to read config from {:?}: {}", path, err);
            return PickerConfig::default();
        }
    };

    match ron::from_str(&content) {
        Ok(config) => config,
        Err(err) => {
            engine_warn!("Failed to parse config from {:?}: {}", path, err);
            PickerConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config(&temp.path().join("picker.ron"));
        assert_eq!(config, PickerConfig::default());
        assert_eq!(config.feed_settings(), FeedSettings::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("picker.ron");
        fs::write(
            &path,
            r#"(client_id: "abc", redirect_uri: "https://picker.example.com/cb", page_size: 12)"#,
        )
        .unwrap();

        let config = load_config(&path);
        assert_eq!(config.client_id, "abc");
        assert_eq!(config.feed_settings().page_size, 12);
        assert_eq!(config.endpoint, MEDIA_URL_ENDPOINT);
        assert_eq!(
            config.login_config().redirect_uri,
            "https://picker.example.com/cb"
        );
    }

    #[test]
    fn unparsable_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("picker.ron");
        fs::write(&path, "{ not ron").unwrap();
        assert_eq!(load_config(&path), PickerConfig::default());
    }
}
