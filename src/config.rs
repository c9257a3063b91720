use crate::model::adapter::ExperiencePolicy;
use crate::paths::AppPaths;
use crate::platform::Platform;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Duration;

/// Placeholder identity of the interviewing client until the backend exposes
/// a "current user" endpoint.
pub const DEFAULT_CLIENT_ID: u64 = 1;

fn default_client_id() -> u64 {
    DEFAULT_CLIENT_ID
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub platform: Option<Platform>,

    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default = "default_client_id")]
    pub client_id: u64,

    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    #[serde(default)]
    pub years_of_experience: ExperiencePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            platform: None,
            base_url: None,
            client_id: DEFAULT_CLIENT_ID,
            request_timeout_secs: None,
            years_of_experience: ExperiencePolicy::default(),
        }
    }
}

/// Runtime settings derived from [`Config`] once at startup.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub platform: Platform,
    pub base_url: String,
    pub client_id: u64,
    pub timeout: Option<Duration>,
    pub experience: ExperiencePolicy,
}

impl Settings {
    pub fn for_platform(platform: Platform) -> Self {
        Self {
            platform,
            base_url: platform.default_origin().to_string(),
            client_id: DEFAULT_CLIENT_ID,
            timeout: None,
            experience: ExperiencePolicy::default(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_experience(mut self, policy: ExperiencePolicy) -> Self {
        self.experience = policy;
        self
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = AppPaths::get_config_file_path()?;
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            return Ok(config);
        }
        Err(anyhow::anyhow!("Config file not found"))
    }

    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                log::debug!("Using default configuration: {}", e);
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = AppPaths::get_config_file_path()?;
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(path, toml_str)?;
        Ok(())
    }

    pub fn get_path_string() -> Result<String> {
        let path = AppPaths::get_config_file_path()?;
        Ok(path.to_string_lossy().to_string())
    }

    pub fn resolve(&self) -> Settings {
        let platform = self.platform.unwrap_or_else(Platform::current);
        let base = Settings::for_platform(platform);
        let base = match self.base_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => base.with_base_url(url),
            _ => base,
        };
        Settings {
            client_id: self.client_id,
            timeout: self.request_timeout_secs.map(Duration::from_secs),
            experience: self.years_of_experience,
            ..base
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.client_id, DEFAULT_CLIENT_ID);
    }

    #[test]
    fn test_resolve_pins_platform_and_origin() {
        let config: Config = toml::from_str(
            r#"
platform = "android"
request_timeout_secs = 20
"#,
        )
        .unwrap();
        let settings = config.resolve();
        assert_eq!(settings.platform, Platform::Android);
        assert_eq!(settings.base_url, "http://10.0.2.2:8080");
        assert_eq!(settings.timeout, Some(Duration::from_secs(20)));
    }

    #[test]
    fn test_base_url_override_strips_trailing_slash() {
        let config: Config = toml::from_str(
            r#"
platform = "web"
base_url = "https://api.example.com/"
client_id = 42
years_of_experience = "from_id"
"#,
        )
        .unwrap();
        let settings = config.resolve();
        assert_eq!(settings.base_url, "https://api.example.com");
        assert_eq!(settings.client_id, 42);
        assert_eq!(settings.experience, ExperiencePolicy::FromId);
    }

    #[test]
    fn test_blank_base_url_falls_back_to_platform_origin() {
        let config = Config {
            platform: Some(Platform::Desktop),
            base_url: Some("  ".to_string()),
            ..Config::default()
        };
        assert_eq!(config.resolve().base_url, "http://localhost:8080");
    }
}
