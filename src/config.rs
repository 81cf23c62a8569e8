use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

/// Top-level YAML configuration shared by the adapter and the viewer.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Configuration {
    #[serde(default)]
    pub adapter: AdapterConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub viewer: ViewerConfig,
}

/// Where the photo source adapter listens.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AdapterConfig {
    #[serde(default = "AdapterConfig::default_bind_address")]
    pub bind_address: String,
    #[serde(default = "AdapterConfig::default_port")]
    pub port: u16,
    #[serde(default = "AdapterConfig::default_route")]
    pub route: String,
}

/// Fixed request parameters for the third-party photo API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct UpstreamConfig {
    #[serde(default = "UpstreamConfig::default_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "UpstreamConfig::default_method")]
    pub method: String,
    #[serde(default = "UpstreamConfig::default_photoset_id")]
    pub photoset_id: String,
    #[serde(default = "UpstreamConfig::default_extras")]
    pub extras: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ViewerConfig {
    /// Adapter endpoint the viewer fetches its photo set from.
    #[serde(default = "ViewerConfig::default_source_url")]
    pub source_url: String,
    /// Photo shown in the thumbnail trigger.
    #[serde(default)]
    pub thumbnail_index: usize,
    /// Exit transition time between closing and leaving the interactive layer.
    #[serde(
        default = "ViewerConfig::default_close_delay",
        with = "humantime_serde"
    )]
    pub close_delay: Duration,
    /// Pointer idle time before the controls are hidden.
    #[serde(default = "ViewerConfig::default_idle_hide", with = "humantime_serde")]
    pub idle_hide: Duration,
    /// Caption used for photos without a title.
    #[serde(default = "ViewerConfig::default_placeholder_caption")]
    pub placeholder_caption: String,
}

impl Configuration {
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let data = fs::read(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        let cfg: Configuration = serde_yaml::from_slice(&data)
            .with_context(|| format!("failed to parse config at {}", path.display()))?;
        Ok(cfg)
    }

    /// Loads `path` when given, otherwise falls back to built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_yaml_file(path),
            None => Ok(Self::default()),
        }
    }
}

impl AdapterConfig {
    fn default_bind_address() -> String {
        "127.0.0.1".to_string()
    }

    fn default_port() -> u16 {
        8080
    }

    fn default_route() -> String {
        "/photos".to_string()
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.bind_address.trim().is_empty(),
            "adapter.bind-address must not be blank"
        );
        ensure!(
            self.route.starts_with('/'),
            "adapter.route must start with '/'"
        );
        Ok(())
    }
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            bind_address: Self::default_bind_address(),
            port: Self::default_port(),
            route: Self::default_route(),
        }
    }
}

impl UpstreamConfig {
    fn default_endpoint() -> String {
        "https://api.flickr.com/services/rest/".to_string()
    }

    fn default_method() -> String {
        "flickr.photosets.getPhotos".to_string()
    }

    fn default_photoset_id() -> String {
        "72157626865875079".to_string()
    }

    fn default_extras() -> String {
        "url_o".to_string()
    }

    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("endpoint", &self.endpoint),
            ("api-key", &self.api_key),
            ("method", &self.method),
            ("photoset-id", &self.photoset_id),
            ("extras", &self.extras),
        ] {
            ensure!(
                !value.trim().is_empty(),
                "upstream.{} must not be blank",
                field
            );
        }
        Ok(())
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            endpoint: Self::default_endpoint(),
            api_key: String::new(),
            method: Self::default_method(),
            photoset_id: Self::default_photoset_id(),
            extras: Self::default_extras(),
        }
    }
}

impl ViewerConfig {
    fn default_source_url() -> String {
        "http://127.0.0.1:8080/photos".to_string()
    }

    fn default_close_delay() -> Duration {
        Duration::from_millis(150)
    }

    fn default_idle_hide() -> Duration {
        Duration::from_millis(5000)
    }

    fn default_placeholder_caption() -> String {
        "Open in a new tab".to_string()
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.source_url.trim().is_empty(),
            "viewer.source-url must not be blank"
        );
        ensure!(
            !self.idle_hide.is_zero(),
            "viewer.idle-hide must be greater than zero"
        );
        Ok(())
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            source_url: Self::default_source_url(),
            thumbnail_index: 0,
            close_delay: Self::default_close_delay(),
            idle_hide: Self::default_idle_hide(),
            placeholder_caption: Self::default_placeholder_caption(),
        }
    }
}
