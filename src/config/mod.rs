use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// YouTube endpoints and client identity
    pub youtube: YoutubeConfig,

    /// Application settings
    pub app: AppConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YoutubeConfig {
    /// Watch page URL template, `{video_id}` is substituted
    pub watch_url: String,

    /// Player API URL template, `{api_key}` is substituted
    pub player_api_url: String,

    /// Client name sent to the player API
    pub client_name: String,

    /// Client version sent to the player API
    pub client_version: String,

    /// Accept-Language header for the watch page
    pub accept_language: String,

    /// Optional User-Agent override
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Caption languages to try, in order, when none are given
    pub default_languages: Vec<String>,

    /// Default output format
    pub default_output_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            youtube: YoutubeConfig {
                watch_url: "https://www.youtube.com/watch?v={video_id}".to_string(),
                player_api_url: "https://www.youtube.com/youtubei/v1/player?key={api_key}"
                    .to_string(),
                client_name: "ANDROID".to_string(),
                client_version: "20.10.38".to_string(),
                accept_language: "en-US".to_string(),
                user_agent: None,
            },
            app: AppConfig {
                default_languages: vec!["en".to_string()],
                default_output_format: "text".to_string(),
            },
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            tracing::debug!("Loading config from {}", config_path.display());
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load and validate a specific config file
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let content = fs_err::read_to_string(path).context("Failed to read config file")?;

        let config: Config =
            serde_yaml::from_str(&content).context("Failed to parse config file")?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<PathBuf> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs_err::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;

        fs_err::write(path, content).context("Failed to write config file")?;

        Ok(())
    }

    /// Get configuration file path
    pub fn config_path() -> Result<PathBuf> {
        // First try current directory for easy testing
        let local_config = PathBuf::from("config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        let config_dir = dirs::config_dir().context("Could not determine config directory")?;

        Ok(config_dir.join("ytcaptions").join("config.yaml"))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.youtube.watch_url.contains("{video_id}") {
            anyhow::bail!("youtube.watch_url must contain a {{video_id}} placeholder");
        }

        if !self.youtube.player_api_url.contains("{api_key}") {
            anyhow::bail!("youtube.player_api_url must contain an {{api_key}} placeholder");
        }

        if self.app.default_languages.is_empty() {
            anyhow::bail!("app.default_languages must list at least one language");
        }

        Ok(())
    }

    /// Display current configuration
    pub fn display(&self) {
        println!("Current Configuration:");
        println!("  Watch URL: {}", self.youtube.watch_url);
        println!("  Player API URL: {}", self.youtube.player_api_url);
        println!(
            "  Client: {} {}",
            self.youtube.client_name, self.youtube.client_version
        );
        println!("  Accept-Language: {}", self.youtube.accept_language);
        if let Some(user_agent) = &self.youtube.user_agent {
            println!("  User-Agent: {}", user_agent);
        }
        println!(
            "  Default Languages: {}",
            self.app.default_languages.join(", ")
        );
        println!("  Default Format: {}", self.app.default_output_format);
    }
}
