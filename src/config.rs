//! Configuration management for the paneer game client

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use crate::error::GameClientError;

/// Execution mode, controlling whether lookup failures may substitute the
/// configured fallback amusement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    Development,
    Production,
}

/// Main configuration for the paneer game client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaneerConfig {
    /// Execution mode
    pub mode: ExecutionMode,
    /// Backend API configuration
    pub api: ApiConfig,
    /// Game configuration
    pub game: GameSettings,
    /// Cross-frame handshake configuration
    pub handshake: HandshakeConfig,
}

impl Default for PaneerConfig {
    fn default() -> Self {
        Self {
            mode: ExecutionMode::Development,
            api: ApiConfig::default(),
            game: GameSettings::default(),
            handshake: HandshakeConfig::default(),
        }
    }
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the park transaction backend
    pub base_url: String,
    /// API key sent as `X-API-Key` on every backend request
    pub api_key: String,
    /// Request timeout in seconds
    pub request_timeout: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            api_key: String::new(),
            request_timeout: 10,
        }
    }
}

/// Game-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSettings {
    /// Display name of the amusement, used for the id lookup
    pub amusement_name: String,
    /// Group the amusement belongs to in the park system
    pub group_id: u64,
    /// Stake charged for one round
    pub stake_amount: f64,
    /// Cash payout for a win
    pub cash_reward_amount: f64,
    /// Payout attached to a stamp transaction (backend requires a small amount)
    pub stamp_payout_amount: f64,
    /// Stamp recorded against the winner's account
    pub stamp_id: u64,
    /// Amusement id substituted when lookup fails in development mode
    pub fallback_amusement_id: u64,
    /// The word the player has to type to win
    pub target_word: String,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            amusement_name: "Enter Paneer".to_string(),
            group_id: 8,
            stake_amount: 2.0,
            cash_reward_amount: 2.0,
            stamp_payout_amount: 0.1,
            stamp_id: 1,
            fallback_amusement_id: 11,
            target_word: "paneer".to_string(),
        }
    }
}

/// Cross-frame handshake configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandshakeConfig {
    /// Origins allowed to deliver a token message
    pub allowed_origins: Vec<String>,
}

impl Default for HandshakeConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
                "https://tivoli.yrgobanken.vip".to_string(),
            ],
        }
    }
}

impl PaneerConfig {
    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, GameClientError> {
        let content = fs::read_to_string(path).map_err(|e| {
            GameClientError::Configuration {
                message: format!("Failed to read config file: {}", e),
                field: "config_file".to_string(),
            }
        })?;

        let config: PaneerConfig = toml::from_str(&content).map_err(|e| {
            GameClientError::Configuration {
                message: format!("Failed to parse config file: {}", e),
                field: "config_format".to_string(),
            }
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), GameClientError> {
        let content = toml::to_string_pretty(self).map_err(|e| {
            GameClientError::Configuration {
                message: format!("Failed to serialize config: {}", e),
                field: "config_serialization".to_string(),
            }
        })?;

        fs::write(path, content).map_err(|e| {
            GameClientError::Configuration {
                message: format!("Failed to write config file: {}", e),
                field: "config_write".to_string(),
            }
        })?;

        Ok(())
    }

    /// Apply the environment-variable surface supplied by the embedding page.
    ///
    /// `GAME_NAME` arrives with underscores in place of spaces.
    pub fn apply_env(mut self) -> Self {
        if let Ok(url) = env::var("API_URL") {
            self.api.base_url = url;
        }
        if let Ok(key) = env::var("API_KEY") {
            self.api.api_key = key;
        }
        if let Ok(name) = env::var("GAME_NAME") {
            self.game.amusement_name = name.replace('_', " ");
        }
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), GameClientError> {
        // Validate API configuration
        url::Url::parse(&self.api.base_url).map_err(|e| {
            GameClientError::Configuration {
                message: format!("Invalid base URL: {}", e),
                field: "api.base_url".to_string(),
            }
        })?;

        if self.api.request_timeout == 0 {
            return Err(GameClientError::Configuration {
                message: "Request timeout must be greater than 0".to_string(),
                field: "api.request_timeout".to_string(),
            });
        }

        // Validate game configuration
        if self.game.amusement_name.trim().is_empty() {
            return Err(GameClientError::Configuration {
                message: "Amusement name must not be empty".to_string(),
                field: "game.amusement_name".to_string(),
            });
        }

        if self.game.target_word.trim().is_empty() {
            return Err(GameClientError::Configuration {
                message: "Target word must not be empty".to_string(),
                field: "game.target_word".to_string(),
            });
        }

        if self.game.stake_amount <= 0.0 {
            return Err(GameClientError::Configuration {
                message: "Stake amount must be positive".to_string(),
                field: "game.stake_amount".to_string(),
            });
        }

        if self.game.cash_reward_amount <= 0.0 {
            return Err(GameClientError::Configuration {
                message: "Cash reward amount must be positive".to_string(),
                field: "game.cash_reward_amount".to_string(),
            });
        }

        if self.game.stamp_payout_amount < 0.0 {
            return Err(GameClientError::Configuration {
                message: "Stamp payout amount must not be negative".to_string(),
                field: "game.stamp_payout_amount".to_string(),
            });
        }

        // Validate handshake configuration
        if self.handshake.allowed_origins.is_empty() {
            return Err(GameClientError::Configuration {
                message: "At least one allowed origin is required".to_string(),
                field: "handshake.allowed_origins".to_string(),
            });
        }

        Ok(())
    }

    /// Create a production-ready configuration
    pub fn production() -> Self {
        Self {
            mode: ExecutionMode::Production,
            api: ApiConfig {
                base_url: "http://localhost:8000/api".to_string(),
                api_key: String::new(),
                request_timeout: 5,             // Shorter timeout
            },
            game: GameSettings::default(),
            handshake: HandshakeConfig {
                allowed_origins: vec![
                    "https://tivoli.yrgobanken.vip".to_string(),
                ],
            },
        }
    }

    /// Create a development configuration with relaxed settings
    pub fn development() -> Self {
        Self {
            mode: ExecutionMode::Development,
            api: ApiConfig {
                base_url: "http://localhost:8000/api".to_string(),
                api_key: "dev-key".to_string(),
                request_timeout: 30,
            },
            game: GameSettings::default(),
            handshake: HandshakeConfig::default(),
        }
    }
}
