//! Console configuration.

use serde::{Deserialize, Serialize};

use crate::application::GADGET_CLASS_PREFIX;
use crate::domain::{
    errors::{AppError, AppResult},
    logging::{LogComponent, LogLevel, get_logger},
};

/// Name of the optional global object the host page may define.
pub const WINDOW_CONFIG_KEY: &str = "analyticsConsoleConfig";

/// Runtime settings for the console, every field optional in JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// WebSocket endpoint serving analytics cell subscriptions.
    pub analytics_url: String,
    /// How often the gadget manager sweeps for dead gadgets.
    pub liveness_poll_ms: u32,
    /// Prefix of generated liveness classes.
    pub gadget_class_prefix: String,
    pub log_level: LogLevel,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            analytics_url: "ws://localhost:8080/jax/analytics/cells".to_string(),
            liveness_poll_ms: 5_000,
            gadget_class_prefix: GADGET_CLASS_PREFIX.to_string(),
            log_level: LogLevel::Debug,
        }
    }
}

impl ConsoleConfig {
    pub fn from_json(json: &str) -> AppResult<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| AppError::ConfigError(e.to_string()))?;
        config.validate()
    }

    fn validate(self) -> AppResult<Self> {
        if self.liveness_poll_ms == 0 {
            return Err(AppError::ConfigError("liveness_poll_ms must be positive".to_string()));
        }
        if self.gadget_class_prefix.is_empty() {
            return Err(AppError::ConfigError("gadget_class_prefix must not be empty".to_string()));
        }
        Ok(self)
    }

    /// Read `window.analyticsConsoleConfig`; defaults when absent or invalid.
    pub fn from_window() -> Self {
        match Self::read_window_object() {
            Ok(Some(config)) => config,
            Ok(None) => Self::default(),
            Err(e) => {
                get_logger().warn(
                    LogComponent::Presentation("Config"),
                    &format!("⚠️ {e}, falling back to defaults"),
                );
                Self::default()
            }
        }
    }

    fn read_window_object() -> AppResult<Option<Self>> {
        let Some(window) = web_sys::window() else { return Ok(None) };
        let value = js_sys::Reflect::get(&window, &WINDOW_CONFIG_KEY.into())
            .map_err(|e| AppError::ConfigError(format!("{e:?}")))?;
        if value.is_undefined() || value.is_null() {
            return Ok(None);
        }
        let json = js_sys::JSON::stringify(&value)
            .map_err(|e| AppError::ConfigError(format!("{e:?}")))?
            .as_string()
            .unwrap_or_default();
        Self::from_json(&json).map(Some)
    }
}
