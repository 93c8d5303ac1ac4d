//! Application Configuration
//!
//! Read once at startup. Sources, first hit wins:
//! 1. JS global `window.__PLANBOARD_CONFIG__`
//! 2. `localStorage["planboard.config"]` (JSON)
//! 3. built-in defaults
//!
//! Every field is optional in the source document; missing ones keep their defaults.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

use crate::error::ConfigError;
use crate::models::{default_columns, Column};
use crate::pomodoro::PomodoroSettings;

pub const CONFIG_GLOBAL: &str = "__PLANBOARD_CONFIG__";
pub const CONFIG_STORAGE_KEY: &str = "planboard.config";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// Proxy route prefix, absolute or relative to the page origin
    pub api_base: String,
    pub request_timeout_ms: u32,
    /// Projects per page
    pub page_size: u32,
    /// Order index given to the first task of an empty column
    pub default_order_index: f64,
    pub columns: Vec<Column>,
    pub log_level: String,
    pub log_capacity: usize,
    pub pomodoro: PomodoroSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: "/api/proxy".to_string(),
            request_timeout_ms: 15_000,
            page_size: 10,
            default_order_index: 1000.0,
            columns: default_columns(),
            log_level: "info".to_string(),
            log_capacity: rolling_logger::DEFAULT_CAPACITY,
            pomodoro: PomodoroSettings::default(),
        }
    }
}

impl AppConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns.is_empty() {
            return Err(ConfigError::Invalid("at least one column is required".into()));
        }
        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(column.id) {
                return Err(ConfigError::Invalid(format!("duplicate column id {}", column.id)));
            }
        }
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("pageSize must be positive".into()));
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::Invalid("requestTimeoutMs must be positive".into()));
        }
        if !self.default_order_index.is_finite() {
            return Err(ConfigError::Invalid("defaultOrderIndex must be finite".into()));
        }
        self.pomodoro.validate().map_err(ConfigError::Invalid)
    }

    pub fn log_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }

    /// Absolute API base without a trailing slash
    pub fn resolve_api_base(&self, origin: &str) -> String {
        let base = self.api_base.trim();
        if base.starts_with("http://") || base.starts_with("https://") {
            return base.trim_end_matches('/').to_string();
        }
        let path = base.trim_matches('/');
        let origin = origin.trim_end_matches('/');
        if path.is_empty() {
            origin.to_string()
        } else {
            format!("{}/{}", origin, path)
        }
    }

    /// Load from the page, falling back to defaults when nothing is set
    pub fn load() -> Result<Self, ConfigError> {
        let Some(window) = web_sys::window() else {
            return Ok(Self::default());
        };

        let global = js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL))
            .unwrap_or(JsValue::UNDEFINED);
        if !global.is_undefined() && !global.is_null() {
            let config: Self =
                serde_wasm_bindgen::from_value(global).map_err(|e| ConfigError::Js(e.to_string()))?;
            config.validate()?;
            return Ok(config);
        }

        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(raw)) = storage.get_item(CONFIG_STORAGE_KEY) {
                return Self::from_json(&raw);
            }
        }

        Ok(Self::default())
    }
}

/// `window.location.origin`, empty outside a browser
pub fn page_origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}
