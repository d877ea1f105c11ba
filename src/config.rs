//! Startup configuration.
//!
//! The deployment injects a plain `window.APP_CONFIG` object (the runtime
//! analogue of an env file); every key is optional and falls back to the
//! compiled default. Read once at mount and passed down via context.

use js_sys::Reflect;
use wasm_bindgen::JsValue;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Features {
    pub dark_mode: bool,
    pub notifications: bool,
    pub data_export: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub retry_attempts: u32,
    pub retry_delay_ms: u32,
    /// "light" or "dark"; anything else falls back to light.
    pub default_theme: String,
    pub rows_per_page: usize,
    pub session_duration_ms: f64,
    pub inactivity_timeout_ms: f64,
    pub session_check_interval_ms: u32,
    pub features: Features,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            api_base_url: "http://localhost:5000".to_string(),
            retry_attempts: 3,
            retry_delay_ms: 1_000,
            default_theme: "light".to_string(),
            rows_per_page: 10,
            session_duration_ms: 60.0 * 60.0 * 1000.0,
            inactivity_timeout_ms: 30.0 * 60.0 * 1000.0,
            session_check_interval_ms: 5 * 60 * 1000,
            features: Features {
                dark_mode: true,
                notifications: true,
                data_export: true,
            },
        }
    }
}

impl AppConfig {
    /// Defaults overlaid with whatever `window.APP_CONFIG` provides.
    pub fn load() -> AppConfig {
        let mut cfg = AppConfig::default();
        let Some(window) = web_sys::window() else {
            return cfg;
        };
        let Ok(obj) = Reflect::get(&window, &JsValue::from_str("APP_CONFIG")) else {
            return cfg;
        };
        if !obj.is_object() {
            return cfg;
        }

        if let Some(v) = get_string(&obj, "apiBaseUrl") {
            cfg.api_base_url = v;
        }
        if let Some(v) = get_f64(&obj, "retryAttempts") {
            cfg.retry_attempts = v as u32;
        }
        if let Some(v) = get_f64(&obj, "retryDelayMs") {
            cfg.retry_delay_ms = v as u32;
        }
        if let Some(v) = get_string(&obj, "defaultTheme") {
            cfg.default_theme = v;
        }
        if let Some(v) = get_f64(&obj, "rowsPerPage") {
            cfg.rows_per_page = v as usize;
        }
        if let Some(v) = get_f64(&obj, "sessionDurationMs") {
            cfg.session_duration_ms = v;
        }
        if let Some(v) = get_f64(&obj, "inactivityTimeoutMs") {
            cfg.inactivity_timeout_ms = v;
        }
        if let Some(v) = get_f64(&obj, "sessionCheckIntervalMs") {
            cfg.session_check_interval_ms = v as u32;
        }
        if let Some(v) = get_bool(&obj, "enableDarkMode") {
            cfg.features.dark_mode = v;
        }
        if let Some(v) = get_bool(&obj, "enableNotifications") {
            cfg.features.notifications = v;
        }
        if let Some(v) = get_bool(&obj, "enableDataExport") {
            cfg.features.data_export = v;
        }
        cfg
    }
}

fn get_string(obj: &JsValue, key: &str) -> Option<String> {
    Reflect::get(obj, &JsValue::from_str(key)).ok()?.as_string()
}

fn get_f64(obj: &JsValue, key: &str) -> Option<f64> {
    Reflect::get(obj, &JsValue::from_str(key)).ok()?.as_f64()
}

fn get_bool(obj: &JsValue, key: &str) -> Option<bool> {
    Reflect::get(obj, &JsValue::from_str(key)).ok()?.as_bool()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.rows_per_page, 10);
        assert_eq!(cfg.session_duration_ms, 3_600_000.0);
        assert_eq!(cfg.inactivity_timeout_ms, 1_800_000.0);
        assert_eq!(cfg.session_check_interval_ms, 300_000);
        assert_eq!(cfg.default_theme, "light");
    }
}
