//! Build-time configuration for the API endpoint, token storage, and logging,
//! with an optional runtime override. The runtime config is read from
//! `window.SKYBOOK_CONFIG` (if present) so static deployments can point at a
//! different API without rebuilding. Configuration values are public; do not
//! store secrets here.

use tracing::level_filters::LevelFilter;

const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
const DEFAULT_TOKEN_STORAGE_KEY: &str = "token";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Frontend configuration derived from build-time environment variables.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: String,
    /// `localStorage` key holding the session token.
    pub token_storage_key: String,
    pub log_level: String,
}

impl AppConfig {
    /// Loads config from build-time environment variables and applies runtime overrides.
    pub fn load() -> Self {
        let mut config = Self::from_build_env();

        if let Some(runtime) = runtime_config() {
            apply_runtime_overrides(&mut config, runtime);
        }

        config
    }

    fn from_build_env() -> Self {
        let api_base_url = option_env!("SKYBOOK_API_BASE_URL")
            .and_then(normalize_runtime_value)
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let token_storage_key = option_env!("SKYBOOK_TOKEN_KEY")
            .and_then(normalize_runtime_value)
            .unwrap_or_else(|| DEFAULT_TOKEN_STORAGE_KEY.to_string());
        let log_level = option_env!("SKYBOOK_LOG_LEVEL")
            .and_then(normalize_runtime_value)
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        Self {
            api_base_url,
            token_storage_key,
            log_level,
        }
    }

    /// Parses `log_level`, falling back to `INFO` for unknown values.
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.trim().parse().unwrap_or(LevelFilter::INFO)
    }
}

#[derive(Default)]
struct RuntimeConfig {
    api_base_url: Option<String>,
    token_storage_key: Option<String>,
    log_level: Option<String>,
}

fn apply_runtime_overrides(config: &mut AppConfig, runtime: RuntimeConfig) {
    if let Some(value) = runtime.api_base_url {
        config.api_base_url = value;
    }
    if let Some(value) = runtime.token_storage_key {
        config.token_storage_key = value;
    }
    if let Some(value) = runtime.log_level {
        config.log_level = value;
    }
}

#[cfg(target_arch = "wasm32")]
fn runtime_config() -> Option<RuntimeConfig> {
    use js_sys::{Object, Reflect};
    use wasm_bindgen::JsValue;

    let window = web_sys::window()?;
    let config = Reflect::get(&window, &JsValue::from_str("SKYBOOK_CONFIG")).ok()?;
    if config.is_null() || config.is_undefined() {
        return None;
    }
    let object = Object::from(config);

    Some(RuntimeConfig {
        api_base_url: read_runtime_value(&object, "api_base_url"),
        token_storage_key: read_runtime_value(&object, "token_storage_key"),
        log_level: read_runtime_value(&object, "log_level"),
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn runtime_config() -> Option<RuntimeConfig> {
    None
}

#[cfg(target_arch = "wasm32")]
fn read_runtime_value(object: &js_sys::Object, key: &str) -> Option<String> {
    let value = js_sys::Reflect::get(object, &wasm_bindgen::JsValue::from_str(key))
        .ok()?
        .as_string()?;
    normalize_runtime_value(&value)
}

fn normalize_runtime_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, RuntimeConfig, apply_runtime_overrides, normalize_runtime_value};
    use tracing::level_filters::LevelFilter;

    fn defaults() -> AppConfig {
        AppConfig {
            api_base_url: "https://api.default".to_string(),
            token_storage_key: "token".to_string(),
            log_level: "info".to_string(),
        }
    }

    #[test]
    fn normalize_runtime_value_trims_and_rejects_empty() {
        assert_eq!(normalize_runtime_value(""), None);
        assert_eq!(normalize_runtime_value("   "), None);
        assert_eq!(
            normalize_runtime_value("  https://api.skybook.dev "),
            Some("https://api.skybook.dev".to_string())
        );
    }

    #[test]
    fn apply_runtime_overrides_ignores_empty_values() {
        let mut config = defaults();
        let runtime = RuntimeConfig {
            api_base_url: normalize_runtime_value(""),
            token_storage_key: normalize_runtime_value("  "),
            log_level: None,
        };

        apply_runtime_overrides(&mut config, runtime);

        assert_eq!(config.api_base_url, "https://api.default");
        assert_eq!(config.token_storage_key, "token");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn apply_runtime_overrides_overwrites_when_present() {
        let mut config = defaults();
        let runtime = RuntimeConfig {
            api_base_url: normalize_runtime_value("https://api.override"),
            token_storage_key: normalize_runtime_value("skybook_token"),
            log_level: normalize_runtime_value("debug"),
        };

        apply_runtime_overrides(&mut config, runtime);

        assert_eq!(config.api_base_url, "https://api.override");
        assert_eq!(config.token_storage_key, "skybook_token");
        assert_eq!(config.level_filter(), LevelFilter::DEBUG);
    }

    #[test]
    fn load_falls_back_to_defaults_without_runtime_config() {
        let config = AppConfig::load();
        assert!(!config.api_base_url.is_empty());
        assert!(!config.token_storage_key.is_empty());
    }

    #[test]
    fn unknown_log_level_defaults_to_info() {
        let mut config = defaults();
        config.log_level = "chatty".to_string();
        assert_eq!(config.level_filter(), LevelFilter::INFO);
    }
}
