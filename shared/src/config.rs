use serde::{Deserialize, Serialize};

/// Runtime settings of the console
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConsoleConfig {
    pub api_base_url: String,
    /// How long success and error notices stay on screen
    pub notice_duration_ms: u32,
    pub currency_symbol: String,
    pub enable_debug_logging: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080".to_string(),
            notice_duration_ms: 3000,
            currency_symbol: "$".to_string(),
            enable_debug_logging: false,
        }
    }
}

impl ConsoleConfig {
    /// Apply overrides, typically read from build-time environment variables.
    ///
    /// Blank values are ignored. The debug flag accepts `1`, `true` and `yes`.
    pub fn from_overrides(api_base_url: Option<&str>, debug: Option<&str>) -> Self {
        let mut config = Self::default();
        if let Some(url) = api_base_url.map(str::trim).filter(|u| !u.is_empty()) {
            config.api_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(flag) = debug {
            config.enable_debug_logging =
                matches!(flag.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
        config
    }
}
