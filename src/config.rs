//! Portal Configuration
//!
//! Settings baked in at build time. A browser bundle has no process
//! environment, so values come from `option_env!` when Trunk compiles the app.
//!
//! | Env Var            | Default                 |
//! |--------------------|-------------------------|
//! | `PORTAL_API_URL`   | `http://127.0.0.1:8000` |
//! | `PORTAL_LOG_LEVEL` | `info`                  |

use log::LevelFilter;

/// Default API origin (local development server)
const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Storage key holding the access token
pub const ACCESS_KEY: &str = "access";

/// Storage key holding the refresh token
pub const REFRESH_KEY: &str = "refresh";

/// Runtime configuration shared through context
#[derive(Debug, Clone, PartialEq)]
pub struct PortalConfig {
    /// API origin without trailing slash, e.g. `https://admin.example.com`
    pub api_base_url: String,
    /// Storage key for the access token
    pub access_key: &'static str,
    /// Storage key for the refresh token
    pub refresh_key: &'static str,
    /// Console log level
    pub log_level: LevelFilter,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL, LevelFilter::Info)
    }
}

impl PortalConfig {
    pub fn new(api_base_url: &str, log_level: LevelFilter) -> Self {
        Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            access_key: ACCESS_KEY,
            refresh_key: REFRESH_KEY,
            log_level,
        }
    }

    /// Build the configuration from build-time environment variables
    pub fn from_env() -> Self {
        Self::from_values(option_env!("PORTAL_API_URL"), option_env!("PORTAL_LOG_LEVEL"))
    }

    fn from_values(api_url: Option<&str>, log_level: Option<&str>) -> Self {
        let api_url = api_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_URL);
        let level = log_level
            .and_then(|level| level.trim().parse::<LevelFilter>().ok())
            .unwrap_or(LevelFilter::Info);
        Self::new(api_url, level)
    }

    /// Absolute URL for an API path such as `/api/projects/`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }
}
