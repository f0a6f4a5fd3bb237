//! Frontend configuration

use crate::api::error::ClientError;
use url::Url;

/// Fixed page, storage and timing configuration
pub struct PortalConfig;

impl PortalConfig {
    /// Page shown when the URL fragment is empty
    pub const DEFAULT_PAGE: &'static str = "about";

    /// Page holding the login and registration forms
    pub const AUTH_PAGE: &'static str = "auth";

    /// Page opened after a successful login or registration
    pub const PROFILE_PAGE: &'static str = "profile";

    /// Pages that require an active session
    pub const PROTECTED_PAGES: [&'static str; 3] = ["profile", "feedback", "download"];

    /// Delay before redirecting to the profile page, in milliseconds
    pub const REDIRECT_DELAY_MS: u32 = 1_000;

    /// Local storage key for the logged-in flag
    pub const LOGGED_IN_KEY: &'static str = "session_logged_in";

    /// Local storage key for the username
    pub const USERNAME_KEY: &'static str = "session_username";

    /// Local storage key for the API key
    pub const API_KEY_KEY: &'static str = "session_key";

    /// Local storage key for the key expiry
    pub const EXPIRY_KEY: &'static str = "session_expiry";

    /// Every storage key owned by the session, in write order
    pub const SESSION_KEYS: [&'static str; 4] = [
        Self::LOGGED_IN_KEY,
        Self::USERNAME_KEY,
        Self::API_KEY_KEY,
        Self::EXPIRY_KEY,
    ];
}

/// Backend location
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    /// Base URL used when nothing else is configured (local Flask server)
    pub const DEFAULT_BASE_URL: &'static str = "http://127.0.0.1:5000/api";

    /// Name of the `<meta>` tag that can override the base URL at runtime
    pub const META_NAME: &'static str = "kitebot-api-base";

    /// Validate and normalize a base URL
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let base_url = base_url.into();
        let trimmed = base_url.trim().trim_end_matches('/');

        let parsed = Url::parse(trimmed)
            .map_err(|e| ClientError::Configuration(format!("invalid base url {trimmed:?}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::Configuration(format!(
                "unsupported scheme {:?} in base url",
                parsed.scheme()
            )));
        }

        Ok(Self {
            base_url: trimmed.to_string(),
        })
    }

    /// Resolve the base URL: runtime override, then the build-time
    /// `KITEBOT_API_BASE_URL`, then the local default.
    pub fn resolve(runtime_override: Option<&str>) -> Result<Self, ClientError> {
        let candidate = runtime_override
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .or(option_env!("KITEBOT_API_BASE_URL"))
            .unwrap_or(Self::DEFAULT_BASE_URL);
        Self::new(candidate)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slashes() {
        let config = ApiConfig::new("https://kitebot-api.onrender.com/api//").unwrap();
        assert_eq!(config.base_url(), "https://kitebot-api.onrender.com/api");
    }

    #[test]
    fn rejects_garbage_and_foreign_schemes() {
        assert!(matches!(
            ApiConfig::new("not a url"),
            Err(ClientError::Configuration(_))
        ));
        assert!(matches!(
            ApiConfig::new("ftp://example.com/api"),
            Err(ClientError::Configuration(_))
        ));
    }

    #[test]
    fn runtime_override_wins() {
        let config = ApiConfig::resolve(Some(" http://10.0.0.2:5000/api ")).unwrap();
        assert_eq!(config.base_url(), "http://10.0.0.2:5000/api");
    }

    #[test]
    fn blank_override_falls_through() {
        let config = ApiConfig::resolve(Some("   ")).unwrap();
        let expected = option_env!("KITEBOT_API_BASE_URL").unwrap_or(ApiConfig::DEFAULT_BASE_URL);
        assert_eq!(config.base_url(), expected.trim_end_matches('/'));
    }

    #[test]
    fn session_keys_share_prefix() {
        assert!(
            PortalConfig::SESSION_KEYS
                .iter()
                .all(|key| key.starts_with("session_"))
        );
    }
}
