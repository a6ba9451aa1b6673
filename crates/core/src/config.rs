use std::{fmt, time::Duration};

use crate::provider::Provider;

/// Simulated processing time of the fixture backend.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(600);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GatewayMode {
    /// Canned sample data, no network.
    #[default]
    Fixture,
    /// Requests are forwarded to the configured backend.
    Live,
}

impl GatewayMode {
    /// Empty or whitespace credentials select fixture mode. `force_demo`
    /// overrides non-empty credentials.
    pub fn select(credentials: Option<&str>, force_demo: bool) -> Self {
        match credentials.map(str::trim) {
            _ if force_demo => GatewayMode::Fixture,
            Some(key) if !key.is_empty() => GatewayMode::Live,
            _ => GatewayMode::Fixture,
        }
    }

    pub fn banner(&self) -> &'static str {
        match self {
            GatewayMode::Fixture => "Mode: Demo (sample data)",
            GatewayMode::Live => "Mode: Live API",
        }
    }
}

impl fmt::Display for GatewayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayMode::Fixture => f.write_str("fixture"),
            GatewayMode::Live => f.write_str("live"),
        }
    }
}

#[derive(Clone)]
pub struct GatewayConfig {
    pub mode: GatewayMode,
    pub credentials: Option<String>,
    pub api_url: String,
    pub latency: Duration,
}

impl GatewayConfig {
    pub fn new(provider: Provider, credentials: Option<String>, force_demo: bool) -> Self {
        let mode = GatewayMode::select(credentials.as_deref(), force_demo);
        Self {
            mode,
            credentials: credentials.filter(|key| !key.trim().is_empty()),
            api_url: provider.config().api_url.to_string(),
            latency: DEFAULT_LATENCY,
        }
    }

    /// Fixture mode with no latency.
    pub fn instant() -> Self {
        Self::default().with_latency(Duration::ZERO)
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::new(Provider::default(), None, false)
    }
}

// Keep the key out of logs.
impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("mode", &self.mode)
            .field("credentials", &self.credentials.as_ref().map(|_| "<redacted>"))
            .field("api_url", &self.api_url)
            .field("latency", &self.latency)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_credentials_select_fixture_mode() {
        assert_eq!(GatewayMode::select(Some(""), false), GatewayMode::Fixture);
        assert_eq!(GatewayMode::select(None, false), GatewayMode::Fixture);
        assert_eq!(GatewayMode::select(Some("   "), false), GatewayMode::Fixture);
    }

    #[test]
    fn live_credentials_select_live_mode() {
        assert_eq!(GatewayMode::select(Some("sk-live-xyz"), false), GatewayMode::Live);
    }

    #[test]
    fn demo_override_wins_over_credentials() {
        assert_eq!(GatewayMode::select(Some("sk-live-xyz"), true), GatewayMode::Fixture);
    }

    #[test]
    fn config_drops_blank_credentials() {
        let cfg = GatewayConfig::new(Provider::Hosted, Some(" ".into()), false);
        assert_eq!(cfg.mode, GatewayMode::Fixture);
        assert!(cfg.credentials.is_none());
        assert_eq!(cfg.latency, DEFAULT_LATENCY);
    }

    #[test]
    fn debug_output_redacts_key() {
        let cfg = GatewayConfig::new(Provider::Hosted, Some("sk-live-xyz".into()), false);
        let dbg = format!("{cfg:?}");
        assert!(!dbg.contains("sk-live-xyz"));
        assert!(dbg.contains("<redacted>"));
    }

    #[test]
    fn banner_names_the_mode() {
        assert_eq!(GatewayMode::Fixture.banner(), "Mode: Demo (sample data)");
        assert_eq!(GatewayMode::Live.banner(), "Mode: Live API");
    }
}
