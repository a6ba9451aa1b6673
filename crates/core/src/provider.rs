use crate::error::{ContextEqError, Result};

/// Live video-intelligence backends the gateway can forward to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Provider {
    #[default]
    Hosted,
    Local,
}

pub struct ProviderConfig {
    pub api_url: &'static str,
    pub env_var: &'static str,
}

impl Provider {
    pub fn config(&self) -> ProviderConfig {
        match self {
            Provider::Hosted => ProviderConfig {
                api_url: "https://api.contexteq.ai/v1",
                env_var: "CONTEXTEQ_API_KEY",
            },
            Provider::Local => ProviderConfig {
                api_url: "http://127.0.0.1:8080/v1",
                env_var: "CONTEXTEQ_LOCAL_API_KEY",
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Provider::Hosted => "ContextEQ Cloud",
            Provider::Local => "Local backend",
        }
    }

    /// API key from this provider's environment variable.
    pub fn validate_api_key(&self) -> Result<String> {
        let config = self.config();
        match std::env::var(config.env_var) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(ContextEqError::MissingApiKey {
                env_var: config.env_var.to_string(),
            }),
        }
    }

    /// Explicit key wins over the environment; `None` means fixture mode.
    pub fn resolve_api_key(&self, explicit: Option<&str>) -> Option<String> {
        match explicit {
            Some(key) => Some(key.to_string()),
            None => self.validate_api_key().ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_key_is_used_verbatim() {
        assert_eq!(
            Provider::Hosted.resolve_api_key(Some("sk-live-xyz")),
            Some("sk-live-xyz".to_string())
        );
    }

    #[test]
    fn explicit_empty_key_is_not_replaced_by_env() {
        assert_eq!(Provider::Local.resolve_api_key(Some("")), Some(String::new()));
    }

    #[test]
    fn providers_have_display_names() {
        assert_eq!(Provider::Hosted.name(), "ContextEQ Cloud");
        assert_eq!(Provider::Local.name(), "Local backend");
    }

    #[test]
    fn providers_have_distinct_env_vars() {
        assert_ne!(Provider::Hosted.config().env_var, Provider::Local.config().env_var);
    }
}
