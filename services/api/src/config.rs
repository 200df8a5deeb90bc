use std::net::SocketAddr;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(String),
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
///
/// The three realtime deployment secrets are optional here: their absence is
/// a provisioning-time failure reported to the requesting client, not a
/// startup failure. Use the accessor methods to require them.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    pub livekit_url: Option<String>,
    pub livekit_api_key: Option<String>,
    pub livekit_api_secret: Option<String>,
    pub default_agent_name: String,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?;

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let livekit_url = std::env::var("LIVEKIT_URL").ok();
        let livekit_api_key = std::env::var("LIVEKIT_API_KEY").ok();
        let livekit_api_secret = std::env::var("LIVEKIT_API_SECRET").ok();

        let default_agent_name =
            std::env::var("DEFAULT_AGENT_NAME").unwrap_or_else(|_| "myagent".to_string());

        Ok(Self {
            bind_address,
            log_level,
            livekit_url,
            livekit_api_key,
            livekit_api_secret,
            default_agent_name,
        })
    }

    /// The realtime service base URL, required for provisioning.
    pub fn livekit_url(&self) -> Result<&str, ConfigError> {
        self.livekit_url
            .as_deref()
            .ok_or_else(|| ConfigError::MissingVar("LIVEKIT_URL".to_string()))
    }

    /// The realtime API key identifier, required for provisioning.
    pub fn livekit_api_key(&self) -> Result<&str, ConfigError> {
        self.livekit_api_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingVar("LIVEKIT_API_KEY".to_string()))
    }

    /// The realtime API key secret, required for provisioning.
    pub fn livekit_api_secret(&self) -> Result<&str, ConfigError> {
        self.livekit_api_secret
            .as_deref()
            .ok_or_else(|| ConfigError::MissingVar("LIVEKIT_API_SECRET".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use tracing::Level;

    fn clear_env_vars() {
        unsafe {
            env::remove_var("BIND_ADDRESS");
            env::remove_var("RUST_LOG");
            env::remove_var("LIVEKIT_URL");
            env::remove_var("LIVEKIT_API_KEY");
            env::remove_var("LIVEKIT_API_SECRET");
            env::remove_var("DEFAULT_AGENT_NAME");
        }
    }

    #[test]
    fn test_config_error_display() {
        let missing_var = ConfigError::MissingVar("TEST_VAR".to_string());
        assert_eq!(
            format!("{}", missing_var),
            "Missing environment variable: TEST_VAR"
        );

        let invalid_value =
            ConfigError::InvalidValue("TEST_VAR".to_string(), "bad_value".to_string());
        assert_eq!(
            format!("{}", invalid_value),
            "Invalid value for environment variable TEST_VAR: bad_value"
        );
    }

    #[test]
    #[serial]
    fn test_config_from_env_defaults() {
        clear_env_vars();

        let config = Config::from_env().expect("Config should load successfully");

        assert_eq!(config.bind_address.to_string(), "0.0.0.0:3000");
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.livekit_url, None);
        assert_eq!(config.livekit_api_key, None);
        assert_eq!(config.livekit_api_secret, None);
        assert_eq!(config.default_agent_name, "myagent");
    }

    #[test]
    #[serial]
    fn test_config_from_env_custom_values() {
        clear_env_vars();
        unsafe {
            env::set_var("BIND_ADDRESS", "127.0.0.1:8080");
            env::set_var("RUST_LOG", "debug");
            env::set_var("LIVEKIT_URL", "wss://example.livekit.cloud");
            env::set_var("LIVEKIT_API_KEY", "APIabc123");
            env::set_var("LIVEKIT_API_SECRET", "supersecret");
            env::set_var("DEFAULT_AGENT_NAME", "concierge");
        }

        let config = Config::from_env().expect("Config should load successfully");

        assert_eq!(config.bind_address.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, Level::DEBUG);
        assert_eq!(
            config.livekit_url,
            Some("wss://example.livekit.cloud".to_string())
        );
        assert_eq!(config.livekit_api_key, Some("APIabc123".to_string()));
        assert_eq!(config.livekit_api_secret, Some("supersecret".to_string()));
        assert_eq!(config.default_agent_name, "concierge");
    }

    #[test]
    #[serial]
    fn test_config_invalid_bind_address() {
        clear_env_vars();
        unsafe {
            env::set_var("BIND_ADDRESS", "not-a-valid-address");
        }

        let err = Config::from_env().unwrap_err();
        match err {
            ConfigError::InvalidValue(var, _) => assert_eq!(var, "BIND_ADDRESS"),
            _ => panic!("Expected InvalidValue for BIND_ADDRESS"),
        }
    }

    #[test]
    #[serial]
    fn test_config_invalid_log_level() {
        clear_env_vars();
        unsafe {
            env::set_var("RUST_LOG", "not-a-level");
        }

        let err = Config::from_env().unwrap_err();
        match err {
            ConfigError::InvalidValue(var, _) => assert_eq!(var, "RUST_LOG"),
            _ => panic!("Expected InvalidValue for RUST_LOG"),
        }
    }

    #[test]
    #[serial]
    fn test_missing_secrets_are_deferred_to_the_accessors() {
        clear_env_vars();

        let config = Config::from_env().expect("missing secrets must not fail startup");

        for (accessor, var) in [
            (config.livekit_url(), "LIVEKIT_URL"),
            (config.livekit_api_key(), "LIVEKIT_API_KEY"),
            (config.livekit_api_secret(), "LIVEKIT_API_SECRET"),
        ] {
            let err = accessor.expect_err("accessor should fail without the variable");
            assert!(err.to_string().contains(var));
        }
    }

    #[test]
    #[serial]
    fn test_present_secrets_are_returned_by_the_accessors() {
        clear_env_vars();
        unsafe {
            env::set_var("LIVEKIT_URL", "wss://example.livekit.cloud");
            env::set_var("LIVEKIT_API_KEY", "APIabc123");
            env::set_var("LIVEKIT_API_SECRET", "supersecret");
        }

        let config = Config::from_env().unwrap();
        assert_eq!(config.livekit_url().unwrap(), "wss://example.livekit.cloud");
        assert_eq!(config.livekit_api_key().unwrap(), "APIabc123");
        assert_eq!(config.livekit_api_secret().unwrap(), "supersecret");
    }
}
