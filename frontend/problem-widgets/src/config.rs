use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub platform_url: String,
    pub bind_addr: String,
    pub timeout_secs: u64,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        // Root .env first, then the crate-local one
        let skip_root_env = env::var("SKIP_ROOT_ENV").is_ok();
        if skip_root_env {
            dotenvy::dotenv().ok();
        } else if dotenvy::from_path("../../.env").is_err() {
            dotenvy::dotenv().ok();
        }

        let env = env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());

        // config/*.toml, overridden by APP__* environment variables
        let settings = config::Config::builder()
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        let platform_url = settings
            .get_string("platform.url")
            .or_else(|_| env::var("PLATFORM_URL"))
            .unwrap_or_else(|_| "http://localhost:8000".to_string());

        let bind_addr = settings
            .get_string("server.bind_addr")
            .or_else(|_| env::var("BIND_ADDR"))
            .unwrap_or_else(|_| "0.0.0.0:8081".to_string());

        let timeout_secs = match settings.get_int("platform.timeout_secs") {
            Ok(secs) => u64::try_from(secs).map_err(|_| {
                config::ConfigError::Message(format!("platform.timeout_secs must be positive, got {}", secs))
            })?,
            Err(_) => match env::var("PLATFORM_TIMEOUT_SECS") {
                Ok(raw) => raw.parse().map_err(|_| {
                    config::ConfigError::Message(format!("Invalid PLATFORM_TIMEOUT_SECS: {}", raw))
                })?,
                Err(_) => 10,
            },
        };

        Ok(Config {
            platform_url,
            bind_addr,
            timeout_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in [
            "PLATFORM_URL",
            "BIND_ADDR",
            "PLATFORM_TIMEOUT_SECS",
            "APP__PLATFORM__URL",
            "APP__PLATFORM__TIMEOUT_SECS",
        ] {
            env::remove_var(key);
        }
        env::set_var("SKIP_ROOT_ENV", "1");
        env::set_var("APP_ENV", "test-none");
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = Config::load().unwrap();
        assert_eq!(config.platform_url, "http://localhost:8000");
        assert_eq!(config.bind_addr, "0.0.0.0:8081");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    #[serial]
    fn test_plain_env_fallbacks() {
        clear_env();
        env::set_var("PLATFORM_URL", "http://platform.internal:9000");
        env::set_var("PLATFORM_TIMEOUT_SECS", "3");

        let config = Config::load().unwrap();
        assert_eq!(config.platform_url, "http://platform.internal:9000");
        assert_eq!(config.timeout_secs, 3);

        env::set_var("PLATFORM_TIMEOUT_SECS", "soon");
        assert!(Config::load().is_err());
        clear_env();
    }

    #[test]
    #[serial]
    fn test_prefixed_env_wins() {
        clear_env();
        env::set_var("PLATFORM_URL", "http://fallback");
        env::set_var("APP__PLATFORM__URL", "http://preferred");

        let config = Config::load().unwrap();
        assert_eq!(config.platform_url, "http://preferred");
        clear_env();
    }
}
