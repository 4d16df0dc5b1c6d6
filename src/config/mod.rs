use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

const ENV_PREFIX: &str = "MATERIALITY";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Base for absolute form links. Falls back to the request's Host header.
    #[serde(default)]
    pub public_base_url: Option<String>,
    pub form_ttl_secs: u64,
    /// Upper bound on unexpired form sessions held in memory.
    pub max_form_sessions: usize,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            public_base_url: None,
            form_ttl_secs: 600,
            max_form_sessions: 10_000,
            request_timeout_secs: 30,
        }
    }
}

impl Config {
    /// Reads `MATERIALITY_*` variables, after loading `.env` if present.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let defaults = Config::default();
        let config = ::config::Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("form_ttl_secs", defaults.form_ttl_secs as i64)?
            .set_default("max_form_sessions", defaults.max_form_sessions as i64)?
            .set_default("request_timeout_secs", defaults.request_timeout_secs as i64)?
            .add_source(::config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize::<Config>()?;

        if config.form_ttl_secs == 0 {
            anyhow::bail!("{}_FORM_TTL_SECS must be positive", ENV_PREFIX);
        }
        if config.max_form_sessions == 0 {
            anyhow::bail!("{}_MAX_FORM_SESSIONS must be positive", ENV_PREFIX);
        }
        Ok(config)
    }

    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid bind address {}:{}: {}", self.host, self.port, e))
    }

    pub fn form_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.form_ttl_secs as i64)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bind_address_parses() {
        let config = Config::default();
        assert_eq!(config.bind_addr().unwrap().port(), 8000);
        assert_eq!(config.form_ttl(), chrono::Duration::minutes(10));
    }

    #[test]
    fn bad_host_is_an_error() {
        let config = Config {
            host: "not a host".to_string(),
            ..Config::default()
        };
        assert!(config.bind_addr().is_err());
    }
}
