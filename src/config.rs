use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use crate::error::{AppError, Result};

#[derive(Clone, Debug)]
pub struct Config {
    pub wiki_api_url: String,
    pub output_path: PathBuf,
    pub exchange_addr: SocketAddr,
    pub exchange_timeout: Duration,
    pub log_dir: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup, applying
    /// defaults for anything unset.
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let wiki_api_url = match var("WIKI_API_URL") {
            Some(url) => url,
            None => {
                let lang = var("WIKI_LANGUAGE").unwrap_or_else(|| "en".to_string());
                format!("https://{}.wikipedia.org/w/api.php", lang)
            }
        };

        let output_path = PathBuf::from(var("OUTPUT_PATH").unwrap_or_else(|| "output.csv".to_string()));
        let log_dir = PathBuf::from(var("LOG_DIR").unwrap_or_else(|| "logs".to_string()));

        let host = var("EXCHANGE_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = var("EXCHANGE_PORT").unwrap_or_else(|| "5555".to_string());
        let port = port.parse::<u16>().map_err(|e| AppError::ConfigError(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(&host).map_err(|e| AppError::ConfigError(format!("Invalid host address: {}", e)))?;

        let timeout_secs = var("EXCHANGE_TIMEOUT_SECS").unwrap_or_else(|| "120".to_string());
        let timeout_secs = timeout_secs
            .parse::<u64>()
            .map_err(|e| AppError::ConfigError(format!("Invalid exchange timeout: {}", e)))?;

        Ok(Config {
            wiki_api_url,
            output_path,
            exchange_addr: SocketAddr::new(ip, port),
            exchange_timeout: Duration::from_secs(timeout_secs),
            log_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_map(pairs: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = from_map(&[]).unwrap();
        assert_eq!(config.wiki_api_url, "https://en.wikipedia.org/w/api.php");
        assert_eq!(config.output_path, PathBuf::from("output.csv"));
        assert_eq!(config.exchange_addr.to_string(), "0.0.0.0:5555");
        assert_eq!(config.exchange_timeout, Duration::from_secs(120));
    }

    #[test]
    fn language_selects_the_wiki_host() {
        let config = from_map(&[("WIKI_LANGUAGE", "de")]).unwrap();
        assert_eq!(config.wiki_api_url, "https://de.wikipedia.org/w/api.php");

        let config = from_map(&[("WIKI_LANGUAGE", "de"), ("WIKI_API_URL", "http://localhost/api")]).unwrap();
        assert_eq!(config.wiki_api_url, "http://localhost/api");
    }

    #[test]
    fn rejects_bad_port() {
        let err = from_map(&[("EXCHANGE_PORT", "not-a-port")]).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }

    #[test]
    fn rejects_bad_host() {
        let err = from_map(&[("EXCHANGE_HOST", "localhost:80")]).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }
}
