use anyhow::{bail, Context, Result};
use std::env;
use std::str::FromStr;

/// Which repository implementation backs the services
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Postgres,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            other => bail!("unknown storage backend '{other}', expected 'memory' or 'postgres'"),
        }
    }
}

const DEFAULT_JWT_SECRET: &str = "your-secret-key-change-in-production";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub log_level: String,
    pub jwt_secret: String,
    pub storage_backend: StorageBackend,
    pub seed_demo_data: bool,
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = lookup(name).unwrap_or_else(|| default.to_string());
    raw.trim()
        .parse()
        .map_err(|err| anyhow::anyhow!("{err}"))
        .with_context(|| format!("invalid value '{raw}' for {name}"))
}

fn parse_flag(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Result<bool> {
    match lookup(name).map(|v| v.trim().to_lowercase()) {
        None => Ok(false),
        Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => Ok(true),
        Some(v) if matches!(v.as_str(), "" | "0" | "false" | "no" | "off") => Ok(false),
        Some(v) => bail!("invalid value '{v}' for {name}, expected a boolean"),
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from any variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_var(&lookup, "PORT", "3000")?;
        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string());
        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string());
        let jwt_secret = lookup("JWT_SECRET")
            .unwrap_or_else(|| DEFAULT_JWT_SECRET.to_string());
        let storage_backend = parse_var(&lookup, "STORAGE_BACKEND", "memory")?;
        let seed_demo_data = parse_flag(&lookup, "SEED_DEMO_DATA")?;

        let config = AppConfig {
            host,
            port,
            environment,
            log_level,
            jwt_secret,
            storage_backend,
            seed_demo_data,
        };

        if config.is_production() && config.jwt_secret == DEFAULT_JWT_SECRET {
            bail!("JWT_SECRET must be set in production");
        }

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.server_address(), "0.0.0.0:3000");
        assert_eq!(config.storage_backend, StorageBackend::Memory);
        assert!(config.is_development());
        assert!(!config.seed_demo_data);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("PORT", "8080"),
            ("ENVIRONMENT", "production"),
            ("JWT_SECRET", "s3cret"),
            ("STORAGE_BACKEND", "Postgres"),
            ("SEED_DEMO_DATA", "true"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert!(config.is_production());
        assert_eq!(config.storage_backend, StorageBackend::Postgres);
        assert!(config.seed_demo_data);
    }

    #[test]
    fn test_invalid_values_name_the_variable() {
        let err = AppConfig::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert!(format!("{err:#}").contains("PORT"));

        let err = AppConfig::from_lookup(lookup_from(&[("STORAGE_BACKEND", "redis")])).unwrap_err();
        assert!(format!("{err:#}").contains("STORAGE_BACKEND"));

        let err = AppConfig::from_lookup(lookup_from(&[("SEED_DEMO_DATA", "maybe")])).unwrap_err();
        assert!(err.to_string().contains("SEED_DEMO_DATA"));

        let err = AppConfig::from_lookup(lookup_from(&[("ENVIRONMENT", "production")])).unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET"));
    }

    #[test]
    #[serial]
    fn test_from_env_reads_process_environment() {
        env::set_var("PORT", "4100");
        env::set_var("STORAGE_BACKEND", "memory");
        let config = AppConfig::from_env();
        env::remove_var("PORT");
        env::remove_var("STORAGE_BACKEND");

        assert_eq!(config.unwrap().port, 4100);
    }
}
