// Configuration module entry point
// Loads application configuration and exposes the shared runtime state

mod state;
mod types;

use std::net::SocketAddr;
use std::time::Duration;

use crate::store::User;

// Re-export public types
pub use state::AppState;
pub use types::{Config, SeedUser};

/// Environment variable prefix, e.g. `USERS_API_SERVER__PORT=9000`
const ENV_PREFIX: &str = "USERS_API";

impl Config {
    /// Load configuration from "config.toml" (if present) and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from specified file path (without extension)
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        Self::build(config::File::with_name(config_path).required(false))
    }

    fn build<S>(file: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let settings = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.max_body_size", 1_048_576)? // 1MB
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// Upper bound on the lifetime of a single connection
    pub fn connection_timeout(&self) -> Duration {
        Duration::from_secs(std::cmp::max(
            self.performance.read_timeout,
            self.performance.write_timeout,
        ))
    }

    /// Seed records as `(key, user)` pairs for the store
    pub fn seed_entries(&self) -> impl Iterator<Item = (String, User)> + '_ {
        self.seed.iter().cloned().map(SeedUser::into_entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};

    fn from_toml(toml: &str) -> Config {
        Config::build(File::from_str(toml, FileFormat::Toml)).unwrap()
    }

    #[test]
    fn test_defaults_apply_to_empty_file() {
        let cfg = from_toml("");
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.workers, None);
        assert!(cfg.logging.access_log);
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert_eq!(cfg.http.max_body_size, 1_048_576);
        assert_eq!(cfg.performance.max_connections, None);
        assert!(cfg.seed.is_empty());
    }

    #[test]
    fn test_seed_entries_keep_their_keys() {
        let cfg = from_toml(
            r#"
            [[seed]]
            key = "1"
            id = "MCI001"
            name = "Kevin De Bruyne"

            [[seed]]
            key = "2"
            id = "MCI002"
            name = "Bernardo Silva"
            "#,
        );

        let entries: Vec<_> = cfg.seed_entries().collect();
        assert_eq!(
            entries,
            vec![
                ("1".to_string(), User::new("MCI001", "Kevin De Bruyne")),
                ("2".to_string(), User::new("MCI002", "Bernardo Silva")),
            ]
        );
    }

    #[test]
    fn test_file_overrides_defaults() {
        let cfg = from_toml(
            r#"
            [server]
            port = 9090
            workers = 2

            [performance]
            read_timeout = 5
            write_timeout = 12
            max_connections = 100
            "#,
        );
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.server.workers, Some(2));
        assert_eq!(cfg.performance.max_connections, Some(100));
        assert_eq!(cfg.connection_timeout(), Duration::from_secs(12));
    }

    #[test]
    fn test_socket_addr() {
        let cfg = from_toml("");
        assert_eq!(
            cfg.get_socket_addr().unwrap(),
            "127.0.0.1:8080".parse::<SocketAddr>().unwrap()
        );

        let mut cfg = from_toml("");
        cfg.server.host = "not a host".to_string();
        assert!(cfg.get_socket_addr().is_err());
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let cfg = Config::load_from("definitely/not/a/config/file").unwrap();
        assert_eq!(cfg.logging.level, "info");
    }
}
