use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub seatmap: SeatmapConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeatmapConfig {
    /// Upper bound on concurrently open picker sessions
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
    /// Idle time after which an abandoned picker session is discarded
    #[serde(default = "default_session_ttl_seconds")]
    pub session_ttl_seconds: u64,
}

impl Default for SeatmapConfig {
    fn default() -> Self {
        Self {
            max_sessions: default_max_sessions(),
            session_ttl_seconds: default_session_ttl_seconds(),
        }
    }
}

fn default_max_sessions() -> usize { 10_000 }

fn default_session_ttl_seconds() -> u64 { 1800 }

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SeedConfig {
    #[serde(default)]
    pub enabled: bool,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. `SKYBOOK_SERVER__PORT=9000`
            .add_source(config::Environment::with_prefix("SKYBOOK").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn parse(toml: &str) -> Config {
        config::Config::builder()
            .add_source(config::File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_optional_sections_default() {
        let cfg = parse("[server]\nport = 8080\n");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.seatmap.max_sessions, 10_000);
        assert_eq!(cfg.seatmap.session_ttl_seconds, 1800);
        assert!(!cfg.seed.enabled);
    }

    #[test]
    fn test_full_config() {
        let cfg = parse(
            "[server]\nport = 3000\n[seatmap]\nmax_sessions = 5\nsession_ttl_seconds = 60\n[seed]\nenabled = true\n",
        );
        assert_eq!(cfg.seatmap.max_sessions, 5);
        assert_eq!(cfg.seatmap.session_ttl_seconds, 60);
        assert!(cfg.seed.enabled);
    }
}
