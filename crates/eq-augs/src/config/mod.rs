use crate::scoring::{StatWeights, WeightError};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_CATALOG_PATH: &str = "augmentation_only_items.csv";
pub const DEFAULT_TOP_N: usize = 15;

/// Deployment stage; only affects logging context today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn parse(value: &str) -> Self {
        let value = value.trim();
        if ["prod", "production"]
            .iter()
            .any(|name| value.eq_ignore_ascii_case(name))
        {
            Self::Production
        } else if ["test", "ci"].iter().any(|name| value.eq_ignore_ascii_case(name)) {
            Self::Test
        } else {
            Self::Development
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub analysis: AnalysisConfig,
}

impl AppConfig {
    /// Reads `.env` (when present) and then the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port = env_or("APP_PORT", "3000")
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        Ok(Self {
            environment: AppEnvironment::parse(&env_or("APP_ENV", "development")),
            server: ServerConfig {
                host: env_or("APP_HOST", "127.0.0.1"),
                port,
            },
            telemetry: TelemetryConfig {
                log_level: env_or("APP_LOG_LEVEL", "info"),
            },
            analysis: AnalysisConfig::from_env()?,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// `localhost` maps to the IPv4 loopback; anything else must be a
    /// literal address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = if self.host.eq_ignore_ascii_case("localhost") {
            IpAddr::from([127, 0, 0, 1])
        } else {
            self.host
                .parse()
                .map_err(|source| ConfigError::InvalidHost { source })?
        };
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where the catalog lives and how results are shaped when a caller does not
/// say otherwise.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub catalog_path: PathBuf,
    pub top_n: usize,
    pub weights: StatWeights,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            top_n: DEFAULT_TOP_N,
            weights: StatWeights::default_profile(),
        }
    }
}

impl AnalysisConfig {
    /// Row limit for one request: the caller's value, else the configured
    /// one. Zero means no limit.
    pub fn row_limit(&self, requested: Option<usize>) -> Option<usize> {
        match requested.unwrap_or(self.top_n) {
            0 => None,
            count => Some(count),
        }
    }

    fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(path) = env::var("AUG_CATALOG_PATH") {
            if !path.trim().is_empty() {
                config.catalog_path = PathBuf::from(path.trim());
            }
        }

        if let Ok(raw) = env::var("AUG_TOP_N") {
            config.top_n = raw
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidTopN)?;
        }

        if let Ok(raw) = env::var("AUG_WEIGHTS") {
            let pairs = StatWeights::parse_assignments(&raw).map_err(ConfigError::InvalidWeights)?;
            config.weights = config
                .weights
                .overridden_by(pairs)
                .map_err(ConfigError::InvalidWeights)?;
        }

        Ok(config)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidTopN,
    InvalidWeights(WeightError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidTopN => write!(f, "AUG_TOP_N must be a non-negative integer"),
            ConfigError::InvalidWeights(err) => write!(f, "AUG_WEIGHTS is invalid: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidTopN => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidWeights(source) => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Stat;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "AUG_CATALOG_PATH",
            "AUG_TOP_N",
            "AUG_WEIGHTS",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(
            config.analysis.catalog_path,
            PathBuf::from(DEFAULT_CATALOG_PATH)
        );
        assert_eq!(config.analysis.top_n, 15);
        assert_eq!(config.analysis.weights, StatWeights::default_profile());
    }

    #[test]
    fn environment_names_are_case_insensitive() {
        assert_eq!(AppEnvironment::parse("PROD"), AppEnvironment::Production);
        assert_eq!(AppEnvironment::parse(" ci "), AppEnvironment::Test);
        assert_eq!(AppEnvironment::parse("staging"), AppEnvironment::Development);
    }

    #[test]
    fn rejects_hostnames_other_than_localhost() {
        let server = ServerConfig {
            host: "example.invalid".to_string(),
            port: 3000,
        };
        assert!(matches!(
            server.socket_addr(),
            Err(ConfigError::InvalidHost { .. })
        ));
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn weight_overrides_apply_over_default_profile() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("AUG_WEIGHTS", "HWis=35, Mana=0.5");
        env::set_var("AUG_TOP_N", "5");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.analysis.weights.get(Stat::HWis), 35.0);
        assert_eq!(config.analysis.weights.get(Stat::Mana), 0.5);
        assert_eq!(config.analysis.weights.get(Stat::Ac), 1.0);
        assert_eq!(config.analysis.top_n, 5);
        reset_env();
    }

    #[test]
    fn zero_row_limit_means_unlimited() {
        let config = AnalysisConfig::default();
        assert_eq!(config.row_limit(None), Some(DEFAULT_TOP_N));
        assert_eq!(config.row_limit(Some(3)), Some(3));
        assert_eq!(config.row_limit(Some(0)), None);

        let unlimited = AnalysisConfig {
            top_n: 0,
            ..AnalysisConfig::default()
        };
        assert_eq!(unlimited.row_limit(None), None);
    }

    #[test]
    fn rejects_bad_top_n_and_weights() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("AUG_TOP_N", "lots");
        assert!(matches!(AppConfig::load(), Err(ConfigError::InvalidTopN)));

        reset_env();
        env::set_var("AUG_WEIGHTS", "Luck=3");
        let error = AppConfig::load().expect_err("unknown stat rejected");
        assert!(matches!(error, ConfigError::InvalidWeights(_)));
        assert!(error.to_string().contains("Luck"));
        reset_env();
    }
}
