pub mod toml_config;

use crate::core::ConfigProvider;
use crate::domain::model::Environment;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_range,
    validate_url, Validate,
};
use std::time::Duration;

pub const DEFAULT_RPC_ENDPOINT: &str = "http://localhost:3001/api/trpc";
pub const DEFAULT_RPC_TIMEOUT_SECONDS: u64 = 10;
pub const MAX_RPC_TIMEOUT_SECONDS: u64 = 300;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, clap::Parser)]
#[command(name = "rate-my-setup")]
#[command(about = "Community gallery of desk setups")]
pub struct CliConfig {
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, default_value = "3000")]
    pub port: u16,

    #[arg(long, default_value = DEFAULT_RPC_ENDPOINT)]
    pub rpc_endpoint: String,

    #[arg(long, default_value = "10")]
    pub rpc_timeout_seconds: u64,

    #[arg(long, help = "Serve setups from a JSON file instead of the RPC backend")]
    pub fixtures: Option<String>,

    #[arg(long, help = "Directory for submissions.jsonl (log only when omitted)")]
    pub submissions_path: Option<String>,

    #[arg(long, default_value = "development")]
    pub environment: Environment,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit JSON logs")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn bind_address(&self) -> &str {
        &self.host
    }

    fn port(&self) -> u16 {
        self.port
    }

    fn rpc_endpoint(&self) -> &str {
        &self.rpc_endpoint
    }

    fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc_timeout_seconds)
    }

    fn fixture_path(&self) -> Option<&str> {
        self.fixtures.as_deref()
    }

    fn submissions_path(&self) -> Option<&str> {
        self.submissions_path.as_deref()
    }

    fn environment(&self) -> Environment {
        self.environment
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}

/// Checks shared by every [`ConfigProvider`].
pub fn validate_provider<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validate_non_empty_string("server.host", config.bind_address())?;
    validate_positive_number("server.port", config.port() as usize, 1)?;

    // fixture 模式下不會呼叫 RPC 端點
    match config.fixture_path() {
        Some(path) => validate_path("rpc.fixture_path", path)?,
        None => validate_url("rpc.endpoint", config.rpc_endpoint())?,
    }

    validate_range(
        "rpc.timeout_seconds",
        config.rpc_timeout().as_secs(),
        1,
        MAX_RPC_TIMEOUT_SECONDS,
    )?;

    if let Some(path) = config.submissions_path() {
        validate_path("submissions.output_path", path)?;
    }

    Ok(())
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_defaults() {
        let config = CliConfig::parse_from(["rate-my-setup"]);

        assert_eq!(config.bind_address(), "0.0.0.0");
        assert_eq!(config.port(), 3000);
        assert_eq!(config.rpc_endpoint(), DEFAULT_RPC_ENDPOINT);
        assert_eq!(config.rpc_timeout(), Duration::from_secs(10));
        assert_eq!(config.environment(), Environment::Development);
        assert!(config.fixture_path().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_overrides() {
        let config = CliConfig::parse_from([
            "rate-my-setup",
            "--port",
            "8080",
            "--environment",
            "production",
            "--fixtures",
            "setups.json",
            "--rpc-endpoint",
            "not-used",
        ]);

        assert_eq!(config.port(), 8080);
        assert_eq!(config.environment(), Environment::Production);
        assert_eq!(config.fixture_path(), Some("setups.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_rejects_bad_values() {
        let bad_endpoint =
            CliConfig::parse_from(["rate-my-setup", "--rpc-endpoint", "ftp://backend"]);
        assert!(bad_endpoint.validate().is_err());

        let zero_port = CliConfig::parse_from(["rate-my-setup", "--port", "0"]);
        assert!(zero_port.validate().is_err());

        let zero_timeout = CliConfig::parse_from(["rate-my-setup", "--rpc-timeout-seconds", "0"]);
        assert!(zero_timeout.validate().is_err());

        assert!(CliConfig::try_parse_from(["rate-my-setup", "--environment", "staging"]).is_err());
    }
}
