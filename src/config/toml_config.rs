use crate::config::{validate_provider, DEFAULT_RPC_ENDPOINT, DEFAULT_RPC_TIMEOUT_SECONDS};
use crate::core::ConfigProvider;
use crate::domain::model::Environment;
use crate::utils::error::{AppError, Result};
use crate::utils::validation::{validate_required_field, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub rpc: RpcConfig,
    pub submissions: Option<SubmissionsConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    pub environment: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RpcConfig {
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub fixture_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionsConfig {
    pub output_path: String,
}

/// A loaded TOML file with the environment flag already parsed.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub raw: TomlConfig,
    environment: Environment,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<LoadedConfig> {
        let content = std::fs::read_to_string(&path).map_err(AppError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<LoadedConfig> {
        let processed_content = Self::substitute_env_vars(content);

        let raw: TomlConfig =
            toml::from_str(&processed_content).map_err(|e| AppError::ConfigValidationError {
                field: "toml_parsing".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;

        let environment = match raw.site.environment.as_deref() {
            Some(value) => value
                .parse::<Environment>()
                .map_err(|reason| AppError::InvalidConfigValueError {
                    field: "site.environment".to_string(),
                    value: value.to_string(),
                    reason,
                })?,
            None => Environment::default(),
        };

        Ok(LoadedConfig { raw, environment })
    }

    /// 替換環境變數 (例如 ${RPC_ENDPOINT})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid regex"));

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }
}

impl ConfigProvider for LoadedConfig {
    fn bind_address(&self) -> &str {
        &self.raw.server.host
    }

    fn port(&self) -> u16 {
        self.raw.server.port
    }

    fn rpc_endpoint(&self) -> &str {
        self.raw
            .rpc
            .endpoint
            .as_deref()
            .unwrap_or(DEFAULT_RPC_ENDPOINT)
    }

    fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(
            self.raw
                .rpc
                .timeout_seconds
                .unwrap_or(DEFAULT_RPC_TIMEOUT_SECONDS),
        )
    }

    fn fixture_path(&self) -> Option<&str> {
        self.raw.rpc.fixture_path.as_deref()
    }

    fn submissions_path(&self) -> Option<&str> {
        self.raw
            .submissions
            .as_ref()
            .map(|submissions| submissions.output_path.as_str())
    }

    fn environment(&self) -> Environment {
        self.environment
    }
}

impl Validate for LoadedConfig {
    fn validate(&self) -> Result<()> {
        // 沒有 fixture 時必須明確指定 RPC 端點
        if self.raw.rpc.fixture_path.is_none() {
            validate_required_field("rpc.endpoint", &self.raw.rpc.endpoint)?;
        }

        validate_provider(self)
    }
}
