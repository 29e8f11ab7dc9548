//! Clients for the backend's `setup` router.
//!
//! The HTTP client speaks the tRPC-over-HTTP convention: a query is a `GET`
//! on `<endpoint>/<procedure>`, and the answer is wrapped in a
//! `{"result": {"data": ...}}` envelope. When the backend runs a data
//! transformer the payload sits one level deeper under `json`. Both shapes
//! are accepted, as is a bare array for simple backends.

use crate::core::{RequestContext, Result, Setup, SetupRouter};
use crate::utils::error::AppError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const SETUP_ALL: &str = "setup.all";
pub const TRPC_SOURCE_HEADER: &str = "x-trpc-source";
pub const TRPC_SOURCE: &str = "rate-my-setup";

#[derive(Deserialize)]
#[serde(untagged)]
enum SetupsEnvelope {
    Success { result: ResultBody },
    Failure { error: ErrorBody },
    Bare(Vec<Setup>),
}

#[derive(Deserialize)]
struct ResultBody {
    data: DataBody,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DataBody {
    Transformed { json: Vec<Setup> },
    Plain(Vec<Setup>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Transformed { json: ErrorMessage },
    Plain(ErrorMessage),
}

#[derive(Deserialize)]
struct ErrorMessage {
    message: String,
}

impl ErrorBody {
    fn into_message(self) -> String {
        match self {
            ErrorBody::Transformed { json } | ErrorBody::Plain(json) => json.message,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpSetupRouter {
    client: Client,
    endpoint: String,
}

impl HttpSetupRouter {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn procedure_url(&self, procedure: &str) -> String {
        format!("{}/{}", self.endpoint.trim_end_matches('/'), procedure)
    }
}

#[async_trait]
impl SetupRouter for HttpSetupRouter {
    async fn all(&self, context: &RequestContext) -> Result<Vec<Setup>> {
        let url = self.procedure_url(SETUP_ALL);
        tracing::debug!("Calling {} (authenticated: {})", url, context.is_authenticated());

        let mut request = self
            .client
            .get(&url)
            .header(TRPC_SOURCE_HEADER, TRPC_SOURCE);
        for (name, value) in &context.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("RPC response status: {}", status);

        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<SetupsEnvelope>(&body)
                .ok()
                .and_then(|envelope| match envelope {
                    SetupsEnvelope::Failure { error } => Some(error.into_message()),
                    _ => None,
                })
                .unwrap_or_else(|| format!("RPC call failed with status {}", status));

            return Err(AppError::RpcStatusError {
                status: status.as_u16(),
                message,
            });
        }

        decode_setups(&body, status.as_u16())
    }
}

fn decode_setups(body: &str, status: u16) -> Result<Vec<Setup>> {
    match serde_json::from_str::<SetupsEnvelope>(body) {
        Ok(SetupsEnvelope::Success { result }) => Ok(match result.data {
            DataBody::Transformed { json } | DataBody::Plain(json) => json,
        }),
        Ok(SetupsEnvelope::Bare(setups)) => Ok(setups),
        Ok(SetupsEnvelope::Failure { error }) => Err(AppError::RpcStatusError {
            status,
            message: error.into_message(),
        }),
        Err(e) => Err(AppError::RpcPayloadError {
            message: format!("Unexpected {} response: {}", SETUP_ALL, e),
        }),
    }
}

/// Serves setups from a local JSON file, for running the site without a backend.
#[derive(Debug, Clone)]
pub struct FixtureSetupRouter {
    path: PathBuf,
}

impl FixtureSetupRouter {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl SetupRouter for FixtureSetupRouter {
    async fn all(&self, _context: &RequestContext) -> Result<Vec<Setup>> {
        // 每次請求都重新讀取，方便開發時直接修改檔案
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| AppError::RpcPayloadError {
                message: format!("Could not read fixture {}: {}", self.path.display(), e),
            })?;

        serde_json::from_str(&content).map_err(|e| AppError::RpcPayloadError {
            message: format!("Invalid fixture {}: {}", self.path.display(), e),
        })
    }
}
