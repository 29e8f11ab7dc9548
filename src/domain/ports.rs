use crate::domain::model::{Environment, RequestContext, Setup, SetupSubmission};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// The `setup` router of the backend RPC boundary.
#[async_trait]
pub trait SetupRouter: Send + Sync {
    /// The `setup.all` query: every setup, in backend order.
    async fn all(&self, context: &RequestContext) -> Result<Vec<Setup>>;
}

/// Where accepted submissions are recorded.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    async fn record(&self, submission: &SetupSubmission) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn bind_address(&self) -> &str;
    fn port(&self) -> u16;
    fn rpc_endpoint(&self) -> &str;
    fn rpc_timeout(&self) -> Duration;
    fn fixture_path(&self) -> Option<&str>;
    fn submissions_path(&self) -> Option<&str>;
    fn environment(&self) -> Environment;
}
