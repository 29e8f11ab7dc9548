use crate::domain::model::{RequestContext, SetupsResult};
use crate::domain::ports::SetupRouter;

pub const FETCH_FAILED: &str = "Failed to fetch setups";

/// Loads every setup for the gallery. RPC failures end up in `error`, never in a panic or `Err`.
pub async fn get_setups<R>(router: &R, context: &RequestContext) -> SetupsResult
where
    R: SetupRouter + ?Sized,
{
    match router.all(context).await {
        Ok(setups) => {
            tracing::debug!("Fetched {} setups", setups.len());
            SetupsResult::ok(setups)
        }
        Err(e) => {
            tracing::warn!("⚠️ Failed to fetch setups: {}", e);

            let message = e.user_friendly_message();
            if message.trim().is_empty() {
                SetupsResult::failed(FETCH_FAILED)
            } else {
                SetupsResult::failed(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Setup;
    use crate::utils::error::{AppError, Result};
    use crate::adapters::HttpSetupRouter;
    use async_trait::async_trait;
    use std::time::Duration;
    use tokio_test::assert_ok;

    struct StaticRouter(Vec<Setup>);

    #[async_trait]
    impl SetupRouter for StaticRouter {
        async fn all(&self, _context: &RequestContext) -> Result<Vec<Setup>> {
            Ok(self.0.clone())
        }
    }

    struct BrokenRouter(String);

    #[async_trait]
    impl SetupRouter for BrokenRouter {
        async fn all(&self, _context: &RequestContext) -> Result<Vec<Setup>> {
            Err(AppError::RpcStatusError {
                status: 500,
                message: self.0.clone(),
            })
        }
    }

    /// Echoes the caller's auth token back as a setup title.
    struct WhoAmIRouter;

    #[async_trait]
    impl SetupRouter for WhoAmIRouter {
        async fn all(&self, context: &RequestContext) -> Result<Vec<Setup>> {
            Ok(vec![setup("1", context.auth_token.as_deref().unwrap_or("anonymous"))])
        }
    }

    fn setup(id: &str, title: &str) -> Setup {
        Setup {
            id: id.to_string(),
            title: title.to_string(),
            author: "Ana".to_string(),
            description: String::new(),
            image_url: "https://x.com/a.png".to_string(),
            likes: 3,
            tags: vec!["rgb".to_string()],
        }
    }

    #[tokio::test]
    async fn test_success_keeps_backend_order() {
        let router = StaticRouter(vec![setup("2", "Second"), setup("1", "First")]);

        let result = get_setups(&router, &RequestContext::default()).await;

        assert!(result.error.is_none());
        let titles: Vec<_> = result
            .data
            .unwrap()
            .into_iter()
            .map(|s| s.title)
            .collect();
        assert_eq!(titles, vec!["Second", "First"]);
    }

    #[tokio::test]
    async fn test_rpc_failure_is_captured() {
        let router = BrokenRouter("database offline".to_string());

        let result = get_setups(&router, &RequestContext::default()).await;

        assert!(result.data.is_none());
        assert_eq!(result.error.as_deref(), Some("database offline"));
        assert!(result.is_error());
    }

    #[tokio::test]
    async fn test_empty_failure_message_falls_back() {
        let router = BrokenRouter(String::new());

        let result = get_setups(&router, &RequestContext::default()).await;

        assert_eq!(result.error.as_deref(), Some(FETCH_FAILED));
    }

    #[tokio::test]
    async fn test_unreachable_backend_shows_friendly_message() {
        let router = HttpSetupRouter::new("http://127.0.0.1:1/api/trpc", Duration::from_secs(2))
            .unwrap();

        let result = get_setups(&router, &RequestContext::default()).await;

        assert!(result.data.is_none());
        assert_eq!(result.error.as_deref(), Some("Could not reach the setup service"));
    }

    #[tokio::test]
    async fn test_context_reaches_the_router() {
        let context = RequestContext::from_header_pairs(vec![("authorization", "Bearer ana")]);

        let result = get_setups(&WhoAmIRouter, &context).await;

        let data = assert_ok!(result.data.ok_or("missing data"));
        assert_eq!(data[0].title, "ana");
    }
}
