//! Webhook service abstraction layer.
//!
//! Routes reach the executor through this trait so tests can substitute a
//! canned implementation.

use super::executor::RequestExecutor;
use super::types::{RequestSpec, ResponseOutcome};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Executes webhook requests.
pub trait WebhookService: Send + Sync {
    fn execute(
        &self,
        spec: RequestSpec,
    ) -> Pin<Box<dyn Future<Output = ResponseOutcome> + Send + '_>>;
}

impl WebhookService for RequestExecutor {
    fn execute(
        &self,
        spec: RequestSpec,
    ) -> Pin<Box<dyn Future<Output = ResponseOutcome> + Send + '_>> {
        Box::pin(RequestExecutor::execute(self, spec))
    }
}

pub type SharedWebhookService = Arc<dyn WebhookService>;

#[cfg(test)]
mod tests {
    use super::*;

    struct MockWebhookService {
        response: ResponseOutcome,
    }

    impl WebhookService for MockWebhookService {
        fn execute(
            &self,
            _spec: RequestSpec,
        ) -> Pin<Box<dyn Future<Output = ResponseOutcome> + Send + '_>> {
            let response = self.response.clone();
            Box::pin(async move { response })
        }
    }

    #[tokio::test]
    async fn test_mock_webhook_service() {
        let service: SharedWebhookService = Arc::new(MockWebhookService {
            response: ResponseOutcome::failure("Test error"),
        });

        let response = service.execute(RequestSpec::post("https://example.com")).await;
        assert_eq!(response, ResponseOutcome::failure("Test error"));
    }

    #[tokio::test]
    async fn test_executor_through_trait_object() {
        let service: SharedWebhookService = Arc::new(RequestExecutor::new().unwrap());
        let response = service.execute(RequestSpec::post("not a url")).await;
        assert!(!response.is_success());
    }
}
