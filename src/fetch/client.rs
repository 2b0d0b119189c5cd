use async_trait::async_trait;
use reqwest::{Request, Response};

/// Executes a prepared request. Feed fetchers are generic over this so the
/// transport can be swapped out in tests.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
