use crate::model::ScraperError;

/// Source of listing pages. `HttpFetcher` in production, stubs in tests.
#[async_trait::async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, ScraperError>;
}
