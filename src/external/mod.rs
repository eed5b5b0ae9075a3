use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait RestConnection: Send + Sync {
    /// Performs a `GET` request and returns the raw response body
    async fn get(&self, url: &str) -> Result<String>;
}

/// Bridge to the native desktop shell
pub trait Interop: Send + Sync {
    /// Backend url configured by the desktop application, if any
    fn server_url(&self) -> Option<String>;
}
