use anyhow::Result;
use async_trait::async_trait;

pub mod models;
pub mod rest;
pub mod utils;

use self::models::*;

/// Typed access to the backend REST API
#[async_trait]
pub trait Transport: Send + Sync {
    /// Url used when neither the caller nor the desktop shell provide one
    fn default_server_url(&self) -> &str;

    /// Points all subsequent requests to the specified backend
    fn setup(&self, server_url: &str) -> Result<()>;

    async fn ping(&self) -> Result<bool>;

    /// Names of all accounts known to the backend
    async fn users(&self) -> Result<Vec<String>>;

    async fn info(&self, check_for_updates: bool) -> Result<BackendInfo>;
}
