use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Result;
use parking_lot::RwLock;
use serde::de::DeserializeOwned;

use super::models::*;
use super::Transport;
use crate::external::RestConnection;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:4242";

const API_PREFIX: &str = "api/1";

pub struct RestTransport {
    connection: Arc<dyn RestConnection>,
    server_url: RwLock<String>,
}

impl RestTransport {
    pub fn new(connection: Arc<dyn RestConnection>) -> Self {
        Self {
            connection,
            server_url: RwLock::new(DEFAULT_SERVER_URL.to_owned()),
        }
    }

    pub fn server_url(&self) -> String {
        self.server_url.read().clone()
    }

    async fn get<T>(&self, path: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = {
            let server_url = self.server_url.read();
            format!("{}/{API_PREFIX}/{path}", server_url.trim_end_matches('/'))
        };

        log::trace!("GET {url}");
        let response = self.connection.get(&url).await?;
        serde_json::from_str::<ApiResponse<T>>(&response)?.into_result()
    }
}

#[async_trait::async_trait]
impl Transport for RestTransport {
    fn default_server_url(&self) -> &str {
        DEFAULT_SERVER_URL
    }

    fn setup(&self, server_url: &str) -> Result<()> {
        let server_url = server_url.trim();
        if !server_url.starts_with("http://") && !server_url.starts_with("https://") {
            return Err(TransportError::InvalidServerUrl(server_url.to_owned()).into());
        }

        *self.server_url.write() = server_url.to_owned();
        Ok(())
    }

    async fn ping(&self) -> Result<bool> {
        self.get("ping").await
    }

    async fn users(&self) -> Result<Vec<String>> {
        let users: BTreeMap<String, UserLoginStatus> = self.get("users").await?;
        Ok(users.into_keys().collect())
    }

    async fn info(&self, check_for_updates: bool) -> Result<BackendInfo> {
        self.get(&format!("info?check_for_updates={check_for_updates}"))
            .await
    }
}
