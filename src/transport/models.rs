use anyhow::Result;
use serde::{Deserialize, Serialize};

use rotki_utils::*;

use crate::models::LogLevel;

/// Envelope of every backend response
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub result: Option<T>,
    #[serde(default, with = "serde_nullable_string")]
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn into_result(self) -> Result<T> {
        match self.result {
            Some(result) => Ok(result),
            None => Err(TransportError::EmptyResult(self.message).into()),
        }
    }
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct BackendInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<BackendVersion>,
    pub data_directory: String,
    pub log_level: LogLevel,
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct BackendVersion {
    #[serde(default)]
    pub our_version: Option<String>,
    #[serde(default)]
    pub latest_version: Option<String>,
    #[serde(default)]
    pub download_url: Option<String>,
}

rotki_utils::define_string_enum!(
    #[derive(Debug, Copy, Clone, Eq, PartialEq)]
    pub enum UserLoginStatus {
        LoggedIn => "loggedin",
        LoggedOut => "loggedout",
    }
);

#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
pub enum TransportError {
    #[error("Backend returned no result: {0}")]
    EmptyResult(String),
    #[error("Invalid server url: {0:?}")]
    InvalidServerUrl(String),
}
