//! Subscriber API client
//!
//! PATCHes mapped subscriber records to the subscriber-update endpoint with
//! bearer-token authorization and the configured timeout. The client never
//! retries; callers own any retry policy.

use std::time::Duration;

use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use super::error::ApiError;
use crate::config::BridgeConfig;
use crate::error::{Error, Result};
use crate::types::MappedSubscriber;

/// Relative path of the subscriber-update endpoint under the base URL.
const UPDATE_SUBSCRIBER_PATH: &str = "subscribers/update-subscriber";

/// Request envelope for subscriber updates
#[derive(Debug, Serialize)]
struct UpdateRequest<'a> {
    data: &'a MappedSubscriber,
}

/// Success response body of the subscriber API
#[derive(Debug, Deserialize)]
struct UpdateResponse {
    #[serde(default)]
    message: Option<String>,
}

/// Asynchronous client for the subscriber-management API
#[derive(Debug, Clone)]
pub struct SubscriberClient {
    http: ReqwestClient,
    endpoint: Url,
    api_token: String,
    timeout: Duration,
}

impl SubscriberClient {
    /// Create a client from resolved bridge configuration.
    pub fn new(config: &BridgeConfig) -> Result<Self> {
        // The base URL is normalized without a trailing slash; re-add one so
        // joining keeps the version segment instead of replacing it.
        let base = Url::parse(&format!("{}/", config.base_url)).map_err(|e| {
            Error::Configuration {
                message: format!("invalid subscriber API base URL '{}'", config.base_url),
                source: Some(anyhow::Error::new(e)),
            }
        })?;
        let endpoint = base
            .join(UPDATE_SUBSCRIBER_PATH)
            .map_err(|e| Error::Configuration {
                message: format!("invalid subscriber API base URL '{}'", config.base_url),
                source: Some(anyhow::Error::new(e)),
            })?;

        let http = ReqwestClient::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Configuration {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(anyhow::Error::new(e)),
            })?;

        Ok(Self {
            http,
            endpoint,
            api_token: config.api_token.clone(),
            timeout: config.timeout,
        })
    }

    /// The fully-resolved subscriber-update endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// PATCH a mapped record to the subscriber-update endpoint.
    ///
    /// Returns the API's confirmation message on success. Failures surface
    /// as `Error::Api` carrying the HTTP status and any field-level detail;
    /// a timeout maps to status 408.
    pub async fn update_subscriber(&self, subscriber: &MappedSubscriber) -> Result<String> {
        debug!(endpoint = %self.endpoint, "sending subscriber update");

        let response = self
            .http
            .patch(self.endpoint.clone())
            .bearer_auth(&self.api_token)
            .json(&UpdateRequest { data: subscriber })
            .send()
            .await
            .map_err(|e| ApiError::from_request_error(e, self.timeout))?;

        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await.into());
        }

        let body: UpdateResponse = response.json().await.map_err(|e| Error::Api {
            message: format!("subscriber API returned an unreadable success body: {e}"),
            status_code: None,
            details: None,
        })?;

        info!("subscriber update accepted");
        Ok(body
            .message
            .unwrap_or_else(|| "subscriber updated".to_string()))
    }
}
