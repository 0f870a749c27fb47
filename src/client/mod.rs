//! Resource API client
//!
//! Thin HTTP+JSON client for the companion resource API. Commands depend on
//! the [`ResourceApi`] trait rather than the concrete client.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use tracing::info;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::resource::{CreateRequest, Envelope, ErrorBody, Resource, UpdateRequest};

/// Operations exposed by the resource API
#[async_trait]
pub trait ResourceApi: Send + Sync {
    async fn create(&self, name: &str, dns: &str) -> Result<Resource>;
    async fn list(&self) -> Result<Vec<Resource>>;
    async fn get(&self, id: u32) -> Result<Resource>;
    async fn update(&self, id: u32, name: Option<&str>, dns: Option<&str>) -> Result<Resource>;
    async fn delete(&self, id: u32) -> Result<Resource>;
}

/// reqwest-backed implementation of [`ResourceApi`]
pub struct ResourceClient {
    http: Client,
    base_url: String,
}

impl ResourceClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn resource_url(&self) -> String {
        format!("{}/resource", self.base_url)
    }

    /// Turn a non-2xx response into an [`AppError::Api`], decoding the API's
    /// `{error, message}` body when the response is JSON.
    async fn decode_error(response: reqwest::Response) -> AppError {
        let status = response.status();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.contains("application/json"));
        let body = response.text().await.unwrap_or_default();

        if is_json {
            if let Ok(parsed) = serde_json::from_str::<ErrorBody>(&body) {
                return AppError::api(format!("{} - {}", parsed.error, parsed.message));
            }
        }
        AppError::api(format!("HTTP {} - {}", status, body.trim()))
    }

    fn not_found(id: u32) -> AppError {
        AppError::api(format!("resource with ID {} not found", id))
    }
}

#[async_trait]
impl ResourceApi for ResourceClient {
    async fn create(&self, name: &str, dns: &str) -> Result<Resource> {
        let response = self
            .http
            .post(self.resource_url())
            .json(&CreateRequest { name, dns })
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }
        let envelope: Envelope<Resource> = response.json().await?;
        info!(id = envelope.data.id, "resource created");
        Ok(envelope.data)
    }

    async fn list(&self) -> Result<Vec<Resource>> {
        let response = self
            .http
            .get(format!("{}/resources", self.base_url))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }
        let envelope: Envelope<Vec<Resource>> = response.json().await?;
        Ok(envelope.data)
    }

    async fn get(&self, id: u32) -> Result<Resource> {
        let response = self
            .http
            .get(self.resource_url())
            .query(&[("id", id)])
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(Self::not_found(id));
        }
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }
        let envelope: Envelope<Resource> = response.json().await?;
        Ok(envelope.data)
    }

    async fn update(&self, id: u32, name: Option<&str>, dns: Option<&str>) -> Result<Resource> {
        if name.is_none() && dns.is_none() {
            return Err(AppError::validation(
                "at least one of 'name' or 'dns' must be provided",
            ));
        }

        let response = self
            .http
            .put(self.resource_url())
            .query(&[("id", id)])
            .json(&UpdateRequest { name, dns })
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(Self::not_found(id));
        }
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }
        let envelope: Envelope<Resource> = response.json().await?;
        info!(id = envelope.data.id, "resource updated");
        Ok(envelope.data)
    }

    async fn delete(&self, id: u32) -> Result<Resource> {
        let response = self
            .http
            .delete(self.resource_url())
            .query(&[("id", id)])
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(Self::not_found(id));
        }
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }
        let envelope: Envelope<Resource> = response.json().await?;
        info!(id = envelope.data.id, "resource deleted");
        Ok(envelope.data)
    }
}
