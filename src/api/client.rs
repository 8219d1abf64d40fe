// src/api/client.rs
//! Pure HTTP client wrapper for the listing endpoint.
//!
//! A thin wrapper around reqwest implementing [`HttpDispatch`]. It performs
//! the request and hands back status, final URL, and body text — no parsing,
//! no business logic.

use super::{DispatchResponse, HttpDispatch, RequestOptions};
use crate::error::AppError;

/// A thin wrapper around a reqwest Client for listing requests.
#[derive(Clone)]
pub struct RedditHttpClient {
    client: reqwest::Client,
}

impl RedditHttpClient {
    /// Creates a client with the given user agent. The credential is not
    /// baked in here — it travels as a per-request header so the capture
    /// tap can observe it like any other outgoing request.
    pub fn new(user_agent: &str) -> Result<Self, AppError> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl HttpDispatch for RedditHttpClient {
    async fn dispatch(
        &self,
        target: &str,
        options: RequestOptions,
    ) -> Result<DispatchResponse, AppError> {
        log::debug!("GET {}", target);

        let mut request = self.client.get(target);
        if let Some(shape) = options.headers {
            request = request.headers(shape.into_header_map()?);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let url = response.url().to_string();
        let body = response.text().await?;

        log::debug!("GET {} -> {} ({} bytes)", url, status, body.len());

        Ok(DispatchResponse { status, url, body })
    }
}
