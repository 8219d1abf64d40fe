// src/api/mod.rs
//! Reddit API interaction — the ability to fetch discussion listings.
//!
//! The network facility is an explicit collaborator: business logic depends
//! on the [`HttpDispatch`] trait, never on HTTP details. That seam is also
//! where credential capture taps in — [`capture::CaptureSession::wrap`]
//! returns a dispatcher that observes outgoing headers without altering the
//! requests flowing through it.

pub mod capture;
pub mod client;
pub mod fetcher;
pub mod parser;

use crate::error::AppError;
use capture::HeaderShape;

/// Options accompanying a dispatched request.
///
/// Headers may arrive in any of the supported [`HeaderShape`]s; the
/// dispatcher converts them to its transport's native form.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub headers: Option<HeaderShape>,
}

/// A completed request: terminal status, final URL, raw body text.
#[derive(Debug, Clone)]
pub struct DispatchResponse {
    pub status: u16,
    pub url: String,
    pub body: String,
}

impl DispatchResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The ability to issue an HTTP GET against a target URL.
///
/// This is the fundamental algebra for API interaction; the concrete
/// implementation ([`client::RedditHttpClient`]) wraps reqwest, and tests
/// substitute canned dispatchers.
#[async_trait::async_trait]
pub trait HttpDispatch: Send + Sync {
    async fn dispatch(
        &self,
        target: &str,
        options: RequestOptions,
    ) -> Result<DispatchResponse, AppError>;
}

// Re-export the public interface
pub use capture::{CaptureSession, CredentialSlot, TappedDispatch};
pub use client::RedditHttpClient;
pub use fetcher::DiscussionFetcher;
