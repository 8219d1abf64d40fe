// src/api/fetcher.rs
//! Per-discussion retrieval: URL derivation and the authenticated request.

use super::{HttpDispatch, RequestOptions};
use crate::api::capture::HeaderShape;
use crate::error::AppError;
use crate::model::Thing;
use crate::types::{BearerToken, ValidationError};
use std::collections::HashMap;
use url::Url;

/// Derives the JSON listing URL for a discussion from its canonical URL:
/// `.json` appended to the path, with the listing limit and `raw_json`
/// (no HTML-entity escaping) query parameters.
pub fn discussion_api_url(source: &str, limit: u32) -> Result<Url, AppError> {
    let mut url = Url::parse(source).map_err(|e| ValidationError::InvalidUrl {
        url: source.to_string(),
        reason: e.to_string(),
    })?;

    let path = format!("{}.json", url.path().trim_end_matches('/'));
    url.set_path(&path);
    url.query_pairs_mut()
        .append_pair("limit", &limit.to_string())
        .append_pair("raw_json", "1");

    Ok(url)
}

/// Fetches discussion listing pages through an injected dispatcher,
/// presenting the captured credential on every request.
pub struct DiscussionFetcher<D> {
    dispatch: D,
    token: BearerToken,
    limit: u32,
}

impl<D: HttpDispatch> DiscussionFetcher<D> {
    pub fn new(dispatch: D, token: BearerToken, limit: u32) -> Self {
        Self {
            dispatch,
            token,
            limit,
        }
    }

    /// The injected network facility.
    #[allow(dead_code)] // Public API - used by library consumers
    pub fn dispatcher(&self) -> &D {
        &self.dispatch
    }

    /// Retrieves and flattens one discussion's records.
    ///
    /// Both failure shapes — a non-success HTTP status and an in-band
    /// `status` body — surface as [`AppError::UpstreamFailure`], aborting
    /// only this discussion.
    pub async fn fetch_discussion(&self, source_url: &str) -> Result<Vec<Thing>, AppError> {
        let target = discussion_api_url(source_url, self.limit)?;

        let mut headers = HashMap::new();
        headers.insert("Authorization".to_string(), self.token.as_str().to_string());
        let options = RequestOptions {
            headers: Some(HeaderShape::Map(headers)),
        };

        let response = self.dispatch.dispatch(target.as_str(), options).await?;
        if !response.is_success() {
            return Err(AppError::UpstreamFailure {
                status: response.status,
                url: response.url,
            });
        }

        super::parser::parse_listing_page(&response.body, &response.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_url_from_permalink() {
        let url =
            discussion_api_url("https://reddit.com/r/demo/comments/x1/hello_world/", 100).unwrap();
        assert_eq!(url.path(), "/r/demo/comments/x1/hello_world.json");
        assert_eq!(url.query(), Some("limit=100&raw_json=1"));
    }

    #[test]
    fn api_url_without_trailing_slash() {
        let url =
            discussion_api_url("https://reddit.com/r/demo/comments/x1/hello_world", 25).unwrap();
        assert_eq!(url.path(), "/r/demo/comments/x1/hello_world.json");
        assert_eq!(url.query(), Some("limit=25&raw_json=1"));
    }

    #[test]
    fn api_url_rejects_garbage() {
        assert!(discussion_api_url("not a url", 100).is_err());
    }
}
