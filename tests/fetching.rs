// tests/fetching.rs
//! Per-discussion retrieval through an injected dispatcher.

use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use reddit2md::{
    AppError, BearerToken, DiscussionFetcher, DispatchResponse, HeaderShape, HttpDispatch,
    RequestOptions,
};
use serde_json::json;

/// Serves one canned response and records what was asked of it.
struct CannedDispatch {
    status: u16,
    body: String,
    seen: Mutex<Vec<(String, Option<String>)>>,
}

impl CannedDispatch {
    fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl HttpDispatch for CannedDispatch {
    async fn dispatch(
        &self,
        target: &str,
        options: RequestOptions,
    ) -> Result<DispatchResponse, AppError> {
        let authorization = options.headers.as_ref().and_then(HeaderShape::find_authorization);
        self.seen.lock().push((target.to_string(), authorization));
        Ok(DispatchResponse {
            status: self.status,
            url: target.to_string(),
            body: self.body.clone(),
        })
    }
}

fn token() -> BearerToken {
    BearerToken::normalize("abc").unwrap()
}

fn listing_body() -> String {
    json!([
        { "kind": "Listing", "data": { "children": [
            { "kind": "t3", "data": {} },
            { "kind": "t1", "data": {} }
        ]}}
    ])
    .to_string()
}

#[tokio::test]
async fn fetch_requests_json_listing_with_credential() {
    let fetcher = DiscussionFetcher::new(CannedDispatch::new(200, listing_body()), token(), 100);

    let things = fetcher
        .fetch_discussion("https://reddit.com/r/demo/comments/x1/hello_world/")
        .await
        .unwrap();
    assert_eq!(things.len(), 2);

    let seen = fetcher.dispatcher().seen.lock().clone();
    assert_eq!(seen.len(), 1);
    assert_eq!(
        seen[0].0,
        "https://reddit.com/r/demo/comments/x1/hello_world.json?limit=100&raw_json=1"
    );
    assert_eq!(seen[0].1.as_deref(), Some("Bearer: abc"));
}

#[tokio::test]
async fn http_error_status_aborts_the_discussion() {
    let fetcher = DiscussionFetcher::new(CannedDispatch::new(403, "{}"), token(), 100);

    let err = fetcher
        .fetch_discussion("https://reddit.com/r/demo/comments/x1/t/")
        .await
        .unwrap_err();
    match err {
        AppError::UpstreamFailure { status, .. } => assert_eq!(status, 403),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn in_band_status_aborts_the_discussion() {
    let body = json!({ "message": "Forbidden", "status": 403 }).to_string();
    let fetcher = DiscussionFetcher::new(CannedDispatch::new(200, body), token(), 100);

    let err = fetcher
        .fetch_discussion("https://reddit.com/r/demo/comments/x1/t/")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::UpstreamFailure { status: 403, .. }));
}
