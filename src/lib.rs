// src/lib.rs
//! reddit2md library — archives Reddit discussions into markdown documents.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling** — `AppError`, `ValidationError`
//! - **Configuration** — `PipelineConfig`
//! - **Domain model** — `PostRecord`, `CommentRecord`, `CommentTree`, raw listing types
//! - **Domain types** — `PostId`, `CommentId`, `BearerToken`, `RenderedDocument`
//! - **API client** — `RedditHttpClient`, `DiscussionFetcher`, capture session, parsers
//! - **Formatting** — `compose_discussion_markdown`, `escape_markdown`
//! - **Output** — `OutputPlan`, `deliver`, artifact paths

// Internal modules — must match what's in main.rs
mod api;
mod config;
mod constants;
mod error;
mod formatting;
mod model;
mod output;
mod pipeline;
mod types;

// --- Error Handling ---
pub use crate::error::{AppError, Result};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, PipelineConfig};

// --- Domain Model ---
pub use crate::model::{
    CommentNode, CommentRecord, CommentTree, Listing, ListingData, PostRecord, RawComment,
    RawLink, Replies, SavedPost, SavedPostList, Thing, ThingKind, Traversal,
};

// --- Domain Types ---
pub use crate::types::{BearerToken, CommentId, PostId, RenderedDocument};

// --- API Client ---
pub use crate::api::{
    capture::HeaderShape,
    fetcher::discussion_api_url,
    parser::{classify_thing, parse_listing_page, process_page},
    CaptureSession, CredentialSlot, DiscussionFetcher, DispatchResponse, HttpDispatch,
    RedditHttpClient, RequestOptions, TappedDispatch,
};

// --- Formatting ---
pub use crate::formatting::{compose_discussion_markdown, escape_markdown};

// --- Output ---
pub use crate::output::{
    artifact_paths, artifact_stem, deliver, failure_log_path, log_failure, ArtifactPaths,
    DeliveryTarget, OutputPlan, OutputReport,
};

// --- Pipeline Traits ---
pub use crate::pipeline::{DiscussionSource, DocumentComposer, DocumentDelivery};

// --- Constants ---
pub use crate::constants::{DELETED_AUTHOR, LISTING_PAGE_LIMIT, MAX_REPLY_DEPTH};
