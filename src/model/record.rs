// src/model/record.rs
//! Extracted records — what survives of a raw payload once classified.

use crate::constants::REDDIT_BASE_URL;
use crate::model::raw::{RawComment, RawLink};
use crate::types::{PostId, ValidationError};
use chrono::{DateTime, Utc};

/// Converts the API's epoch-seconds float into a UTC timestamp.
///
/// Creation times arrive as floats with a fractional part; they are rounded
/// to whole seconds. Out-of-range values clamp to the epoch rather than
/// failing the record.
pub(crate) fn from_epoch_seconds(seconds: f64) -> DateTime<Utc> {
    DateTime::from_timestamp(seconds.round() as i64, 0).unwrap_or(DateTime::UNIX_EPOCH)
}

/// The payload attached to each node of the comment tree.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentRecord {
    pub created_at: DateTime<Utc>,
    /// Raw body text; may span multiple lines.
    pub content: String,
    /// Display name, or the deleted-user sentinel.
    pub author: String,
}

impl CommentRecord {
    pub fn from_raw(raw: &RawComment) -> Self {
        Self {
            created_at: from_epoch_seconds(raw.created_utc),
            content: raw.body.clone(),
            author: raw.author.clone(),
        }
    }
}

/// The canonical fields of the discussion's post.
#[derive(Debug, Clone, PartialEq)]
pub struct PostRecord {
    pub id: PostId,
    pub title: String,
    /// Self-text; empty for link posts.
    pub content: String,
    pub author: String,
    pub subreddit: String,
    pub created_at: DateTime<Utc>,
    pub nsfw: bool,
    pub canonical_url: String,
    /// URL-derived human-readable identifier, used to name archived artifacts.
    pub slug: String,
}

impl PostRecord {
    pub fn from_raw(raw: &RawLink) -> Result<Self, ValidationError> {
        Ok(Self {
            id: PostId::parse(&raw.id)?,
            title: raw.title.clone(),
            content: raw.selftext.clone(),
            author: raw.author.clone(),
            subreddit: raw.subreddit.clone(),
            created_at: from_epoch_seconds(raw.created_utc),
            nsfw: raw.over_18,
            canonical_url: format!("{}{}", REDDIT_BASE_URL, raw.permalink),
            slug: derive_slug(&raw.permalink, &raw.title),
        })
    }
}

/// Derives the slug from a permalink's trailing path segment.
///
/// Permalinks have the shape `/r/<sub>/comments/<id>/<slug>/`; the slug is
/// the last non-empty segment. When the permalink yields nothing usable the
/// title is lowercased and underscore-joined instead.
fn derive_slug(permalink: &str, title: &str) -> String {
    permalink
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| title.to_lowercase().replace(' ', "_"))
}
