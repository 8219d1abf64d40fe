// src/model/raw.rs
//! Wire-shaped types for the listing endpoint.
//!
//! Every record arrives wrapped in a `Thing` envelope: a `kind` discriminator
//! plus an untyped `data` payload. The payload stays as [`serde_json::Value`]
//! until the classifier knows which typed raw struct to decode it into, so an
//! unrecognized kind never fails the whole page.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The kind discriminator as a typed vocabulary.
///
/// Instead of matching against magic strings like `"t1"`, the thing-type
/// prefixes are encoded in the type system. Only comments and links drive
/// behavior; the rest are recognized so they can be ignored deliberately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThingKind {
    /// `t1` — a comment
    Comment,
    /// `t2` — an account
    Account,
    /// `t3` — a link (post)
    Link,
    /// `t4` — a private message
    Message,
    /// `t5` — a subreddit
    Subreddit,
    /// `t6` — an award
    Award,
    /// A kind this archiver doesn't recognize
    Unknown(String),
}

impl ThingKind {
    /// Parse a kind discriminator string into the typed vocabulary.
    pub fn from_kind(kind: &str) -> Self {
        match kind {
            "t1" => Self::Comment,
            "t2" => Self::Account,
            "t3" => Self::Link,
            "t4" => Self::Message,
            "t5" => Self::Subreddit,
            "t6" => Self::Award,
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// One polymorphic record from a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thing {
    pub kind: String,
    #[serde(default)]
    pub data: Value,
}

impl Thing {
    pub fn kind(&self) -> ThingKind {
        ThingKind::from_kind(&self.kind)
    }
}

/// A listing envelope: `{"kind": "Listing", "data": {"children": [...]}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Listing {
    pub data: ListingData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingData {
    #[serde(default)]
    pub children: Vec<Thing>,
}

/// A comment's `replies` field — either a nested listing to descend into,
/// or a bare string sentinel (`""`, `"more"`) meaning there is nothing more.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Replies {
    Sentinel(String),
    Thread(Box<Listing>),
}

impl Replies {
    /// The nested listing, when there is one to recurse into.
    pub fn as_thread(&self) -> Option<&Listing> {
        match self {
            Self::Sentinel(_) => None,
            Self::Thread(listing) => Some(listing),
        }
    }
}

/// The typed payload of a `t1` record.
#[derive(Debug, Clone, Deserialize)]
pub struct RawComment {
    pub id: String,
    pub created_utc: f64,
    pub body: String,
    pub author: String,
    #[serde(default)]
    pub replies: Option<Replies>,
}

/// The typed payload of a `t3` record.
#[derive(Debug, Clone, Deserialize)]
pub struct RawLink {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub selftext: String,
    pub author: String,
    pub subreddit: String,
    pub created_utc: f64,
    #[serde(default)]
    pub over_18: bool,
    pub permalink: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replies_sentinel_parses_as_string() {
        let replies: Replies = serde_json::from_value(serde_json::json!("more")).unwrap();
        assert!(replies.as_thread().is_none());

        let replies: Replies = serde_json::from_value(serde_json::json!("")).unwrap();
        assert!(replies.as_thread().is_none());
    }

    #[test]
    fn replies_thread_parses_as_listing() {
        let replies: Replies = serde_json::from_value(serde_json::json!({
            "kind": "Listing",
            "data": { "children": [ { "kind": "t1", "data": {} } ] }
        }))
        .unwrap();

        let listing = replies.as_thread().unwrap();
        assert_eq!(listing.data.children.len(), 1);
        assert_eq!(listing.data.children[0].kind(), ThingKind::Comment);
    }

    #[test]
    fn thing_kind_vocabulary() {
        assert_eq!(ThingKind::from_kind("t1"), ThingKind::Comment);
        assert_eq!(ThingKind::from_kind("t3"), ThingKind::Link);
        assert_eq!(
            ThingKind::from_kind("more"),
            ThingKind::Unknown("more".to_string())
        );
    }
}
