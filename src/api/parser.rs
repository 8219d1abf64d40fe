// src/api/parser.rs
//! Listing-page parsing and record classification.
//!
//! [`parse_listing_page`] turns a raw response body into the flat sequence
//! of polymorphic records; [`classify_thing`] sends each record where it
//! belongs — comments into the tree (descending through their reply
//! listings), the post out to the caller, everything else deliberately
//! nowhere.

use crate::constants::MAX_REPLY_DEPTH;
use crate::error::AppError;
use crate::model::{
    CommentNode, CommentRecord, CommentTree, Listing, PostRecord, RawComment, RawLink, Thing,
    ThingKind,
};
use crate::types::CommentId;
use serde_json::Value;

/// Parses a discussion page body into its flattened records.
///
/// A well-formed page is a JSON array of listings (one for the post, one for
/// the comments) whose children are concatenated in order. An object body
/// carrying a numeric `status` is the endpoint's in-band error shape and
/// becomes a discussion-level failure.
pub fn parse_listing_page(body: &str, url: &str) -> Result<Vec<Thing>, AppError> {
    let value: Value = serde_json::from_str(body)?;

    if let Some(status) = value.get("status").and_then(Value::as_u64) {
        return Err(AppError::UpstreamFailure {
            status: status as u16,
            url: url.to_string(),
        });
    }

    let listings: Vec<Listing> = serde_json::from_value(value)
        .map_err(|e| AppError::MalformedResponse(format!("{}: {}", url, e)))?;

    Ok(listings
        .into_iter()
        .flat_map(|listing| listing.data.children)
        .collect())
}

/// Classifies one top-level record.
///
/// Comments are inserted into `tree` as a side effect (their reply listings
/// descend with them); a link record is extracted and returned; recognized
/// but irrelevant kinds (account, message, subreddit, award) and unknown
/// kinds produce no effect and no result.
pub fn classify_thing(thing: &Thing, tree: &mut CommentTree) -> Result<Option<PostRecord>, AppError> {
    match thing.kind() {
        ThingKind::Comment => {
            let raw = decode_comment(thing)?;
            let node = tree.insert(comment_node(&raw)?);
            attach_replies(&raw, node, 1)?;
            Ok(None)
        }
        ThingKind::Link => {
            let raw: RawLink = decode(thing)?;
            Ok(Some(PostRecord::from_raw(&raw)?))
        }
        ThingKind::Account
        | ThingKind::Message
        | ThingKind::Subreddit
        | ThingKind::Award
        | ThingKind::Unknown(_) => Ok(None),
    }
}

/// Classifies every record of a page, returning the extracted post if any.
pub fn process_page(things: &[Thing], tree: &mut CommentTree) -> Result<Option<PostRecord>, AppError> {
    let mut post = None;
    for thing in things {
        if let Some(extracted) = classify_thing(thing, tree)? {
            post = Some(extracted);
        }
    }
    Ok(post)
}

fn decode<T: serde::de::DeserializeOwned>(thing: &Thing) -> Result<T, AppError> {
    serde_json::from_value(thing.data.clone()).map_err(|e| AppError::MalformedRecord {
        kind: thing.kind.clone(),
        source: e,
    })
}

fn decode_comment(thing: &Thing) -> Result<RawComment, AppError> {
    decode(thing)
}

fn comment_node(raw: &RawComment) -> Result<CommentNode, AppError> {
    let key = CommentId::parse(&raw.id)?;
    Ok(CommentNode::new(key, CommentRecord::from_raw(raw)))
}

/// Descends into a comment's reply listing, attaching nested comments under
/// the just-inserted node. Reply depth is bounded by the source application;
/// `MAX_REPLY_DEPTH` turns a pathological chain into a typed error instead
/// of exhausting the stack.
fn attach_replies(raw: &RawComment, parent: &mut CommentNode, depth: usize) -> Result<(), AppError> {
    let Some(listing) = raw.replies.as_ref().and_then(|replies| replies.as_thread()) else {
        return Ok(());
    };

    if depth > MAX_REPLY_DEPTH {
        return Err(AppError::ReplyDepthExceeded(MAX_REPLY_DEPTH));
    }

    for thing in &listing.data.children {
        // Only comments nest; "more" stubs and anything else are skipped
        if thing.kind() != ThingKind::Comment {
            continue;
        }
        let nested = decode_comment(thing)?;
        let node = parent.insert(comment_node(&nested)?);
        attach_replies(&nested, node, depth + 1)?;
    }

    Ok(())
}
