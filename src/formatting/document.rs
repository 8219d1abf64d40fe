// src/formatting/document.rs
//! Discussion document composition.
//!
//! The document reads top to bottom: title line linking to the canonical
//! URL, attribution, the post's own content, then every comment in
//! pre-order with blockquote markers expressing reply depth.

use super::escape::escape_markdown;
use crate::constants::{CHARS_PER_COMMENT_ESTIMATE, DELETED_AUTHOR, REDDIT_BASE_URL, REDDIT_HOST};
use crate::error::AppError;
use crate::model::{CommentTree, PostRecord};
use crate::types::RenderedDocument;
use chrono::{DateTime, Utc};
use std::fmt::Write;
use url::Url;

/// Renders a post and its populated comment tree into a single markdown
/// document. Pure — no I/O.
pub fn compose_discussion_markdown(
    post: &PostRecord,
    comments: &CommentTree,
) -> Result<RenderedDocument, AppError> {
    let estimate = post.content.len() + (comments.len() + 1) * CHARS_PER_COMMENT_ESTIMATE;
    let mut out = String::with_capacity(estimate);

    compose_header_section(&mut out, post)?;
    compose_content_section(&mut out, post)?;
    compose_comments_section(&mut out, comments)?;

    Ok(RenderedDocument::new(out))
}

fn compose_header_section(out: &mut String, post: &PostRecord) -> Result<(), AppError> {
    write!(
        out,
        "# [{}]({})",
        escape_markdown(&post.title),
        post.canonical_url
    )?;
    if post.nsfw {
        out.push_str(" 🔞");
    }
    out.push('\n');

    writeln!(
        out,
        "###### (*By {} at `{}` in [r/{}]({}/r/{})*)",
        author_attribution(&post.author),
        format_timestamp(&post.created_at),
        post.subreddit,
        REDDIT_BASE_URL,
        post.subreddit
    )?;
    out.push('\n');
    Ok(())
}

fn compose_content_section(out: &mut String, post: &PostRecord) -> Result<(), AppError> {
    if !post.content.is_empty() {
        writeln!(out, "{}", post.content)?;
    } else if is_offsite(&post.canonical_url) {
        // A link post: the URL is the de facto content
        writeln!(out, "*{}*", post.canonical_url)?;
    }
    out.push('\n');
    Ok(())
}

fn compose_comments_section(out: &mut String, comments: &CommentTree) -> Result<(), AppError> {
    out.push_str("# Comments\n\n");

    for (depth, node) in comments.iter() {
        let padding = "> ".repeat(depth);
        let record = node.record();

        writeln!(
            out,
            "{}#### *By {} at `{}`*",
            padding,
            author_attribution(&record.author),
            format_timestamp(&record.created_at)
        )?;

        // Each body line gets its own padding so multi-line comments stay
        // visually nested
        for line in record.content.split('\n') {
            writeln!(out, "{}{}", padding, line)?;
        }
    }

    Ok(())
}

/// Links a username to its profile; the deleted-user sentinel stays a bare
/// label since there is nothing to link to.
fn author_attribution(author: &str) -> String {
    if author == DELETED_AUTHOR {
        DELETED_AUTHOR.to_string()
    } else {
        format!("[u/{}]({}/u/{})", author, REDDIT_BASE_URL, author)
    }
}

fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.format("%a %b %e %Y %H:%M:%S UTC").to_string()
}

/// Whether an empty-bodied post points somewhere other than the API's own
/// domain, making it a link post.
fn is_offsite(canonical_url: &str) -> bool {
    Url::parse(canonical_url)
        .ok()
        .and_then(|url| {
            url.host_str()
                .map(|host| host != REDDIT_HOST && !host.ends_with(&format!(".{}", REDDIT_HOST)))
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsite_detection() {
        assert!(is_offsite("https://example.com/article"));
        assert!(!is_offsite("https://reddit.com/r/demo/comments/x1/t/"));
        assert!(!is_offsite("https://www.reddit.com/r/demo/comments/x1/t/"));
        assert!(!is_offsite("not a url"));
    }

    #[test]
    fn deleted_author_is_not_linked() {
        assert_eq!(author_attribution("[deleted]"), "[deleted]");
        assert_eq!(
            author_attribution("alice"),
            "[u/alice](https://reddit.com/u/alice)"
        );
    }

    #[test]
    fn timestamp_is_calendar_form() {
        let formatted = format_timestamp(&DateTime::UNIX_EPOCH);
        assert!(formatted.starts_with("Thu Jan"));
        assert!(formatted.contains("1970"));
        assert!(formatted.ends_with("UTC"));
    }
}
