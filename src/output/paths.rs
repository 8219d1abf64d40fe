// src/output/paths.rs
//! Pure functions for artifact path derivation.
//!
//! Each archived discussion produces two artifacts sharing a stem:
//! the rendered document under `<out>/<subreddit>/` and the raw JSON under
//! `<out>/_raw/<subreddit>/`. No I/O happens here.

use crate::constants::{FAILURE_LOG_FILENAME, RAW_ARTIFACT_DIR};
use crate::model::PostRecord;
use std::path::{Path, PathBuf};

/// Where a discussion's artifacts land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    /// The rendered markdown document
    pub document: PathBuf,
    /// The raw listing JSON, kept for archival
    pub raw_json: PathBuf,
}

/// Derives both artifact paths for a post under the output directory.
pub fn artifact_paths(out_dir: &Path, post: &PostRecord) -> ArtifactPaths {
    let subreddit = sanitize_component(&post.subreddit);
    let stem = artifact_stem(post);

    ArtifactPaths {
        document: out_dir.join(&subreddit).join(format!("{}.md", stem)),
        raw_json: out_dir
            .join(RAW_ARTIFACT_DIR)
            .join(&subreddit)
            .join(format!("{}.json", stem)),
    }
}

/// The shared filename stem: `[<id>] <slug>`.
pub fn artifact_stem(post: &PostRecord) -> String {
    format!("[{}] {}", post.id, sanitize_component(&post.slug))
}

/// The per-run failure log location.
pub fn failure_log_path(out_dir: &Path) -> PathBuf {
    out_dir.join(FAILURE_LOG_FILENAME)
}

/// Sanitizes a string to be safe for use as a path component.
pub fn sanitize_component(name: &str) -> String {
    let mut safe = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect::<String>();

    safe = safe.trim().trim_matches('.').to_string();

    if safe.len() > 100 {
        safe.truncate(100);
    }

    if safe.is_empty() {
        safe = "unnamed".to_string();
    }

    safe
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PostId;
    use chrono::DateTime;

    fn post() -> PostRecord {
        PostRecord {
            id: PostId::parse("x1").unwrap(),
            title: "Hello World".to_string(),
            content: String::new(),
            author: "alice".to_string(),
            subreddit: "demo".to_string(),
            created_at: DateTime::UNIX_EPOCH,
            nsfw: false,
            canonical_url: "https://reddit.com/r/demo/comments/x1/hello_world/".to_string(),
            slug: "hello_world".to_string(),
        }
    }

    #[test]
    fn artifact_layout() {
        let paths = artifact_paths(Path::new("Reddit Takeout"), &post());
        assert_eq!(
            paths.document,
            Path::new("Reddit Takeout/demo/[x1] hello_world.md")
        );
        assert_eq!(
            paths.raw_json,
            Path::new("Reddit Takeout/_raw/demo/[x1] hello_world.json")
        );
    }

    #[test]
    fn failure_log_location() {
        assert_eq!(
            failure_log_path(Path::new("out")),
            Path::new("out/failed.csv")
        );
    }

    #[test]
    fn test_sanitize_component() {
        assert_eq!(sanitize_component("Hello/World"), "Hello_World");
        assert_eq!(sanitize_component("a:b*c"), "a_b_c");
        assert_eq!(sanitize_component("   spaces   "), "spaces");
        assert_eq!(sanitize_component(""), "unnamed");
    }
}
