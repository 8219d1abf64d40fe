use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

/// Strong typing for Reddit thing IDs with phantom types.
///
/// Reddit identifies everything by a short base-36 string ("abc123"),
/// optionally carrying a `tN_` type prefix when it appears as a fullname
/// ("t3_abc123"). The phantom parameter keeps post and comment IDs from
/// being mixed up at compile time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Id<T> {
    value: String,
    _phantom: PhantomData<T>,
}

/// Marker types for different ID kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PostMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommentMarker;

/// Type aliases for specific ID types
pub type PostId = Id<PostMarker>;
pub type CommentId = Id<CommentMarker>;

/// Fullname prefixes the API uses to tag an ID with its kind.
const FULLNAME_PREFIXES: &[&str] = &["t1_", "t2_", "t3_", "t4_", "t5_", "t6_"];

impl<T> Id<T> {
    /// Parse a bare base-36 ID or a `tN_`-prefixed fullname into a
    /// normalized (lowercase, unprefixed) ID.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        let bare = FULLNAME_PREFIXES
            .iter()
            .find_map(|prefix| trimmed.strip_prefix(prefix))
            .unwrap_or(trimmed);

        if bare.is_empty() {
            return Err(ValidationError::InvalidId(
                "ID cannot be empty".to_string(),
            ));
        }

        if !bare.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ValidationError::InvalidId(format!(
                "ID must be base-36 alphanumeric, got {:?}",
                input
            )));
        }

        Ok(Self {
            value: bare.to_lowercase(),
            _phantom: PhantomData,
        })
    }

    /// Get the ID as a string reference
    #[allow(dead_code)] // Public API - used by library consumers
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.value.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Id::parse(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_parsing() {
        let id = PostId::parse("abc123").unwrap();
        assert_eq!(id.as_str(), "abc123");

        // Fullname prefix is stripped
        let id = PostId::parse("t3_abc123").unwrap();
        assert_eq!(id.as_str(), "abc123");

        let id = CommentId::parse("t1_J0kEr").unwrap();
        assert_eq!(id.as_str(), "j0ker");
    }

    #[test]
    fn test_invalid_ids() {
        assert!(PostId::parse("").is_err());
        assert!(PostId::parse("t3_").is_err());
        assert!(PostId::parse("has spaces").is_err());
        assert!(CommentId::parse("semi;colon").is_err());
    }
}
