// src/model/saved.rs
//! The saved-post list driving a batch run.
//!
//! Reddit's data export ships a CSV with one `id,permalink` row per saved
//! post. Only the first comma splits; permalinks never contain one, but
//! tolerating extras costs nothing.

use crate::error::AppError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// One saved discussion to archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedPost {
    pub id: String,
    pub url: String,
}

/// The parsed saved-post CSV.
#[derive(Debug, Clone, Default)]
pub struct SavedPostList(Vec<SavedPost>);

impl SavedPostList {
    /// Reads `id,url` rows. Blank lines are skipped, as is a leading header
    /// row whose first field is `id`. A non-blank row without a comma is a
    /// hard error — silently dropping saved posts defeats the archive.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, AppError> {
        let mut posts = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let (id, url) = trimmed.split_once(',').ok_or_else(|| AppError::InvalidCsvRow {
                line: index + 1,
                content: trimmed.to_string(),
            })?;

            if index == 0 && id.eq_ignore_ascii_case("id") {
                continue;
            }

            posts.push(SavedPost {
                id: id.trim().to_string(),
                url: url.trim().to_string(),
            });
        }

        Ok(Self(posts))
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn iter(&self) -> impl Iterator<Item = &SavedPost> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_and_skips_header_and_blanks() {
        let input = "id,permalink\nabc,https://reddit.com/r/a/comments/abc/t/\n\nxyz,https://reddit.com/r/b/comments/xyz/u/\n";
        let list = SavedPostList::from_reader(input.as_bytes()).unwrap();

        assert_eq!(list.len(), 2);
        let first = list.iter().next().unwrap();
        assert_eq!(first.id, "abc");
        assert_eq!(first.url, "https://reddit.com/r/a/comments/abc/t/");
    }

    #[test]
    fn row_without_comma_is_an_error() {
        let err = SavedPostList::from_reader("not-a-row\n".as_bytes()).unwrap_err();
        match err {
            AppError::InvalidCsvRow { line, content } => {
                assert_eq!(line, 1);
                assert_eq!(content, "not-a-row");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn url_keeps_extra_commas() {
        let list = SavedPostList::from_reader("abc,https://x/?a=1,b=2\n".as_bytes()).unwrap();
        assert_eq!(list.iter().next().unwrap().url, "https://x/?a=1,b=2");
    }
}
