// src/pipeline.rs
//! Pipeline capability traits — abstract the three stages of archiving one
//! discussion: fetch raw records, compose the document, deliver artifacts.
//!
//! Each trait describes a single capability, enabling testing each stage in
//! isolation.

use crate::error::AppError;
use crate::model::{PostRecord, Thing};
use crate::output::OutputReport;
use crate::types::RenderedDocument;

/// Retrieves a discussion's flattened raw records by its canonical URL.
#[async_trait::async_trait]
pub trait DiscussionSource {
    async fn fetch(&self, url: &str) -> Result<Vec<Thing>, AppError>;
}

/// Transforms raw records into the extracted post and its rendered document.
pub trait DocumentComposer {
    fn compose(
        &self,
        things: &[Thing],
        source_url: &str,
    ) -> Result<(PostRecord, RenderedDocument), AppError>;
}

/// Delivers a rendered document and its raw artifact to their destinations.
pub trait DocumentDelivery {
    fn deliver(
        &self,
        post: &PostRecord,
        document: RenderedDocument,
        raw: &[Thing],
    ) -> Result<OutputReport, AppError>;
}
