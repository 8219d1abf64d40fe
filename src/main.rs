// src/main.rs

// Modules defined in the crate
mod api;
mod config;
mod constants;
mod error;
mod formatting;
mod model;
mod output;
mod pipeline;
mod types;

// Specific imports
use crate::api::{CaptureSession, DiscussionFetcher, HttpDispatch, RedditHttpClient};
use crate::config::{CommandLineInput, PipelineConfig};
use crate::constants::CAPTURE_LIVENESS_HINT_SECS;
use crate::error::AppError;
use crate::model::{PostRecord, SavedPost, SavedPostList, Thing};
use crate::pipeline::{DiscussionSource, DocumentComposer, DocumentDelivery};
use crate::types::{BearerToken, RenderedDocument};
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use output::{deliver, DeliveryTarget, OutputPlan, OutputReport};
use std::fs;
use std::time::Duration;

/// Operator guidance logged while no credential has been captured yet.
const CAPTURE_GUIDANCE: &str = "Waiting for an authenticated request... \
Drive the wrapped client to trigger one, or copy the entire value of an \
\"Authorization\" header from the network inspector and pass it via \
--authorization (or the REDDIT_AUTHORIZATION environment variable).";

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let log_file_path = std::env::temp_dir().join("reddit2md.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stdout_appender = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stdout")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::debug!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Suspends until the capture session resolves, logging a periodic liveness
/// hint. The wait itself never expires.
async fn wait_for_credential(session: &CaptureSession) -> BearerToken {
    loop {
        tokio::select! {
            token = session.wait() => return token,
            _ = tokio::time::sleep(Duration::from_secs(CAPTURE_LIVENESS_HINT_SECS)) => {
                log::warn!("Still waiting for a credential. {}", CAPTURE_GUIDANCE);
            }
        }
    }
}

/// Archives every saved discussion: fetch → compose → deliver, recording
/// failures without halting the batch.
async fn execute_pipeline(config: &PipelineConfig) -> Result<(), AppError> {
    let saved = SavedPostList::load(&config.saved_posts)?;
    if saved.is_empty() {
        log::warn!("No saved discussions in {}", config.saved_posts.display());
        return Ok(());
    }
    log::info!("{} saved discussions to archive", saved.len());

    let session = CaptureSession::new();
    let client = RedditHttpClient::new(&config.user_agent)?;
    let dispatch = session.wrap(client);

    if let Some(raw) = &config.authorization {
        if session.supply(raw) {
            log::info!("Credential supplied via configuration");
        }
    } else {
        log::info!("{}", CAPTURE_GUIDANCE);
    }

    let token = wait_for_credential(&session).await;
    log::info!("Got authorization credential: {}", token);

    let archiver = DiscussionArchiver {
        config,
        fetcher: DiscussionFetcher::new(dispatch, token, config.limit),
    };

    let mut archived = 0usize;
    let mut failed = 0usize;
    for post in saved.iter() {
        match archiver.archive(post).await {
            Ok(()) => {
                archived += 1;
                log::info!("Downloaded \"{}\"", post.url);
            }
            Err(e) => {
                failed += 1;
                log::error!("[{}] FAILED: {}", post.id, e);
                output::log_failure(&config.output_dir, &post.id, &post.url);
            }
        }
    }

    log::info!(
        "Done: {} archived, {} failed (failures recorded in {})",
        archived,
        failed,
        output::failure_log_path(&config.output_dir).display()
    );

    Ok(())
}

/// Orchestrates the three stages for each discussion in the batch.
struct DiscussionArchiver<'a, D> {
    config: &'a PipelineConfig,
    fetcher: DiscussionFetcher<D>,
}

impl<D: HttpDispatch> DiscussionArchiver<'_, D> {
    /// Runs one discussion end to end. Any error here is discussion-level:
    /// the caller records it and moves on.
    async fn archive(&self, post: &SavedPost) -> Result<(), AppError> {
        let things = self.fetch(&post.url).await?;
        let (record, document) = self.compose(&things, &post.url)?;
        let report = self.deliver(&record, document, &things)?;

        if !report.is_success() {
            return Err(AppError::DeliveryFailed {
                failures: report.failed.iter().map(|f| f.error.clone()).collect(),
            });
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl<'a, D: HttpDispatch> DiscussionSource for DiscussionArchiver<'a, D> {
    async fn fetch(&self, url: &str) -> Result<Vec<Thing>, AppError> {
        log::debug!("Retrieving discussion {}", url);
        self.fetcher.fetch_discussion(url).await
    }
}

impl<D: HttpDispatch> DocumentComposer for DiscussionArchiver<'_, D> {
    fn compose(
        &self,
        things: &[Thing],
        source_url: &str,
    ) -> Result<(PostRecord, RenderedDocument), AppError> {
        let mut comments = model::CommentTree::new();
        let post = api::parser::process_page(things, &mut comments)?.ok_or_else(|| {
            AppError::MissingPost {
                url: source_url.to_string(),
            }
        })?;

        log::debug!(
            "Discussion {}: {} comments under \"{}\"",
            post.id,
            comments.len(),
            post.title
        );

        let document = formatting::compose_discussion_markdown(&post, &comments)?;
        Ok((post, document))
    }
}

impl<D: HttpDispatch> DocumentDelivery for DiscussionArchiver<'_, D> {
    fn deliver(
        &self,
        post: &PostRecord,
        document: RenderedDocument,
        raw: &[Thing],
    ) -> Result<OutputReport, AppError> {
        let paths = output::artifact_paths(&self.config.output_dir, post);
        let raw_json = serde_json::to_string_pretty(raw)?;

        let plan = OutputPlan::new()
            .with_operation(DeliveryTarget::WriteFile {
                path: paths.raw_json,
                content: raw_json,
            })
            .with_operation(DeliveryTarget::WriteFile {
                path: paths.document,
                content: document.into_string(),
            });

        deliver(plan)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = PipelineConfig::resolve(cli)?;

    execute_pipeline(&config).await?;

    Ok(())
}
