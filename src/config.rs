// src/config.rs
use crate::constants::{AUTHORIZATION_ENV, DEFAULT_USER_AGENT, LISTING_PAGE_LIMIT};
use crate::error::AppError;
use clap::Parser;
use std::path::PathBuf;

/// Parsed and validated command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Saved-post CSV to archive, one "id,url" row per discussion
    pub saved_posts: String,

    /// Directory where archived documents and raw artifacts are written
    #[arg(short = 'o', long, default_value = "Reddit Takeout")]
    pub output_dir: String,

    /// Raw Authorization value for the manual credential path (falls back
    /// to the REDDIT_AUTHORIZATION environment variable)
    #[arg(short = 'a', long)]
    pub authorization: Option<String>,

    /// Comments requested per discussion listing
    #[arg(long, default_value_t = LISTING_PAGE_LIMIT)]
    pub limit: u32,

    /// User agent sent with listing requests
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Resolved pipeline configuration — validated and ready to drive a run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub saved_posts: PathBuf,
    pub output_dir: PathBuf,
    /// Operator-supplied Authorization value, if any; the capture tap is
    /// the other way a credential can arrive.
    pub authorization: Option<String>,
    pub limit: u32,
    pub user_agent: String,
    #[allow(dead_code)] // Used by bin crate
    pub verbose: bool,
}

impl PipelineConfig {
    /// Resolves a complete configuration from CLI input and environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        let saved_posts = PathBuf::from(&cli.saved_posts);
        if !saved_posts.is_file() {
            return Err(AppError::MissingConfiguration(format!(
                "saved-post list not found: {}",
                saved_posts.display()
            )));
        }

        let authorization = cli
            .authorization
            .or_else(|| std::env::var(AUTHORIZATION_ENV).ok())
            .filter(|value| !value.trim().is_empty());

        Ok(Self {
            saved_posts,
            output_dir: PathBuf::from(cli.output_dir),
            authorization,
            limit: cli.limit,
            user_agent: cli.user_agent,
            verbose: cli.verbose,
        })
    }
}
