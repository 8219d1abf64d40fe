use thiserror::Error;

mod credential;
mod domain_types;
mod ids;

pub use credential::*;
pub use domain_types::*;
pub use ids::*;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid Reddit ID format: {0}")]
    InvalidId(String),

    #[error("Invalid URL: {url} - {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid authorization value: {reason}")]
    InvalidCredential { reason: String },
}
