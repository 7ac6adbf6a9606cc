use std::future::Future;
use thiserror::Error;

pub const OFFLINE_SENTINEL: &str = "SYSTEM_OFFLINE: Connect API Key for Neural Link.";
pub const EMPTY_SENTINEL: &str = "NO_DATA_RECEIVED";
pub const UNREACHABLE_SENTINEL: &str = "ERR_CONNECTION_REFUSED: AI module unreachable.";

/// Why a piece of commentary could not be produced
#[derive(Debug, Error)]
pub enum CommentaryError {
    #[error("no API key configured")]
    MissingCredential,

    #[error("service returned no text")]
    EmptyResponse,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service responded with status {status}: {body}")]
    Status { status: u16, body: String },
}

impl CommentaryError {
    /// Fixed log line shown in place of commentary
    pub fn sentinel(&self) -> &'static str {
        match self {
            CommentaryError::MissingCredential => OFFLINE_SENTINEL,
            CommentaryError::EmptyResponse => EMPTY_SENTINEL,
            CommentaryError::Http(_) | CommentaryError::Status { .. } => UNREACHABLE_SENTINEL,
        }
    }
}

/// A black-box text generator fed with a short event description
pub trait CommentaryProvider: Send + Sync + 'static {
    fn generate(
        &self,
        context: &str,
    ) -> impl Future<Output = Result<String, CommentaryError>> + Send;
}

/// Provider used when no credential is available
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineProvider;

impl CommentaryProvider for OfflineProvider {
    async fn generate(&self, _context: &str) -> Result<String, CommentaryError> {
        Err(CommentaryError::MissingCredential)
    }
}

/// Ask the provider for commentary, substituting a sentinel on any failure
pub async fn commentate<P: CommentaryProvider>(provider: &P, context: &str) -> String {
    match provider.generate(context).await {
        Ok(text) if text.trim().is_empty() => EMPTY_SENTINEL.to_string(),
        Ok(text) => text.trim().to_string(),
        Err(err) => {
            tracing::warn!(error = %err, "commentary unavailable");
            err.sentinel().to_string()
        }
    }
}
