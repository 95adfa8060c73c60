use thiserror::Error;

/// Failures while fetching markup for a display region.
///
/// None of these are fatal: the region keeps its previous markup and shows the
/// error text as a notice.
#[derive(Debug, Error)]
pub enum ViewSyncError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{endpoint} answered with status {status}")]
    Status { endpoint: String, status: u16 },

    #[error("invalid endpoint URL: {0}")]
    Endpoint(#[from] url::ParseError),

    /// Raised by [`MockRenderService`](super::mock::MockRenderService) for calls nobody expected.
    #[error("unexpected render call: {0}")]
    Unexpected(String),
}
