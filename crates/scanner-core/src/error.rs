use thiserror::Error;

/// Failures of a request to the market-data provider.
///
/// "No data" outcomes (an empty price history, a missing EPS) are not errors;
/// they are reported through [`Reconstruction`] instead.
///
/// [`Reconstruction`]: crate::history::Reconstruction
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status} from {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("provider error [{code}]: {description}")]
    Upstream { code: String, description: String },

    #[error("provider returned an empty crumb")]
    EmptyCrumb,
}

pub type Result<T> = std::result::Result<T, ProviderError>;
