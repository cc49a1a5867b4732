use super::*;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub(crate) enum FetchError {
  #[error("could not decode response from {url}")]
  Decode { url: String },
  #[error("request to {url} failed with status {status}")]
  Status { status: u16, url: String },
  #[error("request to {url} failed: {message}")]
  Transport { message: String, url: String },
}

impl FetchError {
  /// Transport failures, rate limiting and server errors are worth another
  /// attempt. Anything else will fail the same way again.
  pub(crate) fn is_transient(&self) -> bool {
    match self {
      Self::Decode { .. } => false,
      Self::Status { status, .. } => *status == 429 || *status >= 500,
      Self::Transport { .. } => true,
    }
  }

  pub(crate) fn transport(url: &str, error: impl Display) -> Self {
    Self::Transport {
      message: error.to_string(),
      url: url.to_string(),
    }
  }
}
