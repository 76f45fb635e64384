#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
  #[error("{0}")]
  Argument(String),
  #[error("malformed response: {reason}")]
  MalformedResponse { reason: String },
  #[error("request to {url} failed: {reason}")]
  Transport {
    reason: String,
    status: Option<u16>,
    url: String,
  },
}

impl Error {
  pub(crate) fn malformed(reason: impl ToString) -> Self {
    Self::MalformedResponse {
      reason: reason.to_string(),
    }
  }
}
