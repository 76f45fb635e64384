use super::*;

#[cfg(test)]
#[derive(Default)]
pub(crate) struct FakeFetcher {
  replies: std::collections::HashMap<String, Reply>,
}

#[derive(Clone, Debug)]
pub(crate) struct Reply {
  pub(crate) body: Vec<u8>,
  pub(crate) status: u16,
}

/// One GET per call. Connection failures are errors, any HTTP status is a
/// reply; deciding what counts as success is left to the caller.
pub(crate) trait Fetch {
  async fn get(&self, url: &str) -> Result<Reply, Error>;
}

#[cfg(test)]
impl FakeFetcher {
  pub(crate) fn with(mut self, url: &str, status: u16, body: &str) -> Self {
    self.replies.insert(
      url.to_string(),
      Reply {
        body: body.as_bytes().to_vec(),
        status,
      },
    );

    self
  }
}

#[cfg(test)]
impl Fetch for FakeFetcher {
  async fn get(&self, url: &str) -> Result<Reply, Error> {
    self
      .replies
      .get(url)
      .cloned()
      .ok_or_else(|| Error::Transport {
        reason: "connection refused".to_string(),
        status: None,
        url: url.to_string(),
      })
  }
}

impl Reply {
  pub(crate) fn is_success(&self) -> bool {
    (200..300).contains(&self.status)
  }
}
