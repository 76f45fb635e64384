use super::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Call {
  pub(crate) status: Option<u16>,
  pub(crate) url: String,
}

/// Everything one run accumulates: the fetcher, the ordered call log, the
/// set of URLs already requested, and the counters.
pub(crate) struct Session<F> {
  calls: Vec<Call>,
  fetcher: F,
  requested: HashSet<String>,
  started: Instant,
  stats: Stats,
}

impl<F: Fetch> Session<F> {
  pub(crate) fn calls(&self) -> &[Call] {
    &self.calls
  }

  /// The call is logged before its status is checked, so failures count.
  pub(crate) async fn fetch(&mut self, url: &str) -> Result<Vec<u8>, Error> {
    let outcome = self.fetcher.get(url).await;

    self.calls.push(Call {
      status: match &outcome {
        Ok(reply) => Some(reply.status),
        Err(Error::Transport { status, .. }) => *status,
        Err(_) => None,
      },
      url: url.to_string(),
    });

    let reply = outcome?;

    if !reply.is_success() {
      return Err(Error::Transport {
        reason: reqwest::StatusCode::from_u16(reply.status)
          .ok()
          .and_then(|status| status.canonical_reason())
          .map_or_else(
            || format!("HTTP {}", reply.status),
            |reason| format!("HTTP {} {reason}", reply.status),
          ),
        status: Some(reply.status),
        url: url.to_string(),
      });
    }

    Ok(reply.body)
  }

  pub(crate) async fn fetch_thread(
    &mut self,
    url: &str,
  ) -> Result<Thread, Error> {
    let body = self.fetch(url).await?;
    Thread::decode(&body)
  }

  /// Returns false when `url` was requested before during this run.
  pub(crate) fn mark_requested(&mut self, url: &str) -> bool {
    self.requested.insert(url.to_string())
  }

  pub(crate) fn new(fetcher: F) -> Self {
    Self {
      calls: Vec::new(),
      fetcher,
      requested: HashSet::new(),
      started: Instant::now(),
      stats: Stats::default(),
    }
  }

  pub(crate) fn report(&self) {
    self.stats().report(self.calls().len(), self.started.elapsed());

    for (i, call) in self.calls().iter().enumerate() {
      debug!(index = i, status = ?call.status, url = %call.url, "http call");
    }
  }

  pub(crate) fn stats(&self) -> &Stats {
    &self.stats
  }

  pub(crate) fn stats_mut(&mut self) -> &mut Stats {
    &mut self.stats
  }
}
