use super::*;

/// Per-kind counts for one run. HTTP calls are counted by the session's call
/// log instead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Stats {
  pub(crate) continuations: usize,
  pub(crate) failed_follow_ups: usize,
  pub(crate) load_more: usize,
  pub(crate) resolved: usize,
  pub(crate) skipped_continuations: usize,
  pub(crate) skipped_load_more: usize,
  pub(crate) walks: usize,
}

impl Stats {
  pub(crate) fn report(&self, http_calls: usize, elapsed: Duration) {
    debug!(
      http_calls,
      resolved = self.resolved,
      walks = self.walks,
      continuations = self.continuations,
      skipped_continuations = self.skipped_continuations,
      load_more = self.load_more,
      skipped_load_more = self.skipped_load_more,
      failed_follow_ups = self.failed_follow_ups,
      ?elapsed,
      "run summary"
    );
  }
}
