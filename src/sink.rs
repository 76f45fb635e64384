use super::*;

/// Receives the post once, then every resolved comment in depth-first order.
pub(crate) trait Sink {
  fn comment(&mut self, comment: &Comment, depth: usize) -> Result;

  fn post(&mut self, post: &Post) -> Result;
}
