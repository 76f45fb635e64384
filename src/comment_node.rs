use super::*;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum CommentNode {
  /// Replies to `parent_id` were cut off here; they live at the parent's own
  /// thread page.
  Continuation { parent_id: String },
  /// Sibling comments collapsed to save payload, in API order. Never empty.
  LoadMore { child_ids: Vec<String>, id: String },
  Resolved(Comment),
}
