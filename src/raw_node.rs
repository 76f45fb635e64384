use super::*;

/// A comment-tree node exactly as the API sends it, before classification.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub(crate) struct RawNode {
  pub(crate) data: RawNodeData,
  pub(crate) kind: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub(crate) struct RawNodeData {
  pub(crate) author: Option<String>,
  pub(crate) author_flair_text: Option<String>,
  pub(crate) body: Option<String>,
  pub(crate) children: Vec<String>,
  pub(crate) controversiality: u64,
  pub(crate) created_utc: f64,
  pub(crate) downs: i64,
  #[serde(deserialize_with = "deserialize_edited")]
  pub(crate) edited: Edited,
  pub(crate) id: String,
  pub(crate) is_submitter: bool,
  pub(crate) parent_id: Option<String>,
  pub(crate) permalink: String,
  #[serde(deserialize_with = "deserialize_replies")]
  pub(crate) replies: Vec<RawNode>,
  pub(crate) score: i64,
  pub(crate) stickied: bool,
  pub(crate) ups: i64,
}

impl RawNode {
  const CONTINUATION_ID: &str = "_";

  const MORE_KIND: &str = "more";

  const TYPE_PREFIX_LEN: usize = "t1_".len();

  /// Decides what this node is. The checks run in a fixed order: a `more`
  /// node with the `_` id is a continuation even when it carries an author.
  pub(crate) fn classify(self) -> CommentNode {
    let Self { data, kind } = self;

    if kind == Self::MORE_KIND && data.id == Self::CONTINUATION_ID {
      let parent_id = data.parent_id.unwrap_or_default();

      return CommentNode::Continuation {
        parent_id: parent_id
          .get(Self::TYPE_PREFIX_LEN..)
          .unwrap_or_default()
          .to_string(),
      };
    }

    if kind == Self::MORE_KIND && !data.id.is_empty() {
      let child_ids = if data.children.is_empty() {
        vec![data.id.clone()]
      } else {
        data.children
      };

      return CommentNode::LoadMore {
        child_ids,
        id: data.id,
      };
    }

    let Some(author) = data.author else {
      return CommentNode::LoadMore {
        child_ids: vec![data.id.clone()],
        id: data.id,
      };
    };

    CommentNode::Resolved(Comment {
      author,
      author_flair_text: data
        .author_flair_text
        .filter(|flair| !flair.trim().is_empty()),
      body: data.body.unwrap_or_default(),
      controversiality: data.controversiality,
      created: data.created_utc,
      downs: data.downs,
      edited: data.edited,
      id: data.id,
      is_submitter: data.is_submitter,
      permalink: data.permalink,
      replies: data.replies,
      score: data.score,
      stickied: data.stickied,
      ups: data.ups,
    })
  }
}
