use super::*;

/// The API sends `false`, `true`, or the edit time in epoch seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) enum Edited {
  At(f64),
  #[default]
  Never,
  Unknown,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Comment {
  pub(crate) author: String,
  pub(crate) author_flair_text: Option<String>,
  pub(crate) body: String,
  pub(crate) controversiality: u64,
  pub(crate) created: f64,
  pub(crate) downs: i64,
  pub(crate) edited: Edited,
  pub(crate) id: String,
  pub(crate) is_submitter: bool,
  pub(crate) permalink: String,
  pub(crate) replies: Vec<RawNode>,
  pub(crate) score: i64,
  pub(crate) stickied: bool,
  pub(crate) ups: i64,
}

impl Comment {
  pub(crate) fn header(&self) -> String {
    if self.is_submitter {
      format!("{} (OP)", self.author)
    } else {
      self.author.clone()
    }
  }

  pub(crate) fn permalink(&self) -> String {
    if self.permalink.starts_with('/') {
      format!("{SITE_URL}{}", self.permalink)
    } else {
      self.permalink.clone()
    }
  }
}
