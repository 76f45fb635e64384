use super::*;

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub(crate) struct Post {
  pub(crate) author: String,
  pub(crate) created_utc: f64,
  pub(crate) domain: Option<String>,
  pub(crate) downs: i64,
  pub(crate) link_flair_text: Option<String>,
  pub(crate) num_comments: u64,
  pub(crate) over_18: bool,
  pub(crate) permalink: String,
  pub(crate) score: i64,
  pub(crate) selftext: Option<String>,
  pub(crate) subreddit: String,
  pub(crate) title: String,
  pub(crate) ups: i64,
  pub(crate) upvote_ratio: Option<f64>,
  pub(crate) url: Option<String>,
}

impl Post {
  /// The outbound link, when it points somewhere other than the thread.
  pub(crate) fn link(&self) -> Option<&str> {
    let permalink = self.permalink();

    self
      .url
      .as_deref()
      .filter(|url| !url.is_empty() && *url != permalink)
  }

  pub(crate) fn permalink(&self) -> String {
    if self.permalink.starts_with('/') {
      format!("{SITE_URL}{}", self.permalink)
    } else {
      self.permalink.clone()
    }
  }

  pub(crate) fn self_text(&self) -> Option<&str> {
    self
      .selftext
      .as_deref()
      .filter(|text| !text.trim().is_empty())
  }
}
