use super::*;

/// Depth-first, left-to-right traversal of a comment forest. Placeholders
/// are resolved in place with follow-up fetches, one at a time, so the sink
/// sees comments in the order of the fully loaded tree.
pub(crate) struct Walker<'a, F, S> {
  fetch_all: bool,
  session: &'a mut Session<F>,
  sink: &'a mut S,
  thread_url: &'a str,
}

impl<'a, F: Fetch, S: Sink> Walker<'a, F, S> {
  /// Fetches the thread, emits the post, then walks every comment. Only a
  /// failure of the root fetch, or of the sink, is an error. The run summary
  /// is reported either way.
  pub(crate) async fn archive(&mut self) -> Result {
    let result = self.archive_thread().await;

    self.session.report();

    result
  }

  async fn archive_thread(&mut self) -> Result {
    let url = root_url(self.thread_url);

    self.session.mark_requested(&url);

    let thread = self
      .session
      .fetch_thread(&url)
      .await
      .with_context(|| format!("could not load thread {}", self.thread_url))?;

    self.sink.post(&thread.post)?;

    self.walk(thread.forest, 0).await
  }

  async fn fetch_follow_up(&mut self, id: &str) -> Option<Thread> {
    if id.is_empty() {
      warn!("skipping placeholder without an id");
      self.session.stats_mut().failed_follow_ups += 1;
      return None;
    }

    let url = follow_up_url(self.thread_url, id);

    if !self.session.mark_requested(&url) {
      debug!(%url, "already fetched, skipping");
      return None;
    }

    match self.session.fetch_thread(&url).await {
      Ok(thread) => Some(thread),
      Err(error) => {
        warn!("skipping comments under {id}: {error}");
        self.session.stats_mut().failed_follow_ups += 1;
        None
      }
    }
  }

  pub(crate) fn new(
    session: &'a mut Session<F>,
    sink: &'a mut S,
    thread_url: &'a str,
    fetch_all: bool,
  ) -> Self {
    Self {
      fetch_all,
      session,
      sink,
      thread_url: thread_base(thread_url),
    }
  }

  /// Re-fetches the parent as a thread root and walks only its replies;
  /// the parent itself was emitted already, at `parent_depth`.
  async fn resolve_continuation(
    &mut self,
    parent_id: &str,
    parent_depth: usize,
  ) -> Result {
    let Some(thread) = self.fetch_follow_up(parent_id).await else {
      return Ok(());
    };

    match thread.forest.into_iter().next().map(RawNode::classify) {
      Some(CommentNode::Resolved(parent)) => {
        self.walk(parent.replies, parent_depth + 1).await
      }
      _ => {
        warn!("continuation of {parent_id} did not return its parent comment");
        self.session.stats_mut().failed_follow_ups += 1;
        Ok(())
      }
    }
  }

  /// One fetch per hidden sibling, walked at the placeholder's depth. A
  /// single hidden comment is fetched by the node's own id.
  async fn resolve_load_more(
    &mut self,
    id: &str,
    child_ids: &[String],
    depth: usize,
  ) -> Result {
    let ids = match child_ids {
      [only] => {
        if only != id {
          debug!(%id, child = %only, "load-more child id differs from node id");
        }

        vec![id]
      }
      _ => child_ids.iter().map(String::as_str).collect(),
    };

    for id in ids {
      if let Some(thread) = self.fetch_follow_up(id).await {
        self.walk(thread.forest, depth).await?;
      }
    }

    Ok(())
  }

  pub(crate) fn walk(
    &mut self,
    forest: Vec<RawNode>,
    depth: usize,
  ) -> LocalBoxFuture<'_, Result> {
    async move {
      self.session.stats_mut().walks += 1;

      for node in forest {
        match node.classify() {
          CommentNode::Continuation { parent_id } => {
            self.session.stats_mut().continuations += 1;

            if self.fetch_all {
              self
                .resolve_continuation(&parent_id, depth.saturating_sub(1))
                .await?;
            } else {
              self.session.stats_mut().skipped_continuations += 1;
            }
          }
          CommentNode::LoadMore { child_ids, id } => {
            self.session.stats_mut().load_more += 1;

            if self.fetch_all {
              self.resolve_load_more(&id, &child_ids, depth).await?;
            } else {
              self.session.stats_mut().skipped_load_more += 1;
            }
          }
          CommentNode::Resolved(comment) => {
            self.session.stats_mut().resolved += 1;
            self.sink.comment(&comment, depth)?;
            self.walk(comment.replies, depth + 1).await?;
          }
        }
      }

      Ok(())
    }
    .boxed_local()
  }
}

/// The URL of a comment (or collapsed sibling) as its own thread root.
pub(crate) fn follow_up_url(thread_url: &str, id: &str) -> String {
  let separator = if thread_url.ends_with('/') { "" } else { "/" };
  format!("{thread_url}{separator}{id}{FOLLOW_UP_QUERY}")
}

pub(crate) fn root_url(thread_url: &str) -> String {
  let base = thread_base(thread_url).trim_end_matches('/');
  format!("{base}{FOLLOW_UP_QUERY}")
}

/// The thread URL without a `.json` suffix, so root and follow-up requests
/// share one base.
pub(crate) fn thread_base(thread_url: &str) -> &str {
  thread_url.strip_suffix(".json").unwrap_or(thread_url)
}

#[cfg(test)]
mod tests {
  use {
    super::*,
    crate::fetch::FakeFetcher,
    pretty_assertions::assert_eq,
    serde_json::json,
  };

  const THREAD: &str = "https://x/comments/abc";

  #[derive(Default)]
  struct Recorder {
    comments: Vec<(String, usize)>,
    posts: Vec<String>,
  }

  impl Sink for Recorder {
    fn comment(&mut self, comment: &Comment, depth: usize) -> Result {
      self.comments.push((comment.author.clone(), depth));
      Ok(())
    }

    fn post(&mut self, post: &Post) -> Result {
      self.posts.push(post.title.clone());
      Ok(())
    }
  }

  fn comment(name: &str, replies: &[Value]) -> Value {
    let replies = if replies.is_empty() {
      json!("")
    } else {
      json!({ "kind": "Listing", "data": { "children": replies } })
    };

    json!({
      "kind": "t1",
      "data": { "id": name, "author": name, "body": name, "replies": replies }
    })
  }

  fn continuation(parent: &str) -> Value {
    json!({
      "kind": "more",
      "data": { "id": "_", "parent_id": format!("t1_{parent}"), "children": [] }
    })
  }

  fn load_more(id: &str, children: &[&str]) -> Value {
    json!({ "kind": "more", "data": { "id": id, "children": children } })
  }

  fn thread(forest: &[Value]) -> String {
    json!([
      {
        "kind": "Listing",
        "data": { "children": [{ "kind": "t3", "data": { "title": "post" } }] }
      },
      { "kind": "Listing", "data": { "children": forest } }
    ])
    .to_string()
  }

  fn emitted(names: &[(&str, usize)]) -> Vec<(String, usize)> {
    names
      .iter()
      .map(|(name, depth)| ((*name).to_string(), *depth))
      .collect()
  }

  async fn archive(
    fetcher: FakeFetcher,
    fetch_all: bool,
  ) -> (Result, Recorder, Session<FakeFetcher>) {
    let mut session = Session::new(fetcher);
    let mut recorder = Recorder::default();

    let result = Walker::new(&mut session, &mut recorder, THREAD, fetch_all)
      .archive()
      .await;

    (result, recorder, session)
  }

  fn root() -> String {
    root_url(THREAD)
  }

  fn follow_up(id: &str) -> String {
    follow_up_url(THREAD, id)
  }

  #[test]
  fn follow_up_url_appends_id_after_slash() {
    assert_eq!(
      follow_up_url("https://x/comments/abc", "def"),
      "https://x/comments/abc/def.json?limit=500&sort=top"
    );
  }

  #[test]
  fn follow_up_url_does_not_double_trailing_slash() {
    assert_eq!(
      follow_up_url("https://x/comments/abc/", "def"),
      "https://x/comments/abc/def.json?limit=500&sort=top"
    );
  }

  #[test]
  fn root_url_requests_json_listing() {
    assert_eq!(
      root_url("https://x/comments/abc/"),
      "https://x/comments/abc.json?limit=500&sort=top"
    );
    assert_eq!(
      root_url("https://x/comments/abc.json"),
      "https://x/comments/abc.json?limit=500&sort=top"
    );
  }

  #[tokio::test]
  async fn load_more_is_spliced_in_place() {
    let fetcher = FakeFetcher::default()
      .with(
        &root(),
        200,
        &thread(&[comment("A", &[comment("B", &[])]), load_more("C", &["C"])]),
      )
      .with(&follow_up("C"), 200, &thread(&[comment("C", &[])]));

    let (result, recorder, session) = archive(fetcher, true).await;

    result.unwrap();

    assert_eq!(recorder.posts, vec!["post".to_string()]);
    assert_eq!(recorder.comments, emitted(&[("A", 0), ("B", 1), ("C", 0)]));
    assert_eq!(session.calls().len(), 2);
  }

  #[tokio::test]
  async fn failed_follow_up_skips_only_that_subtree() {
    let fetcher = FakeFetcher::default()
      .with(
        &root(),
        200,
        &thread(&[comment("A", &[comment("B", &[])]), load_more("C", &["C"])]),
      )
      .with(&follow_up("C"), 500, "oops");

    let (result, recorder, session) = archive(fetcher, true).await;

    result.unwrap();

    assert_eq!(recorder.comments, emitted(&[("A", 0), ("B", 1)]));
    assert_eq!(session.calls().len(), 2);
    assert_eq!(session.stats().failed_follow_ups, 1);
  }

  #[tokio::test]
  async fn malformed_follow_up_does_not_stop_later_siblings() {
    let fetcher = FakeFetcher::default()
      .with(
        &root(),
        200,
        &thread(&[load_more("C", &["C", "D"]), comment("E", &[])]),
      )
      .with(&follow_up("C"), 200, "{}")
      .with(&follow_up("D"), 200, &thread(&[comment("D", &[])]));

    let (result, recorder, session) = archive(fetcher, true).await;

    result.unwrap();

    assert_eq!(recorder.comments, emitted(&[("D", 0), ("E", 0)]));
    assert_eq!(session.calls().len(), 3);
  }

  #[tokio::test]
  async fn load_more_fetches_each_collapsed_sibling() {
    let fetcher = FakeFetcher::default()
      .with(
        &root(),
        200,
        &thread(&[
          comment("A", &[]),
          load_more("B", &["B", "C", "D"]),
          comment("E", &[]),
        ]),
      )
      .with(&follow_up("B"), 200, &thread(&[comment("B", &[comment("B1", &[])])]))
      .with(&follow_up("C"), 200, &thread(&[comment("C", &[])]))
      .with(&follow_up("D"), 200, &thread(&[comment("D", &[])]));

    let (result, recorder, session) = archive(fetcher, true).await;

    result.unwrap();

    assert_eq!(
      recorder.comments,
      emitted(&[
        ("A", 0),
        ("B", 0),
        ("B1", 1),
        ("C", 0),
        ("D", 0),
        ("E", 0),
      ])
    );

    assert_eq!(
      session
        .calls()
        .iter()
        .map(|call| call.url.clone())
        .collect::<Vec<_>>(),
      vec![root(), follow_up("B"), follow_up("C"), follow_up("D")]
    );
  }

  #[tokio::test]
  async fn single_load_more_fetches_by_node_id() {
    let fetcher = FakeFetcher::default()
      .with(&root(), 200, &thread(&[load_more("X", &["Y"])]))
      .with(&follow_up("X"), 200, &thread(&[comment("X", &[])]));

    let (result, recorder, session) = archive(fetcher, true).await;

    result.unwrap();

    assert_eq!(recorder.comments, emitted(&[("X", 0)]));
    assert_eq!(session.calls().len(), 2);
    assert_eq!(session.calls()[1].url, follow_up("X"));
  }

  #[tokio::test]
  async fn shell_comment_is_resolved_like_load_more() {
    let shell = json!({ "kind": "t1", "data": { "id": "S" } });

    let fetcher = FakeFetcher::default()
      .with(&root(), 200, &thread(&[comment("A", &[shell])]))
      .with(&follow_up("S"), 200, &thread(&[comment("S", &[])]));

    let (result, recorder, _) = archive(fetcher, true).await;

    result.unwrap();

    assert_eq!(recorder.comments, emitted(&[("A", 0), ("S", 1)]));
  }

  #[tokio::test]
  async fn continuation_walks_parent_replies_below_parent() {
    let fetcher = FakeFetcher::default()
      .with(
        &root(),
        200,
        &thread(&[
          comment("A", &[comment("B", &[continuation("B")])]),
          comment("Z", &[]),
        ]),
      )
      .with(
        &follow_up("B"),
        200,
        &thread(&[comment("B", &[comment("C", &[comment("D", &[])])])]),
      );

    let (result, recorder, session) = archive(fetcher, true).await;

    result.unwrap();

    assert_eq!(
      recorder.comments,
      emitted(&[("A", 0), ("B", 1), ("C", 2), ("D", 3), ("Z", 0)])
    );
    assert_eq!(session.calls().len(), 2);
    assert_eq!(session.stats().continuations, 1);
  }

  #[tokio::test]
  async fn placeholders_are_skipped_without_fetch_all() {
    let fetcher = FakeFetcher::default().with(
      &root(),
      200,
      &thread(&[
        comment("A", &[continuation("A")]),
        load_more("B", &["B", "C"]),
        load_more("D", &["D"]),
      ]),
    );

    let (result, recorder, session) = archive(fetcher, false).await;

    result.unwrap();

    assert_eq!(recorder.comments, emitted(&[("A", 0)]));
    assert_eq!(session.calls().len(), 1);

    let stats = session.stats();

    assert_eq!(stats.skipped_continuations, 1);
    assert_eq!(stats.skipped_load_more, 2);
    assert_eq!(stats.resolved, 1);
  }

  #[tokio::test]
  async fn repeated_placeholder_is_fetched_once() {
    let fetcher = FakeFetcher::default()
      .with(
        &root(),
        200,
        &thread(&[load_more("C", &["C"]), load_more("C", &["C"])]),
      )
      .with(&follow_up("C"), 200, &thread(&[comment("C", &[])]));

    let (result, recorder, session) = archive(fetcher, true).await;

    result.unwrap();

    assert_eq!(recorder.comments, emitted(&[("C", 0)]));
    assert_eq!(session.calls().len(), 2);
  }

  #[tokio::test]
  async fn root_failure_is_fatal() {
    let fetcher = FakeFetcher::default().with(&root(), 404, "missing");

    let (result, recorder, session) = archive(fetcher, true).await;

    assert!(result.is_err());
    assert!(recorder.posts.is_empty());
    assert_eq!(session.calls().len(), 1);
  }

  #[tokio::test]
  async fn walk_counts_invocations_and_resolved_comments() {
    let fetcher = FakeFetcher::default().with(
      &root(),
      200,
      &thread(&[comment("A", &[comment("B", &[])]), comment("C", &[])]),
    );

    let (result, _, session) = archive(fetcher, false).await;

    result.unwrap();

    assert_eq!(session.stats().resolved, 3);
    assert_eq!(session.stats().walks, 4);
  }

  #[derive(Clone, Default)]
  struct CapturedLog(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

  impl CapturedLog {
    fn text(&self) -> String {
      String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
  }

  impl Write for CapturedLog {
    fn flush(&mut self) -> io::Result<()> {
      Ok(())
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
      self.0.lock().unwrap().extend_from_slice(buf);
      Ok(buf.len())
    }
  }

  #[test]
  fn thread_base_strips_json_suffix() {
    assert_eq!(thread_base("https://x/comments/abc.json"), "https://x/comments/abc");
    assert_eq!(thread_base("https://x/comments/abc/"), "https://x/comments/abc/");
  }

  #[tokio::test]
  async fn json_thread_url_shares_base_with_follow_ups() {
    let fetcher = FakeFetcher::default()
      .with(&root(), 200, &thread(&[load_more("C", &["C"])]))
      .with(&follow_up("C"), 200, &thread(&[comment("C", &[])]));

    let mut session = Session::new(fetcher);
    let mut recorder = Recorder::default();

    Walker::new(
      &mut session,
      &mut recorder,
      "https://x/comments/abc.json",
      true,
    )
    .archive()
    .await
    .unwrap();

    assert_eq!(
      session
        .calls()
        .iter()
        .map(|call| call.url.clone())
        .collect::<Vec<_>>(),
      vec![
        "https://x/comments/abc.json?limit=500&sort=top".to_string(),
        "https://x/comments/abc/C.json?limit=500&sort=top".to_string(),
      ]
    );

    assert_eq!(recorder.comments, emitted(&[("C", 0)]));
  }

  #[tokio::test]
  async fn failed_continuation_keeps_later_siblings() {
    let fetcher = FakeFetcher::default().with(
      &root(),
      200,
      &thread(&[comment("A", &[continuation("A")]), comment("Z", &[])]),
    );

    let (result, recorder, session) = archive(fetcher, true).await;

    result.unwrap();

    assert_eq!(recorder.comments, emitted(&[("A", 0), ("Z", 0)]));
    assert_eq!(session.calls().len(), 2);
    assert_eq!(session.stats().failed_follow_ups, 1);
  }

  #[tokio::test]
  async fn continuation_without_parent_comment_is_skipped() {
    let cases = [
      thread(&[]),
      thread(&[load_more("A", &["A"])]),
    ];

    for body in cases {
      let fetcher = FakeFetcher::default()
        .with(
          &root(),
          200,
          &thread(&[comment("A", &[continuation("A")]), comment("Z", &[])]),
        )
        .with(&follow_up("A"), 200, &body);

      let (result, recorder, session) = archive(fetcher, true).await;

      result.unwrap();

      assert_eq!(recorder.comments, emitted(&[("A", 0), ("Z", 0)]));
      assert_eq!(session.calls().len(), 2);
      assert_eq!(session.stats().failed_follow_ups, 1);
    }
  }

  #[tokio::test]
  async fn placeholder_without_id_makes_no_request() {
    let fetcher = FakeFetcher::default().with(
      &root(),
      200,
      &thread(&[
        json!({ "kind": "more", "data": { "id": "", "children": [] } }),
        comment("Z", &[]),
      ]),
    );

    let (result, recorder, session) = archive(fetcher, true).await;

    result.unwrap();

    assert_eq!(recorder.comments, emitted(&[("Z", 0)]));
    assert_eq!(session.calls().len(), 1);
    assert_eq!(session.stats().failed_follow_ups, 1);
  }

  #[tokio::test]
  async fn root_failure_still_reports_call_log() {
    let log = CapturedLog::default();

    let writer = log.clone();

    let subscriber = tracing_subscriber::fmt()
      .with_max_level(tracing::Level::DEBUG)
      .without_time()
      .with_ansi(false)
      .with_writer(move || writer.clone())
      .finish();

    let _guard = tracing::subscriber::set_default(subscriber);

    let fetcher = FakeFetcher::default().with(&root(), 503, "down");

    let (result, _, _) = archive(fetcher, true).await;

    assert!(result.is_err());

    let text = log.text();

    assert!(text.contains("run summary"), "{text}");
    assert!(text.contains("http call"), "{text}");
    assert!(text.contains(&root()), "{text}");
  }
}
