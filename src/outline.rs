use super::*;

/// Renders a thread as an org-mode outline: the post is the level-one
/// heading and each comment sits one level below its parent.
pub(crate) struct Outline<W> {
  width: usize,
  writer: W,
}

impl<W: Write> Outline<W> {
  /// Org drops one comma from a line inside a source block that starts with
  /// `*` or `#+` after any commas.
  fn body(&mut self, text: &str) -> io::Result<()> {
    writeln!(self.writer, "#+BEGIN_SRC markdown")?;

    for line in wrap_paragraphs(&decode_entities(text), self.width) {
      let unescaped = line.trim_start_matches(',');

      if unescaped.starts_with('*') || unescaped.starts_with("#+") {
        writeln!(self.writer, ",{line}")?;
      } else {
        writeln!(self.writer, "{line}")?;
      }
    }

    writeln!(self.writer, "#+END_SRC")
  }

  fn drawer(&mut self, properties: &[(&str, String)]) -> io::Result<()> {
    writeln!(self.writer, ":PROPERTIES:")?;

    for (name, value) in properties {
      writeln!(self.writer, ":{name}: {value}")?;
    }

    writeln!(self.writer, ":END:")
  }

  pub(crate) fn finish(mut self) -> io::Result<W> {
    self.writer.flush()?;
    Ok(self.writer)
  }

  fn heading(&mut self, level: usize, title: &str) -> io::Result<()> {
    let title = title.split_whitespace().collect::<Vec<_>>().join(" ");
    writeln!(self.writer, "{} {title}", "*".repeat(level))
  }

  pub(crate) fn new(writer: W, width: usize) -> Self {
    Self {
      width: width.max(1),
      writer,
    }
  }
}

impl<W: Write> Sink for Outline<W> {
  fn comment(&mut self, comment: &Comment, depth: usize) -> Result {
    self.heading(depth + 2, &comment.header())?;

    let mut properties = vec![
      ("ID", comment.id.clone()),
      ("AUTHOR", comment.author.clone()),
      ("PERMALINK", comment.permalink()),
      ("SCORE", comment.score.to_string()),
      ("UPS", comment.ups.to_string()),
      ("DOWNS", comment.downs.to_string()),
      ("CREATED", format_timestamp(comment.created)),
    ];

    match comment.edited {
      Edited::At(time) => properties.push(("EDITED", format_timestamp(time))),
      Edited::Unknown => properties.push(("EDITED", "t".to_string())),
      Edited::Never => {}
    }

    if comment.stickied {
      properties.push(("STICKIED", "t".to_string()));
    }

    if comment.controversiality > 0 {
      properties.push(("CONTROVERSIALITY", comment.controversiality.to_string()));
    }

    if let Some(flair) = &comment.author_flair_text {
      properties.push(("FLAIR", flair.clone()));
    }

    self.drawer(&properties)?;

    self.body(&comment.body)?;

    writeln!(self.writer)?;

    Ok(())
  }

  fn post(&mut self, post: &Post) -> Result {
    self.heading(1, &decode_entities(&post.title))?;

    let mut properties = vec![
      ("AUTHOR", post.author.clone()),
      ("SUBREDDIT", format!("r/{}", post.subreddit)),
      ("PERMALINK", post.permalink()),
      ("CREATED", format_timestamp(post.created_utc)),
      ("SCORE", post.score.to_string()),
      ("UPS", post.ups.to_string()),
      ("DOWNS", post.downs.to_string()),
    ];

    if let Some(ratio) = post.upvote_ratio {
      properties.push(("UPVOTE_RATIO", ratio.to_string()));
    }

    properties.push(("COMMENTS", post.num_comments.to_string()));

    if let Some(domain) = post.domain.as_ref().filter(|d| !d.is_empty()) {
      properties.push(("DOMAIN", domain.clone()));
    }

    if let Some(flair) = post
      .link_flair_text
      .as_ref()
      .filter(|flair| !flair.trim().is_empty())
    {
      properties.push(("FLAIR", flair.clone()));
    }

    if post.over_18 {
      properties.push(("NSFW", "t".to_string()));
    }

    self.drawer(&properties)?;

    if let Some(link) = post.link() {
      writeln!(self.writer, "[[{link}]]")?;
    }

    if let Some(text) = post.self_text() {
      self.body(text)?;
    }

    writeln!(self.writer)?;

    Ok(())
  }
}
