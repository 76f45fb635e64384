use super::*;

/// A post and its top-level comment forest, as returned by one thread fetch.
#[derive(Clone, Debug)]
pub(crate) struct Thread {
  pub(crate) forest: Vec<RawNode>,
  pub(crate) post: Post,
}

impl Thread {
  /// Expects `[post listing, comment listing]`, with exactly one post.
  /// Replies nested inside the comments are left unclassified.
  pub(crate) fn decode(bytes: &[u8]) -> Result<Self, Error> {
    let (posts, comments) =
      serde_json::from_slice::<(Listing<Thing<Post>>, Listing<RawNode>)>(bytes)
        .map_err(Error::malformed)?;

    let mut posts = posts.data.children.into_iter();

    let (Some(post), None) = (posts.next(), posts.next()) else {
      return Err(Error::malformed(
        "expected exactly one post in the first listing",
      ));
    };

    Ok(Self {
      forest: comments.data.children,
      post: post.data,
    })
  }
}
