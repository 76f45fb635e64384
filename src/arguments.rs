use super::*;

#[derive(Debug, Parser)]
#[command(
  name = "thread-outline",
  about = "Archive a reddit thread and its comments as an org-mode outline",
  disable_version_flag = true
)]
pub(crate) struct Arguments {
  #[arg(
    short,
    long,
    help = "Fetch every collapsed and continued comment (also THREAD_OUTLINE_FETCH_ALL)"
  )]
  pub(crate) all: bool,
  #[arg(
    short,
    long,
    help = "Print diagnostics to stderr (also THREAD_OUTLINE_DEBUG)"
  )]
  pub(crate) debug: bool,
  #[arg(help = "Thread URL, e.g. https://www.reddit.com/r/rust/comments/abc123/title")]
  pub(crate) url: Option<String>,
  /// Print version
  #[arg(short = 'v', long)]
  pub(crate) version: bool,
  /// Column at which comment bodies are wrapped
  #[arg(short, long, default_value_t = DEFAULT_WRAP_WIDTH)]
  pub(crate) width: usize,
}
