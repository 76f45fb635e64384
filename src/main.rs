use {
  anyhow::Context,
  arguments::Arguments,
  clap::Parser,
  client::Client,
  comment::{Comment, Edited},
  comment_node::CommentNode,
  config::Config,
  crossterm::style::Stylize,
  error::Error,
  fetch::{Fetch, Reply},
  futures::future::{FutureExt, LocalBoxFuture},
  listing::{Listing, Thing},
  outline::Outline,
  post::Post,
  raw_node::RawNode,
  serde::{
    Deserialize, Deserializer,
    de::{self, Unexpected},
  },
  serde_json::Value,
  session::Session,
  sink::Sink,
  stats::Stats,
  std::{
    backtrace::BacktraceStatus,
    collections::HashSet,
    env,
    io::{self, BufWriter, IsTerminal, Write},
    process,
    time::{Duration, Instant},
  },
  thread::Thread,
  tracing::{debug, warn},
  utils::{
    decode_entities, deserialize_edited, deserialize_replies, format_timestamp,
    is_truthy, wrap_paragraphs,
  },
  walker::Walker,
};

mod arguments;
mod client;
mod comment;
mod comment_node;
mod config;
mod error;
mod fetch;
mod listing;
mod logging;
mod outline;
mod post;
mod raw_node;
mod session;
mod sink;
mod stats;
mod thread;
mod utils;
mod walker;

const DEFAULT_WRAP_WIDTH: usize = 80;

const FOLLOW_UP_QUERY: &str = ".json?limit=500&sort=top";

const SITE_URL: &str = "https://www.reddit.com";

type Result<T = (), E = anyhow::Error> = std::result::Result<T, E>;

async fn run() -> Result {
  let arguments = Arguments::parse();

  if arguments.version {
    println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    return Ok(());
  }

  let config = Config::load(arguments)?;

  logging::init(config.debug);

  let client = Client::new().context("could not build HTTP client")?;

  let mut session = Session::new(client);

  let stdout = io::stdout();

  let mut outline = Outline::new(BufWriter::new(stdout.lock()), config.width);

  Walker::new(&mut session, &mut outline, &config.url, config.fetch_all)
    .archive()
    .await?;

  outline.finish().context("could not write outline")?;

  Ok(())
}

#[tokio::main]
async fn main() {
  if let Err(error) = run().await {
    let use_color = io::stderr().is_terminal();

    if use_color {
      eprintln!("{} {error}", "error:".bold().red());
    } else {
      eprintln!("error: {error}");
    }

    for (i, error) in error.chain().skip(1).enumerate() {
      if i == 0 {
        eprintln!();

        if use_color {
          eprintln!("{}", "because:".bold().red());
        } else {
          eprintln!("because:");
        }
      }

      if use_color {
        eprintln!("{} {error}", "-".bold().red());
      } else {
        eprintln!("- {error}");
      }
    }

    let backtrace = error.backtrace();

    if backtrace.status() == BacktraceStatus::Captured {
      if use_color {
        eprintln!("{}", "backtrace:".bold().red());
      } else {
        eprintln!("backtrace:");
      }

      eprintln!("{backtrace}");
    }

    process::exit(1);
  }
}
