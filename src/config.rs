use super::*;

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Config {
  pub(crate) debug: bool,
  pub(crate) fetch_all: bool,
  pub(crate) url: String,
  pub(crate) width: usize,
}

impl Config {
  const DEBUG_VAR: &str = "THREAD_OUTLINE_DEBUG";

  const FETCH_ALL_VAR: &str = "THREAD_OUTLINE_FETCH_ALL";

  fn env_flag(name: &str) -> bool {
    env::var(name).is_ok_and(|value| is_truthy(&value))
  }

  /// Flags and environment toggles are combined; either one turns a mode on.
  pub(crate) fn load(arguments: Arguments) -> Result<Self, Error> {
    let url = arguments
      .url
      .map(|url| url.trim().to_string())
      .filter(|url| !url.is_empty())
      .ok_or_else(|| {
        Error::Argument(
          "missing thread URL, usage: thread-outline [OPTIONS] <URL>"
            .to_string(),
        )
      })?;

    Ok(Self {
      debug: arguments.debug || Self::env_flag(Self::DEBUG_VAR),
      fetch_all: arguments.all || Self::env_flag(Self::FETCH_ALL_VAR),
      url,
      width: arguments.width,
    })
  }
}
