use {super::*, tracing::metadata::LevelFilter};

/// Diagnostics go to stderr so stdout carries only the outline. Warnings are
/// always shown; debug output only when asked for.
pub(crate) fn init(debug: bool) {
  let level = if debug {
    LevelFilter::DEBUG
  } else {
    LevelFilter::WARN
  };

  let _ = tracing_subscriber::fmt()
    .with_max_level(level)
    .without_time()
    .with_target(false)
    .with_ansi(io::stderr().is_terminal())
    .with_writer(io::stderr)
    .try_init();
}
