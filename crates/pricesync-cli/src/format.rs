/// Output helpers shared by the subcommands.
///
/// Human output goes to stdout as aligned `key: value` lines; JSON output is
/// a single pretty-printed document. Log lines go to stderr through the
/// tracing subscriber installed in `main`, colored only when
/// [`colors_enabled`] allows it.
use std::io::{IsTerminal as _, Write};

use serde::Serialize;

use crate::error::CliError;

// ---------------------------------------------------------------------------
// Color support detection
// ---------------------------------------------------------------------------

/// Returns `true` if ANSI color codes should be emitted to stderr.
///
/// Colors are disabled when `no_color_flag` is set, when the `NO_COLOR`
/// environment variable is present, or when stderr is not a TTY.
pub fn colors_enabled(no_color_flag: bool) -> bool {
    if no_color_flag {
        return false;
    }
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    std::io::stderr().is_terminal()
}

// ---------------------------------------------------------------------------
// Writers
// ---------------------------------------------------------------------------

/// Serializes `value` as pretty JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize + ?Sized>(w: &mut W, value: &T) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
    writeln!(w, "{json}")
}

/// Runs `print` against a locked stdout, mapping write failures to
/// [`CliError::IoError`].
pub fn to_stdout<F>(print: F) -> Result<(), CliError>
where
    F: FnOnce(&mut std::io::StdoutLock<'static>) -> std::io::Result<()>,
{
    let mut out = std::io::stdout().lock();
    print(&mut out)
        .and_then(|()| out.flush())
        .map_err(|e| CliError::IoError {
            source: "stdout".to_owned(),
            detail: e.to_string(),
        })
}

/// Formats a price with two decimals.
pub fn price(value: f64) -> String {
    format!("{value:.2}")
}

/// Formats a price difference with an explicit sign.
pub fn signed(value: f64) -> String {
    format!("{value:+.2}")
}

/// Renders a location tag for display; the empty tag shows as `(empty)`.
pub fn tag(location: &str) -> &str {
    if location.is_empty() {
        "(empty)"
    } else {
        location
    }
}
