use std::{
    fs::File,
    io::{self, BufRead, BufReader, Write},
    path::Path,
    str::FromStr,
};

use itertools::{Either, Itertools};
use tracing::{debug, info};

use crate::{
    error::{WindowError, WindowResult},
    size::WindowSize,
    window::Window,
    windowing::{Mode, TryWindowIterator},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `(a, b, c)`
    Tuple,
    /// `["a","b","c"]`
    Json,
}

impl FromStr for Format {
    type Err = WindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tuple" => Ok(Self::Tuple),
            "json" => Ok(Self::Json),
            other => Err(WindowError::Argument(format!("unknown format {other:?}"))),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct StreamOptions {
    pub mode: Mode,
    pub size: WindowSize,
    /// Split lines into whitespace separated words.
    pub words: bool,
    pub format: Format,
}

/// A file, or stdin when no path is given.
pub fn open_input(path: Option<&Path>) -> WindowResult<Box<dyn BufRead>> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "reading input file");
            Ok(Box::new(BufReader::new(File::open(path)?)))
        }
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

fn elements(input: impl BufRead, words: bool) -> impl Iterator<Item = io::Result<String>> {
    let lines = input.lines();
    if words {
        Either::Right(
            lines
                .map_ok(|line| line.split_whitespace().map(String::from).collect_vec())
                .flatten_ok(),
        )
    } else {
        Either::Left(lines)
    }
}

fn write_window(
    out: &mut impl Write,
    window: &Window<String>,
    format: Format,
) -> WindowResult<()> {
    match format {
        Format::Tuple => writeln!(out, "{window}")?,
        Format::Json => {
            serde_json::to_writer(&mut *out, window)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Writes the windows of `input` to `out` as they become available.
///
/// Input is pulled lazily, one window at a time. A read error stops the
/// stream and is returned unchanged after everything before it was written.
pub fn stream(
    input: impl BufRead,
    mut out: impl Write,
    options: StreamOptions,
) -> WindowResult<usize> {
    let windows = TryWindowIterator::new(
        elements(input, options.words),
        options.mode,
        options.size,
    );
    let mut written = 0;
    for window in windows {
        write_window(&mut out, &window?, options.format)?;
        written += 1;
    }
    out.flush()?;
    debug!(written, mode = %options.mode, "stream finished");
    Ok(written)
}
