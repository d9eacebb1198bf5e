use std::io::{BufRead, Write};
use std::str::FromStr;

use serde_json::Value;
use tracing::debug;

use crate::{
    dynamic::make,
    error::{WindowError, WindowResult},
    windowing::Mode,
};

#[derive(PartialEq, Debug)]
pub enum Command {
    Eval(Mode, Vec<Value>),
    Nothing,
    Quit,
    Help,
}

pub const HELP_TEXT: &str = r#"
[ :: chunks & slices :: ]

COMMANDS:
"chunks <iterable> <n>"          -> disjoint windows of n elements, the last one may be shorter
"slices <iterable> <n>"          -> every window of n consecutive elements
"q"                              -> quits the program
"h" or "?" or "help"             -> prints this help message

Arguments are JSON values separated by whitespace. Arrays, strings and
objects (their keys) are iterable:
    chunks [1, 2, 3, 4, 5] 2     -> (1, 2) (3, 4) (5,)
    slices "abcd" 3              -> ("a", "b", "c") ("b", "c", "d")
"#;

fn parse_arguments(i: &str) -> WindowResult<Vec<Value>> {
    Ok(serde_json::Deserializer::from_str(i)
        .into_iter::<Value>()
        .collect::<Result<Vec<_>, _>>()?)
}

fn command_parser(i: &str) -> WindowResult<Command> {
    let i = i.trim();
    let (head, rest) = i.split_once(char::is_whitespace).unwrap_or((i, ""));
    match (head, rest.trim()) {
        ("", _) => Ok(Command::Nothing),
        ("h" | "?" | "help", "") => Ok(Command::Help),
        ("q", "") => Ok(Command::Quit),
        ("chunks" | "slices", arguments) => {
            Ok(Command::Eval(head.parse()?, parse_arguments(arguments)?))
        }
        _ => Err(WindowError::Argument(format!("command not found: {i:?}"))),
    }
}

impl FromStr for Command {
    type Err = WindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        command_parser(s)
    }
}

/// Writes every window of `make(mode, args)`, one per line.
pub fn evaluate(mode: Mode, args: Vec<Value>, out: &mut impl Write) -> WindowResult<usize> {
    let mut written = 0;
    for window in make(mode, args)? {
        writeln!(out, "{window}")?;
        written += 1;
    }
    Ok(written)
}

/// Reads commands line by line until `q` or the end of `input`.
///
/// Command errors are reported on `out` and do not end the session.
pub fn session(mut input: impl BufRead, mut out: impl Write, prompt: bool) -> WindowResult<()> {
    let mut line = String::new();
    loop {
        if prompt {
            write!(out, "\n >> ")?;
            out.flush()?;
        }
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let result = line.parse::<Command>().and_then(|command| match command {
            Command::Quit => Ok(false),
            Command::Help => {
                writeln!(out, "{HELP_TEXT}")?;
                Ok(true)
            }
            Command::Nothing => Ok(true),
            Command::Eval(mode, args) => {
                let written = evaluate(mode, args, &mut out)?;
                debug!(%mode, written, "command evaluated");
                Ok(true)
            }
        });
        match result {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => writeln!(out, " :: [ERR] :: {e}")?,
        }
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod test_command_parsing {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_eval_command() {
        assert_eq!(
            "chunks [1, 2, 3] 2".parse::<Command>().unwrap(),
            Command::Eval(Mode::Chunking, vec![json!([1, 2, 3]), json!(2)])
        );
        assert_eq!(
            "  slices \"ab\"   1 ".parse::<Command>().unwrap(),
            Command::Eval(Mode::Sliding, vec![json!("ab"), json!(1)])
        );
        assert_eq!(
            "slices".parse::<Command>().unwrap(),
            Command::Eval(Mode::Sliding, vec![])
        );
    }

    #[test]
    fn test_quit() {
        assert_eq!("q".parse::<Command>().unwrap(), Command::Quit);
        assert_eq!("".parse::<Command>().unwrap(), Command::Nothing);
        assert_eq!("?".parse::<Command>().unwrap(), Command::Help);
    }

    #[test]
    fn test_bad_commands() {
        assert!("windows [1] 2".parse::<Command>().unwrap_err().is_argument());
        assert!("q now".parse::<Command>().unwrap_err().is_argument());
        assert!(matches!(
            "chunks [1, 2 2".parse::<Command>().unwrap_err(),
            WindowError::Json(_)
        ));
    }

    #[test]
    fn test_session() {
        let input = concat!(
            "chunks [1, 2, 3] 2\n\nslices [1, 2, 3] 5\n",
            "slices [1] 0\nchunks 1\nq\nchunks [1] 1\n",
        );
        let mut out = Vec::new();
        session(input.as_bytes(), &mut out, false).unwrap();
        let out = String::from_utf8(out).unwrap();
        let lines = out.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "(1, 2)");
        assert_eq!(lines[1], "(3,)");
        assert!(lines[2].starts_with(" :: [ERR] :: bad value"));
        assert!(lines[3].starts_with(" :: [ERR] :: bad arguments"));
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_session_ends_with_input() {
        let mut out = Vec::new();
        session("help\n".as_bytes(), &mut out, false).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("COMMANDS:"));
    }
}
