use std::{
    io::{self, Write},
    path::Path,
};

use anyhow::Context;
use chunks_slices::{
    commands::{self, Command, HELP_TEXT},
    stream::{self, Format, StreamOptions},
    Mode, WindowSize,
};
use clap::{command, Arg, ArgMatches};
use itertools::Itertools;
use tracing_subscriber::EnvFilter;

fn cli() -> clap::Command<'static> {
    command!()
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            clap::Command::new("stream")
                .about("Windows over the lines of a file (or stdin)")
                .allow_negative_numbers(true)
                .arg(
                    Arg::new("mode")
                        .required(true)
                        .possible_values(["chunks", "slices"]),
                )
                .arg(
                    Arg::new("size")
                        .required(true)
                        .help("window size, a positive integer"),
                )
                .arg(
                    Arg::new("input")
                        .short('i')
                        .long("input")
                        .takes_value(true)
                        .value_name("PATH")
                        .help("read from this file instead of stdin"),
                )
                .arg(
                    Arg::new("words")
                        .short('w')
                        .long("words")
                        .help("window over whitespace separated words instead of lines"),
                )
                .arg(
                    Arg::new("format")
                        .short('f')
                        .long("format")
                        .takes_value(true)
                        .possible_values(["tuple", "json"])
                        .default_value("tuple"),
                ),
        )
        .subcommand(
            clap::Command::new("eval")
                .about("Evaluates a single command, e.g. `chunks [1, 2, 3] 2`")
                .arg(
                    Arg::new("command")
                        .required(true)
                        .multiple_values(true)
                        .allow_hyphen_values(true),
                ),
        )
        .subcommand(clap::Command::new("repl").about("Evaluates commands read from stdin"))
}

fn run_stream(matches: &ArgMatches) -> anyhow::Result<()> {
    let mode: Mode = matches.value_of("mode").context("mode is required")?.parse()?;
    let size: WindowSize = matches
        .value_of("size")
        .context("size is required")?
        .parse()?;
    let format: Format = matches
        .value_of("format")
        .context("format has a default")?
        .parse()?;
    let options = StreamOptions {
        mode,
        size,
        words: matches.is_present("words"),
        format,
    };
    let input = stream::open_input(matches.value_of("input").map(Path::new))
        .context("failed to open input")?;
    stream::stream(input, io::stdout().lock(), options)?;
    Ok(())
}

fn run_eval(matches: &ArgMatches) -> anyhow::Result<()> {
    let line = matches
        .values_of("command")
        .context("command is required")?
        .join(" ");
    let mut stdout = io::stdout().lock();
    match line.parse::<Command>()? {
        Command::Eval(mode, args) => {
            commands::evaluate(mode, args, &mut stdout)?;
        }
        Command::Help => writeln!(stdout, "{HELP_TEXT}")?,
        Command::Quit | Command::Nothing => {}
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let matches = cli().get_matches();
    match matches.subcommand() {
        Some(("stream", matches)) => run_stream(matches),
        Some(("eval", matches)) => run_eval(matches),
        Some(("repl", _)) => {
            println!("{HELP_TEXT}");
            commands::session(io::stdin().lock(), io::stdout().lock(), true)?;
            Ok(())
        }
        _ => anyhow::bail!("unknown subcommand"),
    }
}
