//! Interactive query loop over a built index.

use engine::{query, Error, InvertedIndex, Strategy};
use std::io::{self, BufRead, Write};
use std::time::Instant;

const HELP: &str = "\
commands:
  /set_strategy <boolean|tfidf>   choose how queries are evaluated
  /set_max_results <N>            return at most N documents (N >= 1)
  /show_options                   print the current settings
  /help                           print this message
  /quit                           leave the shell
anything else is run as a query";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    pub strategy: Strategy,
    pub max_results: usize,
}

impl Default for Options {
    fn default() -> Self { Self { strategy: Strategy::Boolean, max_results: 10 } }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Command<'a> {
    SetStrategy(Strategy),
    SetMaxResults(usize),
    ShowOptions,
    Help,
    Quit,
    Query(&'a str),
}

/// Parse one input line. `None` for blank lines; `Some(Err(msg))` for a bad command.
pub fn parse_command(line: &str) -> Option<Result<Command<'_>, String>> {
    let mut args = line.split_whitespace();
    let head = args.next()?;
    let cmd = match head {
        "/set_strategy" => match args.next() {
            None => Err("missing argument".to_string()),
            Some(name) => name
                .parse::<Strategy>()
                .map(Command::SetStrategy)
                .map_err(|_| "unrecognised strategy".to_string()),
        },
        "/set_max_results" => match args.next() {
            None => Err("missing argument".to_string()),
            Some(n) => match n.parse::<i64>() {
                Ok(n) if n >= 1 => Ok(Command::SetMaxResults(n as usize)),
                Ok(_) => Err("you should get at least 1 result!".to_string()),
                Err(_) => Err("arg should be an integer".to_string()),
            },
        },
        "/show_options" => Ok(Command::ShowOptions),
        "/help" => Ok(Command::Help),
        "/quit" | "/exit" => Ok(Command::Quit),
        _ => Ok(Command::Query(line.trim())),
    };
    Some(cmd)
}

/// Read commands from `input` until EOF or `/quit`, writing results to `out`.
pub fn run<R: BufRead, W: Write>(index: &InvertedIndex, mut options: Options, input: R, mut out: W) -> io::Result<Options> {
    write!(out, "> ")?;
    out.flush()?;
    for line in input.lines() {
        let line = line?;
        match parse_command(&line) {
            None => {}
            Some(Err(msg)) => writeln!(out, "error: {msg}")?,
            Some(Ok(Command::SetStrategy(s))) => options.strategy = s,
            Some(Ok(Command::SetMaxResults(n))) => options.max_results = n,
            Some(Ok(Command::ShowOptions)) => {
                writeln!(out, "strategy: {}, max_results: {}", options.strategy, options.max_results)?
            }
            Some(Ok(Command::Help)) => writeln!(out, "{HELP}")?,
            Some(Ok(Command::Quit)) => return Ok(options),
            Some(Ok(Command::Query(q))) => {
                let start = Instant::now();
                match query(index, options.strategy, q, options.max_results) {
                    Ok(ids) => {
                        for id in ids {
                            writeln!(out, "{id}")?;
                        }
                        writeln!(out, "(query took {:.4} seconds)", start.elapsed().as_secs_f64())?;
                    }
                    Err(e @ Error::InvalidQuery(_)) => {
                        writeln!(out, "error: {e}; should be: word OP word OP ..")?
                    }
                    Err(e) => writeln!(out, "error: {e}")?,
                }
            }
        }
        write!(out, "> ")?;
        out.flush()?;
    }
    writeln!(out)?;
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_settings() {
        assert_eq!(parse_command("/set_strategy tfidf"), Some(Ok(Command::SetStrategy(Strategy::Tfidf))));
        assert_eq!(parse_command("/set_max_results 3"), Some(Ok(Command::SetMaxResults(3))));
        assert_eq!(parse_command("  /show_options "), Some(Ok(Command::ShowOptions)));
        assert_eq!(parse_command("/quit"), Some(Ok(Command::Quit)));
        assert_eq!(parse_command("   "), None);
    }

    #[test]
    fn reports_bad_arguments() {
        let err = |line| parse_command(line).unwrap().unwrap_err();
        assert_eq!(err("/set_strategy"), "missing argument");
        assert_eq!(err("/set_strategy bm25"), "unrecognised strategy");
        assert_eq!(err("/set_max_results"), "missing argument");
        assert_eq!(err("/set_max_results 0"), "you should get at least 1 result!");
        assert_eq!(err("/set_max_results ten"), "arg should be an integer");
    }

    #[test]
    fn everything_else_is_a_query() {
        assert_eq!(parse_command(" religion OR science "), Some(Ok(Command::Query("religion OR science"))));
    }
}
