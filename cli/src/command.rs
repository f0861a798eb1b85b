use std::str::FromStr;

use minesweep_core::{Action, Coord, Coord2};
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  open ROW COL    reveal a cell
  flag ROW COL    place or remove a flag
  click X Y       primary pointer press at pixel X,Y
  rclick X Y      secondary pointer press at pixel X,Y
  new             start a new game
  help            show this message
  quit            leave";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Open(Coord2),
    Flag(Coord2),
    Act(Action),
    New,
    Help,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`, try `help`")]
    Unknown(String),
    #[error("`{0}` takes exactly two numbers")]
    Arity(&'static str),
    #[error("`{0}` is not a valid number")]
    Number(String),
}

fn number<T: FromStr>(raw: &str) -> Result<T, ParseCommandError> {
    raw.parse()
        .map_err(|_| ParseCommandError::Number(raw.to_owned()))
}

fn pair<T: FromStr>(name: &'static str, args: &[&str]) -> Result<(T, T), ParseCommandError> {
    match args {
        [a, b] => Ok((number(a)?, number(b)?)),
        _ => Err(ParseCommandError::Arity(name)),
    }
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(ParseCommandError::Empty);
        };
        let args: Vec<&str> = words.collect();

        Ok(match name.to_ascii_lowercase().as_str() {
            "open" | "o" => Command::Open(pair::<Coord>("open", &args)?),
            "flag" | "f" => Command::Flag(pair::<Coord>("flag", &args)?),
            "click" => {
                let (x, y) = pair("click", &args)?;
                Command::Act(Action::PointerPrimary { x, y })
            }
            "rclick" => {
                let (x, y) = pair("rclick", &args)?;
                Command::Act(Action::PointerSecondary { x, y })
            }
            "new" | "n" => Command::New,
            "help" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Act(Action::Quit),
            _ => return Err(ParseCommandError::Unknown(name.to_owned())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cell_commands() {
        assert_eq!("open 3 4".parse::<Command>(), Ok(Command::Open((3, 4))));
        assert_eq!("  F  -1 0 ".parse::<Command>(), Ok(Command::Flag((-1, 0))));
    }

    #[test]
    fn parses_pointer_commands() {
        assert_eq!(
            "click 65 33".parse::<Command>(),
            Ok(Command::Act(Action::PointerPrimary { x: 65, y: 33 }))
        );
        assert_eq!(
            "rclick -4 10".parse::<Command>(),
            Ok(Command::Act(Action::PointerSecondary { x: -4, y: 10 }))
        );
        assert_eq!("quit".parse::<Command>(), Ok(Command::Act(Action::Quit)));
    }

    #[test]
    fn reports_bad_input() {
        assert_eq!("".parse::<Command>(), Err(ParseCommandError::Empty));
        assert_eq!(
            "dig 1 1".parse::<Command>(),
            Err(ParseCommandError::Unknown("dig".into()))
        );
        assert_eq!(
            "open 1".parse::<Command>(),
            Err(ParseCommandError::Arity("open"))
        );
        assert_eq!(
            "open 1 x".parse::<Command>(),
            Err(ParseCommandError::Number("x".into()))
        );
    }
}
