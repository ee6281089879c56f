use std::str::FromStr;

use sweepgrid_core::{Coord, Coord2, Difficulty};
use thiserror::Error;

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    Highlight(Coord2),
    Hint,
    /// Restart, optionally switching to another preset.
    NewGame(Option<Difficulty>),
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`, try r/f/c COL ROW, h, n [easy|medium|hard] or q")]
    Unknown(String),
    #[error("`{0}` expects a column and a row")]
    MissingCoords(String),
    #[error("`{0}` is not a valid coordinate")]
    InvalidCoord(String),
    #[error("unexpected trailing input `{0}`")]
    Trailing(String),
    #[error("unknown difficulty `{0}`")]
    UnknownDifficulty(String),
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let verb = words.next().ok_or(ParseCommandError::Empty)?;

        let command = match verb.to_ascii_lowercase().as_str() {
            "r" | "reveal" => Self::Reveal(parse_coords(verb, &mut words)?),
            "f" | "flag" => Self::Flag(parse_coords(verb, &mut words)?),
            "c" | "check" => Self::Highlight(parse_coords(verb, &mut words)?),
            "h" | "hint" => Self::Hint,
            "n" | "new" => match words.next() {
                Some(name) => Self::NewGame(Some(
                    name.parse()
                        .map_err(|_| ParseCommandError::UnknownDifficulty(name.to_owned()))?,
                )),
                None => Self::NewGame(None),
            },
            "q" | "quit" => Self::Quit,
            _ => return Err(ParseCommandError::Unknown(verb.to_owned())),
        };

        match words.next() {
            Some(extra) => Err(ParseCommandError::Trailing(extra.to_owned())),
            None => Ok(command),
        }
    }
}

fn parse_coords<'a>(
    verb: &str,
    words: &mut impl Iterator<Item = &'a str>,
) -> Result<Coord2, ParseCommandError> {
    let mut next = || -> Result<Coord, ParseCommandError> {
        let word = words
            .next()
            .ok_or_else(|| ParseCommandError::MissingCoords(verb.to_owned()))?;
        word.parse()
            .map_err(|_| ParseCommandError::InvalidCoord(word.to_owned()))
    };
    let col = next()?;
    let row = next()?;
    Ok((col, row))
}
