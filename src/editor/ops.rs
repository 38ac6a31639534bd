use color_eyre::{
    eyre::{eyre, WrapErr},
    Report,
};
use std::{fmt, str::FromStr};

///
/// One edit taken from the command line
///
/// Written as `insert:POS:TEXT`, `delete:POS:N`, `truncate:POS` or `at:POS`.
/// The first letter of each name works too.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditOp {
    Insert { pos: usize, text: Vec<u8> },
    Delete { pos: usize, len: usize },
    Truncate { pos: usize },
    At { pos: usize },
}

impl EditOp {
    pub fn position(&self) -> usize {
        match self {
            EditOp::Insert { pos, .. }
            | EditOp::Delete { pos, .. }
            | EditOp::Truncate { pos }
            | EditOp::At { pos } => *pos,
        }
    }
}

impl FromStr for EditOp {
    type Err = Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, args) = s
            .split_once(':')
            .ok_or_else(|| eyre!("Expected OP:ARGS, got '{}'", s))?;

        match name {
            "insert" | "i" => {
                let (pos, text) = args
                    .split_once(':')
                    .ok_or_else(|| eyre!("insert takes POS:TEXT, got '{}'", args))?;

                Ok(EditOp::Insert {
                    pos: parse_position(pos)?,
                    text: unescape(text).into_bytes(),
                })
            }
            "delete" | "d" => {
                let (pos, len) = args
                    .split_once(':')
                    .ok_or_else(|| eyre!("delete takes POS:N, got '{}'", args))?;

                Ok(EditOp::Delete {
                    pos: parse_position(pos)?,
                    len: len
                        .trim()
                        .parse()
                        .wrap_err_with(|| format!("'{}' is not a byte count", len))?,
                })
            }
            "truncate" | "t" => Ok(EditOp::Truncate {
                pos: parse_position(args)?,
            }),
            "at" | "a" => Ok(EditOp::At {
                pos: parse_position(args)?,
            }),
            _ => Err(eyre!("Unknown edit operation '{}'", name)),
        }
    }
}

impl fmt::Display for EditOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditOp::Insert { pos, text } => {
                write!(f, "insert:{}:{}", pos, String::from_utf8_lossy(text).escape_debug())
            }
            EditOp::Delete { pos, len } => write!(f, "delete:{}:{}", pos, len),
            EditOp::Truncate { pos } => write!(f, "truncate:{}", pos),
            EditOp::At { pos } => write!(f, "at:{}", pos),
        }
    }
}

fn parse_position(s: &str) -> Result<usize, Report> {
    let pos: i64 = s
        .trim()
        .parse()
        .wrap_err_with(|| format!("'{}' is not a position", s))?;

    Ok(ropebuf::position(pos)?)
}

/// Handles `\n`, `\t` and `\\`. Any other escape is kept as written.
fn unescape(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }

        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('\\') => result.push('\\'),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }

    result
}
