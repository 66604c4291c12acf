use anyhow::{Context, bail};
use moyun_core::{Coord, ItemId, Selection};

/// One line of player input.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Tap at a point in board coordinates.
    Tap { x: f32, y: f32 },
    Select(Selection),
    Hint,
    Clear,
    Show,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> anyhow::Result<Self> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(Self::Show);
        };
        let args: Vec<&str> = words.collect();
        let command = match (verb, args.as_slice()) {
            ("tap" | "t", [x, y]) => Self::Tap {
                x: x.parse().context("x must be a number")?,
                y: y.parse().context("y must be a number")?,
            },
            ("cell" | "c", [row, col]) => {
                let row: Coord = row.parse().context("row must be a small integer")?;
                let col: Coord = col.parse().context("col must be a small integer")?;
                Self::Select(Selection::Cell((row, col)))
            }
            ("item" | "i", [id]) => {
                let id: ItemId = id.parse().context("item id must be an integer")?;
                Self::Select(Selection::Item(id))
            }
            ("hint" | "h", []) => Self::Hint,
            ("clear", []) => Self::Clear,
            ("show" | "s", []) => Self::Show,
            ("quit" | "q", []) => Self::Quit,
            _ => bail!("unknown command `{}`", line.trim()),
        };
        Ok(command)
    }
}

pub const HELP: &str = "commands: tap X Y | cell ROW COL | item ID | hint | clear | show | quit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(
            Command::parse("tap 10 20.5").unwrap(),
            Command::Tap { x: 10., y: 20.5 }
        );
        assert_eq!(
            Command::parse("cell 1 2").unwrap(),
            Command::Select(Selection::Cell((1, 2)))
        );
        assert_eq!(
            Command::parse("  item 7 ").unwrap(),
            Command::Select(Selection::Item(7))
        );
        assert_eq!(Command::parse("q").unwrap(), Command::Quit);
        assert_eq!(Command::parse("").unwrap(), Command::Show);
    }

    #[test]
    fn rejects_garbage() {
        assert!(Command::parse("tap 1").is_err());
        assert!(Command::parse("cell -1 0").is_err());
        assert!(Command::parse("dance").is_err());
    }
}
