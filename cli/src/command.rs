use std::str::FromStr;

use anyhow::{Context, bail};
use blockpop_core::{Coord, Coord2};

pub const HELP: &str = "Commands: `<x> <y>` tap a block, `r` replay, `h` help, `q` quit";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Tap(Coord2),
    Replay,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(first) = words.next() else {
            bail!("Empty command, {HELP}");
        };

        let command = match first {
            "r" | "replay" => Self::Replay,
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            x => {
                let y = words.next().context("Missing y coordinate")?;
                let x: Coord = x.parse().with_context(|| format!("Bad x coordinate `{x}`"))?;
                let y: Coord = y.parse().with_context(|| format!("Bad y coordinate `{y}`"))?;
                Self::Tap((x, y))
            }
        };

        if words.next().is_some() {
            bail!("Trailing input after `{first}`");
        }
        Ok(command)
    }
}
