use std::fmt;

use blockpop_core::{BlockType, Snapshot};

/// One letter per type, so the host refuses more types than the alphabet holds.
pub const MAX_BLOCK_TYPES: u8 = 26;

fn glyph(kind: BlockType) -> char {
    if kind.0 < MAX_BLOCK_TYPES {
        char::from(b'A' + kind.0)
    } else {
        '?'
    }
}

/// Plain text board: one letter per block type, `.` for an empty cell.
pub struct Board<'a>(pub &'a Snapshot);

impl fmt::Display for Board<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.0;
        let (width, height) = snapshot.size;

        write!(f, "   ")?;
        for x in 0..width {
            write!(f, "{x:>3}")?;
        }
        writeln!(f)?;

        for y in 0..height {
            write!(f, "{y:>3}")?;
            for x in 0..width {
                let glyph = match snapshot.kind_at((x, y)) {
                    Some(kind) => glyph(kind),
                    None => '.',
                };
                write!(f, "{glyph:>3}")?;
            }
            writeln!(f)?;
        }

        writeln!(
            f,
            "score {}  moves {}",
            snapshot.score, snapshot.moves_remaining
        )
    }
}
