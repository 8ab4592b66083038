use serde::{Deserialize, Serialize};

use crate::*;

/// Color of a block, an index below the configured block type count.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockType(pub u8);

impl BlockType {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A block together with the grid position it currently occupies.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub x: Coord,
    pub y: Coord,
    pub kind: BlockType,
}

impl Block {
    pub const fn new((x, y): Coord2, kind: BlockType) -> Self {
        Self { x, y, kind }
    }

    pub const fn coords(&self) -> Coord2 {
        (self.x, self.y)
    }
}
