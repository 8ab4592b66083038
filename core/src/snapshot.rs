use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Read-only view of an engine for presentation layers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub size: Coord2,
    pub cells: Array2<Option<BlockType>>,
    pub score: Score,
    pub moves_remaining: MoveCount,
    pub game_over: bool,
    pub busy: bool,
}

impl Snapshot {
    pub fn from_engine<R: Rng>(engine: &Engine<R>) -> Self {
        let grid = engine.grid();
        let size = grid.size();
        let mut cells = Array2::from_elem(size.to_nd_index(), None);

        let (x_end, y_end) = size;
        for x in 0..x_end {
            for y in 0..y_end {
                let coords = (x, y);
                cells[coords.to_nd_index()] = grid.kind_at(coords);
            }
        }

        let session = engine.session();
        Self {
            size,
            cells,
            score: session.score(),
            moves_remaining: session.moves_remaining(),
            game_over: session.is_game_over(),
            busy: engine.is_busy(),
        }
    }

    pub fn kind_at(&self, coords: Coord2) -> Option<BlockType> {
        self.cells.get(coords.to_nd_index()).copied().flatten()
    }
}
