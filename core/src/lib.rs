#![no_std]

extern crate alloc;

use alloc::collections::BTreeSet;
use serde::{Deserialize, Serialize};

pub use block::*;
pub use engine::*;
pub use error::*;
pub use factory::*;
pub use grid::*;
pub use session::*;
pub use snapshot::*;
pub use types::*;

mod block;
mod engine;
mod error;
mod factory;
mod grid;
mod session;
mod snapshot;
mod types;

/// Clusters smaller than this are left alone and cost no move.
pub const MIN_CLUSTER_SIZE: CellCount = 2;

pub const DEFAULT_MOVES: MoveCount = 5;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    pub size: Coord2,
    pub block_types: u8,
}

impl GridConfig {
    pub const fn new_unchecked(size: Coord2, block_types: u8) -> Self {
        Self { size, block_types }
    }

    pub fn new(size: Coord2, block_types: u8) -> Result<Self> {
        let config = Self::new_unchecked(size, block_types);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size.0 == 0 || self.size.1 == 0 || self.block_types == 0 {
            Err(GameError::InvalidDimensions)
        } else {
            Ok(())
        }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::new_unchecked((6, 5), 4)
    }
}

/// Blocks removed by a successful tap.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clearance {
    pub kind: BlockType,
    pub coordinates: BTreeSet<Coord2>,
    pub size: CellCount,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClearOutcome {
    NoOp,
    Cleared(Clearance),
}

impl ClearOutcome {
    pub const fn has_update(&self) -> bool {
        match self {
            Self::NoOp => false,
            Self::Cleared(_) => true,
        }
    }
}
