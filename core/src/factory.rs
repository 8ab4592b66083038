use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::*;

/// Spawns blocks of a uniformly random type.
///
/// The randomness source is injected so a session can be replayed exactly
/// from its seed.
#[derive(Clone, Debug)]
pub struct BlockFactory<R = SmallRng> {
    block_types: u8,
    rng: R,
}

impl BlockFactory<SmallRng> {
    pub fn from_seed(block_types: u8, seed: u64) -> Result<Self> {
        Self::new(block_types, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> BlockFactory<R> {
    pub fn new(block_types: u8, rng: R) -> Result<Self> {
        if block_types == 0 {
            return Err(GameError::InvalidDimensions);
        }
        Ok(Self { block_types, rng })
    }

    pub fn block_types(&self) -> u8 {
        self.block_types
    }

    pub fn contains(&self, kind: BlockType) -> bool {
        kind.0 < self.block_types
    }

    pub fn random_kind(&mut self) -> BlockType {
        BlockType(self.rng.random_range(0..self.block_types))
    }

    pub fn spawn(&mut self, coords: Coord2) -> Block {
        Block::new(coords, self.random_kind())
    }
}
