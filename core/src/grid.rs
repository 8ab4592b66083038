use alloc::collections::BTreeSet;
use alloc::vec;
use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use rand::Rng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Maximal set of orthogonally connected cells sharing one block type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    kind: BlockType,
    coords: BTreeSet<Coord2>,
}

impl Cluster {
    pub fn kind(&self) -> BlockType {
        self.kind
    }

    pub fn size(&self) -> CellCount {
        // bounded by the cell count of a grid whose axes are `Coord`
        self.coords.len() as CellCount
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        self.coords.contains(&coords)
    }

    /// Member coordinates in `(x, y)` order.
    pub fn coords(&self) -> &BTreeSet<Coord2> {
        &self.coords
    }

    pub fn into_coords(self) -> BTreeSet<Coord2> {
        self.coords
    }
}

/// A surviving block falling from `from_y` to `to_y` within column `x`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveEvent {
    pub x: Coord,
    pub from_y: Coord,
    pub to_y: Coord,
}

/// A fresh block placed into an emptied cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnEvent {
    pub x: Coord,
    pub y: Coord,
    pub kind: BlockType,
}

/// Everything a compaction pass did, in column order, for the host to animate.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefillReport {
    pub moves: Vec<MoveEvent>,
    pub spawns: Vec<SpawnEvent>,
}

impl RefillReport {
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty() && self.spawns.is_empty()
    }
}

#[derive(Clone, Debug)]
pub struct Grid<R = SmallRng> {
    size: Coord2,
    cells: Array2<Option<Block>>,
    factory: BlockFactory<R>,
}

impl<R: Rng> Grid<R> {
    /// Creates a fully populated grid with uniformly random block types.
    pub fn new(config: GridConfig, rng: R) -> Result<Self> {
        config.validate()?;
        let factory = BlockFactory::new(config.block_types, rng)?;
        Self::with_factory(config.size, factory)
    }

    pub fn with_factory(size: Coord2, mut factory: BlockFactory<R>) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidDimensions);
        }
        let cells = Self::populate(size, &mut factory);
        Ok(Self {
            size,
            cells,
            factory,
        })
    }

    /// Builds a grid from a fixed layout indexed `[x, y]`.
    ///
    /// The factory is kept for later refills, so every kind in the layout must
    /// be one it could have spawned itself.
    pub fn from_kinds(kinds: Array2<BlockType>, factory: BlockFactory<R>) -> Result<Self> {
        let (width, height) = kinds.dim();
        let size: Coord2 = (
            width.try_into().map_err(|_| GameError::InvalidDimensions)?,
            height.try_into().map_err(|_| GameError::InvalidDimensions)?,
        );
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidDimensions);
        }
        if kinds.iter().any(|&kind| !factory.contains(kind)) {
            return Err(GameError::InvalidBlockType);
        }

        let cells = Array2::from_shape_fn(kinds.dim(), |(x, y)| {
            Some(Block::new((x as Coord, y as Coord), kinds[[x, y]]))
        });
        Ok(Self {
            size,
            cells,
            factory,
        })
    }

    fn populate(size: Coord2, factory: &mut BlockFactory<R>) -> Array2<Option<Block>> {
        Array2::from_shape_fn(size.to_nd_index(), |(x, y)| {
            Some(factory.spawn((x as Coord, y as Coord)))
        })
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn block_types(&self) -> u8 {
        self.factory.block_types()
    }

    pub fn config(&self) -> GridConfig {
        GridConfig::new_unchecked(self.size, self.factory.block_types())
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.size.0 && coords.1 < self.size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoordinate)
        }
    }

    pub fn block_at(&self, coords: Coord2) -> Option<Block> {
        self.validate_coords(coords).ok().and_then(|coords| self[coords])
    }

    pub fn kind_at(&self, coords: Coord2) -> Option<BlockType> {
        self.block_at(coords).map(|block| block.kind)
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    pub fn iter_blocks(&self) -> impl Iterator<Item = &Block> + '_ {
        self.cells.iter().flatten()
    }

    /// Flood fills from `coords` over orthogonal neighbors of the same type.
    pub fn find_cluster(&self, coords: Coord2) -> Result<Cluster> {
        let coords = self.validate_coords(coords)?;
        let kind = self[coords].ok_or(GameError::EmptyCell)?.kind;

        let mut visited = Array2::from_elem(self.cells.dim(), false);
        let mut members = BTreeSet::new();
        let mut to_visit = vec![coords];
        visited[coords.to_nd_index()] = true;

        while let Some(visit_coords) = to_visit.pop() {
            members.insert(visit_coords);

            for pos in NeighborIter::new(visit_coords, self.size) {
                if visited[pos.to_nd_index()] {
                    continue;
                }
                visited[pos.to_nd_index()] = true;

                if matches!(self[pos], Some(block) if block.kind == kind) {
                    to_visit.push(pos);
                }
            }
        }

        Ok(Cluster {
            kind,
            coords: members,
        })
    }

    /// Removes the cluster at `coords` when it holds at least two blocks.
    ///
    /// Compaction is left to [`Grid::compact_and_refill`].
    pub fn tap(&mut self, coords: Coord2) -> Result<ClearOutcome> {
        let cluster = self.find_cluster(coords)?;
        let size = cluster.size();
        if size < MIN_CLUSTER_SIZE {
            log::debug!("Cluster at {coords:?} too small to clear");
            return Ok(ClearOutcome::NoOp);
        }

        let kind = cluster.kind();
        let coordinates = cluster.into_coords();
        for &pos in &coordinates {
            self.cells[pos.to_nd_index()] = None;
        }
        log::debug!("Cleared {size} blocks of type {} at {coords:?}", kind.0);

        Ok(ClearOutcome::Cleared(Clearance {
            kind,
            coordinates,
            size,
        }))
    }

    /// Lets surviving blocks fall within their column, then fills the gaps left
    /// at the top with fresh blocks.
    pub fn compact_and_refill(&mut self) -> RefillReport {
        let mut report = RefillReport::default();
        let (width, height) = self.size;

        for x in 0..width {
            let moves_before = report.moves.len();
            // rows at and below `write_y` are already settled
            let mut write_y = height;

            for y in (0..height).rev() {
                let Some(mut block) = self.cells[(x, y).to_nd_index()].take() else {
                    continue;
                };
                write_y -= 1;
                if write_y != y {
                    block.y = write_y;
                    report.moves.push(MoveEvent {
                        x,
                        from_y: y,
                        to_y: write_y,
                    });
                }
                self.cells[(x, write_y).to_nd_index()] = Some(block);
            }

            for y in (0..write_y).rev() {
                let block = self.factory.spawn((x, y));
                report.spawns.push(SpawnEvent {
                    x,
                    y,
                    kind: block.kind,
                });
                self.cells[(x, y).to_nd_index()] = Some(block);
            }

            if write_y > 0 {
                log::trace!(
                    "Column {x}: {} moved, {write_y} spawned",
                    report.moves.len() - moves_before
                );
            }
        }

        report
    }

    /// Discards every block and generates a new random layout of the same shape.
    pub fn reset(&mut self) {
        self.cells = Self::populate(self.size, &mut self.factory);
    }
}

impl<R> Index<Coord2> for Grid<R> {
    type Output = Option<Block>;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}
