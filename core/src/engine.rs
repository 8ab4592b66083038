use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub grid: GridConfig,
    pub initial_moves: MoveCount,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            initial_moves: DEFAULT_MOVES,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// A clear is waiting for [`Engine::commit_refill`].
    Busy,
    GameOver,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TapOutcome {
    Rejected(RejectReason),
    NoOp,
    /// Blocks were removed; the engine stays busy until the refill is committed.
    Cleared(Clearance),
}

impl TapOutcome {
    pub const fn has_update(&self) -> bool {
        matches!(self, Self::Cleared(_))
    }

    pub const fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

/// Owns the grid and the session and sequences every interaction with them.
///
/// A clear leaves holes in the grid until the host calls
/// [`commit_refill`](Engine::commit_refill), which it may delay for pacing.
/// Taps arriving in between are rejected, never queued.
#[derive(Clone, Debug)]
pub struct Engine<R = SmallRng> {
    config: EngineConfig,
    grid: Grid<R>,
    session: Session,
    busy: bool,
}

impl Engine<SmallRng> {
    pub fn from_seed(config: EngineConfig, seed: u64) -> Result<Self> {
        Self::new(config, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Engine<R> {
    pub fn new(config: EngineConfig, rng: R) -> Result<Self> {
        let grid = Grid::new(config.grid, rng)?;
        Ok(Self::with_grid(grid, config.initial_moves))
    }

    /// Starts a session on an already built grid.
    pub fn with_grid(grid: Grid<R>, initial_moves: MoveCount) -> Self {
        Self {
            config: EngineConfig {
                grid: grid.config(),
                initial_moves,
            },
            grid,
            session: Session::new(initial_moves),
            busy: false,
        }
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    pub fn grid(&self) -> &Grid<R> {
        &self.grid
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn tap(&mut self, coords: Coord2) -> Result<TapOutcome> {
        if self.busy {
            log::debug!("Tap at {coords:?} rejected, refill pending");
            return Ok(TapOutcome::Rejected(RejectReason::Busy));
        }
        if !self.session.can_play() {
            log::debug!("Tap at {coords:?} rejected, game over");
            return Ok(TapOutcome::Rejected(RejectReason::GameOver));
        }

        let outcome = self.grid.tap(coords)?;
        self.session.process_outcome(&outcome);

        Ok(match outcome {
            ClearOutcome::NoOp => TapOutcome::NoOp,
            ClearOutcome::Cleared(clearance) => {
                self.busy = true;
                TapOutcome::Cleared(clearance)
            }
        })
    }

    pub fn commit_refill(&mut self) -> RefillReport {
        if !self.busy {
            log::warn!("Refill committed without a pending clear");
        }
        let report = self.grid.compact_and_refill();
        self.busy = false;
        log::debug!(
            "Refill done, {} moved, {} spawned",
            report.moves.len(),
            report.spawns.len()
        );
        report
    }

    /// Starts over with a fresh layout, dropping any pending refill.
    pub fn replay(&mut self) {
        self.session.replay();
        self.grid.reset();
        self.busy = false;
        log::debug!("Replay started");
    }
}
