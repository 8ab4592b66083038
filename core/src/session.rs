use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Playing,
    GameOver,
}

impl SessionState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::GameOver)
    }
}

/// Score and move budget of one play session.
///
/// Game over is derived from the budget rather than stored, so it can never
/// disagree with `moves_remaining`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    score: Score,
    moves_remaining: MoveCount,
    initial_moves: MoveCount,
}

impl Session {
    pub fn new(initial_moves: MoveCount) -> Self {
        Self {
            score: 0,
            moves_remaining: initial_moves,
            initial_moves,
        }
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn moves_remaining(&self) -> MoveCount {
        self.moves_remaining
    }

    pub fn initial_moves(&self) -> MoveCount {
        self.initial_moves
    }

    pub fn is_game_over(&self) -> bool {
        self.moves_remaining == 0
    }

    pub fn state(&self) -> SessionState {
        if self.is_game_over() {
            SessionState::GameOver
        } else {
            SessionState::Playing
        }
    }

    pub fn can_play(&self) -> bool {
        self.moves_remaining > 0
    }

    /// Spending on an exhausted budget does nothing.
    pub fn spend_move(&mut self) {
        if self.moves_remaining == 0 {
            return;
        }
        self.moves_remaining -= 1;
        if self.moves_remaining == 0 {
            log::info!("Out of moves, final score {}", self.score);
        }
    }

    pub fn add_score(&mut self, points: Score) {
        self.score = self.score.saturating_add(points);
    }

    /// Awards one point per cleared block, then spends the move.
    pub fn process_outcome(&mut self, outcome: &ClearOutcome) {
        match outcome {
            ClearOutcome::NoOp => {}
            ClearOutcome::Cleared(clearance) => {
                self.add_score(clearance.size.into());
                self.spend_move();
            }
        }
    }

    pub fn replay(&mut self) {
        self.score = 0;
        self.moves_remaining = self.initial_moves;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_MOVES)
    }
}
