use log::trace;

use crate::board::*;
use crate::error::{FieldError, Result};
use crate::judges::Strategy;

impl Board {
    /// Let every numeric cell spread `(clue - markers) / unrevealed` over its unrevealed neighbours.
    ///
    /// Each neighbour keeps every contribution it receives, so the order numbers are visited in
    /// does not matter. A number with no unrevealed neighbour contributes nothing.
    pub fn propagate(&mut self) {
        let clues: Vec<(Position, u8)> = self.cells().filter_map(|c| Some((c.position(), c.clue()?))).collect();

        for (point, clue) in clues {
            let mut markers = 0;
            let mut unrevealed = Vec::new();
            for adj in self.neighbours(point) {
                if adj.is_marker() {
                    markers += 1;
                }
                if !adj.is_revealed() {
                    unrevealed.push(adj.position());
                }
            }
            if unrevealed.is_empty() {
                continue;
            }

            let ratio = (clue as f32 - markers as f32) / unrevealed.len() as f32;
            trace!("{point} spreads {ratio} over {} cells", unrevealed.len());
            for p in unrevealed {
                if let Some(cell) = self.get_mut(p) {
                    cell.estimates_mut().add(ratio);
                }
            }
        }
    }

    /// The unrevealed cell to click next, skipping any cell that picked up a zero estimate.
    pub fn choose(&self, strategy: Strategy) -> Result<&Cell> {
        self.unrevealed()
            .filter(|c| !c.is_unselectable())
            .fold(None, |best: Option<&Cell>, c| match best {
                Some(b) if !strategy.prefers(c, b) => Some(b),
                _ => Some(c),
            })
            .ok_or(FieldError::NoEligibleCell)
    }
}
