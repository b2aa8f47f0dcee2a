use crate::board::Cell;

/// Which end of the estimate range the player reveals from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Strategy {
    /// Reveal the cell with the highest best estimate.
    #[default]
    Densest,
    /// Reveal the cell with the lowest best estimate.
    Sparsest,
}
use Strategy::*;

impl Strategy {
    /// Whether `candidate` should replace `current` as the pick. Earlier cells keep ties.
    pub(crate) fn prefers(self, candidate: &Cell, current: &Cell) -> bool {
        match self {
            Densest => candidate.best_estimate() > current.best_estimate(),
            Sparsest => candidate.best_estimate() < current.best_estimate(),
        }
    }
}
