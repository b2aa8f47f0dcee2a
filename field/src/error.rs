use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FieldError {
    /// A button label outside the known alphabet. The render needs a fresh snapshot.
    #[error("unknown button text: {0:?}")]
    UnknownLabel(String),
    #[error("expected 8 button rows, got {0}")]
    MalformedGrid(usize),
    #[error("button row {row} has {len} buttons, expected 7")]
    RaggedRow { row: usize, len: usize },
    #[error("no unrevealed cell is eligible for a click")]
    NoEligibleCell,
}

pub type Result<T, E = FieldError> = std::result::Result<T, E>;
