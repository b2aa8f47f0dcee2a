#![forbid(unsafe_code)]

mod board;
mod error;
mod estimates;
mod judges;
mod labels;
mod session;
mod solver;
mod turn;

pub use board::{Board, Cell, CellKind, Player, Position, adjacents, prior, COLUMNS, ROWS};
pub use error::{FieldError, Result};
pub use estimates::Estimates;
pub use judges::Strategy;
pub use labels::{classify, indicator_code, is_explosion, label_of, BLUE, EXPLOSION, RED, TURN, UNREVEALED};
pub use session::{GameSession, MessageId, Outcome, Sessions};
pub use turn::TurnTracker;
