use crate::board::{Cell, CellKind, Player, Position};
use crate::error::{FieldError, Result};

pub const UNREVEALED: &str = "\u{2B1C}\u{FE0F}";
pub const BLUE: &str = "\u{1F535}\u{FE0F}";
pub const RED: &str = "\u{1F534}";
pub const EXPLOSION: &str = "\u{1F4A3}";
/// Prefix of every label in the turn indicator row.
pub const TURN: &str = "\u{1F3AE}";

const VS16: char = '\u{FE0F}';

// the bot is inconsistent about emoji presentation selectors, so compare without them
fn bare(label: &str) -> &str {
    label.trim_end_matches(VS16)
}

pub fn is_explosion(label: &str) -> bool {
    bare(label) == EXPLOSION
}

/// Turn a rendered button label into the cell it shows.
pub fn classify(label: &str, position: Position) -> Result<Cell> {
    if label.trim().is_empty() {
        return Ok(Cell::new(position, CellKind::Empty));
    }
    let kind = match bare(label) {
        "\u{2B1C}" => CellKind::Unrevealed,
        "\u{1F535}" => CellKind::Marker(Player::Blue),
        RED => CellKind::Marker(Player::Red),
        text => match text.chars().next() {
            Some(c @ '0'..='9') => CellKind::Numeric(c as u8 - b'0'),
            _ => return Err(FieldError::UnknownLabel(label.to_owned())),
        },
    };
    Ok(Cell::new(position, kind))
}

/// The color code of a turn indicator such as `🎮B Alice`.
/// Labels without the prefix or without a code are not indicators.
pub fn indicator_code(label: &str) -> Option<char> {
    label.strip_prefix(TURN)?.chars().next()
}

/// The glyph a cell would be rendered with.
pub fn label_of(kind: CellKind) -> String {
    match kind {
        CellKind::Unrevealed => UNREVEALED.to_owned(),
        CellKind::Marker(Player::Blue) => BLUE.to_owned(),
        CellKind::Marker(Player::Red) => RED.to_owned(),
        CellKind::Numeric(n) => n.to_string(),
        CellKind::Empty => " ".to_owned(),
    }
}
