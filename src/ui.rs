use crossterm::queue;
use crossterm::style::{self, Attribute, Color};
use minroob_field::{Board, Cell, CellKind, Position};
use std::io::{Result, Write};

use crate::options::{IconSet, Theme};

fn show_cell(out: &mut impl Write, cell: &Cell, chosen: bool, theme: &Theme, icons: &IconSet) -> Result<()> {
    let (bg, fg, c) = match cell.kind() {
        CellKind::Unrevealed => {
            let bg = if cell.is_unselectable() {
                theme.unselectable
            } else if cell.estimates().len() == 1 {
                theme.bg_hidden
            } else {
                theme.estimate_color(cell.best_estimate())
            };
            let c = if chosen {
                icons.chosen
            } else if cell.is_certain() {
                icons.certain
            } else {
                icons.hidden
            };
            (bg, Color::White, c)
        },
        CellKind::Marker(player) => (theme.bg_revealed, theme.player_color(player), icons.marker),
        CellKind::Numeric(n) => (theme.bg_revealed, theme.nums[(n as usize).min(8)], (b'0' + n.min(9)) as char),
        CellKind::Empty => (theme.bg_revealed, Color::White, icons.empty),
    };
    queue!(
        out,
        style::SetBackgroundColor(bg),
        style::SetForegroundColor(fg),
        style::SetAttribute(Attribute::Bold),
        style::Print(c),
        style::Print(' '),
        style::SetAttribute(Attribute::Reset),
        style::ResetColor,
    )
}

/// Draw the board the way the keyboard shows it: one line per button row.
pub fn show_board(out: &mut impl Write, board: &Board, chosen: Option<Position>, theme: &Theme, icons: &IconSet) -> Result<()> {
    let mut last_row = None;
    for cell in board.cells() {
        let x = cell.position().x;
        if last_row.is_some_and(|row| row != x) {
            queue!(out, style::Print('\n'))?;
        }
        last_row = Some(x);
        show_cell(out, cell, chosen == Some(cell.position()), theme, icons)?;
    }
    queue!(out, style::Print('\n'))?;
    out.flush()
}
