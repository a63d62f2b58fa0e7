//! GameView: maps a `GameSnapshot` into plain text lines.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{format_time, GameSnapshot, ScoreCard, Tile};
use crate::types::{GameStatus, BOARD_COLUMNS};

const KEYS_HELP: &str = "arrows/hjkl/wasd move  enter/space flip  r restart  q quit";

/// A lightweight text renderer for the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameView {
    columns: usize,
    /// Inner width of one tile cell in characters.
    cell_w: usize,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            columns: BOARD_COLUMNS,
            cell_w: 9,
        }
    }
}

impl GameView {
    pub fn new(columns: usize, cell_w: usize) -> Self {
        Self {
            columns: columns.max(1),
            cell_w,
        }
    }

    /// Render the board with the cursor on tile `cursor`
    ///
    /// `card` is the result of the last finished session, shown once the
    /// snapshot is terminal.
    pub fn render(
        &self,
        snap: &GameSnapshot,
        cursor: usize,
        card: Option<&ScoreCard>,
    ) -> Vec<String> {
        let mut lines = Vec::with_capacity(snap.tiles.len() / self.columns + 10);
        lines.push(self.status_line(snap));
        lines.push(String::new());

        for row in snap.tiles.chunks(self.columns) {
            let cells: Vec<String> = row
                .iter()
                .map(|tile| self.cell(tile, tile.index == cursor))
                .collect();
            lines.push(cells.join(" "));
        }

        lines.push(String::new());
        match (snap.status, card) {
            (GameStatus::Idle, _) => lines.push("Press r to start.".to_string()),
            (status, Some(card)) if status.is_terminal() && card.generation == snap.generation => {
                lines.extend(result_lines(card));
            }
            _ => lines.push(snap.hint()),
        }
        lines.push(KEYS_HELP.to_string());
        lines
    }

    fn status_line(&self, snap: &GameSnapshot) -> String {
        let time_mark = if snap.is_time_warning() { "!" } else { "" };
        let flips_mark = if snap.is_flips_warning() { "!" } else { "" };
        format!(
            "Time {}{}  Flips {}/{}{}  Pairs {}/{} ({}%)",
            format_time(snap.time_remaining),
            time_mark,
            snap.flips_count,
            snap.max_flips,
            flips_mark,
            snap.matched_pairs,
            snap.total_pairs,
            snap.progress_percent()
        )
    }

    fn cell(&self, tile: &Tile, selected: bool) -> String {
        let face = if tile.is_matched {
            format!("*{}*", tile.label)
        } else if tile.is_flipped {
            tile.label.to_string()
        } else {
            "?".to_string()
        };
        let (open, close) = if selected { ('>', '<') } else { ('[', ']') };
        format!("{}{:^width$}{}", open, face, close, width = self.cell_w)
    }
}

fn result_lines(card: &ScoreCard) -> Vec<String> {
    let stars: String = (0..3)
        .map(|i| if i < card.stars { '★' } else { '☆' })
        .collect();
    vec![
        card.reason.toast().to_string(),
        format!(
            "Score {}/{}  {}  Flips {}  Time {}",
            card.score,
            card.total_pairs,
            stars,
            card.flips_count,
            format_time(card.elapsed_seconds)
        ),
        card.message.to_string(),
        card.share_text(),
    ]
}
