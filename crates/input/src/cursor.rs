//! Board cursor: a row/column position over a fixed-width tile grid.

use crate::types::{GameAction, BOARD_COLUMNS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardCursor {
    index: usize,
    columns: usize,
    tiles: usize,
}

impl BoardCursor {
    /// Cursor over `tiles` tiles laid out `columns` wide, starting at the top-left
    pub fn new(tiles: usize, columns: usize) -> Self {
        Self {
            index: 0,
            columns: columns.max(1),
            tiles,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn row(&self) -> usize {
        self.index / self.columns
    }

    pub fn column(&self) -> usize {
        self.index % self.columns
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Apply a cursor action; returns true if the cursor moved
    ///
    /// Movement stops at the board edges. Non-cursor actions are ignored.
    pub fn apply(&mut self, action: GameAction) -> bool {
        if self.tiles == 0 {
            return false;
        }

        let target = match action {
            GameAction::CursorLeft if self.column() > 0 => self.index - 1,
            GameAction::CursorRight if self.column() + 1 < self.columns => self.index + 1,
            GameAction::CursorUp if self.index >= self.columns => self.index - self.columns,
            GameAction::CursorDown => self.index + self.columns,
            _ => return false,
        };

        if target >= self.tiles {
            return false;
        }
        self.index = target;
        true
    }
}

impl Default for BoardCursor {
    fn default() -> Self {
        Self::new(crate::types::TOTAL_PAIRS * 2, BOARD_COLUMNS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_top_left() {
        let cursor = BoardCursor::default();
        assert_eq!(cursor.index(), 0);
        assert_eq!((cursor.row(), cursor.column()), (0, 0));
        assert_eq!(cursor.columns(), 4);
    }

    #[test]
    fn test_moves_within_grid() {
        let mut cursor = BoardCursor::new(16, 4);

        assert!(cursor.apply(GameAction::CursorRight));
        assert!(cursor.apply(GameAction::CursorDown));
        assert_eq!(cursor.index(), 5);
        assert!(cursor.apply(GameAction::CursorLeft));
        assert!(cursor.apply(GameAction::CursorUp));
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn test_stops_at_edges() {
        let mut cursor = BoardCursor::new(16, 4);
        assert!(!cursor.apply(GameAction::CursorLeft));
        assert!(!cursor.apply(GameAction::CursorUp));

        for _ in 0..10 {
            cursor.apply(GameAction::CursorRight);
            cursor.apply(GameAction::CursorDown);
        }
        assert_eq!(cursor.index(), 15);
        assert!(!cursor.apply(GameAction::CursorRight));
        assert!(!cursor.apply(GameAction::CursorDown));
    }

    #[test]
    fn test_ragged_last_row() {
        let mut cursor = BoardCursor::new(6, 4);
        cursor.apply(GameAction::CursorRight);
        cursor.apply(GameAction::CursorRight);
        assert_eq!(cursor.index(), 2);
        assert!(!cursor.apply(GameAction::CursorDown));

        cursor.reset();
        assert!(cursor.apply(GameAction::CursorDown));
        assert_eq!(cursor.index(), 4);
    }

    #[test]
    fn test_ignores_other_actions() {
        let mut cursor = BoardCursor::new(16, 4);
        assert!(!cursor.apply(GameAction::Flip));
        assert!(!cursor.apply(GameAction::Restart));
        assert!(!BoardCursor::new(0, 4).apply(GameAction::CursorRight));
    }
}
