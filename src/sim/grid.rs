//! Dense board storage
//!
//! Cells live in a row-major `Vec`, addressed by `IVec2` positions
//! (x = column, y = row). The occupied count is maintained incrementally
//! and must always match the number of cells holding a bubble.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::color::BubbleColor;

/// A single board cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Bubble occupying the cell, if any
    pub bubble: Option<BubbleColor>,
    /// Tile highlight announcing a pending spawn
    pub indicator: Option<BubbleColor>,
}

impl Cell {
    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.bubble.is_some()
    }
}

/// Fixed-size grid of cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
    occupied: usize,
}

impl Board {
    /// Create an empty board. Dimensions are clamped to `1..=i32::MAX`.
    ///
    /// Callers bound the cell count (see `Settings::validate`).
    pub fn new(width: u32, height: u32) -> Self {
        let width = width.clamp(1, i32::MAX as u32);
        let height = height.clamp(1, i32::MAX as u32);
        let len = width as usize * height as usize;
        Self {
            width: width as i32,
            height: height as i32,
            cells: vec![Cell::default(); len],
            occupied: 0,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// No bubbles on the board
    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    /// Check if a position lies on the board
    #[inline]
    pub fn is_valid_position(&self, pos: IVec2) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    /// Row-major index of a position
    #[inline]
    pub fn index_of(&self, pos: IVec2) -> usize {
        assert!(
            self.is_valid_position(pos),
            "position {pos} outside {}x{} board",
            self.width,
            self.height
        );
        pos.y as usize * self.width as usize + pos.x as usize
    }

    /// Position of a row-major index
    #[inline]
    pub fn position_of(&self, index: usize) -> IVec2 {
        assert!(index < self.cells.len(), "cell index {index} out of range");
        let width = self.width as usize;
        IVec2::new((index % width) as i32, (index / width) as i32)
    }

    /// Cell at `pos` (panics when out of bounds)
    pub fn get(&self, pos: IVec2) -> &Cell {
        &self.cells[self.index_of(pos)]
    }

    #[inline]
    pub fn is_occupied(&self, pos: IVec2) -> bool {
        self.get(pos).is_occupied()
    }

    /// Bubble color at `pos`, if occupied
    #[inline]
    pub fn color_at(&self, pos: IVec2) -> Option<BubbleColor> {
        self.get(pos).bubble
    }

    /// Place (`Some`) or remove (`None`) a bubble.
    ///
    /// Keeps the occupied count in sync and clears the tile indicator.
    pub fn set_occupied(&mut self, pos: IVec2, bubble: Option<BubbleColor>) {
        let index = self.index_of(pos);
        let cell = &mut self.cells[index];
        match (cell.bubble.is_some(), bubble.is_some()) {
            (false, true) => self.occupied += 1,
            (true, false) => self.occupied -= 1,
            _ => {}
        }
        cell.bubble = bubble;
        cell.indicator = None;
    }

    pub fn set_indicator(&mut self, pos: IVec2, indicator: Option<BubbleColor>) {
        let index = self.index_of(pos);
        self.cells[index].indicator = indicator;
    }

    /// Number of cells holding a bubble
    pub fn occupied_count(&self) -> usize {
        self.occupied
    }

    pub fn is_full(&self) -> bool {
        self.occupied == self.cells.len()
    }

    /// Empty every cell and indicator
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
        self.occupied = 0;
    }

    /// All cells with their positions, row-major
    pub fn cells(&self) -> impl Iterator<Item = (IVec2, &Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, cell)| (self.position_of(i), cell))
    }

    /// Positions without a bubble, row-major
    pub fn empty_positions(&self) -> Vec<IVec2> {
        self.cells()
            .filter(|(_, cell)| !cell.is_occupied())
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Positions holding a bubble, row-major
    pub fn occupied_positions(&self) -> Vec<IVec2> {
        self.cells()
            .filter(|(_, cell)| cell.is_occupied())
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Recount occupied cells from scratch (invariant checks)
    pub fn count_occupied(&self) -> usize {
        self.cells.iter().filter(|c| c.is_occupied()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        let board = Board::new(4, 3);
        assert!(board.is_valid_position(IVec2::new(0, 0)));
        assert!(board.is_valid_position(IVec2::new(3, 2)));
        assert!(!board.is_valid_position(IVec2::new(4, 0)));
        assert!(!board.is_valid_position(IVec2::new(0, 3)));
        assert!(!board.is_valid_position(IVec2::new(-1, 1)));
    }

    #[test]
    fn test_zero_size_clamped() {
        let board = Board::new(0, 0);
        assert_eq!(board.len(), 1);
        assert!(board.is_valid_position(IVec2::ZERO));
    }

    #[test]
    fn test_large_board_indexing() {
        let board = Board::new(70_000, 3);
        assert_eq!(board.len(), 210_000);
        let corner = IVec2::new(69_999, 2);
        assert_eq!(board.index_of(corner), 209_999);
        assert_eq!(board.position_of(209_999), corner);
    }

    #[test]
    fn test_index_roundtrip() {
        let board = Board::new(5, 4);
        for i in 0..board.len() {
            assert_eq!(board.index_of(board.position_of(i)), i);
        }
        assert_eq!(board.index_of(IVec2::new(2, 1)), 7);
    }

    #[test]
    fn test_occupied_count_tracks_changes() {
        let mut board = Board::new(3, 3);
        let pos = IVec2::new(1, 1);

        board.set_occupied(pos, Some(BubbleColor::RED));
        assert_eq!(board.occupied_count(), 1);

        // Recoloring an occupied cell does not change the count
        board.set_occupied(pos, Some(BubbleColor::BLUE));
        assert_eq!(board.occupied_count(), 1);
        assert_eq!(board.color_at(pos), Some(BubbleColor::BLUE));

        board.set_occupied(pos, None);
        board.set_occupied(pos, None);
        assert_eq!(board.occupied_count(), 0);
        assert_eq!(board.count_occupied(), 0);
    }

    #[test]
    fn test_set_occupied_clears_indicator() {
        let mut board = Board::new(2, 2);
        let pos = IVec2::new(1, 0);
        board.set_indicator(pos, Some(BubbleColor::GREEN));
        assert_eq!(board.get(pos).indicator, Some(BubbleColor::GREEN));

        board.set_occupied(pos, Some(BubbleColor::GREEN));
        assert_eq!(board.get(pos).indicator, None);
    }

    #[test]
    fn test_full_and_clear() {
        let mut board = Board::new(2, 1);
        board.set_occupied(IVec2::new(0, 0), Some(BubbleColor::RED));
        board.set_occupied(IVec2::new(1, 0), Some(BubbleColor::RED));
        assert!(board.is_full());
        assert!(board.empty_positions().is_empty());

        board.clear();
        assert!(board.is_empty());
        assert_eq!(board.empty_positions().len(), 2);
    }

    #[test]
    #[should_panic]
    fn test_out_of_bounds_access_panics() {
        let board = Board::new(2, 2);
        board.get(IVec2::new(2, 0));
    }
}
