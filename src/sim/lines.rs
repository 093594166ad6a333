//! Line detection
//!
//! From a freshly filled cell, scan each of the four axes in both
//! directions and collect the contiguous run of the same color. Runs that
//! reach the threshold are added to the turn's removal set.

use std::collections::HashSet;

use glam::IVec2;

use super::grid::Board;

/// Horizontal, vertical and both diagonals
pub const LINE_DIRECTIONS: [IVec2; 4] = [
    IVec2::new(1, 0),
    IVec2::new(0, 1),
    IVec2::new(1, 1),
    IVec2::new(1, -1),
];

/// Contiguous same-color run through `origin` along `direction`.
///
/// Includes `origin`. Empty if `origin` is off the board or empty.
pub fn run_through(board: &Board, origin: IVec2, direction: IVec2) -> Vec<IVec2> {
    if !board.is_valid_position(origin) {
        return Vec::new();
    }
    let Some(color) = board.color_at(origin) else {
        return Vec::new();
    };

    let mut run = vec![origin];
    for step in [direction, -direction] {
        let mut pos = origin + step;
        while board.is_valid_position(pos) && board.color_at(pos) == Some(color) {
            run.push(pos);
            pos += step;
        }
    }
    run
}

/// Add every qualifying line through `origin` to `removal`.
///
/// Each axis yields at most one run; axes are scored independently.
/// Returns how many axes formed a line.
pub fn collect_lines(
    board: &Board,
    origin: IVec2,
    threshold: usize,
    removal: &mut HashSet<IVec2>,
) -> usize {
    let mut lines = 0;
    for direction in LINE_DIRECTIONS {
        let run = run_through(board, origin, direction);
        if !run.is_empty() && run.len() >= threshold {
            log::debug!("Line of {} along {} through {}", run.len(), direction, origin);
            removal.extend(run);
            lines += 1;
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::color::BubbleColor;

    const RED: BubbleColor = BubbleColor::RED;
    const BLUE: BubbleColor = BubbleColor::BLUE;

    fn place(board: &mut Board, cells: &[(i32, i32)], color: BubbleColor) {
        for &(x, y) in cells {
            board.set_occupied(IVec2::new(x, y), Some(color));
        }
    }

    #[test]
    fn test_horizontal_line_of_five() {
        let mut board = Board::new(9, 9);
        place(&mut board, &[(0, 4), (1, 4), (2, 4), (3, 4), (4, 4)], RED);

        let mut removal = HashSet::new();
        // Origin in the middle of the run: both directions contribute
        assert_eq!(collect_lines(&board, IVec2::new(2, 4), 5, &mut removal), 1);
        assert_eq!(removal.len(), 5);
        assert!((0..5).all(|x| removal.contains(&IVec2::new(x, 4))));
    }

    #[test]
    fn test_four_is_not_a_line() {
        let mut board = Board::new(9, 9);
        place(&mut board, &[(3, 0), (3, 1), (3, 2), (3, 3)], RED);

        let mut removal = HashSet::new();
        assert_eq!(collect_lines(&board, IVec2::new(3, 3), 5, &mut removal), 0);
        assert!(removal.is_empty());
    }

    #[test]
    fn test_other_colors_break_run() {
        let mut board = Board::new(9, 1);
        place(&mut board, &[(0, 0), (1, 0), (3, 0), (4, 0), (5, 0)], RED);
        place(&mut board, &[(2, 0)], BLUE);

        let mut removal = HashSet::new();
        assert_eq!(collect_lines(&board, IVec2::new(4, 0), 5, &mut removal), 0);
        assert_eq!(run_through(&board, IVec2::new(4, 0), IVec2::X).len(), 3);
    }

    #[test]
    fn test_both_diagonals() {
        let mut board = Board::new(9, 9);
        place(&mut board, &[(0, 0), (1, 1), (2, 2), (3, 3), (4, 4), (5, 5)], RED);
        place(&mut board, &[(7, 0), (6, 1), (5, 2), (4, 3), (3, 4)], BLUE);

        let mut removal = HashSet::new();
        assert_eq!(collect_lines(&board, IVec2::new(0, 0), 5, &mut removal), 1);
        assert_eq!(removal.len(), 6);

        removal.clear();
        assert_eq!(collect_lines(&board, IVec2::new(5, 2), 5, &mut removal), 1);
        assert_eq!(removal.len(), 5);
        assert!(removal.contains(&IVec2::new(7, 0)));
        assert!(removal.contains(&IVec2::new(3, 4)));
    }

    #[test]
    fn test_cross_scores_both_axes_once_per_cell() {
        let mut board = Board::new(9, 9);
        place(&mut board, &[(2, 4), (3, 4), (4, 4), (5, 4), (6, 4)], RED);
        place(&mut board, &[(4, 2), (4, 3), (4, 5), (4, 6)], RED);

        let mut removal = HashSet::new();
        assert_eq!(collect_lines(&board, IVec2::new(4, 4), 5, &mut removal), 2);
        // The shared center is only removed once
        assert_eq!(removal.len(), 9);
    }

    #[test]
    fn test_empty_or_offboard_origin_is_noop() {
        let board = Board::new(3, 3);
        let mut removal = HashSet::new();
        assert_eq!(collect_lines(&board, IVec2::new(1, 1), 1, &mut removal), 0);
        assert_eq!(collect_lines(&board, IVec2::new(5, 5), 1, &mut removal), 0);
        assert!(removal.is_empty());
    }
}
