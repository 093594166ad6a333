//! Move path search
//!
//! A bubble may travel through empty cells only, stepping between
//! orthogonal neighbours. The moving bubble's own cell counts as passable.
//! The search runs fresh on every call since occupancy changes every turn.

use std::collections::VecDeque;

use glam::IVec2;

use super::grid::Board;

/// Neighbour order (right, up, left, down) keeps results deterministic
const NEIGHBOR_OFFSETS: [IVec2; 4] = [IVec2::X, IVec2::Y, IVec2::NEG_X, IVec2::NEG_Y];

/// Shortest path from `start` to `destination` through empty cells.
///
/// Returns the positions from `start` to `destination` inclusive, or an
/// empty `Vec` when the move is not allowed or no path exists.
pub fn find_path(board: &Board, start: IVec2, destination: IVec2) -> Vec<IVec2> {
    if !board.is_valid_position(start)
        || !board.is_valid_position(destination)
        || start == destination
        || board.is_occupied(destination)
    {
        return Vec::new();
    }

    let Some(came_from) = search(board, start, Some(destination)) else {
        return Vec::new();
    };

    let mut path = vec![destination];
    let mut index = board.index_of(destination);
    while let Some(prev) = came_from[index] {
        path.push(board.position_of(prev));
        index = prev;
    }
    path.reverse();
    path
}

/// Every empty cell reachable from `start`, in visiting order
pub fn reachable_from(board: &Board, start: IVec2) -> Vec<IVec2> {
    if !board.is_valid_position(start) {
        return Vec::new();
    }
    let Some(came_from) = search(board, start, None) else {
        return Vec::new();
    };

    let start_index = board.index_of(start);
    came_from
        .iter()
        .enumerate()
        .filter(|&(i, prev)| i != start_index && prev.is_some())
        .map(|(i, _)| board.position_of(i))
        .collect()
}

/// Breadth-first search from `start`.
///
/// Returns the predecessor table (`came_from[i]`), or `None` when a
/// `target` was given and not reached. The start cell has no predecessor.
fn search(board: &Board, start: IVec2, target: Option<IVec2>) -> Option<Vec<Option<usize>>> {
    let start_index = board.index_of(start);
    let mut visited = vec![false; board.len()];
    let mut came_from: Vec<Option<usize>> = vec![None; board.len()];
    let mut queue = VecDeque::new();

    visited[start_index] = true;
    queue.push_back(start);

    while let Some(pos) = queue.pop_front() {
        if Some(pos) == target {
            return Some(came_from);
        }

        let from = board.index_of(pos);
        for offset in NEIGHBOR_OFFSETS {
            let next = pos + offset;
            if !board.is_valid_position(next) || board.is_occupied(next) {
                continue;
            }
            let index = board.index_of(next);
            if !visited[index] {
                visited[index] = true;
                came_from[index] = Some(from);
                queue.push_back(next);
            }
        }
    }

    match target {
        Some(_) => None,
        None => Some(came_from),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::color::BubbleColor;

    fn board_with(width: u32, height: u32, occupied: &[(i32, i32)]) -> Board {
        let mut board = Board::new(width, height);
        for &(x, y) in occupied {
            board.set_occupied(IVec2::new(x, y), Some(BubbleColor::RED));
        }
        board
    }

    fn is_connected(path: &[IVec2]) -> bool {
        path.windows(2).all(|w| (w[1] - w[0]).abs().element_sum() == 1)
    }

    #[test]
    fn test_open_board_shortest_path() {
        let board = board_with(3, 3, &[(0, 0)]);
        let path = find_path(&board, IVec2::new(0, 0), IVec2::new(2, 2));

        assert_eq!(path.len(), 5);
        assert_eq!(path.first(), Some(&IVec2::new(0, 0)));
        assert_eq!(path.last(), Some(&IVec2::new(2, 2)));
        assert!(is_connected(&path));
    }

    #[test]
    fn test_adjacent_move() {
        let board = board_with(2, 1, &[(0, 0)]);
        let path = find_path(&board, IVec2::new(0, 0), IVec2::new(1, 0));
        assert_eq!(path, vec![IVec2::new(0, 0), IVec2::new(1, 0)]);
    }

    #[test]
    fn test_walled_off_destination() {
        // Column x=1 is a wall of bubbles
        let board = board_with(3, 3, &[(0, 0), (1, 0), (1, 1), (1, 2)]);
        assert!(find_path(&board, IVec2::new(0, 0), IVec2::new(2, 2)).is_empty());
    }

    #[test]
    fn test_no_diagonal_steps() {
        let board = board_with(2, 2, &[(0, 0), (1, 0), (0, 1)]);
        assert!(find_path(&board, IVec2::new(0, 0), IVec2::new(1, 1)).is_empty());
    }

    #[test]
    fn test_path_detours_around_bubbles() {
        let board = board_with(3, 3, &[(0, 0), (1, 0), (1, 1)]);
        let path = find_path(&board, IVec2::new(0, 0), IVec2::new(2, 0));

        // Down, around the wall and back up: (0,0)(0,1)(0,2)(1,2)(2,2)(2,1)(2,0)
        assert_eq!(path.len(), 7);
        assert!(is_connected(&path));
        assert!(path[1..].iter().all(|&p| !board.is_occupied(p)));
    }

    #[test]
    fn test_rejects_invalid_destinations() {
        let board = board_with(3, 3, &[(0, 0), (2, 2)]);
        let start = IVec2::new(0, 0);
        assert!(find_path(&board, start, start).is_empty());
        assert!(find_path(&board, start, IVec2::new(2, 2)).is_empty());
        assert!(find_path(&board, start, IVec2::new(3, 0)).is_empty());
        assert!(find_path(&board, IVec2::new(-1, 0), IVec2::new(1, 1)).is_empty());
    }

    #[test]
    fn test_reachable_region() {
        let board = board_with(3, 3, &[(0, 0), (1, 0), (1, 1), (1, 2)]);
        let mut reachable = reachable_from(&board, IVec2::new(0, 0));
        reachable.sort_by_key(|p| (p.y, p.x));
        assert_eq!(reachable, vec![IVec2::new(0, 1), IVec2::new(0, 2)]);
    }
}
