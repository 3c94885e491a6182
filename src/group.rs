//! Group and liberty analysis.
//!
//! Every rule in the engine is built on two flood fills: collecting the
//! stones connected to a point, and counting the distinct empty points that
//! touch them.

use crate::board::{Board, Color, Point, neighbors};
use crate::constants::N;

/// Collect all stones of `color` connected to `start`.
///
/// Uses an explicit stack over a visited grid. Returns an empty group when
/// `start` does not hold `color`. The order of the result is unspecified.
pub fn connected_group(board: &Board, start: Point, color: Color) -> Vec<Point> {
    let mut group = Vec::new();
    if board.get(start) != Some(color) {
        return group;
    }

    let mut visited = [[false; N]; N];
    let mut stack = vec![start];
    visited[start.0][start.1] = true;

    while let Some(pt) = stack.pop() {
        group.push(pt);
        for n in neighbors(pt) {
            if !visited[n.0][n.1] && board.get(n) == Some(color) {
                visited[n.0][n.1] = true;
                stack.push(n);
            }
        }
    }
    group
}

/// Count the distinct empty points adjacent to any stone in `group`.
pub fn group_liberties(board: &Board, group: &[Point]) -> usize {
    let mut seen = [[false; N]; N];
    let mut libs = 0;
    for &pt in group {
        for n in neighbors(pt) {
            if board.get(n).is_none() && !seen[n.0][n.1] {
                seen[n.0][n.1] = true;
                libs += 1;
            }
        }
    }
    libs
}

/// Liberties of the group containing the stone at `pt` (0 for an empty point).
pub fn liberties_at(board: &Board, pt: Point) -> usize {
    match board.get(pt) {
        Some(color) => group_liberties(board, &connected_group(board, pt, color)),
        None => 0,
    }
}

/// Every stone belonging to a group with exactly one liberty.
pub fn atari_stones(board: &Board) -> Vec<Point> {
    let mut visited = [[false; N]; N];
    let mut out = Vec::new();

    for pt in Board::points() {
        let Some(color) = board.get(pt) else {
            continue;
        };
        if visited[pt.0][pt.1] {
            continue;
        }
        let group = connected_group(board, pt, color);
        for &(r, c) in &group {
            visited[r][c] = true;
        }
        if group_liberties(board, &group) == 1 {
            out.extend(group);
        }
    }
    out
}
