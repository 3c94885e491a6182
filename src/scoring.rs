//! Area scoring (Chinese rules) with manually marked dead stones.
//!
//! Dead-marked stones are lifted off a scratch copy of the board, then every
//! maximal empty region is flood-filled. A region bordered only by one
//! color's stones is that color's territory; anything else is dame.
//!
//! A region that is not fully enclosed by one color silently becomes
//! neutral. Bad dead-stone marking is a user error, not an engine fault.

use std::collections::HashSet;
use std::fmt;

use crate::board::{Board, Color, Point, neighbors};
use crate::constants::N;

/// Owner of an empty (or dead-marked) point after scoring.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Owner {
    Black,
    White,
    Neutral,
}

/// Ownership of every point that is empty once dead stones are removed.
/// Live stones map to `None`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerritoryMap {
    cells: [[Option<Owner>; N]; N],
}

impl TerritoryMap {
    /// Owner of an empty point; `None` for stones and points off the board.
    pub fn get(&self, (row, col): Point) -> Option<Owner> {
        if row >= N || col >= N {
            return None;
        }
        self.cells[row][col]
    }

    pub fn count(&self, owner: Owner) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&o| o == Some(owner))
            .count()
    }
}

impl fmt::Display for TerritoryMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line: Vec<&str> = row
                .iter()
                .map(|cell| match cell {
                    Some(Owner::Black) => "b",
                    Some(Owner::White) => "w",
                    Some(Owner::Neutral) => "-",
                    None => ".",
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

/// One side's share of the final score.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SideScore {
    pub stones: usize,
    pub territory: usize,
    pub komi: f64,
}

impl SideScore {
    pub fn total(&self) -> f64 {
        (self.stones + self.territory) as f64 + self.komi
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScoreReport {
    pub black: SideScore,
    pub white: SideScore,
    pub territory: TerritoryMap,
}

impl ScoreReport {
    /// The side with the strictly greater total, or `None` on a tie.
    pub fn winner(&self) -> Option<Color> {
        let (b, w) = (self.black.total(), self.white.total());
        if b > w {
            Some(Color::Black)
        } else if w > b {
            Some(Color::White)
        } else {
            None
        }
    }

    /// Winning margin rounded to one decimal place.
    pub fn margin(&self) -> f64 {
        let diff = (self.black.total() - self.white.total()).abs();
        (diff * 10.0).round() / 10.0
    }
}

impl fmt::Display for ScoreReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.winner() {
            Some(Color::Black) => write!(f, "B+{}", self.margin()),
            Some(Color::White) => write!(f, "W+{}", self.margin()),
            None => write!(f, "0"),
        }
    }
}

/// Copy of `board` with the dead-marked stones removed.
fn without_dead(board: &Board, dead: &HashSet<Point>) -> Board {
    let mut scratch = board.clone();
    for &pt in dead {
        scratch.set(pt, None);
    }
    scratch
}

/// Flood-fill the empty regions of `board` (after lifting `dead` stones).
pub fn territory_map(board: &Board, dead: &HashSet<Point>) -> TerritoryMap {
    let scratch = without_dead(board, dead);
    let mut cells = [[None; N]; N];
    let mut visited = [[false; N]; N];

    for start in Board::points() {
        if scratch.get(start).is_some() || visited[start.0][start.1] {
            continue;
        }

        let mut region = Vec::new();
        let mut stack = vec![start];
        let (mut touches_black, mut touches_white) = (false, false);
        visited[start.0][start.1] = true;

        while let Some(pt) = stack.pop() {
            region.push(pt);
            for n in neighbors(pt) {
                match scratch.get(n) {
                    Some(Color::Black) => touches_black = true,
                    Some(Color::White) => touches_white = true,
                    None if !visited[n.0][n.1] => {
                        visited[n.0][n.1] = true;
                        stack.push(n);
                    }
                    None => {}
                }
            }
        }

        let owner = match (touches_black, touches_white) {
            (true, false) => Owner::Black,
            (false, true) => Owner::White,
            _ => Owner::Neutral,
        };
        for (r, c) in region {
            cells[r][c] = Some(owner);
        }
    }

    TerritoryMap { cells }
}

/// Area score: stones left on the board plus territory, komi to White.
pub fn score(board: &Board, dead: &HashSet<Point>, komi: f64) -> ScoreReport {
    let scratch = without_dead(board, dead);
    let territory = territory_map(board, dead);

    let black = SideScore {
        stones: scratch.count(Color::Black),
        territory: territory.count(Owner::Black),
        komi: 0.0,
    };
    let white = SideScore {
        stones: scratch.count(Color::White),
        territory: territory.count(Owner::White),
        komi,
    };

    ScoreReport {
        black,
        white,
        territory,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(black: &[Point], white: &[Point]) -> Board {
        let mut board = Board::new();
        for &pt in black {
            board.set(pt, Some(Color::Black));
        }
        for &pt in white {
            board.set(pt, Some(Color::White));
        }
        board
    }

    #[test]
    fn test_empty_board_is_neutral() {
        let report = score(&Board::new(), &HashSet::new(), 5.5);
        assert_eq!(report.territory.count(Owner::Neutral), N * N);
        assert_eq!(report.black.total(), 0.0);
        assert_eq!(report.white.total(), 5.5);
        assert_eq!(report.winner(), Some(Color::White));
        assert_eq!(report.to_string(), "W+5.5");
    }

    #[test]
    fn test_single_stone_owns_board() {
        let board = setup(&[(4, 4)], &[]);
        let report = score(&board, &HashSet::new(), 5.5);
        assert_eq!(report.black.stones, 1);
        assert_eq!(report.black.territory, N * N - 1);
        assert_eq!(report.territory.get((4, 4)), None);
        assert_eq!(report.to_string(), "B+75.5");
    }

    #[test]
    fn test_territory_get_off_board() {
        let report = score(&Board::new(), &HashSet::new(), 5.5);
        assert_eq!(report.territory.get((0, 0)), Some(Owner::Neutral));
        assert_eq!(report.territory.get((N, 0)), None);
        assert_eq!(report.territory.get((0, N + 3)), None);
    }

    #[test]
    fn test_enclosed_corner_region() {
        // Black wall enclosing (0,0), (0,1), (0,2) in the corner.
        let black = [(1, 0), (1, 1), (1, 2), (0, 3)];
        // A wall of the other color splits the rest of the board.
        let white: Vec<Point> = (0..N).map(|r| (r, 5)).collect();
        let board = setup(&black, &white);
        let map = territory_map(&board, &HashSet::new());

        for pt in [(0, 0), (0, 1), (0, 2)] {
            assert_eq!(map.get(pt), Some(Owner::Black));
        }
        // Region between the black stones and the white wall touches both
        assert_eq!(map.get((4, 3)), Some(Owner::Neutral));
        assert_eq!(map.get((4, 7)), Some(Owner::White));
    }

    #[test]
    fn test_dead_stones_become_territory() {
        let black = [(1, 0), (1, 1), (1, 2), (0, 3), (1, 3)];
        let board = setup(&black, &[(0, 1)]);
        let dead: HashSet<Point> = [(0, 1)].into_iter().collect();

        let map = territory_map(&board, &dead);
        assert_eq!(map.get((0, 1)), Some(Owner::Black));

        let report = score(&board, &dead, 5.5);
        assert_eq!(report.white.stones, 0);
        assert_eq!(report.black.stones, black.len());
    }

    #[test]
    fn test_komi_only_helps_white() {
        let board = setup(&[(4, 4), (4, 5)], &[(2, 2)]);
        let dead = HashSet::new();
        let low = score(&board, &dead, 0.5);
        let high = score(&board, &dead, 7.5);
        assert!(high.white.total() > low.white.total());
        assert_eq!(high.black.total(), low.black.total());
    }

    #[test]
    fn test_tie_has_no_winner() {
        let report = score(&Board::new(), &HashSet::new(), 0.0);
        assert_eq!(report.winner(), None);
        assert_eq!(report.margin(), 0.0);
        assert_eq!(report.to_string(), "0");
    }

    #[test]
    fn test_margin_rounding() {
        let board = setup(&[(0, 0)], &[(8, 8)]);
        let report = score(&board, &HashSet::new(), 6.5);
        // Both stones border the single neutral region
        assert_eq!(report.black.total(), 1.0);
        assert_eq!(report.white.total(), 7.5);
        assert_eq!(report.margin(), 6.5);
    }
}
