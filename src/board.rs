//! Board storage and coordinates.
//!
//! The board is plain data: a 9x9 grid where each cell is empty or holds a
//! stone. It enforces no rules; legality lives in [`crate::rules`].

use std::fmt;

use crate::constants::{DELTA, N};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "b" | "black" => Some(Color::Black),
            "w" | "white" => Some(Color::White),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::White => write!(f, "white"),
        }
    }
}

/// A point on the board as (row, col), row 0 at the top.
pub type Point = (usize, usize);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Color>; N]; N],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [[None; N]; N],
        }
    }

    /// Stone at `pt`, or `None` when the point is empty or off the board.
    pub fn get(&self, (row, col): Point) -> Option<Color> {
        if row >= N || col >= N {
            return None;
        }
        self.cells[row][col]
    }

    pub fn set(&mut self, (row, col): Point, stone: Option<Color>) {
        self.cells[row][col] = stone;
    }

    /// Every point in row-major order.
    pub fn points() -> impl Iterator<Item = Point> {
        (0..N).flat_map(|row| (0..N).map(move |col| (row, col)))
    }

    pub fn count(&self, color: Color) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&c| c == Some(color))
            .count()
    }

    pub fn is_clear(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_none)
    }
}

pub fn in_bounds((row, col): Point) -> bool {
    row < N && col < N
}

/// Orthogonal in-bounds neighbors (N, S, W, E) of a point.
pub fn neighbors((row, col): Point) -> impl Iterator<Item = Point> {
    DELTA.iter().filter_map(move |&(dr, dc)| {
        let r = row.checked_add_signed(dr)?;
        let c = col.checked_add_signed(dc)?;
        in_bounds((r, c)).then_some((r, c))
    })
}

/// Parse a vertex such as "D4" into a point.
///
/// Columns use letters A-J skipping I; rows count from 1 at the bottom, so
/// "A9" is the top-left corner. Returns `None` for anything off the board,
/// including "pass".
pub fn parse_coord(s: &str) -> Option<Point> {
    let bytes = s.trim().as_bytes();
    if bytes.len() < 2 {
        return None;
    }

    let col_char = bytes[0].to_ascii_uppercase();
    if !col_char.is_ascii_uppercase() || col_char == b'I' {
        return None;
    }
    let mut col = (col_char - b'A') as usize;
    // Skip 'I' column (Go convention to avoid confusion with 'J')
    if col_char > b'I' {
        col -= 1;
    }

    let digits = std::str::from_utf8(&bytes[1..]).ok()?;
    let row_num: usize = digits.parse().ok()?;
    if row_num == 0 || row_num > N || col >= N {
        return None;
    }

    Some((N - row_num, col))
}

/// Convert a point to a vertex string (e.g., "D4").
pub fn str_coord((row, col): Point) -> String {
    let mut c = b'A' + col as u8;
    if c >= b'I' {
        c += 1;
    }
    format!("{}{}", c as char, N - row)
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for col in 0..N {
            let label = str_coord((0, col));
            write!(f, " {}", &label[..1])?;
        }
        writeln!(f)?;
        for row in 0..N {
            write!(f, "{:>2}", N - row)?;
            for col in 0..N {
                let ch = match self.cells[row][col] {
                    Some(Color::Black) => 'X',
                    Some(Color::White) => 'O',
                    None => '.',
                };
                write!(f, " {ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_clear() {
        let board = Board::new();
        assert!(board.is_clear());
        assert_eq!(Board::points().count(), N * N);
    }

    #[test]
    fn test_set_and_get() {
        let mut board = Board::new();
        board.set((4, 4), Some(Color::Black));
        assert_eq!(board.get((4, 4)), Some(Color::Black));
        assert_eq!(board.count(Color::Black), 1);
        assert_eq!(board.count(Color::White), 0);
        board.set((4, 4), None);
        assert!(board.is_clear());
    }

    #[test]
    fn test_get_off_board() {
        let board = Board::new();
        assert_eq!(board.get((N, 0)), None);
        assert!(!in_bounds((0, N)));
    }

    #[test]
    fn test_neighbor_counts() {
        assert_eq!(neighbors((0, 0)).count(), 2);
        assert_eq!(neighbors((0, 4)).count(), 3);
        assert_eq!(neighbors((4, 4)).count(), 4);
        assert_eq!(neighbors((8, 8)).count(), 2);
    }

    #[test]
    fn test_parse_coord_corners() {
        assert_eq!(parse_coord("A9"), Some((0, 0)));
        assert_eq!(parse_coord("A1"), Some((8, 0)));
        assert_eq!(parse_coord("J9"), Some((0, 8)));
        assert_eq!(parse_coord("j1"), Some((8, 8)));
    }

    #[test]
    fn test_parse_coord_skips_i() {
        let (_, h) = parse_coord("H5").unwrap();
        let (_, j) = parse_coord("J5").unwrap();
        assert_eq!(j - h, 1);
        assert_eq!(parse_coord("I5"), None);
    }

    #[test]
    fn test_parse_coord_rejects_garbage() {
        assert_eq!(parse_coord("pass"), None);
        assert_eq!(parse_coord("A0"), None);
        assert_eq!(parse_coord("A10"), None);
        assert_eq!(parse_coord("K1"), None);
        assert_eq!(parse_coord("4"), None);
    }

    #[test]
    fn test_str_coord_roundtrip() {
        for pt in Board::points() {
            let s = str_coord(pt);
            assert_eq!(parse_coord(&s), Some(pt), "roundtrip failed for {s}");
        }
    }

    #[test]
    fn test_display() {
        let mut board = Board::new();
        board.set((0, 0), Some(Color::Black));
        board.set((8, 8), Some(Color::White));
        let text = board.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "   A B C D E F G H J");
        assert!(lines[1].starts_with(" 9 X ."));
        assert!(lines[9].ends_with(". O"));
    }
}
