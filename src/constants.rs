//! Constants for board geometry, scoring defaults and the heuristic engine.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN). Only 9x9 is supported.
pub const N: usize = 9;

/// Orthogonal neighbor offsets as (row, col) deltas.
/// Order: North, South, West, East
pub const DELTA: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

// =============================================================================
// Game Flow
// =============================================================================

/// Consecutive passes that end the playing phase.
pub const PASSES_TO_END: u8 = 2;

/// Default komi awarded to White. Fractional so area scores cannot tie.
pub const DEFAULT_KOMI: f64 = 5.5;

// =============================================================================
// Heuristic Move Selector
// =============================================================================

/// Upper bound (exclusive) of the uniform random base score.
pub const RANDOM_SPAN: f64 = 10.0;

/// Bonus for points in the central 3x3 region.
pub const CENTER_BONUS: f64 = 5.0;

/// Penalty for moves that leave the placed group with a single liberty.
pub const SELF_ATARI_PENALTY: f64 = 20.0;

/// Inclusive row/column range of the central 3x3 region.
pub const CENTER: std::ops::RangeInclusive<usize> = 3..=5;
