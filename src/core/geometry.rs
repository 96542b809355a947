//! Grid geometry: positions, directions, lines, and distances.
//!
//! All effect targeting runs on an integer grid. The helpers here are the
//! shared substrate for bolt/beam line traces, ball radii, and breath cones:
//!
//! - `line_between` is a Bresenham rasterization (excluding the start tile)
//! - `distance` is the classic roguelike approximation of Euclidean distance
//! - `point_line_distance` measures perpendicular distance from the
//!   actor-target line, used for cone membership tests

use serde::{Deserialize, Serialize};

/// A position on the level grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset by a delta.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Step one tile in a direction.
    #[must_use]
    pub const fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        self.offset(dx, dy)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the eight compass directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// All eight directions, clockwise from north.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Grid delta for this direction. North is negative y.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
        }
    }
}

/// Roguelike distance approximation.
///
/// `max + min/2` over the axis deltas - close to Euclidean on a grid while
/// staying in integers. Distance 0 means the same tile.
#[must_use]
pub fn distance(a: Position, b: Position) -> i32 {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    let (max, min) = if dx > dy { (dx, dy) } else { (dy, dx) };
    max + min / 2
}

/// Rasterize the straight line from `from` to `to`.
///
/// Returns the tiles strictly after `from`, ending with `to` itself.
/// Returns an empty vec when `from == to`.
#[must_use]
pub fn line_between(from: Position, to: Position) -> Vec<Position> {
    let mut tiles = Vec::new();
    if from == to {
        return tiles;
    }

    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };
    let mut err = dx + dy;

    let mut current = from;
    loop {
        if current == to {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            current.x += sx;
        }
        if e2 <= dx {
            err += dx;
            current.y += sy;
        }
        tiles.push(current);
    }

    tiles
}

/// Perpendicular distance from `point` to the line through `from` and `to`,
/// scaled by 10 to stay in integers (a return of 10 is one full tile).
///
/// Used by breath cones: a tile is inside the cone when this distance does
/// not exceed the cone's width at the tile's range.
#[must_use]
pub fn point_line_distance(from: Position, to: Position, point: Position) -> i32 {
    let (lx, ly) = ((to.x - from.x) as i64, (to.y - from.y) as i64);
    let (px, py) = ((point.x - from.x) as i64, (point.y - from.y) as i64);

    let length_sq = lx * lx + ly * ly;
    if length_sq == 0 {
        return distance(from, point) * 10;
    }

    // |cross product| / |line length|, scaled by 10
    let cross = (px * ly - py * lx).abs();
    let length = (length_sq as f64).sqrt();
    ((cross as f64 * 10.0) / length).round() as i32
}
