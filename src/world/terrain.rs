//! Terrain and tiles.
//!
//! The engine reads and writes terrain through `Level`; generation of the
//! initial grid belongs to the (external) dungeon generator.

use serde::{Deserialize, Serialize};

/// What a grid tile is made of.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    Floor,
    Wall,
    Rubble,
    Door,
    StairsUp,
    StairsDown,
    /// A protective rune on the floor. Monsters will not step onto it.
    Glyph,
}

impl Terrain {
    /// Can an actor occupy this tile?
    #[must_use]
    pub const fn is_passable(self) -> bool {
        matches!(
            self,
            Terrain::Floor | Terrain::Door | Terrain::StairsUp | Terrain::StairsDown | Terrain::Glyph
        )
    }

    /// Does this tile block bolts, beams, and line of sight?
    #[must_use]
    pub const fn blocks_projectiles(self) -> bool {
        matches!(self, Terrain::Wall | Terrain::Rubble | Terrain::Door)
    }

    /// Can digging or stone-to-mud turn this tile into floor?
    #[must_use]
    pub const fn is_diggable(self) -> bool {
        matches!(self, Terrain::Wall | Terrain::Rubble | Terrain::Door)
    }
}

/// A single grid tile: terrain plus player knowledge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub terrain: Terrain,
    /// Has the player seen or detected this tile?
    pub known: bool,
}

impl Tile {
    /// A fresh, unexplored tile.
    #[must_use]
    pub const fn new(terrain: Terrain) -> Self {
        Self {
            terrain,
            known: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passability() {
        assert!(Terrain::Floor.is_passable());
        assert!(Terrain::StairsDown.is_passable());
        assert!(Terrain::Glyph.is_passable());
        assert!(!Terrain::Wall.is_passable());
        assert!(!Terrain::Rubble.is_passable());
    }

    #[test]
    fn test_projectile_blocking() {
        assert!(Terrain::Wall.blocks_projectiles());
        assert!(Terrain::Door.blocks_projectiles());
        assert!(!Terrain::Floor.blocks_projectiles());
        assert!(!Terrain::StairsUp.blocks_projectiles());
    }

    #[test]
    fn test_diggable() {
        assert!(Terrain::Wall.is_diggable());
        assert!(Terrain::Rubble.is_diggable());
        assert!(!Terrain::Floor.is_diggable());
        assert!(!Terrain::Glyph.is_diggable());
    }

    #[test]
    fn test_new_tile_unknown() {
        let tile = Tile::new(Terrain::Floor);
        assert!(!tile.known);
    }
}
