//! The level: tile grid plus actor storage.
//!
//! This is the world query surface from the engine's point of view: terrain
//! read/write, occupant lookup, bounds and passability checks, and radius
//! queries. Dungeon generation populates a `Level`; the engine mutates it.
//!
//! There is deliberately no cached player handle - the player is found by
//! scanning actors, so nothing here goes stale when effects move or remove
//! actors.

use rustc_hash::FxHashMap;

use crate::core::{distance, ActorId, GameRng, Position};

use super::actor::Actor;
use super::terrain::{Terrain, Tile};

/// A dungeon level.
#[derive(Clone, Debug)]
pub struct Level {
    width: i32,
    height: i32,
    /// Dungeon depth, used for summoning candidates.
    pub depth: u32,
    tiles: Vec<Tile>,
    actors: FxHashMap<ActorId, Actor>,
    next_actor_id: u32,
}

impl Level {
    /// Create a level of all-floor tiles surrounded by a wall border.
    #[must_use]
    pub fn new(width: i32, height: i32, depth: u32) -> Self {
        assert!(width > 2 && height > 2, "Level must be at least 3x3");

        let mut tiles = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                let border = x == 0 || y == 0 || x == width - 1 || y == height - 1;
                let terrain = if border { Terrain::Wall } else { Terrain::Floor };
                tiles.push(Tile::new(terrain));
            }
        }

        Self {
            width,
            height,
            depth,
            tiles,
            actors: FxHashMap::default(),
            next_actor_id: 1,
        }
    }

    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Is a position inside the grid?
    #[must_use]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    fn index(&self, pos: Position) -> usize {
        (pos.y * self.width + pos.x) as usize
    }

    /// Get the tile at a position.
    #[must_use]
    pub fn tile(&self, pos: Position) -> Option<&Tile> {
        if self.in_bounds(pos) {
            Some(&self.tiles[self.index(pos)])
        } else {
            None
        }
    }

    /// Terrain at a position. Out-of-bounds reads as wall.
    #[must_use]
    pub fn terrain(&self, pos: Position) -> Terrain {
        self.tile(pos).map_or(Terrain::Wall, |t| t.terrain)
    }

    /// Overwrite terrain. Out-of-bounds writes are ignored.
    pub fn set_terrain(&mut self, pos: Position, terrain: Terrain) {
        if self.in_bounds(pos) {
            let idx = self.index(pos);
            self.tiles[idx].terrain = terrain;
        }
    }

    /// Mark a tile as known to the player.
    pub fn mark_known(&mut self, pos: Position) {
        if self.in_bounds(pos) {
            let idx = self.index(pos);
            self.tiles[idx].known = true;
        }
    }

    /// Is a tile known to the player?
    #[must_use]
    pub fn is_known(&self, pos: Position) -> bool {
        self.tile(pos).is_some_and(|t| t.known)
    }

    /// Can an actor stand here? Checks terrain only, not occupancy.
    #[must_use]
    pub fn is_passable(&self, pos: Position) -> bool {
        self.terrain(pos).is_passable()
    }

    /// Does this tile stop bolts and beams?
    #[must_use]
    pub fn blocks_projectiles(&self, pos: Position) -> bool {
        self.terrain(pos).blocks_projectiles()
    }

    /// Add an actor, allocating its id. Returns the assigned id.
    pub fn add_actor(&mut self, mut actor: Actor) -> ActorId {
        let id = ActorId::new(self.next_actor_id);
        self.next_actor_id += 1;
        actor.id = id;
        self.actors.insert(id, actor);
        id
    }

    /// Remove an actor (death, genocide, banishment off-level).
    pub fn remove_actor(&mut self, id: ActorId) -> Option<Actor> {
        self.actors.remove(&id)
    }

    /// Get an actor by id.
    #[must_use]
    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(&id)
    }

    /// Get an actor mutably by id.
    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(&id)
    }

    /// Number of actors on the level.
    #[must_use]
    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    /// Find the living actor occupying a tile.
    #[must_use]
    pub fn actor_at(&self, pos: Position) -> Option<ActorId> {
        self.actors
            .values()
            .find(|a| a.pos == pos && a.is_alive())
            .map(|a| a.id)
    }

    /// The player's id, found by scanning actors.
    #[must_use]
    pub fn player_id(&self) -> Option<ActorId> {
        self.actors.values().find(|a| a.is_player()).map(|a| a.id)
    }

    /// All living actors within `radius` of `center`, in id order so that
    /// per-actor random draws replay deterministically.
    #[must_use]
    pub fn actors_in_radius(&self, center: Position, radius: i32) -> Vec<ActorId> {
        let mut ids: Vec<_> = self
            .actors
            .values()
            .filter(|a| a.is_alive() && distance(center, a.pos) <= radius)
            .map(|a| a.id)
            .collect();
        ids.sort();
        ids
    }

    /// All living actor ids, in id order.
    #[must_use]
    pub fn all_actors(&self) -> Vec<ActorId> {
        let mut ids: Vec<_> = self
            .actors
            .values()
            .filter(|a| a.is_alive())
            .map(|a| a.id)
            .collect();
        ids.sort();
        ids
    }

    /// Pick a random passable, unoccupied tile within `range` of `center`.
    ///
    /// Rejection-samples the bounding square, up to 200 tries, keeping the
    /// first hit inside the range circle. Returns `None` when every try
    /// lands on a wall or an occupant (a fully walled-in level).
    pub fn random_destination(
        &self,
        center: Position,
        range: i32,
        rng: &mut GameRng,
    ) -> Option<Position> {
        for _ in 0..200 {
            let pos = Position::new(
                rng.range(center.x - range, center.x + range),
                rng.range(center.y - range, center.y + range),
            );
            if self.is_passable(pos)
                && self.actor_at(pos).is_none()
                && distance(center, pos) <= range
            {
                return Some(pos);
            }
        }
        None
    }

    /// Iterate all positions on the level, row-major.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        let width = self.width;
        let height = self.height;
        (0..height).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }
}
