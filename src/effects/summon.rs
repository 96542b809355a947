//! Monster creation and destruction: summoning, polymorph, cloning, and
//! the genocide family.
//!
//! Genocide variants exact strain: the caster takes fixed damage per
//! monster removed, so the most powerful variants can kill the caster.
//! Uniques are exempt from all of them.

use crate::core::{ActorId, Dice};
use crate::world::MonsterFlag;

use super::context::ExecutionContext;
use super::definition::EffectDefinition;
use super::engine::Resources;
use super::error::EffectError;
use super::kind::EffectKind;
use super::registry::EffectRegistry;
use super::result::EffectResult;

/// How far from the caster summoned monsters may land.
const SUMMON_RANGE: i32 = 3;

pub(crate) fn build_summon_monsters(
    def: &EffectDefinition,
    _registry: &EffectRegistry,
    _depth: usize,
) -> Result<EffectKind, EffectError> {
    Ok(EffectKind::SummonMonsters {
        count: def.dice_or("count", Dice::new(1, 3))?,
    })
}

pub(crate) fn build_polymorph(
    def: &EffectDefinition,
    _registry: &EffectRegistry,
    _depth: usize,
) -> Result<EffectKind, EffectError> {
    Ok(EffectKind::Polymorph {
        power: def.int_or("power", 20)? as u32,
    })
}

pub(crate) fn build_clone_monster(
    _def: &EffectDefinition,
    _registry: &EffectRegistry,
    _depth: usize,
) -> Result<EffectKind, EffectError> {
    Ok(EffectKind::CloneMonster)
}

pub(crate) fn build_genocide(
    def: &EffectDefinition,
    _registry: &EffectRegistry,
    _depth: usize,
) -> Result<EffectKind, EffectError> {
    Ok(EffectKind::Genocide {
        strain: def.int_or("strain", 4)? as u32,
    })
}

pub(crate) fn build_mass_genocide(
    def: &EffectDefinition,
    _registry: &EffectRegistry,
    _depth: usize,
) -> Result<EffectKind, EffectError> {
    Ok(EffectKind::MassGenocide {
        radius: def.int_or("radius", 20)? as i32,
        strain: def.int_or("strain", 3)? as u32,
    })
}

pub(crate) fn build_omnicide(
    def: &EffectDefinition,
    _registry: &EffectRegistry,
    _depth: usize,
) -> Result<EffectKind, EffectError> {
    Ok(EffectKind::Omnicide {
        strain: def.int_or("strain", 2)? as u32,
    })
}

/// Summon monsters near the caster, chosen from the depth candidates.
///
/// No candidates, or no open ground, is an expected no-op. Draw order per
/// summon: kind choice, then destination tries, then hit dice.
pub(crate) fn summon_monsters(
    ctx: &mut ExecutionContext,
    resources: &Resources,
    count: Dice,
) -> EffectResult {
    let wanted = count.roll(ctx.rng).max(1) as u32;
    let candidates = resources.bestiary.candidates_at_depth(ctx.level.depth);
    if candidates.is_empty() {
        return EffectResult::noop("Nothing answers the call.");
    }

    let center = ctx.caster_pos();
    let mut summoned = 0;
    for _ in 0..wanted {
        let kind = (*ctx
            .rng
            .choose(&candidates)
            .expect("candidates checked non-empty"))
        .clone();
        let Some(dest) = ctx.level.random_destination(center, SUMMON_RANGE, ctx.rng) else {
            continue;
        };
        let monster = resources.bestiary.instantiate(&kind, dest, ctx.rng);
        ctx.level.add_actor(monster);
        summoned += 1;
    }

    if summoned == 0 {
        return EffectResult::noop("Nothing answers the call.");
    }
    EffectResult::success("You hear something appear nearby!")
}

/// Polymorph the monster at the target position into a random kind.
///
/// Uniques are exempt; others roll a save. The new monster keeps the old
/// one's tile but nothing else.
pub(crate) fn polymorph(
    ctx: &mut ExecutionContext,
    resources: &Resources,
    power: u32,
) -> EffectResult {
    let pos = ctx.position();
    let Some(id) = ctx.level.actor_at(pos) else {
        return EffectResult::noop("There is nothing there.");
    };

    let target = ctx.level.actor(id).expect("occupant is on the level");
    let name = target.name.clone();
    if target.is_player() || target.has_flag(MonsterFlag::Unique) {
        return EffectResult::noop(format!("The {name} is unaffected."));
    }
    if target.saving_throw(power, ctx.rng) {
        return EffectResult::noop(format!("The {name} resists."));
    }

    let candidates = resources.bestiary.candidates_at_depth(ctx.level.depth);
    let Some(kind) = ctx.rng.choose(&candidates).map(|k| (*k).clone()) else {
        return EffectResult::noop(format!("The {name} shimmers, but holds its shape."));
    };

    ctx.level.remove_actor(id);
    let replacement = resources.bestiary.instantiate(&kind, pos, ctx.rng);
    let new_name = replacement.name.clone();
    ctx.level.add_actor(replacement);
    EffectResult::success(format!("The {name} changes into a {new_name}!"))
}

/// Duplicate the monster at the target position onto nearby open ground.
pub(crate) fn clone_monster(ctx: &mut ExecutionContext) -> EffectResult {
    let pos = ctx.position();
    let Some(id) = ctx.level.actor_at(pos) else {
        return EffectResult::noop("There is nothing there.");
    };

    let target = ctx.level.actor(id).expect("occupant is on the level");
    let name = target.name.clone();
    if target.is_player() || target.has_flag(MonsterFlag::Unique) {
        return EffectResult::noop(format!("The {name} is unaffected."));
    }

    let Some(dest) = ctx.level.random_destination(pos, 2, ctx.rng) else {
        return EffectResult::noop("There is no room.");
    };
    let mut copy = ctx.level.actor(id).expect("occupant is on the level").clone();
    copy.pos = dest;
    ctx.level.add_actor(copy);
    EffectResult::success(format!("The {name} splits in two!"))
}

/// Remove qualifying monsters, charging the caster strain per removal.
fn exterminate(
    ctx: &mut ExecutionContext,
    victims: Vec<ActorId>,
    strain: u32,
    verb: &str,
) -> EffectResult {
    if victims.is_empty() {
        return EffectResult::noop("Nothing happens.");
    }

    let mut result = EffectResult::default();
    result.success = true;
    result.turn_consumed = true;
    let mut removed = 0;
    for id in victims {
        let victim = ctx.level.actor(id).expect("victim enumerated while live");
        if victim.has_flag(MonsterFlag::Unique) {
            let name = victim.name.clone();
            result.messages.push(format!("The {name} is unaffected."));
            continue;
        }
        ctx.level.remove_actor(id);
        removed += 1;
    }

    if removed == 0 {
        result.messages.push("Nothing happens.".to_string());
        return result;
    }
    result.messages.push(format!("You {verb} them from existence!"));

    let toll = strain * removed;
    if toll > 0 {
        let caster = ctx.caster_mut();
        caster.take_damage(toll);
        result.messages.push("You stagger under the strain.".to_string());
    }
    result
}

/// Genocide: remove every living monster bearing the targeted symbol.
pub(crate) fn genocide(ctx: &mut ExecutionContext, strain: u32) -> EffectResult {
    let symbol = ctx.symbol();
    let victims: Vec<ActorId> = ctx
        .level
        .all_actors()
        .into_iter()
        .filter(|&id| {
            let actor = ctx.level.actor(id).expect("enumerated actor is live");
            actor.is_monster() && actor.symbol() == symbol
        })
        .collect();
    exterminate(ctx, victims, strain, "erase")
}

/// Mass genocide: remove every monster within a radius of the caster.
pub(crate) fn mass_genocide(ctx: &mut ExecutionContext, radius: i32, strain: u32) -> EffectResult {
    let center = ctx.caster_pos();
    let victims: Vec<ActorId> = ctx
        .level
        .actors_in_radius(center, radius)
        .into_iter()
        .filter(|&id| {
            ctx.level
                .actor(id)
                .expect("radius query returned a live id")
                .is_monster()
        })
        .collect();
    exterminate(ctx, victims, strain, "banish")
}

/// Omnicide: remove every monster on the level.
pub(crate) fn omnicide(ctx: &mut ExecutionContext, strain: u32) -> EffectResult {
    let victims: Vec<ActorId> = ctx
        .level
        .all_actors()
        .into_iter()
        .filter(|&id| {
            ctx.level
                .actor(id)
                .expect("enumerated actor is live")
                .is_monster()
        })
        .collect();
    exterminate(ctx, victims, strain, "sweep")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameRng, Position};
    use crate::effects::context::Target;
    use crate::world::{Actor, Bestiary, Level, MonsterKind};

    fn bestiary() -> Bestiary {
        let mut bestiary = Bestiary::new();
        bestiary.register(MonsterKind::new("rat", "Giant Rat", 'r', 1, Dice::new(1, 4)));
        bestiary.register(MonsterKind::new("orc", "Orc", 'o', 3, Dice::new(3, 8)));
        bestiary
    }

    fn resources() -> Resources {
        Resources::new(bestiary())
    }

    #[test]
    fn test_summon_adds_monsters_near_caster() {
        let mut level = Level::new(20, 20, 5);
        let id = level.add_actor(Actor::player("Hero", 30, 10, 5, Position::new(10, 10)));
        let mut rng = GameRng::new(42);
        let res = resources();
        let mut ctx = ExecutionContext::new(id, &mut level, &mut rng);

        let result = summon_monsters(&mut ctx, &res, Dice::constant(3));
        assert!(result.success);
        assert_eq!(level.actor_count(), 4);
        for aid in level.all_actors() {
            let actor = level.actor(aid).unwrap();
            if actor.is_monster() {
                assert!(crate::core::distance(Position::new(10, 10), actor.pos) <= SUMMON_RANGE);
            }
        }
    }

    #[test]
    fn test_summon_empty_bestiary_is_noop() {
        let mut level = Level::new(20, 20, 5);
        let id = level.add_actor(Actor::player("Hero", 30, 10, 5, Position::new(10, 10)));
        let mut rng = GameRng::new(42);
        let res = Resources::new(Bestiary::new());
        let mut ctx = ExecutionContext::new(id, &mut level, &mut rng);

        let result = summon_monsters(&mut ctx, &res, Dice::constant(3));
        assert!(result.success);
        assert_eq!(level.actor_count(), 1);
    }

    #[test]
    fn test_genocide_spares_uniques_and_other_symbols() {
        let mut level = Level::new(20, 20, 1);
        let id = level.add_actor(Actor::player("Hero", 100, 10, 5, Position::new(10, 10)));
        level.add_actor(Actor::monster("orc", "Orc", 'o', 3, 20, Position::new(2, 2)));
        level.add_actor(Actor::monster("orc", "Orc", 'o', 3, 20, Position::new(3, 3)));
        level.add_actor(
            Actor::monster("king", "Orc King", 'o', 10, 80, Position::new(4, 4))
                .with_flag(MonsterFlag::Unique),
        );
        level.add_actor(Actor::monster("rat", "Rat", 'r', 1, 5, Position::new(5, 5)));

        let mut rng = GameRng::new(1);
        let mut ctx =
            ExecutionContext::new(id, &mut level, &mut rng).with_target(Target::Symbol('o'));
        let result = genocide(&mut ctx, 4);

        assert!(result.success);
        assert!(result
            .messages
            .contains(&"The Orc King is unaffected.".to_string()));
        // Player, the unique, and the rat survive.
        assert_eq!(level.actor_count(), 3);
        // Strain: 2 removed at 4 each.
        assert_eq!(level.actor(id).unwrap().hp, 92);
    }

    #[test]
    fn test_omnicide_clears_level_and_strains() {
        let mut level = Level::new(20, 20, 1);
        let id = level.add_actor(Actor::player("Hero", 100, 10, 5, Position::new(10, 10)));
        for i in 0..5 {
            level.add_actor(Actor::monster("rat", "Rat", 'r', 1, 5, Position::new(2 + i, 2)));
        }
        let mut rng = GameRng::new(1);
        let mut ctx = ExecutionContext::new(id, &mut level, &mut rng);

        let result = omnicide(&mut ctx, 2);
        assert!(result.success);
        assert_eq!(level.actor_count(), 1);
        assert_eq!(level.actor(id).unwrap().hp, 90);
    }

    #[test]
    fn test_polymorph_replaces_monster() {
        let mut level = Level::new(20, 20, 10);
        let id = level.add_actor(Actor::player("Hero", 30, 10, 50, Position::new(10, 10)));
        let pos = Position::new(12, 10);
        level.add_actor(Actor::monster("worm", "Worm", 'w', 1, 3, pos));

        let res = resources();
        let mut rng = GameRng::new(42);
        let mut ctx =
            ExecutionContext::new(id, &mut level, &mut rng).with_target(Target::Position(pos));
        let result = polymorph(&mut ctx, &res, 100);

        // A level-1 worm cannot save against power 100.
        assert!(result.success);
        let new_id = level.actor_at(pos).unwrap();
        let kind_key = match &level.actor(new_id).unwrap().kind {
            crate::world::ActorKind::Monster(m) => m.kind_key.clone(),
            crate::world::ActorKind::Player(_) => panic!("player at monster tile"),
        };
        assert!(kind_key == "rat" || kind_key == "orc");
    }

    #[test]
    fn test_clone_duplicates() {
        let mut level = Level::new(20, 20, 1);
        let id = level.add_actor(Actor::player("Hero", 30, 10, 5, Position::new(10, 10)));
        let pos = Position::new(12, 10);
        level.add_actor(Actor::monster("orc", "Orc", 'o', 3, 20, pos));

        let mut rng = GameRng::new(42);
        let mut ctx =
            ExecutionContext::new(id, &mut level, &mut rng).with_target(Target::Position(pos));
        let result = clone_monster(&mut ctx);

        assert!(result.success);
        assert_eq!(level.actor_count(), 3);
    }
}
