//! Lifecycle tests for the persistent-effect subsystem, including feeding
//! spawned declarations back through the one-shot engine the way a turn
//! loop would.

use rogue_effects::active::{
    ActiveEffectBook, Archetype, AreaEffect, DelayedEffect, GameEvent, ProjectileEffect,
    ReactiveEffect, TickResult, TriggerKind,
};
use rogue_effects::core::{GameRng, Position};
use rogue_effects::effects::{EffectDefinition, EffectEngine, ExecutionContext};
use rogue_effects::world::{Actor, Bestiary, Level};

fn fire_blast() -> EffectDefinition {
    EffectDefinition::new("ball")
        .with_param("element", "fire")
        .with_param("damage", 12)
        .with_param("radius", 1)
}

/// Execute spawned declarations the way the turn loop does.
fn run_spawned(tick: &TickResult, caster: rogue_effects::core::ActorId, level: &mut Level, rng: &mut GameRng) {
    let engine = EffectEngine::standard(Bestiary::new());
    for spawned in &tick.spawned {
        let mut ctx = ExecutionContext::new(caster, level, rng).with_target(spawned.target);
        engine.run(&spawned.definition, &mut ctx).unwrap();
    }
}

#[test]
fn area_cloud_pulses_each_turn_then_fades() {
    let mut level = Level::new(20, 20, 1);
    let hero = level.add_actor(Actor::player("Hero", 50, 10, 5, Position::new(3, 3)));
    let orc = level.add_actor(Actor::monster("orc", "Orc", 'o', 3, 100, Position::new(10, 10)));

    let mut book = ActiveEffectBook::new();
    book.add(Archetype::Area(AreaEffect::new(
        Position::new(10, 10),
        2,
        2,
        fire_blast(),
    )));

    let mut rng = GameRng::new(4);
    for _ in 0..2 {
        let tick = book.advance_all(&level);
        assert_eq!(tick.spawned.len(), 1);
        run_spawned(&tick, hero, &mut level, &mut rng);
    }
    assert!(book.is_empty());
    // Two pulses of 12 with no resistance.
    assert_eq!(level.actor(orc).unwrap().hp, 100 - 24);

    // Nothing left to advance.
    let tick = book.advance_all(&level);
    assert!(tick.is_empty());
}

#[test]
fn area_with_duration_one_pulses_exactly_once() {
    let mut level = Level::new(20, 20, 1);
    level.add_actor(Actor::monster("orc", "Orc", 'o', 3, 100, Position::new(10, 10)));

    let mut book = ActiveEffectBook::new();
    book.add(Archetype::Area(AreaEffect::new(
        Position::new(10, 10),
        2,
        1,
        fire_blast(),
    )));

    let first = book.advance_all(&level);
    assert_eq!(first.spawned.len(), 1);
    assert!(book.is_empty());
}

#[test]
fn projectile_travels_and_detonates_at_the_target() {
    let mut level = Level::new(40, 40, 1);
    let hero = level.add_actor(Actor::player("Hero", 50, 10, 5, Position::new(5, 5)));
    let orc = level.add_actor(Actor::monster("orc", "Orc", 'o', 3, 100, Position::new(20, 5)));

    let mut book = ActiveEffectBook::new();
    book.add(Archetype::Projectile(ProjectileEffect::new(
        Position::new(6, 5),
        Position::new(20, 5),
        5,
        fire_blast(),
    )));

    let mut rng = GameRng::new(4);
    let mut turns = 0;
    while !book.is_empty() {
        let tick = book.advance_all(&level);
        run_spawned(&tick, hero, &mut level, &mut rng);
        turns += 1;
        assert!(turns < 10, "projectile never landed");
    }
    // 14 tiles at speed 5: two flight turns, detonation on the third.
    assert_eq!(turns, 3);
    assert_eq!(level.actor(orc).unwrap().hp, 100 - 12);
}

#[test]
fn projectile_detonates_early_on_a_body_in_the_path() {
    let mut level = Level::new(40, 40, 1);
    let blocker = level.add_actor(Actor::monster("orc", "Orc", 'o', 3, 100, Position::new(9, 5)));

    let mut book = ActiveEffectBook::new();
    book.add(Archetype::Projectile(ProjectileEffect::new(
        Position::new(6, 5),
        Position::new(30, 5),
        5,
        fire_blast(),
    )));

    let tick = book.advance_all(&level);
    assert!(book.is_empty());
    assert_eq!(tick.spawned.len(), 1);
    assert_eq!(
        tick.spawned[0].target,
        rogue_effects::effects::Target::Position(level.actor(blocker).unwrap().pos)
    );
}

#[test]
fn delayed_fuse_fires_on_the_exact_turn() {
    let mut level = Level::new(20, 20, 1);
    let hero = level.add_actor(Actor::player("Hero", 50, 10, 5, Position::new(3, 3)));
    let orc = level.add_actor(Actor::monster("orc", "Orc", 'o', 3, 100, Position::new(10, 10)));

    let mut book = ActiveEffectBook::new();
    book.add(Archetype::Delayed(DelayedEffect::new(
        3,
        2,
        fire_blast(),
        rogue_effects::effects::Target::Position(Position::new(10, 10)),
    )));

    let mut rng = GameRng::new(4);

    let tick = book.advance_all(&level);
    assert!(tick.spawned.is_empty());
    // Inside the warning window.
    assert!(!tick.messages.is_empty());

    let tick = book.advance_all(&level);
    assert!(tick.spawned.is_empty());
    assert_eq!(level.actor(orc).unwrap().hp, 100);

    let tick = book.advance_all(&level);
    assert_eq!(tick.spawned.len(), 1);
    run_spawned(&tick, hero, &mut level, &mut rng);
    assert_eq!(level.actor(orc).unwrap().hp, 100 - 12);
    assert!(book.is_empty());
}

#[test]
fn reactive_ward_retaliates_and_dies_with_its_host() {
    let mut level = Level::new(20, 20, 1);
    let hero = level.add_actor(Actor::player("Hero", 50, 10, 5, Position::new(5, 5)));
    let orc = level.add_actor(Actor::monster("orc", "Orc", 'o', 3, 100, Position::new(8, 5)));

    let mut book = ActiveEffectBook::new();
    book.add(Archetype::Reactive(ReactiveEffect::new(
        hero,
        10,
        TriggerKind::AttackMade,
        fire_blast(),
    )));

    // An attack on the host triggers a response aimed at the attacker.
    let tick = book.dispatch_event(
        GameEvent::AttackMade {
            attacker: orc,
            target: hero,
        },
        &level,
    );
    assert_eq!(tick.spawned.len(), 1);
    let mut rng = GameRng::new(4);
    run_spawned(&tick, hero, &mut level, &mut rng);
    assert_eq!(level.actor(orc).unwrap().hp, 100 - 12);

    // An attack on someone else does not.
    let tick = book.dispatch_event(
        GameEvent::AttackMade {
            attacker: hero,
            target: orc,
        },
        &level,
    );
    assert!(tick.spawned.is_empty());

    // Host death expires the ward on the next advance.
    level.actor_mut(hero).unwrap().take_damage(999);
    book.advance_all(&level);
    assert!(book.is_empty());
}
