//! Property tests for the resistance math and the result algebra.

use proptest::prelude::*;

use rogue_effects::combat::{
    resistance_level, scale_monster_damage, scale_player_damage, MonsterResistStatus,
};
use rogue_effects::core::GameRng;
use rogue_effects::effects::EffectResult;
use rogue_effects::world::StatusId;

proptest! {
    #[test]
    fn player_scaling_is_monotonic_in_level(damage in 0u32..5000, level in 0u32..17) {
        let lower = scale_player_damage(damage, level);
        let higher = scale_player_damage(damage, level + 1);
        prop_assert!(lower <= higher);
    }

    #[test]
    fn player_level_zero_is_total_immunity(damage in 0u32..1_000_000) {
        prop_assert_eq!(scale_player_damage(damage, 0), 0);
    }

    #[test]
    fn player_baseline_level_passes_damage_through(damage in 0u32..100_000) {
        prop_assert_eq!(scale_player_damage(damage, 9), damage);
    }

    #[test]
    fn player_positive_level_never_zeroes_positive_damage(damage in 1u32..5000, level in 1u32..19) {
        prop_assert!(scale_player_damage(damage, level) >= 1);
    }

    #[test]
    fn resistance_sources_only_ever_lower_the_level(sources in 0u32..6, vulnerable: bool) {
        let level = resistance_level(false, sources, vulnerable);
        let more = resistance_level(false, sources + 1, vulnerable);
        prop_assert!(more <= level);
        // Immunity dominates everything.
        prop_assert_eq!(resistance_level(true, sources, vulnerable), 0);
    }

    #[test]
    fn monster_resist_scaling_stays_in_bounds(damage in 0u32..10_000, seed: u64) {
        let mut rng = GameRng::new(seed);
        let scaled = scale_monster_damage(damage, MonsterResistStatus::Resists, &mut rng);
        // The divisor is uniform in [7, 12].
        prop_assert!(scaled >= damage * 3 / 12);
        prop_assert!(scaled <= damage * 3 / 7);
    }

    #[test]
    fn monster_immunity_floors_small_damage_to_zero(damage in 0u32..9) {
        let mut rng = GameRng::new(0);
        prop_assert_eq!(
            scale_monster_damage(damage, MonsterResistStatus::Immune, &mut rng),
            0
        );
    }

    #[test]
    fn combine_is_associative_up_to_messages(
        damages in prop::collection::vec(0u32..100, 0..6),
        split in 0usize..6,
    ) {
        let results: Vec<EffectResult> = damages
            .iter()
            .map(|&d| EffectResult::success("hit").with_damage(d))
            .collect();
        let split = split.min(results.len());

        let all = EffectResult::combine(results.clone());
        let left = EffectResult::combine([
            EffectResult::combine(results[..split].to_vec()),
            EffectResult::combine(results[split..].to_vec()),
        ]);

        // Success/turn flags are OR'd, so a degenerate empty side folds to
        // the failure identity and ORs back in; magnitudes always match.
        prop_assert_eq!(all.damage_dealt, left.damage_dealt);
        prop_assert_eq!(all.messages, left.messages);
        if !results.is_empty() {
            prop_assert_eq!(all.success, left.success);
            prop_assert_eq!(all.turn_consumed, left.turn_consumed);
        }
    }

    #[test]
    fn combine_sums_and_concatenates(counts in prop::collection::vec(1u32..50, 1..8)) {
        let results: Vec<EffectResult> = counts
            .iter()
            .map(|&n| {
                EffectResult::success("tick")
                    .with_damage(n)
                    .with_healed(n / 2)
                    .with_status_applied(StatusId::Poisoned)
            })
            .collect();

        let combined = EffectResult::combine(results);
        prop_assert_eq!(combined.damage_dealt, counts.iter().sum::<u32>());
        prop_assert_eq!(combined.amount_healed, counts.iter().map(|n| n / 2).sum::<u32>());
        prop_assert_eq!(combined.statuses_applied.len(), counts.len());
        prop_assert!(combined.success);
    }
}

#[test]
fn empty_combine_is_the_failure_identity() {
    let combined = EffectResult::combine([]);
    assert!(!combined.success);
    assert!(!combined.turn_consumed);
    assert_eq!(combined, EffectResult::default());
}
