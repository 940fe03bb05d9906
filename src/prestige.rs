//! Ascension (prestige reset) and realm shard upgrades.
//!
//! Ascending trades the current run for realm shards; shards buy permanent
//! upgrades whose effects are derived on demand from upgrade levels, never
//! stored. The [`Modifiers`] bundle is the bridge into the economy module.

use crate::catalog::{self, PrestigeEffect, PRESTIGE_UPGRADES};
use crate::economy;
use crate::state::{GameEvent, GameState, BASE_STARTING_GOLD};

/// Lifetime gold needed for the first ascension.
pub const FIRST_ASCENSION_REQUIREMENT: f64 = 1e15;
/// Each completed ascension multiplies the next requirement by this.
pub const ASCENSION_REQUIREMENT_FACTOR: f64 = 5.0;

/// Reference earnings for the shard payout curve.
const SHARD_BASE_GOLD: f64 = 1e12;
const SHARD_POWER: f64 = 1.8;
const SHARD_MULTIPLIER: f64 = 3.0;

/// Prestige-derived modifiers consumed by the economy engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Modifiers {
    pub income_bonus: f64,
    pub cost_reduction: f64,
}

/// Sum of one effect kind across all owned prestige upgrade levels.
fn effect_total(state: &GameState, effect: PrestigeEffect) -> f64 {
    PRESTIGE_UPGRADES
        .iter()
        .filter(|u| u.effect == effect)
        .map(|u| u.effect_value(state.prestige_levels.get(u.id).copied().unwrap_or(0)))
        .sum()
}

pub fn global_income_bonus(state: &GameState) -> f64 {
    effect_total(state, PrestigeEffect::GlobalIncome)
}

pub fn cost_reduction(state: &GameState) -> f64 {
    effect_total(state, PrestigeEffect::CostReduction)
}

pub fn starting_gold_bonus(state: &GameState) -> f64 {
    effect_total(state, PrestigeEffect::StartingGold)
}

pub fn shard_gain_bonus(state: &GameState) -> f64 {
    effect_total(state, PrestigeEffect::ShardGain)
}

pub fn offline_cap_bonus_seconds(state: &GameState) -> f64 {
    effect_total(state, PrestigeEffect::OfflineCap)
}

pub fn offline_multiplier_bonus(state: &GameState) -> f64 {
    effect_total(state, PrestigeEffect::OfflineMultiplier)
}

pub fn modifiers(state: &GameState) -> Modifiers {
    Modifiers {
        income_bonus: global_income_bonus(state),
        cost_reduction: cost_reduction(state),
    }
}

/// Lifetime gold this run must earn before ascension number
/// `times_ascended + 1` unlocks.
pub fn ascension_gold_requirement(times_ascended: u32) -> f64 {
    FIRST_ASCENSION_REQUIREMENT * ASCENSION_REQUIREMENT_FACTOR.powi(times_ascended as i32)
}

/// Shards an ascension would pay out right now. Zero until the requirement
/// is met; at least one afterwards.
pub fn potential_shards(state: &GameState) -> u64 {
    if state.total_gold_earned < ascension_gold_requirement(state.times_ascended) {
        return 0;
    }
    let base = if state.total_gold_earned < SHARD_BASE_GOLD {
        1.0
    } else {
        ((state.total_gold_earned / SHARD_BASE_GOLD).log10() + 1.0).powf(SHARD_POWER)
            * SHARD_MULTIPLIER
    };
    let payout = (base * (1.0 + shard_gain_bonus(state))).floor() as u64;
    payout.max(1)
}

/// Perform an ascension: bank the shard payout and reset the run.
/// Prestige fields, achievements, and the log survive.
pub fn ascend(state: &mut GameState) -> bool {
    let shards_gained = potential_shards(state);
    if shards_gained == 0 {
        return false;
    }

    state.realm_shards += shards_gained;
    state.times_ascended += 1;

    state.gold = BASE_STARTING_GOLD + starting_gold_bonus(state);
    state.total_gold_earned = 0.0;
    state.owned.clear();
    economy::recompute_total_income(state);

    state.push_event(GameEvent::AscensionPerformed { shards_gained });
    true
}

/// Buy one level of a prestige upgrade with realm shards. No-op for unknown
/// ids, maxed upgrades, or insufficient shards.
pub fn buy_upgrade(state: &mut GameState, id: &str) -> bool {
    let Some(def) = catalog::prestige_upgrade(id) else {
        return false;
    };
    let level = state.prestige_levels.get(def.id).copied().unwrap_or(0);
    if level >= def.max_level {
        return false;
    }
    let cost = def.cost(level);
    if state.realm_shards < cost {
        return false;
    }

    state.realm_shards -= cost;
    state.prestige_levels.insert(def.id, level + 1);
    // An income upgrade changes the cached total immediately.
    economy::recompute_total_income(state);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::economy::PurchaseQuantity;

    fn state_with_earnings(earned: f64) -> GameState {
        let mut state = GameState::new();
        state.total_gold_earned = earned;
        state
    }

    #[test]
    fn requirement_scales_fivefold_per_ascension() {
        assert!((ascension_gold_requirement(0) - 1e15).abs() < 1.0);
        assert!((ascension_gold_requirement(1) - 5e15).abs() < 1.0);
        assert!((ascension_gold_requirement(2) - 25e15).abs() < 1e3);
    }

    #[test]
    fn no_shards_below_requirement() {
        let state = state_with_earnings(FIRST_ASCENSION_REQUIREMENT - 1.0);
        assert_eq!(potential_shards(&state), 0);
    }

    #[test]
    fn shard_payout_at_first_requirement() {
        // earned/1e12 = 1000 -> (log10 + 1)^1.8 * 3 = 4^1.8 * 3 = 36.37..
        let state = state_with_earnings(FIRST_ASCENSION_REQUIREMENT);
        assert_eq!(potential_shards(&state), 36);
    }

    #[test]
    fn shard_payout_grows_with_earnings() {
        let low = state_with_earnings(1e15);
        let high = state_with_earnings(1e18);
        assert!(potential_shards(&high) > potential_shards(&low));
    }

    #[test]
    fn shard_gain_bonus_raises_payout() {
        let mut state = state_with_earnings(1e15);
        let plain = potential_shards(&state);
        state.prestige_levels.insert("shard_hoarder", 25);
        // +50% payout: floor(36.37 * 1.5) = 54.
        let boosted = potential_shards(&state);
        assert!(boosted > plain);
        assert_eq!(boosted, 54);
    }

    #[test]
    fn ascend_below_requirement_is_silent_noop() {
        let mut state = state_with_earnings(1e12);
        state.gold = 777.0;
        assert!(!ascend(&mut state));
        assert_eq!(state.times_ascended, 0);
        assert_eq!(state.realm_shards, 0);
        assert!((state.gold - 777.0).abs() < 1e-9);
        assert!(state.events.is_empty());
    }

    #[test]
    fn ascend_resets_run_and_keeps_prestige() {
        let mut state = GameState::new();
        state.gold = 1e14;
        crate::economy::purchase(&mut state, "merchant_guild", PurchaseQuantity::Exact(5));
        state.total_gold_earned = 1e15;
        state.realm_shards = 3;
        state.prestige_levels.insert("cosmic_blessing", 2);
        state.achievements_unlocked[0] = true;

        assert!(ascend(&mut state));

        assert_eq!(state.times_ascended, 1);
        assert_eq!(state.realm_shards, 3 + 36);
        assert!(state.owned.is_empty());
        assert!((state.total_gold_earned - 0.0).abs() < 1e-9);
        assert!((state.total_income_per_second - 0.0).abs() < 1e-9);
        assert!((state.gold - BASE_STARTING_GOLD).abs() < 1e-9);
        // Prestige-scoped fields survive.
        assert_eq!(state.prestige_levels["cosmic_blessing"], 2);
        assert!(state.achievements_unlocked[0]);
        assert_eq!(
            state.events,
            vec![GameEvent::AscensionPerformed { shards_gained: 36 }]
        );
    }

    #[test]
    fn ascend_grants_starting_gold_bonus() {
        let mut state = state_with_earnings(1e15);
        state.prestige_levels.insert("starting_gold_boost", 4);
        assert!(ascend(&mut state));
        assert!((state.gold - (BASE_STARTING_GOLD + 1_000.0)).abs() < 1e-9);
    }

    #[test]
    fn second_ascension_needs_five_times_more() {
        let mut state = state_with_earnings(1e15);
        state.times_ascended = 1;
        assert!(!ascend(&mut state));
        state.total_gold_earned = 5e15;
        assert!(ascend(&mut state));
        assert_eq!(state.times_ascended, 2);
    }

    #[test]
    fn buy_upgrade_deducts_and_levels() {
        let mut state = GameState::new();
        state.realm_shards = 10;
        // Royal Treasury level 0 costs 2 shards.
        assert!(buy_upgrade(&mut state, "starting_gold_boost"));
        assert_eq!(state.realm_shards, 8);
        assert_eq!(state.prestige_levels["starting_gold_boost"], 1);
        // Level 1 also costs 2.
        assert!(buy_upgrade(&mut state, "starting_gold_boost"));
        assert_eq!(state.realm_shards, 6);
        assert_eq!(state.prestige_levels["starting_gold_boost"], 2);
    }

    #[test]
    fn buy_upgrade_insufficient_shards_is_noop() {
        let mut state = GameState::new();
        state.realm_shards = 1;
        assert!(!buy_upgrade(&mut state, "starting_gold_boost"));
        assert_eq!(state.realm_shards, 1);
        assert!(state.prestige_levels.is_empty());
    }

    #[test]
    fn buy_upgrade_unknown_id_is_noop() {
        let mut state = GameState::new();
        state.realm_shards = 1_000;
        assert!(!buy_upgrade(&mut state, "time_machine"));
        assert_eq!(state.realm_shards, 1_000);
    }

    #[test]
    fn buy_upgrade_stops_at_max_level() {
        let mut state = GameState::new();
        state.realm_shards = u64::MAX / 2;
        let def = catalog::prestige_upgrade("offline_multiplier").unwrap();
        for _ in 0..def.max_level {
            assert!(buy_upgrade(&mut state, "offline_multiplier"));
        }
        assert!(!buy_upgrade(&mut state, "offline_multiplier"));
        assert_eq!(state.prestige_levels["offline_multiplier"], def.max_level);
    }

    #[test]
    fn income_upgrade_recomputes_cached_total() {
        let mut state = GameState::new();
        state.gold = 100.0;
        crate::economy::purchase(&mut state, "lemonade_stand", PurchaseQuantity::Exact(1));
        assert!((state.total_income_per_second - 1.0).abs() < 1e-9);

        state.realm_shards = 100;
        assert!(buy_upgrade(&mut state, "cosmic_blessing"));
        assert!((state.total_income_per_second - 1.05).abs() < 1e-9);
    }

    #[test]
    fn fresh_state_modifiers_are_exactly_zero() {
        let state = GameState::new();
        assert_eq!(global_income_bonus(&state), 0.0);
        assert_eq!(cost_reduction(&state), 0.0);
        assert_eq!(starting_gold_bonus(&state), 0.0);
        assert_eq!(shard_gain_bonus(&state), 0.0);
        assert_eq!(offline_cap_bonus_seconds(&state), 0.0);
        assert_eq!(offline_multiplier_bonus(&state), 0.0);
    }

    #[test]
    fn modifiers_reflect_upgrade_levels() {
        let mut state = GameState::new();
        state.prestige_levels.insert("cosmic_blessing", 4);
        state.prestige_levels.insert("efficient_realms", 10);
        let mods = modifiers(&state);
        assert!((mods.income_bonus - 0.20).abs() < 1e-12);
        assert!((mods.cost_reduction - 0.05).abs() < 1e-12);
    }

    #[test]
    fn offline_getters_sum_their_upgrades() {
        let mut state = GameState::new();
        state.prestige_levels.insert("offline_time_cap", 2);
        state.prestige_levels.insert("offline_multiplier", 3);
        assert!((offline_cap_bonus_seconds(&state) - 3_600.0).abs() < 1e-9);
        assert!((offline_multiplier_bonus(&state) - 0.15).abs() < 1e-9);
    }
}
