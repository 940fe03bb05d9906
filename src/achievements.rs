//! Achievements: declarative conditions evaluated against a state snapshot.
//!
//! Conditions are data, not callbacks; one interpreter ([`is_met`]) covers
//! every kind. Unlocks are monotonic and survive ascension.

use crate::state::{GameEvent, GameState, Snapshot};

/// What a single achievement requires. Thresholds are inclusive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Condition {
    GoldAtLeast(f64),
    IncomeAtLeast(f64),
    /// Owns at least one unit of any property of the given tier or higher.
    OwnsTierAtLeast(u8),
    /// The named property is owned and upgraded to its maximum level.
    PropertyAtMaxLevel(&'static str),
    AscendedAtLeast(u32),
}

pub struct AchievementDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub condition: Condition,
}

/// All achievements, in display order. `GameState::achievements_unlocked`
/// is indexed parallel to this table.
pub const ACHIEVEMENTS: [AchievementDef; 6] = [
    AchievementDef {
        id: "pocket_money",
        name: "Pocket Money",
        description: "Hold 1,000 gold.",
        icon: "*",
        condition: Condition::GoldAtLeast(1e3),
    },
    AchievementDef {
        id: "millionaire",
        name: "Millionaire",
        description: "Hold 1,000,000 gold.",
        icon: "$",
        condition: Condition::GoldAtLeast(1e6),
    },
    AchievementDef {
        id: "income_stream",
        name: "Income Stream",
        description: "Reach 100 gold per second.",
        icon: ">",
        condition: Condition::IncomeAtLeast(100.0),
    },
    AchievementDef {
        id: "moving_up",
        name: "Moving Up",
        description: "Own a tier 2 property.",
        icon: "^",
        condition: Condition::OwnsTierAtLeast(2),
    },
    AchievementDef {
        id: "lemonade_legend",
        name: "Lemonade Legend",
        description: "Fully upgrade the Lemonade Stand.",
        icon: "!",
        condition: Condition::PropertyAtMaxLevel("lemonade_stand"),
    },
    AchievementDef {
        id: "new_realm",
        name: "A New Realm",
        description: "Ascend for the first time.",
        icon: "@",
        condition: Condition::AscendedAtLeast(1),
    },
];

/// Evaluate one condition against a snapshot.
pub fn is_met(condition: &Condition, snapshot: &Snapshot<'_>) -> bool {
    match *condition {
        Condition::GoldAtLeast(amount) => snapshot.gold >= amount,
        Condition::IncomeAtLeast(rate) => snapshot.income_per_second >= rate,
        Condition::OwnsTierAtLeast(tier) => snapshot.owned.iter().any(|(id, prop)| {
            prop.quantity > 0
                && crate::catalog::property(id).is_some_and(|def| def.tier >= tier)
        }),
        Condition::PropertyAtMaxLevel(id) => {
            snapshot.owned.get(id).is_some_and(|prop| {
                prop.quantity > 0
                    && crate::catalog::property(id).is_some_and(|def| prop.level >= def.max_level)
            })
        }
        Condition::AscendedAtLeast(times) => snapshot.times_ascended >= times,
    }
}

/// Check every locked achievement and unlock those now met, queuing one
/// event per unlock. Already-unlocked entries are never re-evaluated.
pub fn scan(state: &mut GameState) {
    let newly_met: Vec<usize> = {
        let snapshot = state.snapshot();
        ACHIEVEMENTS
            .iter()
            .enumerate()
            .filter(|(i, def)| {
                !state.achievements_unlocked[*i] && is_met(&def.condition, &snapshot)
            })
            .map(|(i, _)| i)
            .collect()
    };
    for i in newly_met {
        state.achievements_unlocked[i] = true;
        state.push_event(GameEvent::AchievementUnlocked {
            id: ACHIEVEMENTS[i].id,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::state::OwnedProperty;

    fn index_of(id: &str) -> usize {
        ACHIEVEMENTS.iter().position(|a| a.id == id).unwrap()
    }

    #[test]
    fn achievement_ids_are_unique() {
        for (i, a) in ACHIEVEMENTS.iter().enumerate() {
            for b in ACHIEVEMENTS.iter().skip(i + 1) {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn gold_threshold_is_inclusive() {
        let mut state = GameState::new();
        state.gold = 999.0;
        assert!(!is_met(&Condition::GoldAtLeast(1e3), &state.snapshot()));
        state.gold = 1_000.0;
        assert!(is_met(&Condition::GoldAtLeast(1e3), &state.snapshot()));
    }

    #[test]
    fn income_condition_reads_cached_total() {
        let mut state = GameState::new();
        state.total_income_per_second = 99.9;
        assert!(!is_met(&Condition::IncomeAtLeast(100.0), &state.snapshot()));
        state.total_income_per_second = 100.0;
        assert!(is_met(&Condition::IncomeAtLeast(100.0), &state.snapshot()));
    }

    #[test]
    fn tier_condition_ignores_zero_quantity_records() {
        let mut state = GameState::new();
        let def = catalog::property("inn_and_tavern").unwrap();
        state.owned.insert(def.id, OwnedProperty::new(def));
        assert!(!is_met(&Condition::OwnsTierAtLeast(2), &state.snapshot()));

        state.owned.get_mut("inn_and_tavern").unwrap().quantity = 1;
        assert!(is_met(&Condition::OwnsTierAtLeast(2), &state.snapshot()));
    }

    #[test]
    fn higher_tier_satisfies_lower_requirement() {
        let mut state = GameState::new();
        let def = catalog::property("merchant_guild").unwrap(); // tier 3
        let mut prop = OwnedProperty::new(def);
        prop.quantity = 1;
        state.owned.insert(def.id, prop);
        assert!(is_met(&Condition::OwnsTierAtLeast(2), &state.snapshot()));
    }

    #[test]
    fn max_level_condition_requires_both_ownership_and_level() {
        let mut state = GameState::new();
        let cond = Condition::PropertyAtMaxLevel("lemonade_stand");
        assert!(!is_met(&cond, &state.snapshot()));

        let def = catalog::property("lemonade_stand").unwrap();
        let mut prop = OwnedProperty::new(def);
        prop.quantity = 1;
        prop.level = def.max_level - 1;
        state.owned.insert(def.id, prop);
        assert!(!is_met(&cond, &state.snapshot()));

        state.owned.get_mut("lemonade_stand").unwrap().level = def.max_level;
        assert!(is_met(&cond, &state.snapshot()));
    }

    #[test]
    fn ascension_condition() {
        let mut state = GameState::new();
        assert!(!is_met(&Condition::AscendedAtLeast(1), &state.snapshot()));
        state.times_ascended = 1;
        assert!(is_met(&Condition::AscendedAtLeast(1), &state.snapshot()));
    }

    #[test]
    fn scan_unlocks_once_and_queues_one_event() {
        let mut state = GameState::new();
        state.gold = 5_000.0;

        scan(&mut state);
        let i = index_of("pocket_money");
        assert!(state.achievements_unlocked[i]);
        assert_eq!(
            state.events,
            vec![GameEvent::AchievementUnlocked { id: "pocket_money" }]
        );

        // A second scan with the condition still true adds nothing.
        scan(&mut state);
        assert_eq!(state.events.len(), 1);
    }

    #[test]
    fn unlock_survives_condition_turning_false() {
        let mut state = GameState::new();
        state.gold = 5_000.0;
        scan(&mut state);
        state.gold = 0.0;
        scan(&mut state);
        assert!(state.achievements_unlocked[index_of("pocket_money")]);
    }

    #[test]
    fn scan_can_unlock_several_at_once() {
        let mut state = GameState::new();
        state.gold = 2e6;
        state.total_income_per_second = 500.0;
        scan(&mut state);
        assert!(state.achievements_unlocked[index_of("pocket_money")]);
        assert!(state.achievements_unlocked[index_of("millionaire")]);
        assert!(state.achievements_unlocked[index_of("income_stream")]);
        assert_eq!(state.events.len(), 3);
    }
}
