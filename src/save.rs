//! Save/load to localStorage.
//!
//! ## Versioning policy
//!
//! The format version lives in the storage key, not the payload: a breaking
//! format change bumps the key suffix and old snapshots are simply orphaned,
//! so there is no migration code. Within a version, `#[serde(default)]`
//! tolerates added fields (old saves default them) and serde ignores removed
//! ones, so additive changes need no bump.
//!
//! The cached per-unit income and next upgrade cost are persisted with each
//! property; a level-0 record whose caches read zero (a partially written
//! older save) is re-derived from the catalog base values on load.

#[cfg(any(target_arch = "wasm32", test))]
use serde::{Deserialize, Serialize};

#[cfg(any(target_arch = "wasm32", test))]
use std::collections::BTreeMap;

#[cfg(any(target_arch = "wasm32", test))]
use crate::achievements::ACHIEVEMENTS;
#[cfg(any(target_arch = "wasm32", test))]
use crate::catalog;
#[cfg(any(target_arch = "wasm32", test))]
use crate::economy;
#[cfg(any(target_arch = "wasm32", test))]
use crate::state::{GameState, OwnedProperty};

#[cfg(target_arch = "wasm32")]
const STORAGE_KEY: &str = "realm_tycoon_v1::game_state";

/// Autosave cadence in ticks. 1 tick/sec x 30 sec.
pub const AUTOSAVE_INTERVAL: u32 = 30;

#[cfg(any(target_arch = "wasm32", test))]
#[derive(Serialize, Deserialize, Default)]
#[serde(default)]
struct PropertySave {
    quantity: u32,
    level: u32,
    income_per_unit: f64,
    upgrade_cost: f64,
}

#[cfg(any(target_arch = "wasm32", test))]
#[derive(Serialize, Deserialize, Default)]
#[serde(default)]
struct AchievementSave {
    id: String,
    unlocked: bool,
}

/// Serialized snapshot. UI state (tab, buy selector, log, pending events)
/// is not included, and neither is the derived total income.
#[cfg(any(target_arch = "wasm32", test))]
#[derive(Serialize, Deserialize, Default)]
#[serde(default)]
struct TycoonSave {
    gold: f64,
    total_gold_earned: f64,
    owned_properties: BTreeMap<String, PropertySave>,

    realm_shards: u64,
    times_ascended: u32,
    prestige_upgrades: BTreeMap<String, u32>,

    achievements: Vec<AchievementSave>,

    /// Wall-clock ms at save time, for offline progress on the next load.
    last_save_timestamp: f64,
}

#[cfg(any(target_arch = "wasm32", test))]
fn extract_save(state: &GameState, now_ms: f64) -> TycoonSave {
    TycoonSave {
        gold: state.gold,
        total_gold_earned: state.total_gold_earned,
        owned_properties: state
            .owned
            .iter()
            .map(|(id, p)| {
                (
                    (*id).to_string(),
                    PropertySave {
                        quantity: p.quantity,
                        level: p.level,
                        income_per_unit: p.income_per_unit,
                        upgrade_cost: p.upgrade_cost,
                    },
                )
            })
            .collect(),
        realm_shards: state.realm_shards,
        times_ascended: state.times_ascended,
        prestige_upgrades: state
            .prestige_levels
            .iter()
            .map(|(id, level)| ((*id).to_string(), *level))
            .collect(),
        achievements: ACHIEVEMENTS
            .iter()
            .zip(&state.achievements_unlocked)
            .map(|(def, &unlocked)| AchievementSave {
                id: def.id.to_string(),
                unlocked,
            })
            .collect(),
        last_save_timestamp: now_ms,
    }
}

/// Restore a snapshot onto a fresh state. Ids that no longer exist in the
/// catalog are dropped; levels are clamped to the current maximums; level-0
/// records with zeroed caches re-derive them from the catalog bases.
#[cfg(any(target_arch = "wasm32", test))]
fn apply_save(state: &mut GameState, save: &TycoonSave) {
    state.gold = save.gold;
    state.total_gold_earned = save.total_gold_earned;

    state.owned.clear();
    for (id, prop) in &save.owned_properties {
        let Some(def) = catalog::property(id) else {
            continue;
        };
        let level = prop.level.min(def.max_level);
        // Guard against partially written older saves.
        let stale_cache = level == 0 && (prop.income_per_unit == 0.0 || prop.upgrade_cost == 0.0);
        let (income_per_unit, upgrade_cost) = if stale_cache {
            (def.base_income, def.upgrade_base_cost)
        } else {
            (prop.income_per_unit, prop.upgrade_cost)
        };
        state.owned.insert(
            def.id,
            OwnedProperty {
                quantity: prop.quantity,
                level,
                income_per_unit,
                upgrade_cost,
            },
        );
    }

    state.realm_shards = save.realm_shards;
    state.times_ascended = save.times_ascended;

    state.prestige_levels.clear();
    for (id, level) in &save.prestige_upgrades {
        if let Some(def) = catalog::prestige_upgrade(id) {
            state.prestige_levels.insert(def.id, (*level).min(def.max_level));
        }
    }

    state.achievements_unlocked = ACHIEVEMENTS
        .iter()
        .map(|def| {
            save.achievements
                .iter()
                .any(|a| a.unlocked && a.id == def.id)
        })
        .collect();

    // The derived total is never stored.
    economy::recompute_total_income(state);
}

#[cfg(target_arch = "wasm32")]
fn get_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Persist the game to localStorage. Failures are logged and swallowed; the
/// in-memory state is unaffected and the next autosave retries.
#[cfg(target_arch = "wasm32")]
pub fn save_game(state: &GameState) {
    let save_data = extract_save(state, js_sys::Date::now());
    let json = match serde_json::to_string(&save_data) {
        Ok(j) => j,
        Err(e) => {
            web_sys::console::warn_1(
                &format!("Realm Tycoon: failed to serialize save: {e}").into(),
            );
            return;
        }
    };

    if let Some(storage) = get_storage() {
        if let Err(e) = storage.set_item(STORAGE_KEY, &json) {
            web_sys::console::warn_1(
                &format!("Realm Tycoon: failed to write localStorage: {e:?}").into(),
            );
        }
    }
}

/// Restore from localStorage. Returns the saved wall-clock timestamp (ms)
/// on success so the caller can credit offline progress. Corrupt snapshots
/// are discarded and the game starts fresh.
#[cfg(target_arch = "wasm32")]
pub fn load_game(state: &mut GameState) -> Option<f64> {
    let storage = get_storage()?;

    let json = match storage.get_item(STORAGE_KEY) {
        Ok(Some(j)) => j,
        _ => return None,
    };

    let save_data: TycoonSave = match serde_json::from_str(&json) {
        Ok(d) => d,
        Err(e) => {
            web_sys::console::warn_1(
                &format!("Realm Tycoon: failed to parse save (discarding): {e}").into(),
            );
            let _ = storage.remove_item(STORAGE_KEY);
            return None;
        }
    };

    apply_save(state, &save_data);
    Some(save_data.last_save_timestamp)
}

/// Delete the stored snapshot.
#[cfg(target_arch = "wasm32")]
#[allow(dead_code)]
pub fn delete_save() {
    if let Some(storage) = get_storage() {
        let _ = storage.remove_item(STORAGE_KEY);
    }
}
