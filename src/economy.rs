//! Economy engine: purchase costing, upgrades, and income accrual.
//!
//! All functions are pure or operate on `&mut GameState`. Mutations follow a
//! silent no-op model: invalid or unaffordable requests return `false` and
//! leave the state untouched. Prestige modifiers are pulled at call time via
//! [`crate::prestige::modifiers`], never cached here.

use crate::catalog::{self, PropertyDef};
use crate::prestige::{self, Modifiers};
use crate::state::{GameState, OwnedProperty};

/// Hard ceiling on the max-affordable greedy loop.
const MAX_AFFORDABLE_CAP: u32 = 2500;

/// How many units to buy in a single purchase request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PurchaseQuantity {
    Exact(u32),
    Max,
}

/// Raw cost of the `k`-th unit (0-based over all units ever bought).
fn unit_cost_raw(def: &PropertyDef, k: u32) -> f64 {
    (def.base_cost * def.cost_multiplier.powi(k as i32)).floor()
}

/// Cost reduction factor, clamped so costs never drop below 1% of raw.
fn reduction_factor(mods: &Modifiers) -> f64 {
    (1.0 - mods.cost_reduction).max(0.01)
}

/// Effective cost of the `k`-th unit after prestige cost reduction. Floored
/// per unit, so the greedy affordability walk and the charged total agree.
fn unit_cost(def: &PropertyDef, k: u32, mods: &Modifiers) -> f64 {
    (unit_cost_raw(def, k) * reduction_factor(mods)).floor()
}

/// Gold charged for a property's next level, after cost reduction.
pub fn effective_upgrade_cost(prop: &OwnedProperty, mods: &Modifiers) -> f64 {
    (prop.upgrade_cost * reduction_factor(mods)).floor()
}

/// Total cost of buying `quantity` units when `owned` are already held.
///
/// Each unit's raw cost is floored, the reduction applies per unit with
/// another floor, and the summed total is floored once more.
pub fn purchase_cost(def: &PropertyDef, owned: u32, quantity: u32, mods: &Modifiers) -> f64 {
    let mut total = 0.0;
    for i in 0..quantity {
        total += unit_cost(def, owned + i, mods);
    }
    total.floor()
}

/// Like [`purchase_cost`], but by id. Unknown ids price at infinity so any
/// affordability comparison fails naturally.
pub fn purchase_cost_by_id(id: &str, owned: u32, quantity: u32, mods: &Modifiers) -> f64 {
    match catalog::property(id) {
        Some(def) => purchase_cost(def, owned, quantity, mods),
        None => f64::INFINITY,
    }
}

/// Greedy count of units affordable with `gold`, capped at 2500 iterations.
pub fn max_affordable_quantity(def: &PropertyDef, owned: u32, gold: f64, mods: &Modifiers) -> u32 {
    let mut scratch = gold;
    let mut count = 0u32;
    while count < MAX_AFFORDABLE_CAP {
        let next = unit_cost(def, owned + count, mods);
        if next <= 0.0 || scratch < next {
            break;
        }
        scratch -= next;
        count += 1;
    }
    count
}

/// Buy units of a property. Returns `false` (without side effects) for
/// unknown ids, zero resolved quantity, or insufficient gold.
pub fn purchase(state: &mut GameState, id: &str, quantity: PurchaseQuantity) -> bool {
    let Some(def) = catalog::property(id) else {
        return false;
    };
    let mods = prestige::modifiers(state);
    let owned = state.owned.get(def.id).map_or(0, |p| p.quantity);

    let n = match quantity {
        PurchaseQuantity::Exact(n) => n,
        PurchaseQuantity::Max => max_affordable_quantity(def, owned, state.gold, &mods),
    };
    if n == 0 {
        return false;
    }

    let cost = purchase_cost(def, owned, n, &mods);
    if state.gold < cost {
        return false;
    }

    state.gold -= cost;
    let prop = state
        .owned
        .entry(def.id)
        .or_insert_with(|| OwnedProperty::new(def));
    prop.quantity += n;

    recompute_total_income(state);
    true
}

/// Upgrade a property one level. No-op when unowned, at zero quantity, at
/// max level, or unaffordable.
pub fn upgrade(state: &mut GameState, id: &str) -> bool {
    let Some(def) = catalog::property(id) else {
        return false;
    };
    let mods = prestige::modifiers(state);

    let Some(prop) = state.owned.get_mut(def.id) else {
        return false;
    };
    if prop.quantity == 0 || prop.level >= def.max_level {
        return false;
    }

    let cost = effective_upgrade_cost(prop, &mods);
    if state.gold < cost {
        return false;
    }

    state.gold -= cost;
    prop.level += 1;
    // Income accumulates multiplicatively and is never floored; the next
    // upgrade cost is re-derived from the base curve.
    prop.income_per_unit *= def.upgrade_income_multiplier;
    prop.upgrade_cost =
        (def.upgrade_base_cost * def.upgrade_cost_multiplier.powi(prop.level as i32)).floor();

    recompute_total_income(state);
    true
}

/// Rebuild the cached total income per second from owned properties and the
/// global income bonus. Call after any mutation that touches either.
pub fn recompute_total_income(state: &mut GameState) {
    let bonus = prestige::global_income_bonus(state);
    state.total_income_per_second = state
        .owned
        .values()
        .filter(|p| p.quantity > 0)
        .map(|p| p.income_per_unit * (1.0 + bonus) * p.quantity as f64)
        .sum();
}

/// Accrue income for `seconds` of play. Both gold and the run's earned total
/// advance; the earned total is what gates ascension.
pub fn accumulate(state: &mut GameState, seconds: f64) {
    if state.total_income_per_second > 0.0 && seconds > 0.0 {
        let earned = state.total_income_per_second * seconds;
        state.gold += earned;
        state.total_gold_earned += earned;
    }
}

/// Format a gold amount for display: comma-grouped below a million,
/// suffixed with two decimals above.
pub fn format_gold(n: f64) -> String {
    if n < 0.0 {
        return format!("-{}", format_gold(-n));
    }
    const SUFFIXES: [(f64, &str); 6] = [
        (1e21, "Sx"),
        (1e18, "Qi"),
        (1e15, "Qa"),
        (1e12, "T"),
        (1e9, "B"),
        (1e6, "M"),
    ];
    for (scale, suffix) in SUFFIXES {
        if n >= scale {
            return format!("{:.2}{}", n / scale, suffix);
        }
    }
    let int = n.floor() as u64;
    let digits = int.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i).is_multiple_of(3) {
            out.push(',');
        }
        out.push(c);
    }
    out
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_property() -> impl Strategy<Value = &'static PropertyDef> {
        (0..catalog::PROPERTIES.len()).prop_map(|i| &catalog::PROPERTIES[i])
    }

    fn arb_reduction() -> impl Strategy<Value = Modifiers> {
        (0.0f64..0.3).prop_map(|cost_reduction| Modifiers {
            income_bonus: 0.0,
            cost_reduction,
        })
    }

    proptest! {
        #[test]
        fn prop_unit_cost_strictly_increases_with_owned(
            def in arb_property(),
            owned in 0u32..100,
        ) {
            let mods = Modifiers { income_bonus: 0.0, cost_reduction: 0.0 };
            let a = purchase_cost(def, owned, 1, &mods);
            let b = purchase_cost(def, owned + 1, 1, &mods);
            prop_assert!(b > a, "{}: {} -> {}", def.id, a, b);
        }

        #[test]
        fn prop_bulk_cost_monotone_in_quantity(
            def in arb_property(),
            owned in 0u32..50,
            q in 1u32..60,
            mods in arb_reduction(),
        ) {
            let smaller = purchase_cost(def, owned, q, &mods);
            let larger = purchase_cost(def, owned, q + 1, &mods);
            prop_assert!(larger > smaller);
        }

        #[test]
        fn prop_cost_reduction_never_increases_cost(
            def in arb_property(),
            owned in 0u32..50,
            q in 1u32..30,
            mods in arb_reduction(),
        ) {
            let full = purchase_cost(def, owned, q, &Modifiers { income_bonus: 0.0, cost_reduction: 0.0 });
            let cut = purchase_cost(def, owned, q, &mods);
            prop_assert!(cut <= full);
        }

        #[test]
        fn prop_max_affordable_is_tight_without_reduction(
            def in arb_property(),
            owned in 0u32..30,
            gold in 0.0f64..1e9,
        ) {
            let mods = Modifiers { income_bonus: 0.0, cost_reduction: 0.0 };
            let q = max_affordable_quantity(def, owned, gold, &mods);
            prop_assert!(purchase_cost(def, owned, q, &mods) <= gold);
            if q < 2500 {
                prop_assert!(purchase_cost(def, owned, q + 1, &mods) > gold);
            }
        }

        #[test]
        fn prop_purchase_conserves_value(
            gold in 10.0f64..1e6,
            q in 1u32..20,
        ) {
            let mut state = GameState::new();
            state.gold = gold;
            let mods = Modifiers { income_bonus: 0.0, cost_reduction: 0.0 };
            let cost = purchase_cost(catalog::property("lemonade_stand").unwrap(), 0, q, &mods);
            let bought = purchase(&mut state, "lemonade_stand", PurchaseQuantity::Exact(q));
            if bought {
                prop_assert!((gold - state.gold - cost).abs() < 1e-6);
                prop_assert_eq!(state.owned["lemonade_stand"].quantity, q);
            } else {
                prop_assert!(gold < cost);
                prop_assert!((state.gold - gold).abs() < 1e-9);
            }
        }

        #[test]
        fn prop_format_gold_no_panic(n in -1e21f64..1e21) {
            let _ = format_gold(n);
        }

        #[test]
        fn prop_format_gold_small_int_roundtrips(n in 0u64..1_000_000) {
            let s = format_gold(n as f64);
            let stripped: String = s.chars().filter(|c| *c != ',').collect();
            prop_assert_eq!(stripped, n.to_string());
        }
    }
}
