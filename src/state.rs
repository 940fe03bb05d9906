//! Realm Tycoon game state.
//!
//! One flat struct holds both run-scoped fields (reset by ascension) and
//! prestige-scoped fields (kept across ascensions). Mutations live in the
//! logic modules (`economy`, `prestige`, `offline`, `achievements`); this
//! module only defines the data and small helpers.

use std::collections::BTreeMap;

use crate::achievements::ACHIEVEMENTS;
use crate::catalog::PropertyDef;

/// Base gold a fresh run starts with, before the starting-gold bonus.
pub const BASE_STARTING_GOLD: f64 = 10.0;

/// Mutable per-property record. Created lazily on first purchase, never
/// removed. `income_per_unit` and `upgrade_cost` are cached figures that
/// advance together with `level` on every upgrade; they are part of the
/// rules, not a derivable view.
#[derive(Clone, Debug, PartialEq)]
pub struct OwnedProperty {
    pub quantity: u32,
    pub level: u32,
    pub income_per_unit: f64,
    pub upgrade_cost: f64,
}

impl OwnedProperty {
    pub fn new(def: &PropertyDef) -> Self {
        Self {
            quantity: 0,
            level: 0,
            income_per_unit: def.base_income,
            upgrade_cost: def.upgrade_base_cost,
        }
    }
}

/// One line in the in-game message log.
pub struct LogEntry {
    pub text: String,
    pub is_important: bool,
}

/// Notifications emitted by the core for the shell to present.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    AchievementUnlocked { id: &'static str },
    AscensionPerformed { shards_gained: u64 },
    OfflineEarnings { counted_seconds: f64, gold: f64 },
}

/// Which panel is shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Properties,
    Estate,
    Ascension,
    Achievements,
}

impl Tab {
    pub fn next(self) -> Self {
        match self {
            Tab::Properties => Tab::Estate,
            Tab::Estate => Tab::Ascension,
            Tab::Ascension => Tab::Achievements,
            Tab::Achievements => Tab::Properties,
        }
    }
}

/// Purchase quantity selector cycled by the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuyAmount {
    One,
    Ten,
    TwentyFive,
    Max,
}

impl BuyAmount {
    pub fn next(self) -> Self {
        match self {
            BuyAmount::One => BuyAmount::Ten,
            BuyAmount::Ten => BuyAmount::TwentyFive,
            BuyAmount::TwentyFive => BuyAmount::Max,
            BuyAmount::Max => BuyAmount::One,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BuyAmount::One => "x1",
            BuyAmount::Ten => "x10",
            BuyAmount::TwentyFive => "x25",
            BuyAmount::Max => "MAX",
        }
    }
}

/// Read-only view handed to the achievement interpreter and renderer.
pub struct Snapshot<'a> {
    pub gold: f64,
    pub income_per_second: f64,
    pub owned: &'a BTreeMap<&'static str, OwnedProperty>,
    pub times_ascended: u32,
}

pub struct GameState {
    // ── Run-scoped (reset by ascension) ─────────────────────────
    pub gold: f64,
    /// Derived cache; recomputed after every mutation and after load.
    pub total_income_per_second: f64,
    /// Monotonic within a run; gates ascension.
    pub total_gold_earned: f64,
    pub owned: BTreeMap<&'static str, OwnedProperty>,

    // ── Prestige-scoped (kept across ascensions) ────────────────
    pub realm_shards: u64,
    pub times_ascended: u32,
    pub prestige_levels: BTreeMap<&'static str, u32>,

    /// Unlocked flags parallel to `ACHIEVEMENTS`; monotonic false→true.
    pub achievements_unlocked: Vec<bool>,

    /// Pending notifications, drained by the shell each tick.
    pub events: Vec<GameEvent>,
    pub log: Vec<LogEntry>,

    // ── UI state (not saved) ────────────────────────────────────
    pub tab: Tab,
    pub buy_amount: BuyAmount,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            gold: BASE_STARTING_GOLD,
            total_income_per_second: 0.0,
            total_gold_earned: 0.0,
            owned: BTreeMap::new(),
            realm_shards: 0,
            times_ascended: 0,
            prestige_levels: BTreeMap::new(),
            achievements_unlocked: vec![false; ACHIEVEMENTS.len()],
            events: Vec::new(),
            log: Vec::new(),
            tab: Tab::Properties,
            buy_amount: BuyAmount::One,
        }
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            gold: self.gold,
            income_per_second: self.total_income_per_second,
            owned: &self.owned,
            times_ascended: self.times_ascended,
        }
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Append to the message log, keeping the last 50 entries.
    pub fn add_log(&mut self, text: impl Into<String>, is_important: bool) {
        self.log.push(LogEntry {
            text: text.into(),
            is_important,
        });
        if self.log.len() > 50 {
            self.log.remove(0);
        }
    }
}
