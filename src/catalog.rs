//! Static definition tables: properties and prestige upgrades.
//!
//! All balance data lives here as immutable constants. Runtime state never
//! copies these values except where a cached figure is part of the game
//! rules (per-unit income and next upgrade cost on owned properties).

/// Static info about a purchasable property.
#[derive(Debug)]
pub struct PropertyDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Progression tier, used by achievements and display grouping.
    pub tier: u8,
    pub base_cost: f64,
    /// Per-unit cost growth, > 1.
    pub cost_multiplier: f64,
    /// Income per unit per second before any modifiers.
    pub base_income: f64,
    pub upgrade_base_cost: f64,
    /// Upgrade cost growth per level, > 1.
    pub upgrade_cost_multiplier: f64,
    /// Per-unit income growth per level, > 1.
    pub upgrade_income_multiplier: f64,
    pub max_level: u32,
}

/// All properties in display (and tier) order.
pub const PROPERTIES: [PropertyDef; 6] = [
    PropertyDef {
        id: "lemonade_stand",
        name: "Lemonade Stand",
        description: "A humble start. Squeeze lemons, earn coppers.",
        tier: 1,
        base_cost: 10.0,
        cost_multiplier: 1.15,
        base_income: 1.0,
        upgrade_base_cost: 25.0,
        upgrade_cost_multiplier: 1.8,
        upgrade_income_multiplier: 1.5,
        max_level: 10,
    },
    PropertyDef {
        id: "cobblers_shop",
        name: "Cobbler's Shop",
        description: "Sturdy boots for weary travellers.",
        tier: 1,
        base_cost: 120.0,
        cost_multiplier: 1.20,
        base_income: 8.0,
        upgrade_base_cost: 250.0,
        upgrade_cost_multiplier: 1.9,
        upgrade_income_multiplier: 1.6,
        max_level: 10,
    },
    PropertyDef {
        id: "bakery",
        name: "Bakery",
        description: "The smell of fresh bread draws a crowd.",
        tier: 1,
        base_cost: 1_500.0,
        cost_multiplier: 1.25,
        base_income: 50.0,
        upgrade_base_cost: 3_000.0,
        upgrade_cost_multiplier: 2.0,
        upgrade_income_multiplier: 1.7,
        max_level: 15,
    },
    PropertyDef {
        id: "inn_and_tavern",
        name: "Inn & Tavern",
        description: "Ale, beds, and rumors of distant realms.",
        tier: 2,
        base_cost: 20_000.0,
        cost_multiplier: 1.30,
        base_income: 250.0,
        upgrade_base_cost: 45_000.0,
        upgrade_cost_multiplier: 2.1,
        upgrade_income_multiplier: 1.8,
        max_level: 12,
    },
    PropertyDef {
        id: "blacksmith_forge",
        name: "Blacksmith's Forge",
        description: "Arms and armor for the realm's garrisons.",
        tier: 2,
        base_cost: 250_000.0,
        cost_multiplier: 1.32,
        base_income: 1_400.0,
        upgrade_base_cost: 600_000.0,
        upgrade_cost_multiplier: 2.2,
        upgrade_income_multiplier: 1.9,
        max_level: 12,
    },
    PropertyDef {
        id: "merchant_guild",
        name: "Merchant Guild",
        description: "Caravans under your banner on every trade road.",
        tier: 3,
        base_cost: 3_000_000.0,
        cost_multiplier: 1.35,
        base_income: 9_000.0,
        upgrade_base_cost: 7_500_000.0,
        upgrade_cost_multiplier: 2.3,
        upgrade_income_multiplier: 2.0,
        max_level: 15,
    },
];

/// Look up a property by id.
pub fn property(id: &str) -> Option<&'static PropertyDef> {
    PROPERTIES.iter().find(|p| p.id == id)
}

/// What a prestige upgrade improves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrestigeEffect {
    /// Flat gold granted on top of the base starting gold after ascension.
    StartingGold,
    /// Additive income multiplier bonus (0.05 = +5%).
    GlobalIncome,
    /// Additive purchase/upgrade cost reduction (0.005 = -0.5%).
    CostReduction,
    /// Additive realm shard payout bonus.
    ShardGain,
    /// Extra seconds on the offline earnings cap.
    OfflineCap,
    /// Additive multiplier on offline earnings.
    OfflineMultiplier,
}

/// Static info about a prestige upgrade purchasable with realm shards.
///
/// Cost at a given level is `floor(cost_base * cost_growth^level) + cost_flat`,
/// which is monotonically increasing. Effect value is always
/// `level * effect_per_level`, derived on demand.
pub struct PrestigeUpgradeDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub effect: PrestigeEffect,
    pub effect_per_level: f64,
    pub max_level: u32,
    cost_base: f64,
    cost_growth: f64,
    cost_flat: u64,
}

impl PrestigeUpgradeDef {
    /// Shard cost of buying the next level when `level` are already owned.
    pub fn cost(&self, level: u32) -> u64 {
        (self.cost_base * self.cost_growth.powi(level as i32)).floor() as u64 + self.cost_flat
    }

    /// Total effect contributed at `level`.
    pub fn effect_value(&self, level: u32) -> f64 {
        level as f64 * self.effect_per_level
    }
}

/// All prestige upgrades in display order.
pub const PRESTIGE_UPGRADES: [PrestigeUpgradeDef; 6] = [
    PrestigeUpgradeDef {
        id: "starting_gold_boost",
        name: "Royal Treasury",
        description: "Begin each new realm with extra gold.",
        effect: PrestigeEffect::StartingGold,
        effect_per_level: 250.0,
        max_level: 50,
        cost_base: 1.0,
        cost_growth: 1.6,
        cost_flat: 1,
    },
    PrestigeUpgradeDef {
        id: "cosmic_blessing",
        name: "Cosmic Blessing",
        description: "All property income increased.",
        effect: PrestigeEffect::GlobalIncome,
        effect_per_level: 0.05,
        max_level: 100,
        cost_base: 3.0,
        cost_growth: 1.4,
        cost_flat: 2,
    },
    PrestigeUpgradeDef {
        id: "efficient_realms",
        name: "Efficient Realms",
        description: "Properties and upgrades cost less.",
        effect: PrestigeEffect::CostReduction,
        effect_per_level: 0.005,
        max_level: 40,
        cost_base: 5.0,
        cost_growth: 1.5,
        cost_flat: 3,
    },
    PrestigeUpgradeDef {
        id: "shard_hoarder",
        name: "Shard Hoarder",
        description: "Gain more realm shards on ascension.",
        effect: PrestigeEffect::ShardGain,
        effect_per_level: 0.02,
        max_level: 25,
        cost_base: 15.0,
        cost_growth: 1.8,
        cost_flat: 0,
    },
    PrestigeUpgradeDef {
        id: "offline_time_cap",
        name: "Timeless Ledgers",
        description: "Earn offline income for longer.",
        effect: PrestigeEffect::OfflineCap,
        effect_per_level: 1_800.0,
        max_level: 20,
        cost_base: 4.0,
        cost_growth: 1.6,
        cost_flat: 2,
    },
    PrestigeUpgradeDef {
        id: "offline_multiplier",
        name: "Night Stewards",
        description: "Offline income is multiplied.",
        effect: PrestigeEffect::OfflineMultiplier,
        effect_per_level: 0.05,
        max_level: 20,
        cost_base: 6.0,
        cost_growth: 1.65,
        cost_flat: 2,
    },
];

/// Look up a prestige upgrade by id.
pub fn prestige_upgrade(id: &str) -> Option<&'static PrestigeUpgradeDef> {
    PRESTIGE_UPGRADES.iter().find(|u| u.id == id)
}
