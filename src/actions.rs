//! Action IDs for click targets.
//!
//! Semantic u16 constants shared between the renderer (which registers
//! targets) and the input dispatcher (which matches on them). Per-row lists
//! use a base plus the row index.

/// Tab switches.
pub const TAB_PROPERTIES: u16 = 10;
pub const TAB_ESTATE: u16 = 11;
pub const TAB_ASCENSION: u16 = 12;
pub const TAB_ACHIEVEMENTS: u16 = 13;

/// Cycle the buy amount selector (x1 / x10 / x25 / MAX).
pub const CYCLE_BUY_AMOUNT: u16 = 20;

/// Perform an ascension (Ascension tab).
pub const ASCEND: u16 = 30;

/// Buy property at index `id - BUY_PROPERTY_BASE` (Properties tab).
pub const BUY_PROPERTY_BASE: u16 = 100;

/// Upgrade property at index `id - UPGRADE_PROPERTY_BASE` (Estate tab).
pub const UPGRADE_PROPERTY_BASE: u16 = 200;

/// Buy prestige upgrade at index `id - BUY_PRESTIGE_BASE` (Ascension tab).
pub const BUY_PRESTIGE_BASE: u16 = 300;
