//! Game orchestration: input dispatch, the tick loop, and autosave.
//!
//! All rule mutations go through the logic modules; this layer only decides
//! which operation an input maps to, turns queued events into log lines,
//! and persists after anything changed.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::actions::*;
use crate::catalog::{PRESTIGE_UPGRADES, PROPERTIES};
use crate::economy::{self, PurchaseQuantity};
use crate::input::{ClickState, InputEvent};
use crate::save;
use crate::state::{BuyAmount, GameEvent, GameState, Tab};
use crate::{achievements, prestige, render};

pub struct TycoonGame {
    pub state: GameState,
    ticks_since_save: u32,
}

impl TycoonGame {
    pub fn new() -> Self {
        let state = GameState::new();

        #[cfg(target_arch = "wasm32")]
        let state = {
            let mut s = state;
            if let Some(last_save_ms) = save::load_game(&mut s) {
                s.add_log("Welcome back to your realm.", false);
                let report = crate::offline::compute_offline_earnings(
                    last_save_ms,
                    js_sys::Date::now(),
                    s.total_income_per_second,
                    prestige::offline_cap_bonus_seconds(&s),
                    prestige::offline_multiplier_bonus(&s),
                );
                crate::offline::apply(&mut s, &report);
            }
            s
        };

        let mut game = Self {
            state,
            ticks_since_save: 0,
        };
        game.drain_events();
        game
    }

    /// Dispatch an input event. Returns whether it changed anything; if so,
    /// the state has already been saved.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        let consumed = match event {
            InputEvent::Key(c) => self.handle_key(*c),
            InputEvent::Click(id) => self.handle_click(*id),
        };
        if consumed {
            achievements::scan(&mut self.state);
            self.drain_events();
            #[cfg(target_arch = "wasm32")]
            save::save_game(&self.state);
        }
        consumed
    }

    /// Advance the simulation. Each tick is one second of income.
    pub fn tick(&mut self, delta_ticks: u32) {
        if delta_ticks == 0 {
            return;
        }
        economy::accumulate(&mut self.state, delta_ticks as f64);
        achievements::scan(&mut self.state);
        self.drain_events();

        self.ticks_since_save += delta_ticks;
        if self.ticks_since_save >= save::AUTOSAVE_INTERVAL {
            self.ticks_since_save = 0;
            #[cfg(target_arch = "wasm32")]
            save::save_game(&self.state);
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(&self.state, f, area, click_state);
    }

    fn handle_key(&mut self, key: char) -> bool {
        match key {
            't' => {
                self.state.tab = self.state.tab.next();
                true
            }
            'b' => {
                self.state.buy_amount = self.state.buy_amount.next();
                true
            }
            'z' if self.state.tab == Tab::Ascension => self.try_ascend(),
            '1'..='9' => {
                let index = (key as usize) - ('1' as usize);
                match self.state.tab {
                    Tab::Properties => self.buy_property(index),
                    Tab::Estate => self.upgrade_property(index),
                    Tab::Ascension => self.buy_prestige_upgrade(index),
                    Tab::Achievements => false,
                }
            }
            _ => false,
        }
    }

    fn handle_click(&mut self, action_id: u16) -> bool {
        let n_props = PROPERTIES.len() as u16;
        let n_prestige = PRESTIGE_UPGRADES.len() as u16;
        match action_id {
            TAB_PROPERTIES => {
                self.state.tab = Tab::Properties;
                true
            }
            TAB_ESTATE => {
                self.state.tab = Tab::Estate;
                true
            }
            TAB_ASCENSION => {
                self.state.tab = Tab::Ascension;
                true
            }
            TAB_ACHIEVEMENTS => {
                self.state.tab = Tab::Achievements;
                true
            }
            CYCLE_BUY_AMOUNT => {
                self.state.buy_amount = self.state.buy_amount.next();
                true
            }
            ASCEND => self.try_ascend(),
            id if (BUY_PROPERTY_BASE..BUY_PROPERTY_BASE + n_props).contains(&id) => {
                self.buy_property((id - BUY_PROPERTY_BASE) as usize)
            }
            id if (UPGRADE_PROPERTY_BASE..UPGRADE_PROPERTY_BASE + n_props).contains(&id) => {
                self.upgrade_property((id - UPGRADE_PROPERTY_BASE) as usize)
            }
            id if (BUY_PRESTIGE_BASE..BUY_PRESTIGE_BASE + n_prestige).contains(&id) => {
                self.buy_prestige_upgrade((id - BUY_PRESTIGE_BASE) as usize)
            }
            _ => false,
        }
    }

    fn buy_property(&mut self, index: usize) -> bool {
        let Some(def) = PROPERTIES.get(index) else {
            return false;
        };
        let quantity = match self.state.buy_amount {
            BuyAmount::One => PurchaseQuantity::Exact(1),
            BuyAmount::Ten => PurchaseQuantity::Exact(10),
            BuyAmount::TwentyFive => PurchaseQuantity::Exact(25),
            BuyAmount::Max => PurchaseQuantity::Max,
        };
        economy::purchase(&mut self.state, def.id, quantity)
    }

    fn upgrade_property(&mut self, index: usize) -> bool {
        let Some(def) = PROPERTIES.get(index) else {
            return false;
        };
        economy::upgrade(&mut self.state, def.id)
    }

    fn buy_prestige_upgrade(&mut self, index: usize) -> bool {
        let Some(def) = PRESTIGE_UPGRADES.get(index) else {
            return false;
        };
        prestige::buy_upgrade(&mut self.state, def.id)
    }

    fn try_ascend(&mut self) -> bool {
        prestige::ascend(&mut self.state)
    }

    /// Turn queued core events into log lines.
    fn drain_events(&mut self) {
        let events: Vec<GameEvent> = self.state.events.drain(..).collect();
        for event in events {
            match event {
                GameEvent::AchievementUnlocked { id } => {
                    let name = achievements::ACHIEVEMENTS
                        .iter()
                        .find(|a| a.id == id)
                        .map_or(id, |a| a.name);
                    self.state
                        .add_log(format!("Achievement unlocked: {name}!"), true);
                }
                GameEvent::AscensionPerformed { shards_gained } => {
                    self.state.add_log(
                        format!("The realm is reborn. +{shards_gained} realm shards."),
                        true,
                    );
                }
                GameEvent::OfflineEarnings {
                    counted_seconds,
                    gold,
                } => {
                    self.state.add_log(
                        format!(
                            "While you were away ({}): +{} gold.",
                            format_duration(counted_seconds),
                            economy::format_gold(gold)
                        ),
                        true,
                    );
                }
            }
        }
    }
}

/// Short human duration: "2h 05m", "12m 30s", "45s".
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);
    if h > 0 {
        format!("{h}h {m:02}m")
    } else if m > 0 {
        format!("{m}m {s:02}s")
    } else {
        format!("{s}s")
    }
}
