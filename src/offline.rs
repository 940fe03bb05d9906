//! Offline progress: capped earnings for time spent away.

use crate::state::{GameEvent, GameState};

/// Seconds of absence credited before any prestige cap bonus.
pub const BASE_OFFLINE_CAP_SECONDS: f64 = 3.0 * 3600.0;
/// Absences at or below this earn nothing (page reloads, quick tab-aways).
pub const MIN_OFFLINE_SECONDS: f64 = 10.0;

/// Outcome of an offline calculation. `earnings` is zero when the absence
/// was too short or nothing was generating income.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OfflineReport {
    pub elapsed_seconds: f64,
    pub counted_seconds: f64,
    pub earnings: f64,
}

/// Compute what an absence between two wall-clock timestamps (ms) earns.
/// Clock skew (negative elapsed) counts as no absence.
pub fn compute_offline_earnings(
    last_save_ms: f64,
    now_ms: f64,
    income_per_second: f64,
    cap_bonus_seconds: f64,
    multiplier_bonus: f64,
) -> OfflineReport {
    let elapsed_seconds = ((now_ms - last_save_ms) / 1000.0).max(0.0);
    let counted_seconds = elapsed_seconds.min(BASE_OFFLINE_CAP_SECONDS + cap_bonus_seconds);

    let earnings = if income_per_second > 0.0 && counted_seconds > MIN_OFFLINE_SECONDS {
        income_per_second * counted_seconds * (1.0 + multiplier_bonus)
    } else {
        0.0
    };

    OfflineReport {
        elapsed_seconds,
        counted_seconds,
        earnings,
    }
}

/// Credit an offline report to the state and queue the notification.
/// Zero-earning reports are dropped silently.
pub fn apply(state: &mut GameState, report: &OfflineReport) {
    if report.earnings <= 0.0 {
        return;
    }
    state.gold += report.earnings;
    state.total_gold_earned += report.earnings;
    state.push_event(GameEvent::OfflineEarnings {
        counted_seconds: report.counted_seconds,
        gold: report.earnings,
    });
}
