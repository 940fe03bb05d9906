//! Rendering (read-only from state). Click targets are registered while
//! drawing, so every visible control is wired to exactly one action.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::actions::*;
use crate::achievements::{self, ACHIEVEMENTS};
use crate::catalog::{PRESTIGE_UPGRADES, PROPERTIES};
use crate::economy::{self, format_gold};
use crate::input::{is_narrow_layout, ClickState};
use crate::prestige;
use crate::state::{BuyAmount, GameState, Tab};
use crate::widgets::{ClickableList, TabBar};

pub fn render(state: &GameState, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let is_narrow = is_narrow_layout(area.width);
    let borders = if is_narrow {
        Borders::TOP | Borders::BOTTOM
    } else {
        Borders::ALL
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),              // Header
            Constraint::Length(1),              // Tab bar
            Constraint::Min(10),                // Active panel
            Constraint::Length(if is_narrow { 5 } else { 7 }), // Log
        ])
        .split(area);

    let mut cs = click_state.borrow_mut();

    render_header(state, f, chunks[0], borders, is_narrow, &mut cs);
    render_tabs(state, f, chunks[1], is_narrow, &mut cs);
    match state.tab {
        Tab::Properties => render_properties(state, f, chunks[2], borders, is_narrow, &mut cs),
        Tab::Estate => render_estate(state, f, chunks[2], borders, is_narrow, &mut cs),
        Tab::Ascension => render_ascension(state, f, chunks[2], borders, is_narrow, &mut cs),
        Tab::Achievements => render_achievements(state, f, chunks[2], borders, is_narrow),
    }
    render_log(state, f, chunks[3], borders);
}

// ── Header ─────────────────────────────────────────────────────

fn render_header(
    state: &GameState,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    is_narrow: bool,
    cs: &mut ClickState,
) {
    let title = if is_narrow {
        " Realm Tycoon "
    } else {
        " Realm Tycoon - an idle realm of gold and ascension "
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(" Gold: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format_gold(state.gold),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  (+{}/s)", format_gold(state.total_income_per_second)),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Shards: ", Style::default().fg(Color::Gray)),
            Span::styled(
                state.realm_shards.to_string(),
                Style::default().fg(Color::Magenta),
            ),
            Span::styled("  Ascensions: ", Style::default().fg(Color::Gray)),
            Span::styled(
                state.times_ascended.to_string(),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(vec![
            Span::styled(
                " [B] ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("Buy amount: ", Style::default().fg(Color::Gray)),
            Span::styled(
                state.buy_amount.label(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  [T] next tab", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    // The buy selector line is tappable.
    cs.add_row_target(area, area.y + 3, CYCLE_BUY_AMOUNT);

    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            title,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

// ── Tab bar ────────────────────────────────────────────────────

fn tab_style(selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    }
}

fn render_tabs(state: &GameState, f: &mut Frame, area: Rect, is_narrow: bool, cs: &mut ClickState) {
    let labels = if is_narrow {
        ["Prop", "Est", "Asc", "Achv"]
    } else {
        ["Properties", "Estate", "Ascension", "Achievements"]
    };
    TabBar::new(" | ")
        .tab(labels[0], tab_style(state.tab == Tab::Properties), TAB_PROPERTIES)
        .tab(labels[1], tab_style(state.tab == Tab::Estate), TAB_ESTATE)
        .tab(labels[2], tab_style(state.tab == Tab::Ascension), TAB_ASCENSION)
        .tab(
            labels[3],
            tab_style(state.tab == Tab::Achievements),
            TAB_ACHIEVEMENTS,
        )
        .render(f, area, cs);
}

// ── Properties tab ─────────────────────────────────────────────

fn render_properties(
    state: &GameState,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    is_narrow: bool,
    cs: &mut ClickState,
) {
    let mods = prestige::modifiers(state);
    let mut cl = ClickableList::new();

    for (i, def) in PROPERTIES.iter().enumerate() {
        let key = (b'1' + i as u8) as char;
        let (owned, per_unit) = state
            .owned
            .get(def.id)
            .map_or((0, def.base_income), |p| (p.quantity, p.income_per_unit));

        let quantity = match state.buy_amount {
            BuyAmount::One => 1,
            BuyAmount::Ten => 10,
            BuyAmount::TwentyFive => 25,
            BuyAmount::Max => economy::max_affordable_quantity(def, owned, state.gold, &mods),
        };
        // For MAX with nothing affordable, quote a single unit.
        let quoted = quantity.max(1);
        let cost = economy::purchase_cost(def, owned, quoted, &mods);
        let affordable = quantity > 0 && state.gold >= cost;

        let color = if affordable { Color::White } else { Color::DarkGray };
        let label = if is_narrow {
            format!(" [{key}] {} x{owned} {} g", def.name, format_gold(cost))
        } else {
            format!(
                " [{key}] {:<18} x{owned:<4} buy {:>3} for {:>10} g  +{}/s each",
                def.name,
                quoted,
                format_gold(cost),
                format_gold(per_unit),
            )
        };
        cl.push_clickable(
            Line::from(Span::styled(label, Style::default().fg(color))),
            BUY_PROPERTY_BASE + i as u16,
        );

        if !is_narrow {
            cl.push(Line::from(Span::styled(
                format!("       {}", def.description),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    cl.register_targets(area, cs, 1, 1, 0, 0);
    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Green))
        .title(" Properties ");
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

// ── Estate tab ─────────────────────────────────────────────────

fn render_estate(
    state: &GameState,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    is_narrow: bool,
    cs: &mut ClickState,
) {
    let mods = prestige::modifiers(state);
    let mut cl = ClickableList::new();

    for (i, def) in PROPERTIES.iter().enumerate() {
        let key = (b'1' + i as u8) as char;
        let line = match state.owned.get(def.id) {
            Some(prop) if prop.quantity > 0 => {
                if prop.level >= def.max_level {
                    Line::from(Span::styled(
                        format!(" [{key}] {:<18} Lv {}/{} (maxed)", def.name, prop.level, def.max_level),
                        Style::default().fg(Color::Cyan),
                    ))
                } else {
                    let cost = economy::effective_upgrade_cost(prop, &mods);
                    let color = if state.gold >= cost {
                        Color::White
                    } else {
                        Color::DarkGray
                    };
                    let label = if is_narrow {
                        format!(" [{key}] {} Lv{} {} g", def.name, prop.level, format_gold(cost))
                    } else {
                        format!(
                            " [{key}] {:<18} Lv {}/{}  upgrade for {:>10} g  (income x{})",
                            def.name, prop.level, def.max_level, format_gold(cost),
                            def.upgrade_income_multiplier,
                        )
                    };
                    Line::from(Span::styled(label, Style::default().fg(color)))
                }
            }
            _ => Line::from(Span::styled(
                format!(" [{key}] {:<18} (none owned)", def.name),
                Style::default().fg(Color::DarkGray),
            )),
        };
        cl.push_clickable(line, UPGRADE_PROPERTY_BASE + i as u16);
    }

    cl.register_targets(area, cs, 1, 1, 0, 0);
    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Estate upgrades ");
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

// ── Ascension tab ──────────────────────────────────────────────

fn render_ascension(
    state: &GameState,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    is_narrow: bool,
    cs: &mut ClickState,
) {
    let requirement = prestige::ascension_gold_requirement(state.times_ascended);
    let potential = prestige::potential_shards(state);
    let mut cl = ClickableList::new();

    cl.push(Line::from(vec![
        Span::styled(" Lifetime gold this realm: ", Style::default().fg(Color::Gray)),
        Span::styled(
            format_gold(state.total_gold_earned),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(
            format!(" / {}", format_gold(requirement)),
            Style::default().fg(Color::DarkGray),
        ),
    ]));

    if potential > 0 {
        cl.push_clickable(
            Line::from(Span::styled(
                format!(" [Z] Ascend now: reset the realm for {potential} shards"),
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            )),
            ASCEND,
        );
    } else {
        cl.push(Line::from(Span::styled(
            format!(
                " Reach {} lifetime gold to ascend.",
                format_gold(requirement)
            ),
            Style::default().fg(Color::DarkGray),
        )));
    }

    cl.push(Line::from(""));
    cl.push(Line::from(Span::styled(
        format!(" Prestige upgrades (shards: {})", state.realm_shards),
        Style::default().fg(Color::Gray),
    )));

    for (i, def) in PRESTIGE_UPGRADES.iter().enumerate() {
        let key = (b'1' + i as u8) as char;
        let level = state.prestige_levels.get(def.id).copied().unwrap_or(0);
        let line = if level >= def.max_level {
            Line::from(Span::styled(
                format!(" [{key}] {:<18} Lv {}/{} (maxed)", def.name, level, def.max_level),
                Style::default().fg(Color::Cyan),
            ))
        } else {
            let cost = def.cost(level);
            let color = if state.realm_shards >= cost {
                Color::White
            } else {
                Color::DarkGray
            };
            let label = if is_narrow {
                format!(" [{key}] {} Lv{} {cost} sh", def.name, level)
            } else {
                format!(
                    " [{key}] {:<18} Lv {}/{}  {cost} shards  {}",
                    def.name, level, def.max_level, def.description,
                )
            };
            Line::from(Span::styled(label, Style::default().fg(color)))
        };
        cl.push_clickable(line, BUY_PRESTIGE_BASE + i as u16);
    }

    cl.register_targets(area, cs, 1, 1, 0, 0);
    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Magenta))
        .title(" Ascension ");
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

// ── Achievements tab ───────────────────────────────────────────

fn render_achievements(
    state: &GameState,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    is_narrow: bool,
) {
    let snapshot = state.snapshot();
    let lines: Vec<Line> = ACHIEVEMENTS
        .iter()
        .zip(&state.achievements_unlocked)
        .map(|(def, &unlocked)| {
            // Show live progress for locked entries too.
            let met_now = unlocked || achievements::is_met(&def.condition, &snapshot);
            let (marker, color) = if unlocked {
                (def.icon, Color::Green)
            } else if met_now {
                (def.icon, Color::Yellow)
            } else {
                ("·", Color::DarkGray)
            };
            let text = if is_narrow {
                format!(" {marker} {}", def.name)
            } else {
                format!(" {marker} {:<18} {}", def.name, def.description)
            };
            Line::from(Span::styled(text, Style::default().fg(color)))
        })
        .collect();

    let unlocked_count = state.achievements_unlocked.iter().filter(|u| **u).count();
    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Blue))
        .title(format!(
            " Achievements ({unlocked_count}/{}) ",
            ACHIEVEMENTS.len()
        ));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

// ── Log ────────────────────────────────────────────────────────

fn render_log(state: &GameState, f: &mut Frame, area: Rect, borders: Borders) {
    let max_lines = area.height.saturating_sub(2) as usize;
    let start = state.log.len().saturating_sub(max_lines);
    let lines: Vec<Line> = state.log[start..]
        .iter()
        .map(|entry| {
            let style = if entry.is_important {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Line::from(Span::styled(format!(" > {}", entry.text), style))
        })
        .collect();

    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Chronicle ");
    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}
