//! Input plumbing: normalized events, click targets, and coordinate
//! conversion between browser pixels and terminal cells.
//!
//! The renderer registers targets while drawing; the mouse handler converts
//! a pixel position to a cell and hit-tests it here. Game semantics live in
//! `game.rs`, which matches on the resulting action IDs.

use ratzilla::ratatui::layout::{Position, Rect};

/// Input normalized from keyboard, mouse, and touch.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key(char),
    /// A click/tap on a registered target. Action ID constants live in
    /// `actions.rs`.
    Click(u16),
}

/// A clickable region in terminal cell coordinates.
#[derive(Debug, Clone)]
pub struct ClickTarget {
    pub rect: Rect,
    pub action_id: u16,
}

/// Click targets for the current frame, shared between the render loop and
/// the mouse handler. Rebuilt every frame.
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            terminal_cols: 0,
            terminal_rows: 0,
        }
    }

    pub fn clear_targets(&mut self) {
        self.targets.clear();
    }

    pub fn add_click_target(&mut self, rect: Rect, action_id: u16) {
        self.targets.push(ClickTarget { rect, action_id });
    }

    /// Register a full-width target on one row of `area`. Rows outside the
    /// area are ignored, which lets callers register rows blindly while a
    /// list is clipped or scrolled.
    pub fn add_row_target(&mut self, area: Rect, row: u16, action_id: u16) {
        if row >= area.y && row < area.y + area.height {
            self.add_click_target(Rect::new(area.x, row, area.width, 1), action_id);
        }
    }

    /// Register targets for a horizontal tab bar from the rendered label
    /// widths. Each entry is `(display_width, action_id)` for the padded
    /// label. Targets cover the label plus half of each adjacent separator;
    /// the outermost tabs extend to the area edges so there are no dead
    /// columns in the bar.
    pub fn register_tab_targets(
        &mut self,
        tab_widths: &[(u16, u16)],
        separator_width: u16,
        x: u16,
        y: u16,
        total_width: u16,
        height: u16,
    ) {
        if tab_widths.is_empty() || total_width == 0 {
            return;
        }

        let mut starts: Vec<u16> = Vec::with_capacity(tab_widths.len());
        let mut cursor: u16 = 0;
        for (i, &(w, _)) in tab_widths.iter().enumerate() {
            if i > 0 {
                cursor += separator_width;
            }
            starts.push(cursor);
            cursor += w;
        }

        let last = tab_widths.len() - 1;
        for (i, &(w, action_id)) in tab_widths.iter().enumerate() {
            let left = if i == 0 {
                0
            } else {
                let prev_end = starts[i - 1] + tab_widths[i - 1].0;
                prev_end + (starts[i] - prev_end) / 2
            };
            let right = if i == last {
                total_width
            } else {
                let end = starts[i] + w;
                end + (starts[i + 1] - end) / 2
            };

            let width = right.saturating_sub(left);
            if width > 0 {
                self.add_click_target(Rect::new(x + left, y, width, height), action_id);
            }
        }
    }

    /// Find the action under a terminal cell. Later-registered targets are
    /// drawn on top, so they win on overlap.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        let pos = Position::new(col, row);
        self.targets
            .iter()
            .rev()
            .find(|t| t.rect.contains(pos))
            .map(|t| t.action_id)
    }
}

/// Below this width the renderer stacks panels vertically.
pub fn is_narrow_layout(width: u16) -> bool {
    width < 60
}

/// Convert a pixel Y (relative to the grid container's top edge) to a
/// terminal row. `None` when outside the grid or the grid is degenerate.
pub fn pixel_y_to_row(click_y: f64, grid_height: f64, terminal_rows: u16) -> Option<u16> {
    if grid_height <= 0.0 || terminal_rows == 0 || click_y < 0.0 {
        return None;
    }
    let cell_height = grid_height / terminal_rows as f64;
    let row = (click_y / cell_height) as u16;
    (row < terminal_rows).then_some(row)
}

/// Convert a pixel X (relative to the grid container's left edge) to a
/// terminal column.
pub fn pixel_x_to_col(click_x: f64, grid_width: f64, terminal_cols: u16) -> Option<u16> {
    if grid_width <= 0.0 || terminal_cols == 0 || click_x < 0.0 {
        return None;
    }
    let cell_width = grid_width / terminal_cols as f64;
    let col = (click_x / cell_width) as u16;
    (col < terminal_cols).then_some(col)
}
