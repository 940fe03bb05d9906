mod achievements;
mod actions;
mod catalog;
mod economy;
mod game;
mod input;
mod offline;
mod prestige;
mod render;
mod save;
mod state;
mod time;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use game::TycoonGame;
use input::{pixel_x_to_col, pixel_y_to_row, ClickState, InputEvent};
use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};
use time::GameTime;

/// Query the grid container's bounding rect and convert browser pixel
/// coordinates to a terminal cell.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let click_x = mouse_x as f64 - rect.left();
    let click_y = mouse_y as f64 - rect.top();

    let col = pixel_x_to_col(click_x, rect.width(), cs.terminal_cols)?;
    let row = pixel_y_to_row(click_y, rect.height(), cs.terminal_rows)?;
    Some((col, row))
}

/// Save once more when the tab is closed or refreshed, so up to one
/// autosave interval of progress is not lost.
#[cfg(target_arch = "wasm32")]
fn install_unload_save_hook(game: Rc<RefCell<TycoonGame>>) {
    use wasm_bindgen::prelude::Closure;
    use wasm_bindgen::JsCast;

    let Some(window) = web_sys::window() else {
        return;
    };
    let hook = Closure::<dyn FnMut()>::new(move || {
        save::save_game(&game.borrow().state);
    });
    if window
        .add_event_listener_with_callback("beforeunload", hook.as_ref().unchecked_ref())
        .is_err()
    {
        web_sys::console::warn_1(&"failed to install unload save hook".into());
    }
    // Leak the closure; it must live for the page's lifetime.
    hook.forget();
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();

    let game = Rc::new(RefCell::new(TycoonGame::new()));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    #[cfg(target_arch = "wasm32")]
    install_unload_save_hook(game.clone());

    // Keyboard handler
    terminal.on_key_event({
        let game = game.clone();
        move |key_event| {
            if let KeyCode::Char(c) = key_event.code {
                game.borrow_mut()
                    .handle_input(&InputEvent::Key(c.to_ascii_lowercase()));
            }
        }
    });

    // Mouse/touch handler
    terminal.on_mouse_event({
        let game = game.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let action = {
                let cs = click_state.borrow();
                if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                    return;
                }
                dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs)
                    .and_then(|(col, row)| cs.hit_test(col, row))
            };

            if let Some(action_id) = action {
                game.borrow_mut().handle_input(&InputEvent::Click(action_id));
            }
        }
    });

    terminal.draw_web({
        let click_state = click_state.clone();
        let mut clock = GameTime::new(1);
        move |f| {
            let ticks = clock.update(js_sys::Date::now());
            let mut g = game.borrow_mut();
            g.tick(ticks);

            let size = f.area();
            {
                let mut cs = click_state.borrow_mut();
                cs.terminal_cols = size.width;
                cs.terminal_rows = size.height;
                cs.clear_targets();
            }

            g.render(f, size, &click_state);
        }
    });

    Ok(())
}
