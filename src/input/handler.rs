use crate::app::AppState;
use crate::domain::UiMode;
use anyhow::Result;
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::SessionForm => handle_form_mode(app, key),
        UiMode::SessionList => handle_session_list_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    let now = Local::now();

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('z') => app.do_undo(),
            KeyCode::Char('y') => app.do_redo(),
            KeyCode::Char('s') => app.open_edit_form(),
            KeyCode::Char('n') => app.open_new_form(),
            KeyCode::Char('p') => app.toggle_start_pause(now),
            KeyCode::Char('c') => return Ok(true),
            _ => {}
        }
        return Ok(false);
    }

    match key.code {
        // Complete the running task
        KeyCode::Char(' ') => app.do_task(now),

        KeyCode::Char('l') => app.open_session_list(),
        KeyCode::Char('x') => app.export_current(),

        // Chart toggles
        KeyCode::Char('v') => app.cycle_view(),
        KeyCode::Char('g') => app.cycle_granularity(),
        KeyCode::Char('m') => app.cycle_metric(),

        KeyCode::Char('q') => return Ok(true),
        _ => {}
    }
    Ok(false)
}

/// Handle keys while the session form is open
fn handle_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.submit_form(Local::now()),
        KeyCode::Esc => app.cancel_form(),
        KeyCode::Tab | KeyCode::Down => app.form_next_field(),
        KeyCode::BackTab | KeyCode::Up => app.form_prev_field(),
        KeyCode::Backspace => app.form_backspace(),
        KeyCode::Char(c) => app.form_add_char(c),
        _ => {}
    }
    Ok(false)
}

/// Handle keys in the session list
fn handle_session_list_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    let confirming = app
        .session_list
        .as_ref()
        .is_some_and(|list| list.confirm_delete);

    if confirming {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.list_confirm_delete(),
            _ => app.list_cancel_delete(),
        }
        return Ok(false);
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.list_move_up(),
        KeyCode::Down | KeyCode::Char('j') => app.list_move_down(),
        KeyCode::Enter => app.list_load_selected(),
        KeyCode::Char('d') | KeyCode::Delete => app.list_request_delete(),
        KeyCode::Char('n') => {
            app.close_session_list();
            app.open_new_form();
        }
        KeyCode::Esc | KeyCode::Char('l') | KeyCode::Char('q') => app.close_session_list(),
        _ => {}
    }
    Ok(false)
}
