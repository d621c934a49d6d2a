pub mod chart_pane;
pub mod form;
pub mod keybindings;
pub mod layout;
pub mod session_list;
pub mod session_pane;
pub mod styles;

use crate::app::AppState;
use chart_pane::render_chart_pane;
use form::render_session_form;
use keybindings::render_keybindings;
use layout::create_layout;
use ratatui::{layout::Rect, text::Span, widgets::Paragraph, Frame};
use session_list::render_session_list;
use session_pane::render_session_pane;
use styles::{hint_style, modal_title_style};

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);

    render_keybindings(f, app.ui_mode, layout.keybindings_area);
    render_session_pane(f, app, layout.session_area);
    render_chart_pane(f, app, layout.chart_area);
    render_status(f, app, layout.status_area);

    // Modals draw over the panes; each is a no-op without its state
    if app.ui_mode.is_modal() {
        render_session_form(f, app, size);
        render_session_list(f, app, size);
    }
}

/// Bottom line: last status message
fn render_status(f: &mut Frame, app: &AppState, area: Rect) {
    let line = match &app.status {
        Some(message) => Span::styled(format!(" {}", message), modal_title_style()),
        None => Span::styled(" Ready", hint_style()),
    };
    f.render_widget(Paragraph::new(line), area);
}
