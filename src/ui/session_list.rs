use crate::app::AppState;
use crate::report::deadline_text;
use crate::ui::{
    layout::create_modal_area,
    styles::{error_style, hint_style, modal_bg_style, modal_title_style, selected_style},
};
use chrono::Local;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the session picker
pub fn render_session_list(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(list) = &app.session_list else {
        return;
    };
    let now = Local::now();

    let mut lines = Vec::new();
    lines.push(Line::raw(""));

    if list.names.is_empty() {
        lines.push(Line::raw("  No sessions"));
    }

    for (idx, name) in list.names.iter().enumerate() {
        let Some(session) = app.store.get(name) else {
            continue;
        };
        let mut text = format!("  {}  {}/{}", name, session.done(), session.item_count);
        if let Some(deadline) = deadline_text(session, now) {
            text.push_str(&format!("  [{}]", deadline));
        }
        if app.store.current_name() == Some(name.as_str()) {
            text.push_str("  ← Current");
        }

        if idx == list.selected {
            lines.push(Line::styled(text, selected_style()));
        } else {
            lines.push(Line::raw(text));
        }
    }
    lines.push(Line::raw(""));

    if list.confirm_delete {
        if let Some(name) = list.selected_name() {
            lines.push(Line::styled(
                format!("  Delete \"{}\"? This cannot be undone.", name),
                error_style(),
            ));
            lines.push(Line::from(vec![
                Span::styled("  [y]", modal_title_style()),
                Span::raw(" Delete  "),
                Span::styled("[any key]", modal_title_style()),
                Span::raw(" Keep"),
            ]));
        }
    } else {
        lines.push(Line::styled(
            "  Enter load  ·  d delete  ·  n new  ·  Esc close",
            hint_style(),
        ));
    }

    let height = (lines.len() as u16 + 2).max(8);
    let modal_area = create_modal_area(area, height);

    // Clear the area behind the modal
    f.render_widget(Clear, modal_area);

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Sessions ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}
