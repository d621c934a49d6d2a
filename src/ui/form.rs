use crate::app::{AppState, FormMode};
use crate::ui::{
    layout::create_modal_area,
    styles::{error_style, hint_style, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the create/edit session form
pub fn render_session_form(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(form) = &app.form else {
        return;
    };

    let title_text = match form.mode {
        FormMode::New => " New Session ",
        FormMode::Edit { .. } => " Edit Session ",
    };

    let mut lines = Vec::new();
    lines.push(Line::raw(""));

    for (idx, (label, value)) in form.labels().iter().zip(form.values()).enumerate() {
        let editing = idx == form.editing_field;
        lines.push(Line::raw(if editing {
            format!("{}: (editing)", label)
        } else {
            format!("{}:", label)
        }));
        lines.push(Line::from(vec![
            Span::raw("> "),
            Span::styled(value.to_string(), modal_title_style()),
            if editing {
                Span::styled("█", modal_title_style()) // Cursor
            } else {
                Span::raw("")
            },
        ]));
    }
    lines.push(Line::raw(""));

    if let Some(error) = &form.error {
        lines.push(Line::styled(error.clone(), error_style()));
        lines.push(Line::raw(""));
    }

    if form.mode == FormMode::New {
        lines.push(Line::styled(
            "Current Task > 1 pre-fills earlier tasks with the average time",
            hint_style(),
        ));
    }
    lines.push(Line::styled(
        "Deadline format: YYYY-MM-DDTHH:MM or YYYY-MM-DD HH:MM (optional)",
        hint_style(),
    ));
    lines.push(Line::raw("Tab to switch fields  ·  Enter to save  ·  Esc to cancel"));

    let height = lines.len() as u16 + 2;
    let modal_area = create_modal_area(area, height);

    // Clear the area behind the form
    f.render_widget(Clear, modal_area);

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(title_text, modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}
