use crate::app::AppState;
use crate::domain::{DeadlineStatus, RunStatus, Session};
use crate::report::{countdown_text, format_datetime, format_time};
use crate::ui::styles::{
    border_style, default_style, done_style, error_style, gauge_style, hint_style, idle_style,
    info_style, paused_style, running_style, title_style,
};
use chrono::{DateTime, Local};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

fn status_style(status: RunStatus) -> Style {
    match status {
        RunStatus::Running => running_style(),
        RunStatus::Paused => paused_style(),
        RunStatus::Idle => idle_style(),
    }
}

/// Render the current session: stats, progress, ETA and deadline
pub fn render_session_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(session) = app.current() else {
        render_empty_prompt(f, area);
        return;
    };
    let now = Local::now();

    let status = app.run_status();
    let title = Line::from(vec![
        Span::styled(format!(" {} ", session.name), title_style()),
        Span::styled(format!("[{}] ", status.to_tag()), status_style(status)),
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Stats
            Constraint::Length(1), // Gauge
            Constraint::Min(0),    // ETA, deadline, history
        ])
        .split(inner);

    f.render_widget(Paragraph::new(stats_line(app, session)), rows[0]);

    let gauge = Gauge::default()
        .gauge_style(if session.is_complete() { done_style() } else { gauge_style() })
        .ratio(session.progress_percent() / 100.0)
        .label(format!("{:.0}%", session.progress_percent()));
    f.render_widget(gauge, rows[1]);

    f.render_widget(Paragraph::new(detail_lines(session, now)), rows[2]);
}

fn stats_line<'a>(app: &AppState, session: &Session) -> Line<'a> {
    Line::from(vec![
        Span::styled("Current: ", title_style()),
        Span::styled(format_time(app.task_time as f64), status_style(app.run_status())),
        Span::raw("   "),
        Span::styled("Average: ", title_style()),
        Span::raw(format_time(session.average_time().unwrap_or(0.0))),
        Span::raw("   "),
        Span::styled("Completed: ", title_style()),
        Span::styled(
            format!("{}/{}", session.done(), session.item_count),
            if session.is_complete() { done_style() } else { default_style() },
        ),
    ])
}

fn detail_lines<'a>(session: &Session, now: DateTime<Local>) -> Vec<Line<'a>> {
    let mut lines = Vec::new();
    lines.push(Line::raw(""));

    if let Some(finish) = session.projected_finish(now) {
        lines.push(Line::from(vec![
            Span::styled("ETA:      ", title_style()),
            Span::styled(countdown_text(session.eta_seconds().round() as i64, "Completed"), info_style()),
            Span::styled(format!("  ({})", format_datetime(&finish)), hint_style()),
        ]));
    } else if session.is_complete() {
        lines.push(Line::from(vec![
            Span::styled("ETA:      ", title_style()),
            Span::styled("Completed", done_style()),
        ]));
    }

    match session.deadline_status(now) {
        DeadlineStatus::None => {}
        DeadlineStatus::Invalid => lines.push(Line::from(vec![
            Span::styled("Deadline: ", title_style()),
            Span::styled("Invalid deadline", error_style()),
        ])),
        DeadlineStatus::Remaining(secs) => {
            let style = if secs < 0 { error_style() } else { default_style() };
            let mut spans = vec![
                Span::styled("Deadline: ", title_style()),
                Span::styled(countdown_text(secs, "Past deadline"), style),
            ];
            if let Some(Some(at)) = session.deadline_at() {
                spans.push(Span::styled(format!("  ({})", format_datetime(&at)), hint_style()));
            }
            lines.push(Line::from(spans));
        }
    }

    lines.push(Line::raw(""));
    lines.push(Line::styled(
        format!(
            "Undo: {}   Redo: {}",
            session.undo.len(),
            session.redo.len()
        ),
        hint_style(),
    ));
    lines
}

/// Shown when no session exists yet
fn render_empty_prompt(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::raw(""),
        Line::styled("No session yet", title_style()),
        Line::raw("Create your first session to begin tracking your tasks."),
        Line::raw(""),
        Line::styled("Press Ctrl+N to create a session", hint_style()),
    ];
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(Span::styled(" Session ", title_style())),
        );
    f.render_widget(paragraph, area);
}
