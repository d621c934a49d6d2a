use crate::domain::UiMode;
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Key hints for the given mode
pub fn hints(mode: UiMode) -> Vec<&'static str> {
    match mode {
        UiMode::Normal => vec![
            " ^P start/pause   ",
            "Space complete   ",
            "^Z undo   ",
            "^Y redo   ",
            "^N new   ",
            "^S edit   ",
            "l sessions   ",
            "x export   ",
            "v view   ",
            "g bucket   ",
            "m metric   ",
            "q quit",
        ],
        UiMode::SessionForm => vec![
            " Tab/↑↓ field   ",
            "Enter save   ",
            "Esc cancel",
        ],
        UiMode::SessionList => vec![
            " ↑/↓ select   ",
            "Enter load   ",
            "d delete   ",
            "n new   ",
            "Esc close",
        ],
    }
}

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, mode: UiMode, area: Rect) {
    let spans: Vec<Span> = hints(mode).into_iter().map(Span::raw).collect();
    let paragraph = Paragraph::new(Line::from(spans)).style(hint_style());
    f.render_widget(paragraph, area);
}
