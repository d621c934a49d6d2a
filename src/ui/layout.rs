use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main layout structure
pub struct MainLayout {
    pub keybindings_area: Rect,
    pub session_area: Rect,
    pub chart_area: Rect,
    pub status_area: Rect,
}

/// Height of the session pane (borders included)
const SESSION_PANE_HEIGHT: u16 = 11;

/// Create the main layout
/// - Top bar: keybindings (1 row)
/// - Session pane: stats, progress, ETA and deadline
/// - Chart pane: fills the rest
/// - Bottom bar: status line (1 row)
pub fn create_layout(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                   // Keybindings bar
            Constraint::Length(SESSION_PANE_HEIGHT), // Session pane
            Constraint::Min(0),                      // Chart
            Constraint::Length(1),                   // Status line
        ])
        .split(area);

    MainLayout {
        keybindings_area: chunks[0],
        session_area: chunks[1],
        chart_area: chunks[2],
        status_area: chunks[3],
    }
}

/// Create a centered modal area of the given height
pub fn create_modal_area(area: Rect, height: u16) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Length(height.min(area.height)),
            Constraint::Percentage(25),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}
