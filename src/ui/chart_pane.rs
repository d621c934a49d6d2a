use crate::app::AppState;
use crate::domain::{ChartOptions, ChartSeries, ViewMode};
use crate::report::format_value;
use crate::ui::styles::{average_style, bar_style, border_style, hint_style, title_style};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

const BAR_GAP: u16 = 1;
const MIN_BAR_WIDTH: u16 = 5;
const MAX_BAR_WIDTH: u16 = 12;

fn chart_title(options: &ChartOptions) -> String {
    match options.view {
        ViewMode::PerTask => format!(" {} ", options.view.name()),
        ViewMode::Aggregate => format!(
            " {} · {} · {} ",
            options.view.name(),
            options.granularity.name(),
            options.metric.name()
        ),
    }
}

/// Bar width and how many of the most recent points fit in `width` columns
fn fit_bars(width: u16, points: usize) -> (u16, usize) {
    if points == 0 {
        return (MIN_BAR_WIDTH, 0);
    }
    let per_bar = ((width as usize / points) as u16).saturating_sub(BAR_GAP);
    let bar_width = per_bar.clamp(MIN_BAR_WIDTH, MAX_BAR_WIDTH);
    let visible = (width / (bar_width + BAR_GAP)).max(1) as usize;
    (bar_width, visible.min(points))
}

/// Render the task history / aggregate chart for the current session
pub fn render_chart_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let options = app.chart_options();
    let series = app.chart_series();
    let durations = options.values_are_durations();

    let mut title = vec![Span::styled(chart_title(&options), title_style())];
    if !series.is_empty() {
        title.push(Span::styled(
            format!("avg {} ", format_value(series.running_average, durations)),
            average_style(),
        ));
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Line::from(title));

    if series.is_empty() {
        let placeholder = Paragraph::new(vec![
            Line::raw(""),
            Line::styled("No tasks yet", hint_style()),
        ])
        .alignment(Alignment::Center)
        .block(block);
        f.render_widget(placeholder, area);
        return;
    }

    let inner_width = block.inner(area).width;
    let (bar_width, visible) = fit_bars(inner_width, series.values.len());
    let bars = build_bars(&series, visible, durations);

    let chart = BarChart::default()
        .block(block)
        .bar_width(bar_width)
        .bar_gap(BAR_GAP)
        .bar_style(bar_style())
        .data(BarGroup::default().bars(&bars));
    f.render_widget(chart, area);
}

/// Bars for the last `visible` points. Bar heights are scaled to whole
/// numbers; the text shows the real value.
fn build_bars(series: &ChartSeries, visible: usize, durations: bool) -> Vec<Bar<'static>> {
    let skip = series.values.len().saturating_sub(visible);
    series
        .labels
        .iter()
        .zip(&series.values)
        .skip(skip)
        .map(|(label, value)| {
            Bar::default()
                .value((value * 100.0).round().max(0.0) as u64)
                .text_value(format_value(*value, durations))
                .label(Line::from(label.clone()))
        })
        .collect()
}
