use std::time::Instant;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::Gauge,
    Frame,
};

use crate::app::App;
use crate::render::compose;
use crate::ui::draw_composition;

/// Full-screen playback: the current slide plus a progress bar that refills on every slide.
pub fn draw_player(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    let Some(slide) = app.player.current() else {
        return;
    };
    draw_composition(f, &compose(slide), chunks[0]);

    let now = Instant::now();
    let label = format!(
        "{}/{}  {}s left  Esc to exit",
        app.player.index().map_or(0, |i| i + 1),
        app.player.snapshot_len(),
        app.player.remaining(now).as_secs_f64().ceil(),
    );
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::White).bg(Color::DarkGray))
        .ratio(app.player.progress(now))
        .label(label);
    f.render_widget(gauge, chunks[1]);
}
