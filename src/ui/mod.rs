//! User interface components.
//!
//! Provides TUI widgets and drawing functions for the application's
//! terminal-based user interface using ratatui.

mod canvas;
mod editor;
mod player;
mod timeline;

pub use canvas::draw_composition;
pub use editor::draw_editor;
pub use player::draw_player;
pub use timeline::draw_timeline;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        block::{Position, Title},
        Block, Borders, Clear, Paragraph, Wrap,
    },
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, AppMode};
use crate::constants::ui::{SIDEBAR_WIDTH, TIMELINE_HEIGHT};
use crate::render::compose;

/// Render the full application UI to the terminal frame.
pub fn draw(f: &mut Frame, app: &App) {
    if app.mode == AppMode::Player {
        let area = f.size();
        draw_player(f, app, area);
        if app.show_help {
            draw_help_modal(f, app);
        }
        return;
    }

    let banner_height = u16::from(app.error_message.is_some());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Prompt bar
            Constraint::Length(banner_height),
            Constraint::Min(5),
            Constraint::Length(TIMELINE_HEIGHT),
            Constraint::Length(3), // Command/status bar at bottom
        ])
        .split(f.size());

    draw_prompt_bar(f, app, chunks[0]);
    if let Some(error) = &app.error_message {
        draw_error_banner(f, error, chunks[1]);
    }

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(SIDEBAR_WIDTH)])
        .split(chunks[2]);
    draw_preview(f, app, body[0]);
    draw_editor(f, app, body[1]);

    draw_timeline(f, app, chunks[3]);
    draw_command_bar(f, app, chunks[4]);

    if app.is_generating {
        draw_loading_indicator(f);
    }

    if app.show_help {
        draw_help_modal(f, app);
    }
}

fn draw_prompt_bar(f: &mut Frame, app: &App, area: Rect) {
    let is_focused = app.mode == AppMode::Prompt;
    let title = format!(" {} v{} ", app.config.app_name(), app.config.app_version());
    let block = create_titled_block(&title, is_focused);
    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let line = if app.prompt.is_empty() && !is_focused {
        let hint = if app.can_generate() {
            " Press g to describe the slides you want generated..."
        } else {
            " Set API_KEY to enable slide generation"
        };
        Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray)))
    } else {
        let mut spans = vec![
            Span::styled(" Generate: ", Style::default().fg(Color::Yellow)),
            Span::raw(app.prompt.as_str()),
        ];
        if app.is_generating {
            spans.push(Span::styled("  (generating...)", Style::default().fg(Color::Cyan)));
        }
        Line::from(spans)
    };
    f.render_widget(Paragraph::new(line), inner_area);

    if is_focused {
        f.set_cursor(cursor_x(inner_area, 11, &app.prompt), inner_area.top());
    }
}

fn draw_error_banner(f: &mut Frame, message: &str, area: Rect) {
    let line = Line::from(vec![
        Span::styled(" ✗ ", Style::default().fg(Color::White).bg(Color::Red).add_modifier(Modifier::BOLD)),
        Span::styled(format!(" {message} "), Style::default().fg(Color::Red)),
        Span::styled("(Esc to dismiss)", Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn draw_preview(f: &mut Frame, app: &App, area: Rect) {
    let slide = app.deck.active();
    let label = format!(" Layout: {} | Theme: {} ", slide.layout.name(), slide.theme.name());
    let block = Block::default()
        .title(Span::styled(" Preview ", Style::default().fg(Color::Gray)))
        .title(
            Title::from(Span::styled(label, Style::default().fg(Color::DarkGray)))
                .position(Position::Bottom)
                .alignment(Alignment::Right),
        )
        .borders(Borders::ALL);
    let inner_area = block.inner(area);
    f.render_widget(block, area);

    draw_composition(f, &compose(slide), inner_area);
}

fn draw_command_bar(f: &mut Frame, app: &App, area: Rect) {
    let (title, border_color) = match app.mode {
        AppMode::ImportPath => ("Import Image", Color::Cyan),
        AppMode::Editing(_) => ("Editing", Color::Cyan),
        _ => ("Commands/Status", Color::Yellow),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(Span::styled(title, Style::default().fg(border_color)));
    let inner_area = block.inner(area);
    f.render_widget(block, area);

    if app.mode == AppMode::ImportPath {
        let input = Paragraph::new(format!(" Path: {}", app.import_path))
            .style(Style::default().fg(Color::Cyan));
        f.render_widget(input, inner_area);
        f.set_cursor(cursor_x(inner_area, 7, &app.import_path), inner_area.top());
        return;
    }

    let mut text = match app.mode {
        AppMode::Deck => create_help_text(&[
            ("←/→", "Select"),
            ("↑/↓", "Field"),
            ("Enter", "Edit"),
            ("a", "Add"),
            ("d", "Delete"),
            ("g", "Generate"),
            ("p", "Play"),
            ("?", "Help"),
        ]),
        AppMode::Prompt => create_help_text(&[("Enter", "Generate"), ("Esc", "Cancel")]),
        AppMode::Editing(_) => create_help_text(&[
            ("Enter/Esc", "Done"),
            ("Ctrl+V", "Paste"),
        ]),
        AppMode::ImportPath | AppMode::Player => vec![],
    };

    let position = format!(
        " | Slide {}/{}",
        app.deck.active_index() + 1,
        app.deck.len()
    );
    text.push(Span::styled(position, Style::default().fg(Color::Gray)));

    if let Some(status) = &app.status_message {
        text.push(Span::styled(format!(" | {status}"), Style::default().fg(Color::Cyan)));
    }

    f.render_widget(
        Paragraph::new(Line::from(text)).style(Style::default().fg(Color::Gray)),
        inner_area,
    );
}

/// Column just past `text` typed after a `prefix`-wide label, kept inside `area`.
pub fn cursor_x(area: Rect, prefix: u16, text: &str) -> u16 {
    let typed = u16::try_from(text.width()).unwrap_or(u16::MAX);
    area.left()
        .saturating_add(prefix)
        .saturating_add(typed)
        .min(area.right().saturating_sub(1))
}

/// Build styled help text spans from key-description pairs for the command bar.
pub fn create_help_text<'a>(commands: &[(&'a str, &'a str)]) -> Vec<Span<'a>> {
    let mut text = vec![Span::raw(" ")]; // Start with padding

    for (i, (key, description)) in commands.iter().enumerate() {
        text.push(Span::styled(*key, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)));
        text.push(Span::raw(format!(": {description}")));

        if i < commands.len() - 1 {
            text.push(Span::raw(" | "));
        }
    }

    text
}

/// Create a bordered block with a title, highlighted when focused.
pub fn create_titled_block(title: &str, is_focused: bool) -> Block<'_> {
    let (title_style, border_style) = if is_focused {
        (
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            Style::default().fg(Color::Yellow),
        )
    } else {
        (Style::default(), Style::default())
    };

    Block::default()
        .title(Span::styled(title, title_style))
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Truncate `text` to `max` display columns, adding an ellipsis when cut.
pub fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

// Draw a loading indicator overlay
fn draw_loading_indicator(f: &mut Frame) {
    let size = f.size();
    let width = 26.min(size.width);
    let height = 3.min(size.height);

    let area = Rect {
        x: (size.width.saturating_sub(width)) / 2,
        y: (size.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));
    let inner_area = block.inner(area);

    let text = Paragraph::new("Generating slides...")
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);

    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(text, inner_area);
}

// Draw the help modal with keybindings
fn draw_help_modal(f: &mut Frame, app: &App) {
    let size = f.size();
    let width = 60.min(size.width.saturating_sub(4));
    let height = 24.min(size.height.saturating_sub(4));

    let area = Rect {
        x: (size.width.saturating_sub(width)) / 2,
        y: (size.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    let block = Block::default()
        .title(Span::styled(" Help - Keybindings ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));
    let inner_area = block.inner(area);

    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let help_text: Vec<Line> = build_help_content(app)
        .iter()
        .map(|(key, desc, is_header)| {
            if *is_header {
                Line::from(Span::styled(*key, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)))
            } else {
                Line::from(vec![
                    Span::styled(format!("{key:>12}"), Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
                    Span::raw("  "),
                    Span::styled(*desc, Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    f.render_widget(Paragraph::new(help_text).wrap(Wrap { trim: true }), inner_area);
}

fn build_help_content(app: &App) -> Vec<(&'static str, &'static str, bool)> {
    let mut lines = vec![
        ("── Global ──", "", true),
        ("F1 / ?", "Show this help", false),
        ("Ctrl+C", "Quit application", false),
        ("", "", false),
    ];

    if app.mode == AppMode::Player {
        lines.extend([
            ("── Player ──", "", true),
            ("Esc / q / x", "Close player", false),
        ]);
    } else {
        lines.extend([
            ("── Deck ──", "", true),
            ("←/→ or h/l", "Select slide", false),
            ("a / d", "Add / delete slide", false),
            ("g or /", "Generate slides from a topic", false),
            ("p or F5", "Play deck", false),
            ("q", "Quit", false),
            ("", "", false),
            ("── Editor ──", "", true),
            ("↑/↓ or j/k", "Focus field", false),
            ("Enter / e", "Edit text or cycle value", false),
            ("+ / -", "Change duration, theme, layout", false),
            ("r", "Random background", false),
            ("i", "Import background from file", false),
            ("Ctrl+V", "Paste while typing", false),
        ]);
    }

    lines.push(("", "", false));
    lines.push(("Press Esc, F1 or ? to close", "", true));

    lines
}
