use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::app::{App, AppMode};
use crate::deck::Slide;
use crate::render::image_label;
use crate::services::editor::EditField;
use crate::ui::create_titled_block;

/// Display value of `field` on `slide`.
pub fn field_value(slide: &Slide, field: EditField) -> String {
    match field {
        EditField::Title => slide.title.clone(),
        EditField::Content => slide.content.clone(),
        EditField::Background => image_label(&slide.background_image),
        EditField::Duration => format!("◀ {}s ▶", slide.duration),
        EditField::Theme => format!("◀ {} ▶", slide.theme.name()),
        EditField::Layout => format!("◀ {} ▶", slide.layout.name()),
    }
}

pub fn draw_editor(f: &mut Frame, app: &App, area: Rect) {
    let editing = match app.mode {
        AppMode::Editing(field) => Some(field),
        _ => None,
    };
    let block = create_titled_block(" Edit Slide ", editing.is_some() || app.mode == AppMode::Deck);
    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let slide = app.deck.active();
    let mut lines = Vec::new();

    for field in EditField::all() {
        let is_focused = *field == app.focused_field;
        let is_editing = editing == Some(*field);

        let label_style = if is_focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let prefix = if is_focused { "> " } else { "  " };
        lines.push(Line::from(Span::styled(format!("{prefix}{}", field.name()), label_style)));

        let value_style = if is_editing {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::White)
        };

        // show the raw text while editing a data URI so backspace is visible
        let value = if is_editing && *field == EditField::Background {
            slide.background_image.clone()
        } else {
            field_value(slide, *field)
        };
        let value = if is_editing { format!("{value}▏") } else { value };

        for part in value.lines() {
            lines.push(Line::from(vec![Span::raw("    "), Span::styled(part.to_string(), value_style)]));
        }
        if value.is_empty() {
            lines.push(Line::from(Span::styled("    (empty)", Style::default().fg(Color::DarkGray))));
        }
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "  r: random image | i: import file",
        Style::default().fg(Color::DarkGray),
    )));

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner_area);
}
