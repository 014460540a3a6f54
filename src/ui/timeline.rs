use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::constants::ui::CARD_WIDTH;
use crate::render::palette;
use crate::ui::{canvas::color, create_titled_block, truncate};

/// First card index to draw so that `active` stays visible.
pub fn first_visible(active: usize, len: usize, visible: usize) -> usize {
    if visible == 0 || len <= visible {
        return 0;
    }
    let max_start = len - visible;
    active.saturating_sub(visible - 1).min(max_start)
}

pub fn draw_timeline(f: &mut Frame, app: &App, area: Rect) {
    let title = format!(" Timeline ({} slides) ", app.deck.len());
    let block = create_titled_block(&title, false);
    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let visible = usize::from(inner_area.width / (CARD_WIDTH + 1)).max(1);
    let active = app.deck.active_index();
    let start = first_visible(active, app.deck.len(), visible);

    let selection_fg = Color::Yellow;
    let default_fg = Color::White;

    for (offset, slide) in app.deck.slides().iter().skip(start).take(visible).enumerate() {
        let index = start + offset;
        let is_selected = index == active;
        #[allow(clippy::cast_possible_truncation)]
        let x = inner_area.x + offset as u16 * (CARD_WIDTH + 1);
        let card_area = Rect {
            x,
            y: inner_area.y,
            width: CARD_WIDTH.min(inner_area.right().saturating_sub(x)),
            height: inner_area.height,
        };

        let border_style = if is_selected {
            Style::default().fg(selection_fg).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let swatch = color(palette(slide.theme).background);

        let card = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Span::styled(format!(" {} ", index + 1), border_style));
        let card_inner = card.inner(card_area);
        f.render_widget(card, card_area);

        let text_width = usize::from(card_inner.width);
        let title_style = if is_selected {
            Style::default().fg(selection_fg).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(default_fg)
        };

        let lines = vec![
            Line::from(Span::styled(truncate(&slide.title, text_width), title_style)),
            Line::from(vec![
                Span::styled("  ", Style::default().bg(swatch)),
                Span::styled(
                    format!(" {}s", slide.duration),
                    Style::default().fg(Color::Gray),
                ),
            ]),
            Line::from(Span::styled(
                truncate(slide.layout.name(), text_width),
                Style::default().fg(Color::DarkGray),
            )),
        ];
        f.render_widget(Paragraph::new(lines), card_inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn everything_visible_starts_at_zero() {
        assert_eq!(first_visible(2, 3, 5), 0);
        assert_eq!(first_visible(0, 0, 0), 0);
    }

    #[test]
    fn window_follows_active_card() {
        assert_eq!(first_visible(0, 10, 4), 0);
        assert_eq!(first_visible(3, 10, 4), 0);
        assert_eq!(first_visible(4, 10, 4), 1);
        assert_eq!(first_visible(9, 10, 4), 6);
    }
}
