//! Terminal rendering of a slide composition.
//!
//! Images cannot be shown in a terminal, so image regions are drawn as a
//! shaded fill carrying a short label of the image source.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::render::{image_label, Area, Composition, Region, Rgb, TextStyle};

const IMAGE_FILL: Color = Color::Rgb(55, 65, 81);
const IMAGE_DIMMED: Color = Color::Rgb(31, 41, 55);
const CAPTION_BG: Color = Color::Rgb(0, 0, 0);

/// Map a palette color onto the terminal.
pub const fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// The rectangle `area` covers inside `surface`.
pub fn area_rect(area: Area, surface: Rect) -> Rect {
    match area {
        Area::Full => surface,
        Area::LeftHalf | Area::RightHalf => {
            let halves = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(surface);
            if area == Area::LeftHalf {
                halves[0]
            } else {
                halves[1]
            }
        }
        Area::BottomLeft => {
            let width = (surface.width / 2).max(surface.width.min(12));
            let height = 3.min(surface.height);
            Rect {
                x: surface.x + u16::from(surface.width > width + 1),
                y: surface.bottom().saturating_sub(height + u16::from(surface.height > height)),
                width,
                height,
            }
        }
    }
}

/// Draw every region of `composition` into `surface`, back to front.
pub fn draw_composition(f: &mut Frame, composition: &Composition, surface: Rect) {
    for region in &composition.regions {
        match region {
            Region::Image { area, uri, dimmed } => {
                draw_image(f, area_rect(*area, surface), uri, *dimmed);
            }
            Region::Text { area, style, title, content } => {
                let rect = area_rect(*area, surface);
                draw_text(f, composition, rect, *style, title, content.as_deref());
            }
        }
    }
}

fn draw_image(f: &mut Frame, rect: Rect, uri: &str, dimmed: bool) {
    let fill = if dimmed { IMAGE_DIMMED } else { IMAGE_FILL };
    f.render_widget(Block::default().style(Style::default().bg(fill)), rect);

    if rect.height == 0 {
        return;
    }
    let label_area = Rect { y: rect.bottom() - 1, height: 1, ..rect };
    let label = Paragraph::new(format!("▣ {}", image_label(uri)))
        .style(Style::default().fg(Color::Gray).bg(fill))
        .alignment(Alignment::Right);
    f.render_widget(label, label_area);
}

fn draw_text(
    f: &mut Frame,
    composition: &Composition,
    rect: Rect,
    style: TextStyle,
    title: &str,
    content: Option<&str>,
) {
    let (bg, fg) = match style {
        TextStyle::Caption => (CAPTION_BG, Color::White),
        TextStyle::Panel | TextStyle::Column => (
            color(composition.palette.background),
            color(composition.palette.foreground),
        ),
    };

    let mut lines = vec![Line::from(Span::styled(
        title.to_string(),
        Style::default().fg(fg).add_modifier(Modifier::BOLD),
    ))];
    if let Some(body) = content {
        lines.push(Line::from(""));
        lines.extend(body.lines().map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(fg)))));
    }

    let (target, alignment) = match style {
        TextStyle::Panel => (centered_panel(rect, lines.len()), Alignment::Center),
        TextStyle::Column | TextStyle::Caption => (rect, Alignment::Left),
    };

    let block = Block::default()
        .borders(if style == TextStyle::Panel { Borders::ALL } else { Borders::NONE })
        .border_style(Style::default().fg(fg))
        .style(Style::default().bg(bg));
    let inner = block.inner(target);

    f.render_widget(Clear, target);
    f.render_widget(block, target);

    let padded = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1)])
        .horizontal_margin(u16::from(inner.width > 4))
        .vertical_margin(u16::from(style == TextStyle::Column && inner.height > 4))
        .split(inner)[0];

    f.render_widget(
        Paragraph::new(lines).alignment(alignment).wrap(Wrap { trim: false }),
        padded,
    );
}

#[allow(clippy::cast_possible_truncation)]
fn centered_panel(rect: Rect, line_count: usize) -> Rect {
    let width = (rect.width * 3 / 4).max(rect.width.min(20));
    let height = (line_count as u16 + 4).min(rect.height);
    Rect {
        x: rect.x + (rect.width.saturating_sub(width)) / 2,
        y: rect.y + (rect.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halves_cover_surface() {
        let surface = Rect::new(0, 0, 80, 20);
        let left = area_rect(Area::LeftHalf, surface);
        let right = area_rect(Area::RightHalf, surface);
        assert_eq!(left.width + right.width, 80);
        assert_eq!(left.x, 0);
        assert_eq!(right.x, left.width);
        assert_eq!(area_rect(Area::Full, surface), surface);
    }

    #[test]
    fn caption_sits_bottom_left_inside_surface() {
        let surface = Rect::new(2, 3, 60, 20);
        let caption = area_rect(Area::BottomLeft, surface);
        assert!(caption.x >= surface.x);
        assert!(caption.bottom() <= surface.bottom());
        assert!(caption.right() <= surface.right());
        assert_eq!(caption.height, 3);
    }

    #[test]
    fn caption_fits_tiny_surface() {
        let surface = Rect::new(0, 0, 5, 2);
        let caption = area_rect(Area::BottomLeft, surface);
        assert!(caption.right() <= surface.right());
        assert!(caption.bottom() <= surface.bottom());
    }

    #[test]
    fn panel_is_centered() {
        let rect = Rect::new(0, 0, 40, 20);
        let panel = centered_panel(rect, 4);
        assert_eq!(panel.width, 30);
        assert_eq!(panel.height, 8);
        assert_eq!(panel.x, 5);
        assert_eq!(panel.y, 6);
    }
}
