//! Slide composition.
//!
//! `compose` maps a slide's layout and theme to a description of what goes
//! where. It is a pure function of the slide; the terminal canvas in
//! `ui::canvas` is the only thing that turns a composition into pixels.

use crate::deck::Slide;
use crate::types::{Layout, Theme};

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Background/foreground pair for a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Fill behind text regions.
    pub background: Rgb,
    /// Text color.
    pub foreground: Rgb,
}

const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);
const SLATE_900: Rgb = Rgb(0x0f, 0x17, 0x2a);

/// Colors for `theme`.
pub const fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Dark => Palette { background: SLATE_900, foreground: WHITE },
        Theme::Light => Palette { background: WHITE, foreground: SLATE_900 },
        Theme::Blue => Palette { background: Rgb(0x1e, 0x3a, 0x8a), foreground: WHITE },
        Theme::Red => Palette { background: Rgb(0x7f, 0x1d, 0x1d), foreground: WHITE },
        Theme::Green => Palette { background: Rgb(0x06, 0x4e, 0x3b), foreground: WHITE },
    }
}

/// Part of the slide surface a region occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Area {
    /// The whole surface.
    Full,
    /// Left half.
    LeftHalf,
    /// Right half.
    RightHalf,
    /// A caption box anchored bottom-left.
    BottomLeft,
}

/// How a text region is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    /// Centered card over the image.
    Panel,
    /// Left-aligned column filling its half.
    Column,
    /// Small dark caption; ignores the theme colors.
    Caption,
}

/// One drawable element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Region {
    /// Background or side image.
    Image {
        /// Where it goes.
        area: Area,
        /// Image URI.
        uri: String,
        /// Drawn under a dimming overlay.
        dimmed: bool,
    },
    /// Title and optional body.
    Text {
        /// Where it goes.
        area: Area,
        /// Presentation style.
        style: TextStyle,
        /// Headline.
        title: String,
        /// Body text; `None` when the layout hides it.
        content: Option<String>,
    },
}

/// Everything needed to draw one slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    /// Layout the regions were derived from.
    pub layout: Layout,
    /// Theme colors.
    pub palette: Palette,
    /// Regions in back-to-front order.
    pub regions: Vec<Region>,
}

impl Composition {
    /// The text region, if any.
    pub fn text(&self) -> Option<&Region> {
        self.regions.iter().find(|r| matches!(r, Region::Text { .. }))
    }
}

/// Arrange `slide` according to its layout and theme.
pub fn compose(slide: &Slide) -> Composition {
    let image = |area, dimmed| Region::Image {
        area,
        uri: slide.background_image.clone(),
        dimmed,
    };
    let text = |area, style, with_content: bool| Region::Text {
        area,
        style,
        title: slide.title.clone(),
        content: with_content.then(|| slide.content.clone()),
    };

    let regions = match slide.layout {
        Layout::Center => vec![
            image(Area::Full, true),
            text(Area::Full, TextStyle::Panel, true),
        ],
        Layout::SplitLeft => vec![
            text(Area::LeftHalf, TextStyle::Column, true),
            image(Area::RightHalf, false),
        ],
        Layout::SplitRight => vec![
            image(Area::LeftHalf, false),
            text(Area::RightHalf, TextStyle::Column, true),
        ],
        Layout::ImageOnly => vec![
            image(Area::Full, false),
            text(Area::BottomLeft, TextStyle::Caption, false),
        ],
    };

    Composition {
        layout: slide.layout,
        palette: palette(slide.theme),
        regions,
    }
}

/// Short human label for an image URI. Data URIs are summarized, not shown.
pub fn image_label(uri: &str) -> String {
    if let Some(rest) = uri.strip_prefix("data:") {
        let mime = rest.split(&[';', ','][..]).next().unwrap_or("");
        let payload = rest.split_once(',').map_or("", |(_, data)| data);
        // base64 expands 3 bytes to 4 chars
        let kib = (payload.len() * 3 / 4) as f64 / 1024.0;
        let mime = if mime.is_empty() { "unknown" } else { mime };
        return format!("embedded {mime} ({kib:.1} KiB)");
    }
    if uri.trim().is_empty() {
        return "no image".to_string();
    }
    uri.to_string()
}
