//! The slide entity and its partial form produced by generation.

use serde::{Deserialize, Serialize};

use crate::constants::slide;
use crate::types::{Layout, SlideId, Theme};

/// One unit of displayed content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    /// Stable identity for the slide's lifetime.
    pub id: SlideId,
    /// Headline text.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Remote URL or `data:` URI. Never fetched by the core.
    pub background_image: String,
    /// Display time in seconds. Not clamped here.
    pub duration: u32,
    /// Color palette.
    pub theme: Theme,
    /// Region arrangement.
    pub layout: Layout,
}

impl Slide {
    /// The slide every new deck starts with.
    pub fn welcome() -> Self {
        Self {
            id: SlideId::generate(),
            title: slide::WELCOME_TITLE.to_string(),
            content: slide::WELCOME_CONTENT.to_string(),
            background_image: slide::WELCOME_BACKGROUND.to_string(),
            duration: slide::DEFAULT_DURATION_SECS,
            theme: Theme::Dark,
            layout: Layout::Center,
        }
    }

    /// A fresh slide for the "add" action: welcome defaults, new title and image.
    pub fn blank() -> Self {
        Self {
            title: slide::NEW_SLIDE_TITLE.to_string(),
            background_image: random_background(),
            ..Self::welcome()
        }
    }

    /// Build a full slide from generated fields; anything missing comes from the welcome slide.
    pub fn from_partial(partial: PartialSlide) -> Self {
        let base = Self::welcome();
        Self {
            id: SlideId::generate(),
            title: partial.title.unwrap_or(base.title),
            content: partial.content.unwrap_or(base.content),
            background_image: partial.background_image.unwrap_or(base.background_image),
            duration: partial.duration.unwrap_or(base.duration),
            theme: partial.theme.unwrap_or(base.theme),
            layout: partial.layout.unwrap_or(base.layout),
        }
    }

    /// Copy of this slide with a different id. Used when duplicating.
    #[must_use]
    pub fn with_id(self, id: SlideId) -> Self {
        Self { id, ..self }
    }
}

/// Slide fields as returned by the generation gateway. The caller assigns ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialSlide {
    /// Generated headline.
    pub title: Option<String>,
    /// Generated body text.
    pub content: Option<String>,
    /// Image URI derived from the suggested keyword.
    pub background_image: Option<String>,
    /// Display time in seconds.
    pub duration: Option<u32>,
    /// Suggested palette.
    pub theme: Option<Theme>,
    /// Suggested arrangement.
    pub layout: Option<Layout>,
}

/// A picsum URL with an unpredictable seed, so each call yields a different picture.
pub fn random_background() -> String {
    format!(
        "https://picsum.photos/seed/{}/1920/1080",
        uuid::Uuid::new_v4().simple()
    )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn blank_slide_uses_welcome_defaults() {
        let welcome = Slide::welcome();
        let blank = Slide::blank();
        assert_eq!(blank.title, "New Slide");
        assert_eq!(blank.content, welcome.content);
        assert_eq!(blank.duration, 10);
        assert_eq!(blank.theme, Theme::Dark);
        assert_eq!(blank.layout, Layout::Center);
        assert_ne!(blank.id, welcome.id);
        assert_ne!(blank.background_image, welcome.background_image);
    }

    #[test]
    fn partial_fields_override_defaults() {
        let slide = Slide::from_partial(PartialSlide {
            title: Some("Fresh Coffee".into()),
            theme: Some(Theme::Red),
            ..PartialSlide::default()
        });
        assert_eq!(slide.title, "Fresh Coffee");
        assert_eq!(slide.theme, Theme::Red);
        assert_eq!(slide.content, "Edit this slide or generate new ones using AI.");
        assert_eq!(slide.layout, Layout::Center);
        assert_eq!(slide.duration, 10);
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let slide = Slide::welcome().with_id(SlideId::new("1"));
        let json = serde_json::to_value(&slide).unwrap();
        assert_eq!(json["id"], "1");
        assert_eq!(json["backgroundImage"], "https://picsum.photos/seed/start/1920/1080");
        assert_eq!(json["layout"], "center");
        assert_eq!(json["theme"], "dark");
    }
}
