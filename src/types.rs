//! Core type definitions for compile-time safety.
//!
//! Slide identity is a newtype so it cannot be confused with titles or URIs,
//! and the theme/layout axes are closed enums so every match over them is
//! checked for exhaustiveness.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Opaque slide identifier, unique within a deck.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlideId(pub String);

impl SlideId {
    /// Create a new `SlideId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SlideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SlideId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SlideId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for SlideId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Color palette applied to a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    /// Slate background, white text.
    #[default]
    Dark,
    /// White background, slate text.
    Light,
    /// Deep blue background.
    Blue,
    /// Deep red background.
    Red,
    /// Deep green background.
    Green,
}

impl Theme {
    /// Returns all theme variants in picker order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Dark, Self::Light, Self::Blue, Self::Red, Self::Green]
    }

    /// Wire name, as used by the generation schema.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
            Self::Blue => "blue",
            Self::Red => "red",
            Self::Green => "green",
        }
    }

    /// Returns the human-readable name of this theme.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
            Self::Blue => "Blue",
            Self::Red => "Red",
            Self::Green => "Green",
        }
    }

    /// Cycle to next theme.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Blue,
            Self::Blue => Self::Red,
            Self::Red => Self::Green,
            Self::Green => Self::Dark,
        }
    }

    /// Cycle to previous theme.
    #[must_use]
    pub const fn previous(self) -> Self {
        match self {
            Self::Dark => Self::Green,
            Self::Light => Self::Dark,
            Self::Blue => Self::Light,
            Self::Red => Self::Blue,
            Self::Green => Self::Red,
        }
    }

    /// Parse a wire name, falling back to `Dark` for anything unrecognized.
    #[must_use]
    pub fn parse_lossy(s: &str) -> Self {
        Self::all()
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .unwrap_or_default()
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Theme {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse_lossy(&raw))
    }
}

/// Arrangement of title, content and image on a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    /// Full-bleed image with a centered text panel.
    #[default]
    Center,
    /// Text on the left half, image on the right.
    SplitLeft,
    /// Image on the left half, text on the right.
    SplitRight,
    /// Full image with a title caption; content is hidden.
    ImageOnly,
}

impl Layout {
    /// Returns all layout variants in picker order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Center, Self::SplitLeft, Self::SplitRight, Self::ImageOnly]
    }

    /// Wire name, as used by the generation schema.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Center => "center",
            Self::SplitLeft => "split-left",
            Self::SplitRight => "split-right",
            Self::ImageOnly => "image-only",
        }
    }

    /// Returns the human-readable name of this layout.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Center => "Center",
            Self::SplitLeft => "Split Left",
            Self::SplitRight => "Split Right",
            Self::ImageOnly => "Image Only",
        }
    }

    /// Cycle to next layout.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Center => Self::SplitLeft,
            Self::SplitLeft => Self::SplitRight,
            Self::SplitRight => Self::ImageOnly,
            Self::ImageOnly => Self::Center,
        }
    }

    /// Cycle to previous layout.
    #[must_use]
    pub const fn previous(self) -> Self {
        match self {
            Self::Center => Self::ImageOnly,
            Self::SplitLeft => Self::Center,
            Self::SplitRight => Self::SplitLeft,
            Self::ImageOnly => Self::SplitRight,
        }
    }

    /// Parse a wire name, falling back to `Center` for anything unrecognized.
    #[must_use]
    pub fn parse_lossy(s: &str) -> Self {
        Self::all()
            .iter()
            .copied()
            .find(|l| l.as_str().eq_ignore_ascii_case(s.trim()))
            .unwrap_or_default()
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Layout {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse_lossy(&raw))
    }
}
