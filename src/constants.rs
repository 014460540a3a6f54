//! Application constants.
//!
//! Centralizes magic numbers and configuration values for better maintainability.

/// Slide defaults and editor bounds.
pub mod slide {
    /// Duration given to new and generated slides, in seconds.
    pub const DEFAULT_DURATION_SECS: u32 = 10;

    /// Smallest duration the editor lets the user pick.
    pub const MIN_EDIT_DURATION_SECS: u32 = 3;

    /// Largest duration the editor lets the user pick.
    pub const MAX_EDIT_DURATION_SECS: u32 = 60;

    /// Title of the slide present at startup.
    pub const WELCOME_TITLE: &str = "Welcome to GenSignage";

    /// Body of the slide present at startup.
    pub const WELCOME_CONTENT: &str = "Edit this slide or generate new ones using AI.";

    /// Background of the slide present at startup.
    pub const WELCOME_BACKGROUND: &str = "https://picsum.photos/seed/start/1920/1080";

    /// Title given to slides created with "add".
    pub const NEW_SLIDE_TITLE: &str = "New Slide";
}

/// Generation gateway constants.
pub mod generation {
    /// Default Gemini model.
    pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

    /// Default Gemini REST base URL.
    pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

    /// Slides requested per generation.
    pub const DEFAULT_SLIDE_COUNT: usize = 3;

    /// HTTP timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Base for keyword image lookups; the encoded keyword is appended as the query.
    pub const KEYWORD_IMAGE_BASE: &str = "https://source.unsplash.com/1600x900/";
}

/// Playback constants.
pub mod player {
    use std::time::Duration;

    /// Floor applied to zero-length slides so playback never spins.
    pub const MIN_DWELL: Duration = Duration::from_millis(50);
}

/// Async task constants.
pub mod async_tasks {
    /// Channel buffer size for async task communication.
    pub const CHANNEL_BUFFER_SIZE: usize = 16;
}

/// UI layout constants.
pub mod ui {
    /// Width of the editor sidebar in columns.
    pub const SIDEBAR_WIDTH: u16 = 38;

    /// Height of the timeline strip in rows.
    pub const TIMELINE_HEIGHT: u16 = 7;

    /// Width of a single timeline card in columns.
    pub const CARD_WIDTH: u16 = 22;

    /// Poll interval of the draw loop in milliseconds.
    pub const TICK_MILLIS: u64 = 50;
}
