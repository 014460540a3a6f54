//! Generation gateway.
//!
//! Turns a topic string into candidate slide content through an external
//! model. The gateway never touches the deck: callers turn the returned
//! partial slides into full slides and append them themselves.

/// HTTP client for the Gemini `generateContent` endpoint
pub mod api;
/// Keyword to image URI templating
pub mod image;
/// Parsing of the model's JSON payload
pub mod payload;

use async_trait::async_trait;

use crate::deck::PartialSlide;
use crate::error::Result;

pub use api::GeminiClient;
pub use image::image_for_keyword;
pub use payload::parse_generated_slides;

/// Anything that can produce slide content for a topic.
#[async_trait]
pub trait SlideGenerator: Send + Sync {
    /// Generate partial slides for `topic`.
    ///
    /// All-or-nothing: either every item parsed or an error is returned.
    async fn generate(&self, topic: &str) -> Result<Vec<PartialSlide>>;
}
