use serde::Deserialize;
use serde_json::Value;

use crate::constants::slide::DEFAULT_DURATION_SECS;
use crate::deck::PartialSlide;
use crate::error::{Error, Result};
use crate::generation::image::image_for_keyword;
use crate::types::{Layout, Theme};

/// One element of the array the model is asked to return.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedItem {
    title: String,
    content: String,
    image_keyword: String,
    theme: Theme,
    layout: Layout,
}

impl From<GeneratedItem> for PartialSlide {
    fn from(item: GeneratedItem) -> Self {
        Self {
            title: Some(item.title),
            content: Some(item.content),
            background_image: Some(image_for_keyword(&item.image_keyword)),
            duration: Some(DEFAULT_DURATION_SECS),
            theme: Some(item.theme),
            layout: Some(item.layout),
        }
    }
}

/// Parse the model's text output into partial slides.
///
/// The text must be a JSON array whose every element carries `title`,
/// `content`, `imageKeyword`, `theme` and `layout` strings. A single bad
/// element rejects the whole payload.
pub fn parse_generated_slides(text: &str) -> Result<Vec<PartialSlide>> {
    let body = strip_code_fence(text);
    let value: Value = serde_json::from_str(body)
        .map_err(|e| Error::generation(format!("Response is not valid JSON: {e}")))?;

    let Value::Array(items) = value else {
        return Err(Error::generation("Expected a JSON array of slides"));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| {
            serde_json::from_value::<GeneratedItem>(item)
                .map(PartialSlide::from)
                .map_err(|e| Error::generation(format!("Slide {} is incomplete: {e}", idx + 1)))
        })
        .collect()
}

/// Pull the generated text out of a `generateContent` response envelope.
pub fn candidate_text(response: &Value) -> Result<String> {
    let parts = response["candidates"][0]["content"]["parts"]
        .as_array()
        .ok_or_else(|| {
            let reason = response["promptFeedback"]["blockReason"]
                .as_str()
                .unwrap_or("no candidates returned");
            Error::generation(format!("Model returned no content ({reason})"))
        })?;

    let text: String = parts.iter().filter_map(|p| p["text"].as_str()).collect();
    if text.trim().is_empty() {
        return Err(Error::generation("Model returned an empty response"));
    }
    Ok(text)
}

/// Models occasionally wrap JSON in a markdown fence despite the mime type.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .map_or(trimmed, str::trim)
}
