use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::time::Duration as StdDuration;

use crate::config::Config;
use crate::deck::PartialSlide;
use crate::error::{Error, Result};
use crate::generation::payload::{candidate_text, parse_generated_slides};
use crate::generation::SlideGenerator;
use crate::types::{Layout, Theme};

/// Client for the Gemini `generateContent` REST endpoint
#[derive(Clone)]
pub struct GeminiClient {
    api_key: String,
    model: String,
    endpoint: String,
    slide_count: usize,
    client: Client,
}

impl GeminiClient {
    /// Create a new Gemini client from config
    pub fn new(config: &Config) -> Result<Self> {
        if !config.has_api_key() {
            return Err(Error::missing_credential());
        }
        Ok(Self {
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            endpoint: config.endpoint.clone(),
            slide_count: config.slide_count,
            client: Client::builder()
                .timeout(StdDuration::from_secs(config.request_timeout_secs))
                .build()
                .unwrap_or_default(),
        })
    }

    /// Model this client talks to.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Make a `generateContent` call and return the raw response JSON
    async fn generate_content(&self, body: &Value) -> Result<Value> {
        let url = format!("{}/models/{}:generateContent", self.endpoint, self.model);
        let resp = self.client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(body)
            .send()
            .await
            .map_err(|e| Error::Network(format!("Request to {} failed: {}", self.model, e.without_url())))?;

        check_status(&self.model, resp.status())?;

        resp.json().await
            .map_err(|e| Error::generation(format!("Invalid JSON from {}: {}", self.model, e.without_url())))
    }
}

#[async_trait]
impl SlideGenerator for GeminiClient {
    async fn generate(&self, topic: &str) -> Result<Vec<PartialSlide>> {
        tracing::info!(model = %self.model, count = self.slide_count, "generating slides");
        let body = request_body(topic, self.slide_count);
        let response = self.generate_content(&body).await?;
        let text = candidate_text(&response)?;
        let slides = parse_generated_slides(&text)?;
        tracing::info!(received = slides.len(), "generation finished");
        Ok(slides)
    }
}

/// Map a non-2xx response status to a generation error.
fn check_status(model: &str, status: StatusCode) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }
    tracing::warn!(model, status = status.as_u16(), "generation request rejected");
    Err(Error::generation_status(
        format!("Request to {model} returned {status}"),
        status.as_u16(),
    ))
}

/// Prompt sent to the model.
fn prompt(topic: &str, count: usize) -> String {
    format!(
        "Generate {count} distinct digital signage slides for a campaign about: \"{topic}\".\n\
         Each slide should have a catchy title, a short persuasive description (content), \
         and a keyword to search for a background image.\n\
         Vary the themes and layouts."
    )
}

/// Request body with a response schema pinning the array-of-objects shape.
fn request_body(topic: &str, count: usize) -> Value {
    let themes: Vec<&str> = Theme::all().iter().map(|t| t.as_str()).collect();
    let layouts: Vec<&str> = Layout::all().iter().map(|l| l.as_str()).collect();

    json!({
        "contents": [{
            "role": "user",
            "parts": [{ "text": prompt(topic, count) }]
        }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "content": { "type": "STRING" },
                        "imageKeyword": {
                            "type": "STRING",
                            "description": "A single keyword to search for an image (e.g., 'coffee', 'beach')"
                        },
                        "theme": { "type": "STRING", "enum": themes },
                        "layout": { "type": "STRING", "enum": layouts }
                    },
                    "required": ["title", "content", "imageKeyword", "theme", "layout"]
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn refuses_to_build_without_key() {
        let config = Config::default();
        assert!(matches!(
            GeminiClient::new(&config),
            Err(Error::MissingCredential { .. })
        ));
    }

    #[test]
    fn builds_with_key() {
        let mut config = Config::default();
        config.api_key = "k".into();
        let client = GeminiClient::new(&config).unwrap();
        assert_eq!(client.model(), "gemini-2.5-flash");
    }

    #[test]
    fn success_status_passes() {
        assert!(check_status("m", StatusCode::OK).is_ok());
    }

    #[test]
    fn non_success_status_is_generation_error() {
        let err = check_status("gemini-2.5-flash", StatusCode::TOO_MANY_REQUESTS).unwrap_err();
        assert!(err.is_generation_failure());
        assert_eq!(err.status(), Some(429));
        assert!(err.hint().unwrap().contains("Rate limited"));
        assert!(err.to_string().contains("429"));

        let err = check_status("m", StatusCode::FORBIDDEN).unwrap_err();
        assert!(matches!(err, Error::Generation { status: Some(403), .. }));
    }

    #[test]
    fn request_body_carries_topic_and_schema() {
        let body = request_body("Italian lunch menu", 3);
        let text = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(text.contains("Generate 3 distinct"));
        assert!(text.contains("\"Italian lunch menu\""));

        let schema = &body["generationConfig"]["responseSchema"];
        assert_eq!(schema["type"], "ARRAY");
        assert_eq!(schema["items"]["required"].as_array().unwrap().len(), 5);
        assert_eq!(
            schema["items"]["properties"]["layout"]["enum"],
            json!(["center", "split-left", "split-right", "image-only"])
        );
        assert_eq!(
            schema["items"]["properties"]["theme"]["enum"],
            json!(["dark", "light", "blue", "red", "green"])
        );
    }
}
