//! `GenSignage` - a terminal slide deck editor and autoplay player for digital signage.
//!
//! Slides can be written by hand or generated from a topic through the
//! Gemini API, then played back full-screen in a loop.

// Re-export public modules for use in integration tests and as a library
pub mod app;
pub mod config;
pub mod constants;
pub mod deck;
pub mod error;
pub mod generation;
pub mod input;
pub mod player;
pub mod render;
pub mod services;
pub mod types;
pub mod ui;
