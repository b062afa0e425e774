//! ZiyoAI Server Library
//!
//! Educational assistant backend. Requests are wrapped in prompt templates,
//! sent through a fallback chain of generative AI providers, and the answers
//! are cleaned up before they reach the client.
//!
//! # Modules
//!
//! - `providers`: provider adapters and the fallback dispatcher
//! - `ocr`: local OCR used to rescue image requests
//! - `formatter`: model markup to HTML conversion
//! - `quiz`: quiz JSON extraction and scoring
//! - `routes`: the HTTP surface

pub mod articles;
pub mod config;
pub mod error;
pub mod formatter;
pub mod ocr;
pub mod prompts;
pub mod providers;
pub mod quiz;
pub mod routes;
pub mod state;
pub mod subject;
pub mod transcribe;
