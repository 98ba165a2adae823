//! CV Assistant — builds prompts from structured CV data and a user request,
//! sends them to Gemini, and hands back the generated text.
//!
//! `CvAssistant` is the entry point for library callers; `routes` exposes the
//! same operations over HTTP.

pub mod assistant;
pub mod config;
pub mod context;
pub mod credentials;
pub mod errors;
pub mod llm_client;
pub mod models;
pub mod routes;
pub mod state;

pub use assistant::CvAssistant;
pub use errors::AssistantError;
