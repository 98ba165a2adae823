// CV Assistant: the five generation entry points and their HTTP handlers.
// All remote calls go through llm_client — no direct HTTP here.

pub mod handlers;
pub mod prompts;
pub mod service;

pub use service::CvAssistant;
