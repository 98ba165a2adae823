//! CV Assistant — turns a CV snapshot plus a request into one Gemini call.
//!
//! Flow: credential check → format CV → build prompt → generate_content →
//!       generated text back to the caller, unmodified.
//!
//! Constructed once at the composition root and shared as `Arc<CvAssistant>`.
//! Every entry point is stateless apart from the credential, which is read
//! once at the start of each call.

use std::sync::{Arc, RwLock};

use tracing::{info, warn};

use crate::assistant::prompts::{
    cover_letter_request, improve_section_request, INTERVIEW_QUESTIONS_INSTRUCTION,
    SKILL_SUGGESTIONS_INSTRUCTION,
};
use crate::context::format_cv_context;
use crate::credentials::{resolve_credential, CredentialStore, StoreError, CREDENTIAL_KEY};
use crate::errors::AssistantError;
use crate::llm_client::prompts::build_prompt;
use crate::llm_client::GeminiClient;
use crate::models::cv::CvDocument;

pub const MISSING_CREDENTIAL_MESSAGE: &str =
    "Gemini API key not configured. Please set your API key to use the assistant.";

pub struct CvAssistant {
    client: GeminiClient,
    store: Arc<dyn CredentialStore>,
    credential: RwLock<Option<String>>,
}

impl CvAssistant {
    /// Resolves the starting credential from `store`, then `configured`,
    /// then the built-in fallback.
    pub fn new(
        client: GeminiClient,
        store: Arc<dyn CredentialStore>,
        configured: Option<&str>,
    ) -> Self {
        let credential = resolve_credential(store.as_ref(), configured).map(|(token, _)| token);
        Self {
            client,
            store,
            credential: RwLock::new(credential),
        }
    }

    pub fn has_credential(&self) -> bool {
        self.current_credential().is_some()
    }

    /// Replaces the in-memory credential and persists it under
    /// [`CREDENTIAL_KEY`], overwriting any previous value.
    pub fn set_credential(&self, token: &str) -> Result<(), StoreError> {
        *self.credential.write().unwrap_or_else(|e| e.into_inner()) = Some(token.to_string());

        self.store.set(CREDENTIAL_KEY, token).map_err(|e| {
            warn!("Credential updated in memory but not persisted: {e}");
            e
        })?;

        info!("Gemini credential updated");
        Ok(())
    }

    fn current_credential(&self) -> Option<String> {
        self.credential
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
            .filter(|token| !token.trim().is_empty())
    }

    /// The single generation path every entry point funnels through.
    pub async fn generate(
        &self,
        user_message: &str,
        cv: Option<&CvDocument>,
    ) -> Result<String, AssistantError> {
        let api_key = self
            .current_credential()
            .ok_or_else(|| AssistantError::Configuration(MISSING_CREDENTIAL_MESSAGE.to_string()))?;

        let cv_context = format_cv_context(cv);
        let prompt = build_prompt(&cv_context, user_message);

        self.client.generate_content(&api_key, &prompt).await
    }

    /// General Q&A about the CV.
    pub async fn ask(
        &self,
        message: &str,
        cv: Option<&CvDocument>,
    ) -> Result<String, AssistantError> {
        self.generate(message, cv).await
    }

    pub async fn generate_cover_letter(
        &self,
        cv: Option<&CvDocument>,
        job_description: &str,
        company_name: &str,
    ) -> Result<String, AssistantError> {
        let request = cover_letter_request(job_description, company_name);
        self.generate(&request, cv).await
    }

    pub async fn improve_section(
        &self,
        cv: Option<&CvDocument>,
        section_type: &str,
        current_content: &str,
    ) -> Result<String, AssistantError> {
        let request = improve_section_request(section_type, current_content);
        self.generate(&request, cv).await
    }

    pub async fn interview_questions(
        &self,
        cv: Option<&CvDocument>,
    ) -> Result<String, AssistantError> {
        self.generate(INTERVIEW_QUESTIONS_INSTRUCTION, cv).await
    }

    pub async fn suggest_skills(&self, cv: Option<&CvDocument>) -> Result<String, AssistantError> {
        self.generate(SKILL_SUGGESTIONS_INSTRUCTION, cv).await
    }
}
