// Shared prompt fragments for every assistant call.
// Task-specific instructions live in assistant::prompts.

/// Persona sent ahead of every request.
pub const SYSTEM_PROMPT: &str = "You are an expert CV and resume assistant. \
    You help job seekers write, review, and improve their CVs. \
    Keep a professional, encouraging tone. \
    Give actionable, specific advice grounded in the CV data provided. \
    Use clear structure: headings, bullet points, and short paragraphs where helpful. \
    Be concise and avoid generic filler.";

pub const CONTEXT_HEADER: &str = "\n\n---\n\nCURRENT CV DATA:\n";

pub const REQUEST_HEADER: &str = "\n\n---\n\nUSER REQUEST: ";

pub const CLOSING_INSTRUCTION: &str = "\n\nPlease provide helpful advice.";

/// Assembles the full prompt: persona, CV context, then the user's request.
pub fn build_prompt(cv_context: &str, user_message: &str) -> String {
    format!(
        "{SYSTEM_PROMPT}{CONTEXT_HEADER}{cv_context}\
         {REQUEST_HEADER}{user_message}{CLOSING_INSTRUCTION}"
    )
}
