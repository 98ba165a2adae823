// Task instructions for the assistant entry points.
// Each becomes the USER REQUEST part of the prompt built in llm_client::prompts.

pub const COVER_LETTER_INSTRUCTION: &str = "Write a professional cover letter based on my CV. \
    Highlight the experience and skills most relevant to the role, \
    keep it to one page, and end with a confident call to action.";

pub const INTERVIEW_QUESTIONS_INSTRUCTION: &str = "Based on my CV, list the interview questions \
    I am most likely to be asked. For each question, give tips on how to answer it \
    using concrete examples from my experience.";

pub const SKILL_SUGGESTIONS_INSTRUCTION: &str = "Based on my CV, suggest additional skills \
    I should develop or highlight to be more competitive in my field. \
    Explain briefly why each skill matters and how to demonstrate it.";

/// Base instruction plus a job-description clause and a company clause,
/// each only when the argument is non-blank.
pub fn cover_letter_request(job_description: &str, company_name: &str) -> String {
    let mut request = COVER_LETTER_INSTRUCTION.to_string();

    if !job_description.trim().is_empty() {
        request.push_str("\n\nJob Description:\n");
        request.push_str(job_description);
    }
    if !company_name.trim().is_empty() {
        request.push_str("\n\nCompany: ");
        request.push_str(company_name);
    }

    request
}

/// Asks for suggestions plus a rewritten version of one section.
pub fn improve_section_request(section_type: &str, current_content: &str) -> String {
    format!(
        "Please review and improve the {section_type} section of my CV.\n\n\
         Current content:\n\
         {current_content}\n\n\
         Give specific suggestions for making it more impactful, \
         then provide a rewritten version."
    )
}
