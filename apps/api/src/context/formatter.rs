//! CV Formatter — renders a `CvDocument` into the plain-text context block
//! that is embedded in every assistant prompt.
//!
//! Pure and deterministic: the same document always yields byte-identical
//! output. Hidden sections are skipped; everything else is rendered in
//! document order, each section followed by a blank line.

use crate::models::cv::{
    ContactInfo, CvDocument, CvSection, EducationContent, ExperienceContent, SectionContent,
    SkillsContent, SummaryContent,
};
use serde_json::Value;

/// Returned when no CV is loaded.
pub const NO_CV_DATA: &str = "No CV data available.";

pub const NOT_PROVIDED: &str = "Not provided";
pub const NO_SUMMARY: &str = "No summary provided";
pub const NO_EXPERIENCE: &str = "No experience entries";
pub const NO_EDUCATION: &str = "No education entries";
pub const NO_SKILLS: &str = "No skills listed";
pub const PRESENT: &str = "Present";

/// Formats a CV (or its absence) as prompt context.
pub fn format_cv_context(document: Option<&CvDocument>) -> String {
    let Some(document) = document else {
        return NO_CV_DATA.to_string();
    };

    let mut out = format!("CV Title: {}\n\n", document.title);

    for section in document.sections.iter().filter(|s| s.visible) {
        out.push_str(&format_section(section));
        out.push('\n');
    }

    out
}

/// Renders one section: its title, a colon, then the type-specific body.
fn format_section(section: &CvSection) -> String {
    let body = match &section.content {
        SectionContent::Contact(contact) => format_contact(contact),
        SectionContent::Summary(summary) => format_summary(summary),
        SectionContent::Experience(experience) => format_experience(experience),
        SectionContent::Education(education) => format_education(education),
        SectionContent::Skills(skills) => format_skills(skills),
        SectionContent::Other { payload, .. } => format_generic(payload),
    };

    format!("{}:\n{}", section.title, body)
}

/// Editors send `""` for fields left blank; those count as absent.
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|v| !v.trim().is_empty())
}

fn format_contact(contact: &ContactInfo) -> String {
    let or_missing = |field: &Option<String>| -> String {
        present(field).unwrap_or(NOT_PROVIDED).to_string()
    };

    let mut out = String::new();
    out.push_str(&format!("Name: {}\n", or_missing(&contact.full_name)));
    out.push_str(&format!("Email: {}\n", or_missing(&contact.email)));
    out.push_str(&format!("Phone: {}\n", or_missing(&contact.phone)));
    out.push_str(&format!("Location: {}\n", or_missing(&contact.location)));

    let optional = [
        ("Website", &contact.website),
        ("LinkedIn", &contact.linkedin),
        ("GitHub", &contact.github),
    ];
    for (label, value) in optional {
        if let Some(value) = present(value) {
            out.push_str(&format!("{label}: {value}\n"));
        }
    }

    out
}

fn format_summary(summary: &SummaryContent) -> String {
    let text = present(&summary.content).unwrap_or(NO_SUMMARY);
    format!("{text}\n")
}

fn format_experience(experience: &ExperienceContent) -> String {
    if experience.entries.is_empty() {
        return format!("{NO_EXPERIENCE}\n");
    }

    let mut out = String::new();
    for entry in &experience.entries {
        let end = if entry.current {
            PRESENT
        } else {
            entry.end_date.as_str()
        };
        out.push_str(&format!("{} at {}\n", entry.position, entry.company));
        out.push_str(&format!("{}\n", entry.location));
        out.push_str(&format!("{} - {}\n", entry.start_date, end));
        out.push_str(&format!("{}\n\n", entry.description));
    }
    out
}

fn format_education(education: &EducationContent) -> String {
    if education.entries.is_empty() {
        return format!("{NO_EDUCATION}\n");
    }

    let mut out = String::new();
    for entry in &education.entries {
        out.push_str(&format!("{} in {}\n", entry.degree, entry.field));
        out.push_str(&format!("{}\n", entry.institution));
        out.push_str(&format!("{}\n", entry.location));
        out.push_str(&format!("{} - {}\n", entry.start_date, entry.end_date));
        if let Some(gpa) = present(&entry.gpa) {
            out.push_str(&format!("GPA: {gpa}\n"));
        }
        if let Some(description) = present(&entry.description) {
            out.push_str(&format!("{description}\n"));
        }
        out.push('\n');
    }
    out
}

fn format_skills(skills: &SkillsContent) -> String {
    if skills.skills.is_empty() {
        return format!("{NO_SKILLS}\n");
    }
    format!("{}\n", skills.skills.join(", "))
}

/// Catch-all for section types the formatter has no layout for.
/// serde_json maps keep keys sorted, so the dump is stable.
fn format_generic(payload: &Value) -> String {
    let text = serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string());
    format!("{text}\n")
}
