use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

/// A CV as produced by the editor UI. Consumed read-only by the assistant.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CvDocument {
    pub title: String,
    #[serde(default)]
    pub sections: Vec<CvSection>,
}

/// The fixed set of section type tags. Anything unrecognised is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionType {
    Contact,
    Summary,
    Experience,
    Education,
    Skills,
    Other,
}

impl SectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionType::Contact => "contact",
            SectionType::Summary => "summary",
            SectionType::Experience => "experience",
            SectionType::Education => "education",
            SectionType::Skills => "skills",
            SectionType::Other => "other",
        }
    }
}

/// One section of a CV. The payload variant doubles as the type tag.
///
/// Wire form is `{ "id", "type", "title", "visible", "content" }`. A `type`
/// outside the known set keeps its raw `content` in [`SectionContent::Other`]
/// together with the original tag, so it round-trips and is never dropped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "RawSection", into = "RawSection")]
pub struct CvSection {
    pub id: String,
    pub title: String,
    pub visible: bool,
    pub content: SectionContent,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SectionContent {
    Contact(ContactInfo),
    Summary(SummaryContent),
    Experience(ExperienceContent),
    Education(EducationContent),
    Skills(SkillsContent),
    Other { tag: String, payload: Value },
}

impl CvSection {
    pub fn new(title: impl Into<String>, content: SectionContent) -> Self {
        Self {
            id: String::new(),
            title: title.into(),
            visible: true,
            content,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn section_type(&self) -> SectionType {
        match &self.content {
            SectionContent::Contact(_) => SectionType::Contact,
            SectionContent::Summary(_) => SectionType::Summary,
            SectionContent::Experience(_) => SectionType::Experience,
            SectionContent::Education(_) => SectionType::Education,
            SectionContent::Skills(_) => SectionType::Skills,
            SectionContent::Other { .. } => SectionType::Other,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactInfo {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SummaryContent {
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceContent {
    pub entries: Vec<ExperienceEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceEntry {
    pub position: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    /// When set, the period ends at "Present" and `end_date` is ignored.
    pub current: bool,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationContent {
    pub entries: Vec<EducationEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationEntry {
    pub degree: String,
    pub field: String,
    pub institution: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub gpa: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillsContent {
    #[serde(alias = "entries")]
    pub skills: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Wire form
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSection {
    #[serde(default)]
    id: String,
    #[serde(rename = "type")]
    section_type: String,
    #[serde(default)]
    title: String,
    #[serde(default = "default_visible")]
    visible: bool,
    #[serde(default)]
    content: Value,
}

fn default_visible() -> bool {
    true
}

/// `null` content (or a missing field) decodes as the payload's default.
fn decode<T: DeserializeOwned + Default>(content: Value) -> Result<T, serde_json::Error> {
    if content.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(content)
}

impl TryFrom<RawSection> for CvSection {
    type Error = serde_json::Error;

    fn try_from(raw: RawSection) -> Result<Self, Self::Error> {
        let content = match raw.section_type.as_str() {
            "contact" => SectionContent::Contact(decode(raw.content)?),
            "summary" => SectionContent::Summary(decode(raw.content)?),
            "experience" => SectionContent::Experience(decode(raw.content)?),
            "education" => SectionContent::Education(decode(raw.content)?),
            "skills" => SectionContent::Skills(decode(raw.content)?),
            _ => SectionContent::Other {
                tag: raw.section_type,
                payload: raw.content,
            },
        };

        Ok(CvSection {
            id: raw.id,
            title: raw.title,
            visible: raw.visible,
            content,
        })
    }
}

impl From<CvSection> for RawSection {
    fn from(section: CvSection) -> Self {
        let section_type = section.section_type().as_str().to_string();
        let (section_type, content) = match section.content {
            SectionContent::Contact(c) => (section_type, to_value(&c)),
            SectionContent::Summary(c) => (section_type, to_value(&c)),
            SectionContent::Experience(c) => (section_type, to_value(&c)),
            SectionContent::Education(c) => (section_type, to_value(&c)),
            SectionContent::Skills(c) => (section_type, to_value(&c)),
            SectionContent::Other { tag, payload } => (tag, payload),
        };

        RawSection {
            id: section.id,
            section_type,
            title: section.title,
            visible: section.visible,
            content,
        }
    }
}

// Plain derive(Serialize) structs with String/Vec/Option fields cannot fail.
fn to_value<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}
