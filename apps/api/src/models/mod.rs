pub mod cv;

pub use cv::{
    ContactInfo, CvDocument, CvSection, EducationContent, EducationEntry, ExperienceContent,
    ExperienceEntry, SectionContent, SectionType, SkillsContent, SummaryContent,
};
