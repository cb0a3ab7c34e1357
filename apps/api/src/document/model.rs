//! Normalized résumé model consumed by the renderer.
//!
//! Every optional string is `""` when absent and every list is empty when absent,
//! so the renderer only ever asks "is this empty?".

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub profile: Profile,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub projects: Vec<ProjectEntry>,
    pub certifications: Vec<CertificationEntry>,
    pub skills: SkillSet,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub summary: String,
}

impl Profile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub institution: String,
    pub location: String,
    pub degree: String,
    /// `YYYY-MM`, or empty.
    pub start_date: String,
    /// `YYYY-MM`, or empty when ongoing.
    pub end_date: String,
    pub details: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub company: String,
    pub role: String,
    pub location: String,
    pub start_date: String,
    /// Empty means the position is ongoing.
    pub end_date: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub name: String,
    pub impact: String,
    pub technologies: Vec<String>,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CertificationEntry {
    pub name: String,
    pub issuer: String,
    pub date: String,
    pub credential_id: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillSet {
    pub languages: Vec<String>,
    pub tools: Vec<String>,
    pub methods: Vec<String>,
}

impl SkillSet {
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty() && self.tools.is_empty() && self.methods.is_empty()
    }
}

/// The six renderable sections. Their order in `RenderOptions::section_order`
/// controls both inclusion and emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    Summary,
    Education,
    Experience,
    Projects,
    Certifications,
    Skills,
}

impl SectionId {
    pub const ALL: [SectionId; 6] = [
        SectionId::Summary,
        SectionId::Education,
        SectionId::Experience,
        SectionId::Projects,
        SectionId::Certifications,
        SectionId::Skills,
    ];

    /// Uppercase heading printed above the section. The summary has none.
    pub fn title(&self) -> Option<&'static str> {
        match self {
            SectionId::Summary => None,
            SectionId::Education => Some("EDUCATION"),
            SectionId::Experience => Some("EXPERIENCE"),
            SectionId::Projects => Some("PROJECTS"),
            SectionId::Certifications => Some("CERTIFICATIONS"),
            SectionId::Skills => Some("SKILLS"),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionId::Summary => "summary",
            SectionId::Education => "education",
            SectionId::Experience => "experience",
            SectionId::Projects => "projects",
            SectionId::Certifications => "certifications",
            SectionId::Skills => "skills",
        }
    }

    pub fn parse(s: &str) -> Option<SectionId> {
        SectionId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl ResumeRecord {
    /// True when the section has something to render.
    pub fn has_content(&self, section: SectionId) -> bool {
        match section {
            SectionId::Summary => !self.profile.summary.is_empty(),
            SectionId::Education => !self.education.is_empty(),
            SectionId::Experience => !self.experience.is_empty(),
            SectionId::Projects => !self.projects.is_empty(),
            SectionId::Certifications => !self.certifications.is_empty(),
            SectionId::Skills => !self.skills.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_id_parse_is_case_insensitive() {
        assert_eq!(SectionId::parse("Education"), Some(SectionId::Education));
        assert_eq!(SectionId::parse(" skills "), Some(SectionId::Skills));
        assert_eq!(SectionId::parse("awards"), None);
    }

    #[test]
    fn test_has_content_tracks_empty_sections() {
        let mut record = ResumeRecord::default();
        assert!(!record.has_content(SectionId::Certifications));
        assert!(!record.has_content(SectionId::Skills));

        record.skills.tools.push("git".to_string());
        assert!(record.has_content(SectionId::Skills));
    }

    #[test]
    fn test_full_name_trims_missing_half() {
        let profile = Profile {
            first_name: "Ada".to_string(),
            ..Default::default()
        };
        assert_eq!(profile.full_name(), "Ada");
    }
}
