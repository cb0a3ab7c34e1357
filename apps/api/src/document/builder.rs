//! Document Model Builder — turns a raw storage record into a `ResumeRecord`.
//!
//! Pure transform: no I/O. Absent strings become `""`, absent lists become empty,
//! blank list items are dropped. The only failure is a missing required profile
//! field (first name, last name, email).

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::document::model::{
    CertificationEntry, EducationEntry, ExperienceEntry, Profile, ProjectEntry, ResumeRecord,
    SkillSet,
};
use crate::document::period::{is_inverted, Period};
use crate::models::cv::{
    RawCertification, RawCvRecord, RawEducation, RawExperience, RawProfile, RawProject, RawSkills,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("Missing required field: {field}")]
    MissingRequiredField { field: &'static str },
}

/// How education and experience entries are ordered in the built record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryOrder {
    /// Keep the order the storage API returned.
    #[default]
    AsEntered,
    /// Latest start period first; entries without a parseable start go last.
    MostRecentFirst,
}

/// Builds the normalized `ResumeRecord` from a raw storage record.
pub fn build_resume_record(
    raw: &RawCvRecord,
    order: EntryOrder,
) -> Result<ResumeRecord, ModelError> {
    let profile = build_profile(raw.profile.as_ref())?;

    let mut education: Vec<EducationEntry> = raw
        .education
        .iter()
        .flatten()
        .map(build_education)
        .collect();
    let mut experience: Vec<ExperienceEntry> = raw
        .experience
        .iter()
        .flatten()
        .map(build_experience)
        .collect();

    if order == EntryOrder::MostRecentFirst {
        sort_most_recent_first(&mut education, |e| &e.start_date);
        sort_most_recent_first(&mut experience, |e| &e.start_date);
    }

    for entry in &education {
        check_period("education", &entry.institution, &entry.start_date, &entry.end_date);
    }
    for entry in &experience {
        check_period("experience", &entry.company, &entry.start_date, &entry.end_date);
    }

    Ok(ResumeRecord {
        profile,
        education,
        experience,
        projects: raw.projects.iter().flatten().map(build_project).collect(),
        certifications: raw
            .certifications
            .iter()
            .flatten()
            .map(build_certification)
            .collect(),
        skills: raw.skills.as_ref().map(build_skills).unwrap_or_default(),
    })
}

fn build_profile(raw: Option<&RawProfile>) -> Result<Profile, ModelError> {
    let raw = raw.cloned().unwrap_or_default();
    Ok(Profile {
        first_name: required(&raw.first_name, "profile.first_name")?,
        last_name: required(&raw.last_name, "profile.last_name")?,
        email: required(&raw.email, "profile.email")?,
        phone: text(&raw.phone),
        location: text(&raw.location),
        linkedin: text(&raw.linkedin),
        summary: text(&raw.summary),
    })
}

fn build_education(raw: &RawEducation) -> EducationEntry {
    EducationEntry {
        institution: text(&raw.institution),
        location: text(&raw.location),
        degree: text(&raw.degree),
        start_date: text(&raw.start_date),
        end_date: text(&raw.end_date),
        details: list(&raw.details),
    }
}

fn build_experience(raw: &RawExperience) -> ExperienceEntry {
    ExperienceEntry {
        company: text(&raw.company),
        role: text(&raw.role),
        location: text(&raw.location),
        start_date: text(&raw.start_date),
        end_date: text(&raw.end_date),
        bullets: list(&raw.bullets),
    }
}

fn build_project(raw: &RawProject) -> ProjectEntry {
    ProjectEntry {
        name: text(&raw.name),
        impact: text(&raw.impact),
        technologies: list(&raw.technologies),
        url: text(&raw.url),
    }
}

fn build_certification(raw: &RawCertification) -> CertificationEntry {
    CertificationEntry {
        name: text(&raw.name),
        issuer: text(&raw.issuer),
        date: text(&raw.date),
        credential_id: text(&raw.credential_id),
        url: text(&raw.url),
    }
}

fn build_skills(raw: &RawSkills) -> SkillSet {
    SkillSet {
        languages: list(&raw.languages),
        tools: list(&raw.tools),
        methods: list(&raw.methods),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Internal helpers
// ────────────────────────────────────────────────────────────────────────────

fn text(value: &Option<String>) -> String {
    value.as_deref().map(str::trim).unwrap_or_default().to_string()
}

/// A whitespace-only required value is treated as absent.
fn required(value: &Option<String>, field: &'static str) -> Result<String, ModelError> {
    let value = text(value);
    if value.is_empty() {
        return Err(ModelError::MissingRequiredField { field });
    }
    Ok(value)
}

fn list(values: &Option<Vec<String>>) -> Vec<String> {
    values
        .iter()
        .flatten()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

/// Stable sort, newest start first. Unparseable starts keep their relative order at the end.
fn sort_most_recent_first<T>(entries: &mut [T], start_of: impl Fn(&T) -> &String) {
    entries.sort_by(|a, b| {
        let pa = Period::parse(start_of(a));
        let pb = Period::parse(start_of(b));
        // Option orders None < Some, so reversing puts None last.
        pb.cmp(&pa)
    });
}

fn check_period(section: &str, label: &str, start: &str, end: &str) {
    for value in [start, end] {
        if !value.is_empty() && Period::parse(value).is_none() {
            warn!(section, entry = label, value, "Period is not in YYYY-MM form; rendering verbatim");
        }
    }
    if is_inverted(start, end) {
        warn!(section, entry = label, start, end, "Period ends before it starts; rendering verbatim");
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn make_profile() -> RawProfile {
        RawProfile {
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
            email: Some("ada@x.io".to_string()),
            ..Default::default()
        }
    }

    fn make_raw() -> RawCvRecord {
        RawCvRecord {
            profile: Some(make_profile()),
            ..Default::default()
        }
    }

    fn make_experience(company: &str, start: &str) -> RawExperience {
        RawExperience {
            company: Some(company.to_string()),
            role: Some("Engineer".to_string()),
            start_date: Some(start.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_minimal_profile_builds_with_empty_sections() {
        let record = build_resume_record(&make_raw(), EntryOrder::AsEntered).unwrap();
        assert_eq!(record.profile.first_name, "Ada");
        assert_eq!(record.profile.phone, "");
        assert!(record.education.is_empty());
        assert!(record.experience.is_empty());
        assert!(record.projects.is_empty());
        assert!(record.certifications.is_empty());
        assert!(record.skills.is_empty());
    }

    #[test]
    fn test_missing_profile_reports_first_name() {
        let err = build_resume_record(&RawCvRecord::default(), EntryOrder::AsEntered).unwrap_err();
        assert_eq!(
            err,
            ModelError::MissingRequiredField {
                field: "profile.first_name"
            }
        );
    }

    #[test]
    fn test_missing_last_name_is_named() {
        let mut raw = make_raw();
        raw.profile.as_mut().unwrap().last_name = None;
        let err = build_resume_record(&raw, EntryOrder::AsEntered).unwrap_err();
        assert_eq!(err.to_string(), "Missing required field: profile.last_name");
    }

    #[test]
    fn test_blank_email_counts_as_missing() {
        let mut raw = make_raw();
        raw.profile.as_mut().unwrap().email = Some("   ".to_string());
        let err = build_resume_record(&raw, EntryOrder::AsEntered).unwrap_err();
        assert_eq!(
            err,
            ModelError::MissingRequiredField {
                field: "profile.email"
            }
        );
    }

    #[test]
    fn test_absent_lists_default_to_empty() {
        let mut raw = make_raw();
        raw.education = Some(vec![RawEducation {
            institution: Some("Harvard University".to_string()),
            details: None,
            ..Default::default()
        }]);
        let record = build_resume_record(&raw, EntryOrder::AsEntered).unwrap();
        assert_eq!(record.education[0].institution, "Harvard University");
        assert!(record.education[0].details.is_empty());
        assert_eq!(record.education[0].degree, "");
    }

    #[test]
    fn test_blank_list_items_are_dropped() {
        let mut raw = make_raw();
        raw.skills = Some(RawSkills {
            languages: Some(vec!["Rust".to_string(), "  ".to_string(), " Go ".to_string()]),
            tools: None,
            methods: Some(vec![]),
        });
        let record = build_resume_record(&raw, EntryOrder::AsEntered).unwrap();
        assert_eq!(record.skills.languages, vec!["Rust", "Go"]);
        assert!(record.skills.tools.is_empty());
    }

    #[test]
    fn test_as_entered_preserves_input_order() {
        let mut raw = make_raw();
        raw.experience = Some(vec![
            make_experience("Old Co", "2015-01"),
            make_experience("New Co", "2021-03"),
        ]);
        let record = build_resume_record(&raw, EntryOrder::AsEntered).unwrap();
        assert_eq!(record.experience[0].company, "Old Co");
    }

    #[test]
    fn test_most_recent_first_sorts_and_puts_unparseable_last() {
        let mut raw = make_raw();
        raw.experience = Some(vec![
            make_experience("Undated Co", ""),
            make_experience("Old Co", "2015-01"),
            make_experience("New Co", "2021-03"),
            make_experience("Mid Co", "2018-11"),
        ]);
        let record = build_resume_record(&raw, EntryOrder::MostRecentFirst).unwrap();
        let order: Vec<&str> = record.experience.iter().map(|e| e.company.as_str()).collect();
        assert_eq!(order, vec!["New Co", "Mid Co", "Old Co", "Undated Co"]);
    }

    #[test]
    fn test_malformed_period_is_kept_verbatim() {
        let mut raw = make_raw();
        raw.experience = Some(vec![RawExperience {
            company: Some("Acme".to_string()),
            start_date: Some("2022-06".to_string()),
            end_date: Some("sometime".to_string()),
            ..Default::default()
        }]);
        let record = build_resume_record(&raw, EntryOrder::AsEntered).unwrap();
        assert_eq!(record.experience[0].end_date, "sometime");
    }
}
