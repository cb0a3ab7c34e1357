//! Wire shape of a CV record as served by the record-storage API (`GET /cv/data`).
//!
//! Every field is optional and nullable: the storage API omits or nulls anything
//! the user never filled in. `document::builder` turns this into a `ResumeRecord`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawCvRecord {
    pub profile: Option<RawProfile>,
    pub education: Option<Vec<RawEducation>>,
    pub experience: Option<Vec<RawExperience>>,
    pub certifications: Option<Vec<RawCertification>>,
    pub projects: Option<Vec<RawProject>>,
    pub skills: Option<RawSkills>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawProfile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawEducation {
    pub institution: Option<String>,
    pub degree: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub details: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawExperience {
    pub company: Option<String>,
    pub role: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub bullets: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawCertification {
    pub name: Option<String>,
    pub issuer: Option<String>,
    pub date: Option<String>,
    pub credential_id: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawProject {
    pub name: Option<String>,
    pub impact: Option<String>,
    pub technologies: Option<Vec<String>>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSkills {
    pub languages: Option<Vec<String>>,
    pub tools: Option<Vec<String>>,
    pub methods: Option<Vec<String>>,
}
