// Résumé document model: the normalized record the renderer consumes,
// the builder that produces it from storage payloads, and period helpers.

pub mod builder;
pub mod model;
pub mod period;

pub use builder::{build_resume_record, EntryOrder, ModelError};
pub use model::{ResumeRecord, SectionId};
