pub mod encoding;
pub mod paginator;
pub mod pdf;

use thiserror::Error;
use tracing::debug;

use crate::document::model::{Profile, ResumeRecord};
use crate::layout::RenderOptions;

pub use paginator::LaidOutDocument;

/// The renderer's only failure mode. Details stay in logs; callers see a generic message.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF serialization failed: {0}")]
    Serialization(String),
}

/// Finished export: PDF bytes plus what the HTTP layer needs for headers.
#[derive(Debug, Clone)]
pub struct RenderedCv {
    pub bytes: Vec<u8>,
    pub page_count: usize,
    pub filename: String,
}

/// Paginated text renderer. Holds the options fixed at construction; each call is an
/// independent render pass with its own cursor.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Renderer { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Layout pass only, for previews.
    pub fn layout(&self, record: &ResumeRecord) -> LaidOutDocument {
        paginator::lay_out(record, &self.options)
    }

    pub fn render(&self, record: &ResumeRecord) -> Result<RenderedCv, RenderError> {
        let layout = self.layout(record);
        let title = format!("{} CV", record.profile.full_name());
        let bytes = pdf::write_pdf(&layout, title.trim())?;

        debug!(
            pages = layout.page_count(),
            bytes = bytes.len(),
            "render pass complete"
        );

        Ok(RenderedCv {
            bytes,
            page_count: layout.page_count(),
            filename: suggested_filename(&record.profile, "pdf"),
        })
    }
}

/// `CV_<first>_<last>.<ext>`, whitespace → `_`. Falls back to `CV_Harvard.<ext>`.
pub fn suggested_filename(profile: &Profile, extension: &str) -> String {
    let parts: Vec<String> = [&profile.first_name, &profile.last_name]
        .into_iter()
        .map(|name| filename_part(name))
        .filter(|part| !part.is_empty())
        .collect();

    if parts.is_empty() {
        return format!("CV_Harvard.{extension}");
    }
    format!("CV_{}.{extension}", parts.join("_"))
}

/// Whitespace runs and characters that would break a `Content-Disposition` header become `_`.
fn filename_part(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .map(|c| match c {
            '"' | '/' | '\\' | ';' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}
