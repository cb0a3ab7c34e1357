use std::sync::Arc;

use crate::layout::RenderOptions;
use crate::records::RecordSource;
use crate::render::Renderer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Built once from the configured render options; each request runs its own render pass.
    pub renderer: Arc<Renderer>,
    /// Pluggable record source. Default: `HttpRecordSource` against `PROFILE_SERVICE_URL`.
    pub record_source: Arc<dyn RecordSource>,
}

impl AppState {
    pub fn new(options: RenderOptions, record_source: Arc<dyn RecordSource>) -> Self {
        Self {
            renderer: Arc::new(Renderer::new(options)),
            record_source,
        }
    }
}
