// Layout primitives for the PDF renderer: standard-font metrics, greedy word
// wrap, render options, and the vertical page cursor.
// Everything here is synchronous and allocation-light; no I/O.

pub mod cursor;
pub mod font_metrics;
pub mod options;
pub mod wrap;

// Re-export the public API consumed by the renderer and config.
pub use cursor::RenderCursor;
pub use font_metrics::{get_metrics, FontFace, FontFamily};
pub use options::RenderOptions;
pub use wrap::wrap_text;
