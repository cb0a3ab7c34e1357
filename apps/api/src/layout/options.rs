//! Render options — page geometry, type sizes, glyphs, and section order.
//!
//! Built once (from `Config`) and handed to `Renderer::new`. All lengths are PDF points.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::document::model::SectionId;
use crate::layout::font_metrics::FontFamily;

/// US Letter, 8.5in × 11in.
pub const LETTER_WIDTH_PT: f32 = 612.0;
pub const LETTER_HEIGHT_PT: f32 = 792.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub page_width: f32,
    pub page_height: f32,
    /// Uniform margin on all four sides.
    pub margin: f32,
    pub body_font_size: f32,
    /// Section titles.
    pub heading_font_size: f32,
    /// The name line at the top of page 1.
    pub name_font_size: f32,
    /// Line advance as a multiple of the font size.
    pub line_height_factor: f32,
    pub bullet_glyph: String,
    /// Distance from the left margin to bullet text.
    pub bullet_indent: f32,
    pub contact_separator: String,
    pub font_family: FontFamily,
    /// Sections to render, in order. Sections not listed are skipped.
    pub section_order: Vec<SectionId>,
    /// Text after `start – ` for entries with no end period. `None` renders the start alone.
    pub ongoing_label: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            page_width: LETTER_WIDTH_PT,
            page_height: LETTER_HEIGHT_PT,
            margin: 20.0,
            body_font_size: 10.0,
            heading_font_size: 12.0,
            name_font_size: 18.0,
            line_height_factor: 1.25,
            bullet_glyph: "•".to_string(),
            bullet_indent: 12.0,
            contact_separator: " • ".to_string(),
            font_family: FontFamily::Helvetica,
            section_order: SectionId::ALL.to_vec(),
            ongoing_label: None,
        }
    }
}

impl RenderOptions {
    pub fn content_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    pub fn line_height(&self, font_size: f32) -> f32 {
        font_size * self.line_height_factor
    }

    /// Rejects geometry that leaves no room for a single line of body text.
    pub fn validate(&self) -> Result<()> {
        let sizes = [
            ("body_font_size", self.body_font_size),
            ("heading_font_size", self.heading_font_size),
            ("name_font_size", self.name_font_size),
            ("line_height_factor", self.line_height_factor),
        ];
        for (name, value) in sizes {
            if !(value.is_finite() && value > 0.0) {
                bail!("{name} must be a positive number, got {value}");
            }
        }
        if !(self.margin.is_finite() && self.margin >= 0.0) {
            bail!("margin must be a non-negative number, got {}", self.margin);
        }
        if !(self.bullet_indent.is_finite() && self.bullet_indent >= 0.0) {
            bail!("bullet_indent must be non-negative, got {}", self.bullet_indent);
        }
        if self.content_width() <= self.bullet_indent {
            bail!(
                "page width {} leaves no content width with margin {}",
                self.page_width,
                self.margin
            );
        }
        let tallest_line = self
            .line_height(self.name_font_size)
            .max(self.line_height(self.heading_font_size));
        if self.page_height - 2.0 * self.margin < tallest_line * 3.0 {
            bail!(
                "page height {} is too short for margin {}",
                self.page_height,
                self.margin
            );
        }
        Ok(())
    }
}
