use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

use crate::document::SectionId;
use crate::layout::{FontFamily, RenderOptions};

/// Application configuration loaded from environment variables.
/// Fails at startup if a variable is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub profile_service_url: String,
    pub port: u16,
    pub rust_log: String,
    pub render: RenderOptions,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests never touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(v) => v
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            None => 8080,
        };

        Ok(Config {
            profile_service_url: lookup("PROFILE_SERVICE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| "http://localhost:8000/api/v1".to_string()),
            port,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            render: render_options(&lookup)?,
        })
    }
}

fn render_options<F>(lookup: &F) -> Result<RenderOptions>
where
    F: Fn(&str) -> Option<String>,
{
    let mut options = RenderOptions::default();

    if let Some(v) = parsed::<f32, _>(lookup, "CV_PAGE_WIDTH")? {
        options.page_width = v;
    }
    if let Some(v) = parsed::<f32, _>(lookup, "CV_PAGE_HEIGHT")? {
        options.page_height = v;
    }
    if let Some(v) = parsed::<f32, _>(lookup, "CV_MARGIN")? {
        options.margin = v;
    }
    if let Some(v) = parsed::<f32, _>(lookup, "CV_BODY_FONT_SIZE")? {
        options.body_font_size = v;
    }
    if let Some(v) = parsed::<f32, _>(lookup, "CV_HEADING_FONT_SIZE")? {
        options.heading_font_size = v;
    }
    if let Some(v) = parsed::<f32, _>(lookup, "CV_NAME_FONT_SIZE")? {
        options.name_font_size = v;
    }
    if let Some(glyph) = lookup("CV_BULLET_GLYPH").filter(|g| !g.trim().is_empty()) {
        options.bullet_glyph = glyph.trim().to_string();
    }
    if let Some(order) = lookup("CV_SECTION_ORDER") {
        options.section_order = parse_section_order(&order)?;
    }
    if let Some(family) = lookup("CV_FONT_FAMILY") {
        options.font_family = FontFamily::parse(&family)
            .ok_or_else(|| anyhow!("CV_FONT_FAMILY must be 'helvetica' or 'times', got '{family}'"))?;
    }
    if let Some(label) = lookup("CV_ONGOING_LABEL") {
        let label = label.trim();
        options.ongoing_label = (!label.is_empty()).then(|| label.to_string());
    }

    options
        .validate()
        .context("Invalid CV render settings")?;
    Ok(options)
}

fn parsed<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| {
            v.trim()
                .parse::<T>()
                .with_context(|| format!("Environment variable '{key}' has invalid value '{v}'"))
        })
        .transpose()
}

/// Comma list of section identifiers, e.g. `summary,experience,education`.
fn parse_section_order(value: &str) -> Result<Vec<SectionId>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            SectionId::parse(s).ok_or_else(|| anyhow!("CV_SECTION_ORDER has unknown section '{s}'"))
        })
        .collect()
}
