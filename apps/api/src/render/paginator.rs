//! Paginated layout pass — places a `ResumeRecord` onto fixed-size pages.
//!
//! # Pass structure
//! Single pass, no backtracking:
//! 1. Header: uppercase centered name, contact line, rule.
//! 2. Sections in `RenderOptions::section_order`, skipping empty ones.
//! 3. Greedy page breaks: a block moves to a new page when its height does not fit.
//!
//! A section title reserves room for itself, its rule, and the first block of the
//! section, so a title never ends a page.
//!
//! The output is a display list (`LaidOutDocument`). Turning it into bytes is
//! `render::pdf`'s job.

use serde::{Deserialize, Serialize};

use crate::document::model::{Profile, ResumeRecord, SectionId, SkillSet};
use crate::document::period::format_period_range;
use crate::layout::{get_metrics, wrap_text, FontFace, FontFamily, RenderCursor, RenderOptions};

/// Baseline offset below the top of a line box, as a fraction of font size.
const BASELINE_RATIO: f32 = 0.8;
const RULE_THICKNESS: f32 = 0.75;

// ────────────────────────────────────────────────────────────────────────────
// Display list
// ────────────────────────────────────────────────────────────────────────────

/// What a text run is, so previews and tests can find lines without parsing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunRole {
    Name,
    Contact,
    Summary,
    SectionTitle,
    EntryLabel,
    EntryLocation,
    EntryPeriod,
    Secondary,
    BulletGlyph,
    Detail,
    SkillLabel,
    SkillList,
}

/// A positioned piece of text. `baseline` is measured from the top of the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    pub x: f32,
    pub baseline: f32,
    pub face: FontFace,
    pub size: f32,
    pub role: RunRole,
}

/// A horizontal rule. `y` is measured from the top of the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub x1: f32,
    pub x2: f32,
    pub y: f32,
    pub thickness: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LaidOutPage {
    pub runs: Vec<TextRun>,
    pub rules: Vec<Rule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaidOutDocument {
    pub page_width: f32,
    pub page_height: f32,
    pub font_family: FontFamily,
    pub pages: Vec<LaidOutPage>,
}

impl LaidOutDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

#[cfg(test)]
impl LaidOutDocument {
    /// Every run with the given role, in page order.
    pub fn runs_with_role(&self, role: RunRole) -> impl Iterator<Item = &TextRun> {
        self.pages
            .iter()
            .flat_map(|p| p.runs.iter())
            .filter(move |r| r.role == role)
    }
}

#[cfg(test)]
impl LaidOutPage {
    /// Runs grouped by physical line, top to bottom, each line left to right.
    pub fn lines(&self) -> Vec<Vec<&TextRun>> {
        let mut runs: Vec<&TextRun> = self.runs.iter().collect();
        runs.sort_by(|a, b| {
            a.baseline
                .total_cmp(&b.baseline)
                .then(a.x.total_cmp(&b.x))
        });

        let mut lines: Vec<Vec<&TextRun>> = Vec::new();
        for run in runs {
            match lines.last_mut() {
                Some(line) if line[0].baseline == run.baseline => line.push(run),
                _ => lines.push(vec![run]),
            }
        }
        lines
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Entry view shared by the four list sections
// ────────────────────────────────────────────────────────────────────────────

/// One education/experience/project/certification entry, reduced to what gets printed.
struct EntryBlock {
    label: String,
    location: String,
    period: String,
    secondary: String,
    details: Vec<String>,
}

impl EntryBlock {
    fn prints_nothing(&self) -> bool {
        self.label.is_empty()
            && self.location.is_empty()
            && self.period.is_empty()
            && self.secondary.is_empty()
            && self.details.is_empty()
    }
}

/// Entries of a list section that print at least one field.
fn entry_blocks(section: SectionId, record: &ResumeRecord, ongoing: Option<&str>) -> Vec<EntryBlock> {
    let blocks: Vec<EntryBlock> = match section {
        SectionId::Education => record
            .education
            .iter()
            .map(|e| EntryBlock {
                label: e.institution.clone(),
                location: e.location.clone(),
                period: format_period_range(&e.start_date, &e.end_date, ongoing),
                secondary: e.degree.clone(),
                details: e.details.clone(),
            })
            .collect(),
        SectionId::Experience => record
            .experience
            .iter()
            .map(|e| EntryBlock {
                label: e.company.clone(),
                location: e.location.clone(),
                period: format_period_range(&e.start_date, &e.end_date, ongoing),
                secondary: e.role.clone(),
                details: e.bullets.clone(),
            })
            .collect(),
        SectionId::Projects => record
            .projects
            .iter()
            .map(|p| {
                let technologies = if p.technologies.is_empty() {
                    String::new()
                } else {
                    format!("Technologies: {}", p.technologies.join(", "))
                };
                EntryBlock {
                    label: p.name.clone(),
                    location: String::new(),
                    period: String::new(),
                    secondary: String::new(),
                    details: non_empty([p.impact.clone(), technologies, p.url.clone()]),
                }
            })
            .collect(),
        SectionId::Certifications => record
            .certifications
            .iter()
            .map(|c| {
                let credential = if c.credential_id.is_empty() {
                    String::new()
                } else {
                    format!("Credential ID: {}", c.credential_id)
                };
                EntryBlock {
                    label: c.name.clone(),
                    location: String::new(),
                    period: c.date.clone(),
                    secondary: c.issuer.clone(),
                    details: non_empty([credential, c.url.clone()]),
                }
            })
            .collect(),
        SectionId::Summary | SectionId::Skills => Vec::new(),
    };
    blocks.into_iter().filter(|b| !b.prints_nothing()).collect()
}

fn non_empty<const N: usize>(values: [String; N]) -> Vec<String> {
    values.into_iter().filter(|v| !v.is_empty()).collect()
}

fn skill_rows(skills: &SkillSet) -> Vec<(&'static str, &[String])> {
    [
        ("Languages:", skills.languages.as_slice()),
        ("Tools:", skills.tools.as_slice()),
        ("Methods:", skills.methods.as_slice()),
    ]
    .into_iter()
    .filter(|(_, items)| !items.is_empty())
    .collect()
}

/// Contact fields that are present, joined by `separator`. LinkedIn shows as a label.
pub fn contact_line(profile: &Profile, separator: &str) -> String {
    let linkedin = if profile.linkedin.is_empty() { "" } else { "LinkedIn" };
    [
        profile.email.as_str(),
        profile.phone.as_str(),
        profile.location.as_str(),
        linkedin,
    ]
    .into_iter()
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(separator)
}

// ────────────────────────────────────────────────────────────────────────────
// Public entry point
// ────────────────────────────────────────────────────────────────────────────

/// Lays out the whole record. Deterministic: same record + options, same display list.
pub fn lay_out(record: &ResumeRecord, options: &RenderOptions) -> LaidOutDocument {
    let mut paginator = Paginator::new(options);
    paginator.header(&record.profile);

    let mut seen: Vec<SectionId> = Vec::with_capacity(options.section_order.len());
    for &section in &options.section_order {
        if seen.contains(&section) {
            continue;
        }
        seen.push(section);
        if record.has_content(section) {
            paginator.section(section, record);
        }
    }

    paginator.finish()
}

// ────────────────────────────────────────────────────────────────────────────
// Paginator
// ────────────────────────────────────────────────────────────────────────────

struct Paginator<'o> {
    options: &'o RenderOptions,
    cursor: RenderCursor,
    pages: Vec<LaidOutPage>,
}

impl<'o> Paginator<'o> {
    fn new(options: &'o RenderOptions) -> Self {
        Paginator {
            options,
            cursor: RenderCursor::new(options.page_width, options.page_height, options.margin),
            pages: vec![LaidOutPage::default()],
        }
    }

    fn finish(self) -> LaidOutDocument {
        LaidOutDocument {
            page_width: self.options.page_width,
            page_height: self.options.page_height,
            font_family: self.options.font_family,
            pages: self.pages,
        }
    }

    // ── geometry helpers ────────────────────────────────────────────────────

    fn left(&self) -> f32 {
        self.cursor.left()
    }

    fn right(&self) -> f32 {
        self.cursor.right()
    }

    fn content_width(&self) -> f32 {
        self.options.content_width()
    }

    fn body_size(&self) -> f32 {
        self.options.body_font_size
    }

    fn body_line(&self) -> f32 {
        self.options.line_height(self.options.body_font_size)
    }

    fn rule_block(&self) -> f32 {
        self.body_size() * 0.6
    }

    fn width(&self, text: &str, face: FontFace, size: f32) -> f32 {
        get_metrics(self.options.font_family, face).text_width(text, size)
    }

    fn wrap(&self, text: &str, face: FontFace, size: f32, max_width: f32) -> Vec<String> {
        wrap_text(text, get_metrics(self.options.font_family, face), size, max_width)
    }

    // ── primitive emission ──────────────────────────────────────────────────

    fn page(&mut self) -> &mut LaidOutPage {
        while self.pages.len() <= self.cursor.page_index {
            self.pages.push(LaidOutPage::default());
        }
        &mut self.pages[self.cursor.page_index]
    }

    /// Places text on the current line without advancing.
    fn put(&mut self, text: &str, x: f32, face: FontFace, size: f32, role: RunRole) {
        if text.is_empty() {
            return;
        }
        let baseline = self.cursor.y + size * BASELINE_RATIO;
        self.page().runs.push(TextRun {
            text: text.to_string(),
            x,
            baseline,
            face,
            size,
            role,
        });
    }

    fn put_centered(&mut self, text: &str, face: FontFace, size: f32, role: RunRole) {
        let w = self.width(text, face, size);
        let x = self.left() + ((self.content_width() - w) / 2.0).max(0.0);
        self.put(text, x, face, size, role);
    }

    /// Draws a full-width rule in the middle of a `rule_block` gap. Never breaks the page.
    fn rule(&mut self) {
        let half = self.rule_block() / 2.0;
        self.cursor.advance(half);
        let (x1, x2, y) = (self.left(), self.right(), self.cursor.y);
        self.page().rules.push(Rule {
            x1,
            x2,
            y,
            thickness: RULE_THICKNESS,
        });
        self.cursor.advance(half);
    }

    // ── blocks ──────────────────────────────────────────────────────────────

    fn header(&mut self, profile: &Profile) {
        let name_size = self.options.name_font_size;
        let name_line = self.options.line_height(name_size);
        let name = profile.full_name().to_uppercase();
        for line in self.wrap(&name, FontFace::Bold, name_size, self.content_width()) {
            self.cursor.ensure_space(name_line);
            self.put_centered(&line, FontFace::Bold, name_size, RunRole::Name);
            self.cursor.advance(name_line);
        }

        let contact = contact_line(profile, &self.options.contact_separator);
        let body_size = self.body_size();
        for line in self.wrap(&contact, FontFace::Regular, body_size, self.content_width()) {
            self.cursor.ensure_space(self.body_line());
            self.put_centered(&line, FontFace::Regular, body_size, RunRole::Contact);
            self.cursor.advance(self.body_line());
        }

        self.rule();
    }

    fn section(&mut self, section: SectionId, record: &ResumeRecord) {
        match section {
            SectionId::Summary => self.summary(&record.profile.summary),
            SectionId::Skills => {
                let rows = skill_rows(&record.skills);
                self.section_title(section, self.body_line());
                for (label, items) in rows {
                    self.skill_row(label, items);
                }
            }
            _ => {
                let blocks = entry_blocks(section, record, self.options.ongoing_label.as_deref());
                let Some(first) = blocks.first() else {
                    return;
                };
                let first_height = self.entry_head_height(first).max(self.body_line());
                self.section_title(section, first_height);
                for block in &blocks {
                    self.entry(block);
                }
            }
        }
        self.cursor.advance(self.body_size() * 0.6);
    }

    fn summary(&mut self, summary: &str) {
        let size = self.body_size();
        for line in self.wrap(summary, FontFace::Regular, size, self.content_width()) {
            self.cursor.ensure_space(self.body_line());
            self.put(&line, self.left(), FontFace::Regular, size, RunRole::Summary);
            self.cursor.advance(self.body_line());
        }
    }

    /// Title + rule, keeping `first_block_height` of content on the same page.
    fn section_title(&mut self, section: SectionId, first_block_height: f32) {
        let Some(title) = section.title() else {
            return;
        };
        let size = self.options.heading_font_size;
        let title_line = self.options.line_height(size);
        self.cursor
            .ensure_space(title_line + self.rule_block() + first_block_height);
        self.put(title, self.left(), FontFace::Bold, size, RunRole::SectionTitle);
        self.cursor.advance(title_line);
        self.rule();
    }

    // ── entries ─────────────────────────────────────────────────────────────

    /// Left side of the header line: label, then ` — location` when both exist.
    fn header_parts<'b>(&self, block: &'b EntryBlock) -> (&'b str, Option<String>) {
        match (block.label.is_empty(), block.location.is_empty()) {
            (true, _) => (block.location.as_str(), None),
            (false, true) => (block.label.as_str(), None),
            (false, false) => (block.label.as_str(), Some(format!(" — {}", block.location))),
        }
    }

    /// The period shares the header line only while it takes at most half the width.
    fn period_inline(&self, block: &EntryBlock) -> bool {
        if block.period.is_empty() {
            return false;
        }
        let period_w = self.width(&block.period, FontFace::Regular, self.body_size());
        period_w + self.body_size() <= self.content_width() / 2.0
    }

    /// Width left of the right-aligned period.
    fn header_left_width(&self, block: &EntryBlock) -> f32 {
        if !self.period_inline(block) {
            return self.content_width();
        }
        let period_w = self.width(&block.period, FontFace::Regular, self.body_size());
        self.content_width() - period_w - self.body_size()
    }

    /// A period too wide for the header line, wrapped onto its own right-aligned lines.
    fn period_lines(&self, block: &EntryBlock) -> Vec<String> {
        if block.period.is_empty() || self.period_inline(block) {
            return Vec::new();
        }
        self.wrap(
            &block.period,
            FontFace::Regular,
            self.body_size(),
            self.content_width(),
        )
    }

    /// `None` when label and suffix fit on one line; otherwise the bold wrapped lines.
    fn header_wrapped(&self, block: &EntryBlock) -> Option<Vec<String>> {
        let (label, suffix) = self.header_parts(block);
        let size = self.body_size();
        let suffix = suffix.unwrap_or_default();
        let total = self.width(label, FontFace::Bold, size) + self.width(&suffix, FontFace::Regular, size);
        let available = self.header_left_width(block);
        if total <= available {
            return None;
        }
        Some(self.wrap(
            &format!("{label}{suffix}"),
            FontFace::Bold,
            size,
            available,
        ))
    }

    fn header_line_count(&self, block: &EntryBlock) -> usize {
        let (label, _) = self.header_parts(block);
        if label.is_empty() && !self.period_inline(block) {
            return 0;
        }
        match self.header_wrapped(block) {
            None => 1,
            Some(lines) => lines.len().max(1),
        }
    }

    fn secondary_lines(&self, block: &EntryBlock) -> Vec<String> {
        self.wrap(
            &block.secondary,
            FontFace::Italic,
            self.body_size(),
            self.content_width(),
        )
    }

    /// Height of the header, period and secondary lines, kept together.
    fn entry_head_height(&self, block: &EntryBlock) -> f32 {
        let lines = self.header_line_count(block)
            + self.period_lines(block).len()
            + self.secondary_lines(block).len();
        lines as f32 * self.body_line()
    }

    fn entry(&mut self, block: &EntryBlock) {
        let size = self.body_size();
        let line = self.body_line();
        self.cursor.ensure_space(self.entry_head_height(block));

        if self.header_line_count(block) > 0 {
            if self.period_inline(block) {
                let period_w = self.width(&block.period, FontFace::Regular, size);
                self.put(&block.period, self.right() - period_w, FontFace::Regular, size, RunRole::EntryPeriod);
            }
            match self.header_wrapped(block) {
                None => {
                    let (label, suffix) = self.header_parts(block);
                    self.put(label, self.left(), FontFace::Bold, size, RunRole::EntryLabel);
                    if let Some(suffix) = suffix {
                        let x = self.left() + self.width(label, FontFace::Bold, size);
                        self.put(&suffix, x, FontFace::Regular, size, RunRole::EntryLocation);
                    }
                    self.cursor.advance(line);
                }
                Some(lines) => {
                    for text in lines {
                        self.put(&text, self.left(), FontFace::Bold, size, RunRole::EntryLabel);
                        self.cursor.advance(line);
                    }
                }
            }
        }

        for text in self.period_lines(block) {
            let w = self.width(&text, FontFace::Regular, size);
            let x = (self.right() - w).max(self.left());
            self.put(&text, x, FontFace::Regular, size, RunRole::EntryPeriod);
            self.cursor.advance(line);
        }

        for text in self.secondary_lines(block) {
            self.put(&text, self.left(), FontFace::Italic, size, RunRole::Secondary);
            self.cursor.advance(line);
        }

        for detail in &block.details {
            self.bullet(detail);
        }

        self.cursor.advance(size * 0.4);
    }

    fn bullet(&mut self, text: &str) {
        let size = self.body_size();
        let indent = self.options.bullet_indent;
        let glyph = self.options.bullet_glyph.clone();
        let glyph_x = self.left() + indent * 0.25;
        let text_x = self.left() + indent;
        let lines = self.wrap(text, FontFace::Regular, size, self.content_width() - indent);
        for (i, line) in lines.iter().enumerate() {
            self.cursor.ensure_space(self.body_line());
            if i == 0 {
                self.put(&glyph, glyph_x, FontFace::Regular, size, RunRole::BulletGlyph);
            }
            self.put(line, text_x, FontFace::Regular, size, RunRole::Detail);
            self.cursor.advance(self.body_line());
        }
    }

    fn skill_row(&mut self, label: &str, items: &[String]) {
        let size = self.body_size();
        let label_w = self.width(&format!("{label} "), FontFace::Bold, size);
        let list = items.join(", ");
        let lines = self.wrap(&list, FontFace::Regular, size, self.content_width() - label_w);
        for (i, line) in lines.iter().enumerate() {
            self.cursor.ensure_space(self.body_line());
            if i == 0 {
                self.put(label, self.left(), FontFace::Bold, size, RunRole::SkillLabel);
            }
            self.put(line, self.left() + label_w, FontFace::Regular, size, RunRole::SkillList);
            self.cursor.advance(self.body_line());
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::model::{
        CertificationEntry, EducationEntry, ExperienceEntry, ProjectEntry,
    };

    fn make_profile() -> Profile {
        Profile {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@x.io".to_string(),
            ..Default::default()
        }
    }

    fn make_record() -> ResumeRecord {
        ResumeRecord {
            profile: make_profile(),
            ..Default::default()
        }
    }

    fn make_experience(company: &str, start: &str, end: &str, bullets: usize) -> ExperienceEntry {
        ExperienceEntry {
            company: company.to_string(),
            role: "Senior Engineer".to_string(),
            location: "Boston, MA".to_string(),
            start_date: start.to_string(),
            end_date: end.to_string(),
            bullets: (0..bullets)
                .map(|i| {
                    format!(
                        "Delivered initiative number {i} by coordinating several teams, \
                         shipping a reliable service and cutting operating costs by 20%"
                    )
                })
                .collect(),
        }
    }

    fn make_long_record() -> ResumeRecord {
        let mut record = make_record();
        record.profile.summary = "Engineer with a long record of shipping systems. ".repeat(6);
        record.education = (0..4)
            .map(|i| EducationEntry {
                institution: format!("University {i}"),
                degree: "B.Sc. Mathematics".to_string(),
                start_date: "2010-09".to_string(),
                end_date: "2014-06".to_string(),
                details: vec!["Graduated with honors".to_string(); 3],
                ..Default::default()
            })
            .collect();
        record.experience = (0..10)
            .map(|i| make_experience(&format!("Company {i}"), "2015-01", "2016-01", 5))
            .collect();
        record.certifications = (0..5)
            .map(|i| CertificationEntry {
                name: format!("Certification {i}"),
                issuer: "Issuing Body".to_string(),
                date: "2020-05".to_string(),
                ..Default::default()
            })
            .collect();
        record.skills.languages = vec!["Rust".to_string(), "Python".to_string()];
        record
    }

    fn options() -> RenderOptions {
        RenderOptions::default()
    }

    #[test]
    fn test_minimal_record_single_page_header() {
        let doc = lay_out(&make_record(), &options());
        assert_eq!(doc.page_count(), 1);

        let names: Vec<&str> = doc.runs_with_role(RunRole::Name).map(|r| r.text.as_str()).collect();
        assert_eq!(names, vec!["ADA LOVELACE"]);

        let contacts: Vec<&str> = doc
            .runs_with_role(RunRole::Contact)
            .map(|r| r.text.as_str())
            .collect();
        assert_eq!(contacts, vec!["ada@x.io"]);

        assert_eq!(doc.runs_with_role(RunRole::SectionTitle).count(), 0);
        assert_eq!(doc.pages[0].rules.len(), 1, "header rule only");
    }

    #[test]
    fn test_name_is_centered() {
        let opts = options();
        let doc = lay_out(&make_record(), &opts);
        let name = doc.runs_with_role(RunRole::Name).next().unwrap();
        let width = get_metrics(opts.font_family, FontFace::Bold).text_width(&name.text, name.size);
        let left_gap = name.x - opts.margin;
        let right_gap = (opts.page_width - opts.margin) - (name.x + width);
        assert!((left_gap - right_gap).abs() < 0.01);
    }

    #[test]
    fn test_contact_line_joins_present_fields() {
        let mut profile = make_profile();
        profile.phone = "555-0100".to_string();
        profile.linkedin = "https://linkedin.com/in/ada".to_string();
        assert_eq!(
            contact_line(&profile, " • "),
            "ada@x.io • 555-0100 • LinkedIn"
        );

        profile.location = "London".to_string();
        assert_eq!(
            contact_line(&profile, " • "),
            "ada@x.io • 555-0100 • London • LinkedIn"
        );
    }

    #[test]
    fn test_empty_certifications_have_no_heading() {
        let mut record = make_record();
        record.experience = vec![make_experience("Acme", "2020-01", "2022-06", 2)];
        let doc = lay_out(&record, &options());
        let titles: Vec<&str> = doc
            .runs_with_role(RunRole::SectionTitle)
            .map(|r| r.text.as_str())
            .collect();
        assert_eq!(titles, vec!["EXPERIENCE"]);
        assert!(!titles.contains(&"CERTIFICATIONS"));
    }

    #[test]
    fn test_period_rendering_closed_and_ongoing() {
        let mut record = make_record();
        record.experience = vec![
            make_experience("Closed Co", "2020-01", "2022-06", 0),
            make_experience("Open Co", "2020-01", "", 0),
        ];
        let doc = lay_out(&record, &options());
        let periods: Vec<&str> = doc
            .runs_with_role(RunRole::EntryPeriod)
            .map(|r| r.text.as_str())
            .collect();
        assert_eq!(periods, vec!["2020-01 – 2022-06", "2020-01"]);
    }

    #[test]
    fn test_ongoing_label_when_configured() {
        let mut record = make_record();
        record.experience = vec![make_experience("Open Co", "2020-01", "", 0)];
        let opts = RenderOptions {
            ongoing_label: Some("Present".to_string()),
            ..options()
        };
        let doc = lay_out(&record, &opts);
        let period = doc.runs_with_role(RunRole::EntryPeriod).next().unwrap();
        assert_eq!(period.text, "2020-01 – Present");
    }

    #[test]
    fn test_period_is_right_aligned_on_header_line() {
        let opts = options();
        let mut record = make_record();
        record.experience = vec![make_experience("Acme", "2020-01", "2022-06", 0)];
        let doc = lay_out(&record, &opts);

        let label = doc.runs_with_role(RunRole::EntryLabel).next().unwrap();
        let period = doc.runs_with_role(RunRole::EntryPeriod).next().unwrap();
        assert_eq!(label.baseline, period.baseline);

        let width = get_metrics(opts.font_family, FontFace::Regular).text_width(&period.text, period.size);
        assert!((period.x + width - (opts.page_width - opts.margin)).abs() < 0.01);
    }

    #[test]
    fn test_location_suffix_follows_label() {
        let mut record = make_record();
        record.education = vec![EducationEntry {
            institution: "Harvard University".to_string(),
            location: "Cambridge, MA".to_string(),
            degree: "A.B. Computer Science".to_string(),
            ..Default::default()
        }];
        let doc = lay_out(&record, &options());
        let location = doc.runs_with_role(RunRole::EntryLocation).next().unwrap();
        assert_eq!(location.text, " — Cambridge, MA");
        let secondary = doc.runs_with_role(RunRole::Secondary).next().unwrap();
        assert_eq!(secondary.text, "A.B. Computer Science");
        assert_eq!(secondary.face, FontFace::Italic);
        assert_eq!(doc.runs_with_role(RunRole::EntryPeriod).count(), 0);
    }

    #[test]
    fn test_bullet_glyph_only_on_first_wrapped_line() {
        let mut record = make_record();
        let long_bullet = "Reduced deployment time ".repeat(12);
        record.experience = vec![ExperienceEntry {
            company: "Acme".to_string(),
            role: "Engineer".to_string(),
            start_date: "2020-01".to_string(),
            bullets: vec![long_bullet],
            ..Default::default()
        }];
        let doc = lay_out(&record, &options());
        let detail_lines = doc.runs_with_role(RunRole::Detail).count();
        assert!(detail_lines >= 2, "bullet should wrap, got {detail_lines} lines");
        assert_eq!(doc.runs_with_role(RunRole::BulletGlyph).count(), 1);
    }

    #[test]
    fn test_bullet_lines_stay_inside_content_width() {
        let opts = options();
        let doc = lay_out(&make_long_record(), &opts);
        let metrics = get_metrics(opts.font_family, FontFace::Regular);
        for run in doc.runs_with_role(RunRole::Detail) {
            let right = run.x + metrics.text_width(&run.text, run.size);
            assert!(right <= opts.page_width - opts.margin + 0.01, "{:?} overflows", run.text);
        }
    }

    #[test]
    fn test_skills_emit_only_populated_categories() {
        let mut record = make_record();
        record.skills.languages = vec!["Rust".to_string(), "Go".to_string()];
        record.skills.methods = vec!["TDD".to_string()];
        let doc = lay_out(&record, &options());

        let labels: Vec<&str> = doc
            .runs_with_role(RunRole::SkillLabel)
            .map(|r| r.text.as_str())
            .collect();
        assert_eq!(labels, vec!["Languages:", "Methods:"]);

        let lists: Vec<&str> = doc
            .runs_with_role(RunRole::SkillList)
            .map(|r| r.text.as_str())
            .collect();
        assert_eq!(lists, vec!["Rust, Go", "TDD"]);
    }

    #[test]
    fn test_project_and_certification_details() {
        let mut record = make_record();
        record.projects = vec![ProjectEntry {
            name: "Difference Engine Notes".to_string(),
            impact: "First published algorithm".to_string(),
            technologies: vec!["Punch cards".to_string(), "Brass".to_string()],
            url: "https://example.org/notes".to_string(),
        }];
        record.certifications = vec![CertificationEntry {
            name: "Mathematics".to_string(),
            issuer: "Royal Society".to_string(),
            date: "1843-07".to_string(),
            credential_id: "RS-1843".to_string(),
            url: String::new(),
        }];
        let doc = lay_out(&record, &options());
        let details: Vec<&str> = doc
            .runs_with_role(RunRole::Detail)
            .map(|r| r.text.as_str())
            .collect();
        assert_eq!(
            details,
            vec![
                "First published algorithm",
                "Technologies: Punch cards, Brass",
                "https://example.org/notes",
                "Credential ID: RS-1843",
            ]
        );
        let periods: Vec<&str> = doc
            .runs_with_role(RunRole::EntryPeriod)
            .map(|r| r.text.as_str())
            .collect();
        assert_eq!(periods, vec!["1843-07"]);
    }

    #[test]
    fn test_section_order_controls_inclusion_and_order() {
        let mut record = make_long_record();
        record.profile.summary = String::new();
        let opts = RenderOptions {
            section_order: vec![SectionId::Skills, SectionId::Education],
            ..options()
        };
        let doc = lay_out(&record, &opts);
        let titles: Vec<&str> = doc
            .runs_with_role(RunRole::SectionTitle)
            .map(|r| r.text.as_str())
            .collect();
        assert_eq!(titles, vec!["SKILLS", "EDUCATION"]);
    }

    #[test]
    fn test_summary_omitted_from_order_is_not_rendered() {
        let mut record = make_record();
        record.profile.summary = "Analyst and writer.".to_string();
        let with = lay_out(&record, &options());
        assert_eq!(with.runs_with_role(RunRole::Summary).count(), 1);

        let opts = RenderOptions {
            section_order: vec![SectionId::Education],
            ..options()
        };
        let without = lay_out(&record, &opts);
        assert_eq!(without.runs_with_role(RunRole::Summary).count(), 0);
    }

    #[test]
    fn test_long_record_paginates_without_orphan_titles() {
        let opts = options();
        let doc = lay_out(&make_long_record(), &opts);
        assert!(doc.page_count() > 1, "expected several pages, got {}", doc.page_count());

        for (i, page) in doc.pages.iter().enumerate() {
            let lines = page.lines();
            assert!(!lines.is_empty(), "page {i} is empty");
            let last = lines.last().unwrap();
            assert!(
                last.iter().all(|r| r.role != RunRole::SectionTitle),
                "page {i} ends with a section title"
            );
        }
    }

    #[test]
    fn test_content_stays_within_vertical_margins() {
        let opts = options();
        let doc = lay_out(&make_long_record(), &opts);
        for page in &doc.pages {
            for run in &page.runs {
                assert!(run.baseline >= opts.margin);
                assert!(run.baseline <= opts.page_height - opts.margin + 0.01);
            }
        }
    }

    #[test]
    fn test_section_title_never_last_on_tight_pages() {
        // Sweep the margin so section titles land at many different page offsets.
        let record = make_long_record();
        for margin in (20..80).step_by(3) {
            let opts = RenderOptions {
                margin: margin as f32,
                ..options()
            };
            let doc = lay_out(&record, &opts);
            for page in &doc.pages {
                let lines = page.lines();
                let last = lines.last().unwrap();
                assert!(last.iter().all(|r| r.role != RunRole::SectionTitle));
            }
        }
    }

    #[test]
    fn test_layout_is_deterministic() {
        let record = make_long_record();
        assert_eq!(lay_out(&record, &options()), lay_out(&record, &options()));
    }

    #[test]
    fn test_malformed_values_render_verbatim() {
        let mut record = make_record();
        record.experience = vec![make_experience("Acme", "last spring", "2019-99", 1)];
        let doc = lay_out(&record, &options());
        let period = doc.runs_with_role(RunRole::EntryPeriod).next().unwrap();
        assert_eq!(period.text, "last spring – 2019-99");
    }

    #[test]
    fn test_overlong_header_wraps_in_bold() {
        let mut record = make_record();
        record.education = vec![EducationEntry {
            institution: "The Extraordinarily Long Named Institute of Advanced Studies in Everything"
                .to_string(),
            location: "A Very Long Location Name, Somewhere Far Away".to_string(),
            start_date: "2010-09".to_string(),
            end_date: "2014-06".to_string(),
            ..Default::default()
        }];
        let doc = lay_out(&record, &options());
        let labels: Vec<&TextRun> = doc.runs_with_role(RunRole::EntryLabel).collect();
        assert!(labels.len() >= 2);
        assert!(labels.iter().all(|r| r.face == FontFace::Bold));
        assert_eq!(doc.runs_with_role(RunRole::EntryLocation).count(), 0);
    }

    #[test]
    fn test_blank_entry_prints_no_heading() {
        let mut record = make_record();
        record.education = vec![EducationEntry::default()];
        let doc = lay_out(&record, &options());
        assert_eq!(doc.runs_with_role(RunRole::SectionTitle).count(), 0);
        assert_eq!(doc.pages[0].lines().len(), 2);
    }

    #[test]
    fn test_blank_entries_never_leave_a_bare_title() {
        let opts = RenderOptions {
            section_order: vec![SectionId::Experience, SectionId::Education],
            ..options()
        };
        for n in 0..30 {
            let mut record = make_record();
            record.experience = (0..n)
                .map(|i| make_experience(&format!("Company {i}"), "2015-01", "2016-01", 1))
                .collect();
            record.education = vec![
                EducationEntry::default(),
                EducationEntry {
                    institution: "Harvard University".to_string(),
                    ..Default::default()
                },
                EducationEntry::default(),
            ];
            let doc = lay_out(&record, &opts);
            for (i, page) in doc.pages.iter().enumerate() {
                let lines = page.lines();
                let last = lines.last().unwrap();
                assert!(
                    last.iter().all(|r| r.role != RunRole::SectionTitle),
                    "n={n}: page {i} ends with a section title"
                );
            }
            assert_eq!(doc.runs_with_role(RunRole::EntryLabel).count(), n + 1);
        }
    }

    #[test]
    fn test_overlong_period_stays_on_page() {
        let opts = options();
        let mut record = make_record();
        record.experience = vec![
            make_experience("Acme", &"9".repeat(300), "", 0),
            make_experience("Globex", &"sometime around spring ".repeat(15), "", 0),
        ];
        let doc = lay_out(&record, &opts);
        let metrics = get_metrics(opts.font_family, FontFace::Regular);

        for run in &doc.pages[0].runs {
            assert!(run.x >= opts.margin - 0.01, "{:?} starts at {}", run.role, run.x);
        }

        let labels: Vec<&TextRun> = doc.runs_with_role(RunRole::EntryLabel).collect();
        let periods: Vec<&TextRun> = doc.runs_with_role(RunRole::EntryPeriod).collect();
        assert_eq!(labels.len(), 2);
        assert!(periods.len() >= 3, "spaced period should wrap");
        for period in &periods {
            assert!(labels.iter().all(|l| l.baseline != period.baseline));
        }
        for period in periods.iter().filter(|p| p.text.contains(' ')) {
            let right = period.x + metrics.text_width(&period.text, period.size);
            assert!((right - (opts.page_width - opts.margin)).abs() < 0.01);
        }
    }
}
