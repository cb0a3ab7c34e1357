//! Static font-metric tables for the PDF standard Type1 faces used by the renderer.
//!
//! Widths come from the Adobe AFM files (units of 1/1000 em) and are stored here in
//! em units. Because the standard 14 fonts are never embedded, these tables are the
//! only source of truth for line breaking and right alignment.
//! All tables cover ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Font family / face
// ────────────────────────────────────────────────────────────────────────────

/// Type family for the whole document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFamily {
    /// Helvetica — neutral sans-serif.
    #[default]
    Helvetica,
    /// Times — the classic serif look of printed Harvard-style CVs.
    Times,
}

impl FontFamily {
    pub fn parse(s: &str) -> Option<FontFamily> {
        match s.trim().to_ascii_lowercase().as_str() {
            "helvetica" => Some(FontFamily::Helvetica),
            "times" => Some(FontFamily::Times),
            _ => None,
        }
    }
}

/// Weight/slant variant within a family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFace {
    Regular,
    Bold,
    Italic,
}

impl FontFace {
    pub const ALL: [FontFace; 3] = [FontFace::Regular, FontFace::Bold, FontFace::Italic];

    /// Resource name used inside page content streams.
    pub fn resource_name(&self) -> &'static str {
        match self {
            FontFace::Regular => "F1",
            FontFace::Bold => "F2",
            FontFace::Italic => "F3",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for one face.
///
/// `widths[i]` = width of ASCII character `(i + 32)` in em units.
///
/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    /// PostScript name written as the PDF `BaseFont`.
    pub base_font: &'static str,
    widths: &'static [f32; 95],
    /// Width of characters outside ASCII with no dedicated entry.
    pub average_char_width: f32,
    pub space_width: f32,
    bullet_width: f32,
    en_dash_width: f32,
    em_dash_width: f32,
}

impl FontMetricTable {
    /// Measures the rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c)).sum()
    }

    /// Measures the rendered width of a string in points at `font_size`.
    pub fn text_width(&self, s: &str, font_size: f32) -> f32 {
        self.measure_str(s) * font_size
    }

    fn char_width(&self, c: char) -> f32 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            return self.widths[code - 32];
        }
        match c {
            '•' => self.bullet_width,
            '–' => self.en_dash_width,
            '—' => self.em_dash_width,
            '\u{a0}' => self.space_width,
            _ => self.average_char_width,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

/// Helvetica and Helvetica-Oblique share advance widths.
#[rustfmt::skip]
static HELVETICA_WIDTHS: [f32; 95] = [
    // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
    0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
    // 0      1      2      3      4      5      6      7      8      9
    0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
    // :      ;      <      =      >      ?      @
    0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
    // A      B      C      D      E      F      G      H      I      J      K      L      M
    0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
    // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
    0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
    // [      \      ]      ^      _      `
    0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
    // a      b      c      d      e      f      g      h      i      j      k      l      m
    0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
    // n      o      p      q      r      s      t      u      v      w      x      y      z
    0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
    // {      |      }      ~
    0.334, 0.260, 0.334, 0.584,
];

#[rustfmt::skip]
static HELVETICA_BOLD_WIDTHS: [f32; 95] = [
    // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
    0.278, 0.333, 0.474, 0.556, 0.556, 0.889, 0.722, 0.238, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
    // 0      1      2      3      4      5      6      7      8      9
    0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
    // :      ;      <      =      >      ?      @
    0.333, 0.333, 0.584, 0.584, 0.584, 0.611, 0.975,
    // A      B      C      D      E      F      G      H      I      J      K      L      M
    0.722, 0.722, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.556, 0.722, 0.611, 0.833,
    // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
    0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
    // [      \      ]      ^      _      `
    0.333, 0.278, 0.333, 0.584, 0.556, 0.333,
    // a      b      c      d      e      f      g      h      i      j      k      l      m
    0.556, 0.611, 0.556, 0.611, 0.556, 0.333, 0.611, 0.611, 0.278, 0.278, 0.556, 0.278, 0.889,
    // n      o      p      q      r      s      t      u      v      w      x      y      z
    0.611, 0.611, 0.611, 0.611, 0.389, 0.556, 0.333, 0.611, 0.556, 0.778, 0.556, 0.556, 0.500,
    // {      |      }      ~
    0.389, 0.280, 0.389, 0.584,
];

#[rustfmt::skip]
static TIMES_ROMAN_WIDTHS: [f32; 95] = [
    // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
    0.250, 0.333, 0.408, 0.500, 0.500, 0.833, 0.778, 0.180, 0.333, 0.333, 0.500, 0.564, 0.250, 0.333, 0.250, 0.278,
    // 0      1      2      3      4      5      6      7      8      9
    0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500,
    // :      ;      <      =      >      ?      @
    0.278, 0.278, 0.564, 0.564, 0.564, 0.444, 0.921,
    // A      B      C      D      E      F      G      H      I      J      K      L      M
    0.722, 0.667, 0.667, 0.722, 0.611, 0.556, 0.722, 0.722, 0.333, 0.389, 0.722, 0.611, 0.889,
    // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
    0.722, 0.722, 0.556, 0.722, 0.667, 0.556, 0.611, 0.722, 0.722, 0.944, 0.722, 0.722, 0.611,
    // [      \      ]      ^      _      `
    0.333, 0.278, 0.333, 0.469, 0.500, 0.333,
    // a      b      c      d      e      f      g      h      i      j      k      l      m
    0.444, 0.500, 0.444, 0.500, 0.444, 0.333, 0.500, 0.500, 0.278, 0.278, 0.500, 0.278, 0.778,
    // n      o      p      q      r      s      t      u      v      w      x      y      z
    0.500, 0.500, 0.500, 0.500, 0.333, 0.389, 0.278, 0.500, 0.500, 0.722, 0.500, 0.500, 0.444,
    // {      |      }      ~
    0.480, 0.200, 0.480, 0.541,
];

#[rustfmt::skip]
static TIMES_BOLD_WIDTHS: [f32; 95] = [
    // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
    0.250, 0.333, 0.555, 0.500, 0.500, 1.000, 0.833, 0.278, 0.333, 0.333, 0.500, 0.570, 0.250, 0.333, 0.250, 0.278,
    // 0      1      2      3      4      5      6      7      8      9
    0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500,
    // :      ;      <      =      >      ?      @
    0.333, 0.333, 0.570, 0.570, 0.570, 0.500, 0.930,
    // A      B      C      D      E      F      G      H      I      J      K      L      M
    0.722, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.778, 0.389, 0.500, 0.778, 0.667, 0.944,
    // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
    0.722, 0.778, 0.611, 0.778, 0.722, 0.556, 0.667, 0.722, 0.722, 1.000, 0.722, 0.722, 0.667,
    // [      \      ]      ^      _      `
    0.333, 0.278, 0.333, 0.581, 0.500, 0.333,
    // a      b      c      d      e      f      g      h      i      j      k      l      m
    0.500, 0.556, 0.444, 0.556, 0.444, 0.333, 0.500, 0.556, 0.278, 0.333, 0.556, 0.278, 0.833,
    // n      o      p      q      r      s      t      u      v      w      x      y      z
    0.556, 0.500, 0.556, 0.556, 0.444, 0.389, 0.333, 0.556, 0.500, 0.722, 0.500, 0.500, 0.444,
    // {      |      }      ~
    0.394, 0.220, 0.394, 0.520,
];

#[rustfmt::skip]
static TIMES_ITALIC_WIDTHS: [f32; 95] = [
    // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
    0.250, 0.333, 0.420, 0.500, 0.500, 0.833, 0.778, 0.214, 0.333, 0.333, 0.500, 0.675, 0.250, 0.333, 0.250, 0.278,
    // 0      1      2      3      4      5      6      7      8      9
    0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500,
    // :      ;      <      =      >      ?      @
    0.333, 0.333, 0.675, 0.675, 0.675, 0.500, 0.920,
    // A      B      C      D      E      F      G      H      I      J      K      L      M
    0.611, 0.611, 0.667, 0.722, 0.611, 0.611, 0.722, 0.722, 0.333, 0.444, 0.667, 0.556, 0.833,
    // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
    0.667, 0.722, 0.611, 0.722, 0.611, 0.500, 0.556, 0.722, 0.611, 0.833, 0.611, 0.556, 0.556,
    // [      \      ]      ^      _      `
    0.389, 0.278, 0.389, 0.422, 0.500, 0.333,
    // a      b      c      d      e      f      g      h      i      j      k      l      m
    0.500, 0.500, 0.444, 0.500, 0.444, 0.278, 0.500, 0.500, 0.278, 0.278, 0.444, 0.278, 0.722,
    // n      o      p      q      r      s      t      u      v      w      x      y      z
    0.500, 0.500, 0.500, 0.500, 0.389, 0.389, 0.278, 0.500, 0.444, 0.667, 0.444, 0.444, 0.389,
    // {      |      }      ~
    0.400, 0.275, 0.400, 0.541,
];

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    base_font: "Helvetica",
    widths: &HELVETICA_WIDTHS,
    average_char_width: 0.52,
    space_width: 0.278,
    bullet_width: 0.350,
    en_dash_width: 0.556,
    em_dash_width: 1.000,
};

static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    base_font: "Helvetica-Bold",
    widths: &HELVETICA_BOLD_WIDTHS,
    average_char_width: 0.56,
    space_width: 0.278,
    bullet_width: 0.350,
    en_dash_width: 0.556,
    em_dash_width: 1.000,
};

static HELVETICA_OBLIQUE_TABLE: FontMetricTable = FontMetricTable {
    base_font: "Helvetica-Oblique",
    widths: &HELVETICA_WIDTHS,
    average_char_width: 0.52,
    space_width: 0.278,
    bullet_width: 0.350,
    en_dash_width: 0.556,
    em_dash_width: 1.000,
};

static TIMES_ROMAN_TABLE: FontMetricTable = FontMetricTable {
    base_font: "Times-Roman",
    widths: &TIMES_ROMAN_WIDTHS,
    average_char_width: 0.47,
    space_width: 0.250,
    bullet_width: 0.350,
    en_dash_width: 0.500,
    em_dash_width: 1.000,
};

static TIMES_BOLD_TABLE: FontMetricTable = FontMetricTable {
    base_font: "Times-Bold",
    widths: &TIMES_BOLD_WIDTHS,
    average_char_width: 0.50,
    space_width: 0.250,
    bullet_width: 0.350,
    en_dash_width: 0.500,
    em_dash_width: 1.000,
};

static TIMES_ITALIC_TABLE: FontMetricTable = FontMetricTable {
    base_font: "Times-Italic",
    widths: &TIMES_ITALIC_WIDTHS,
    average_char_width: 0.46,
    space_width: 0.250,
    bullet_width: 0.350,
    en_dash_width: 0.500,
    em_dash_width: 0.889,
};

/// Returns the static metric table for a family/face pair.
pub fn get_metrics(family: FontFamily, face: FontFace) -> &'static FontMetricTable {
    match (family, face) {
        (FontFamily::Helvetica, FontFace::Regular) => &HELVETICA_TABLE,
        (FontFamily::Helvetica, FontFace::Bold) => &HELVETICA_BOLD_TABLE,
        (FontFamily::Helvetica, FontFace::Italic) => &HELVETICA_OBLIQUE_TABLE,
        (FontFamily::Times, FontFace::Regular) => &TIMES_ROMAN_TABLE,
        (FontFamily::Times, FontFace::Bold) => &TIMES_BOLD_TABLE,
        (FontFamily::Times, FontFace::Italic) => &TIMES_ITALIC_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
