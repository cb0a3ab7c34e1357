//! Serializes a `LaidOutDocument` into PDF bytes with `lopdf`.
//!
//! Object graph: Catalog → Pages → Page* (each with one content stream), one shared
//! Resources dictionary holding the three standard Type1 faces, and an Info
//! dictionary without dates. Streams are left uncompressed and no document ID is
//! written, so the same display list always serializes to the same bytes.

use std::io::Write;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};

use crate::layout::{get_metrics, FontFace};
use crate::render::encoding::encode_win_ansi;
use crate::render::paginator::{LaidOutDocument, LaidOutPage};
use crate::render::RenderError;

const PDF_VERSION: &str = "1.5";
const PRODUCER: &str = concat!("harvard-cv-api ", env!("CARGO_PKG_VERSION"));

/// Two decimals keeps content streams small and stable across platforms.
fn real(value: f32) -> Object {
    Object::Real((value * 100.0).round() / 100.0)
}

fn serialization(err: lopdf::Error) -> RenderError {
    RenderError::Serialization(err.to_string())
}

fn write_failure(err: std::io::Error) -> RenderError {
    RenderError::Serialization(format!("writing PDF failed: {err}"))
}

/// Writes every page of `layout` and returns the finished file.
pub fn write_pdf(layout: &LaidOutDocument, title: &str) -> Result<Vec<u8>, RenderError> {
    let mut out = Vec::new();
    write_pdf_to(layout, title, &mut out)?;
    Ok(out)
}

fn write_pdf_to<W: Write>(
    layout: &LaidOutDocument,
    title: &str,
    out: &mut W,
) -> Result<(), RenderError> {
    let mut doc = Document::with_version(PDF_VERSION);
    let pages_id = doc.new_object_id();

    let mut fonts = Dictionary::new();
    for face in FontFace::ALL {
        let metrics = get_metrics(layout.font_family, face);
        fonts.set(
            face.resource_name(),
            dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => metrics.base_font,
                "Encoding" => "WinAnsiEncoding",
            },
        );
    }
    let resources_id = doc.add_object(dictionary! { "Font" => fonts });

    let media_box = vec![
        Object::Integer(0),
        Object::Integer(0),
        real(layout.page_width),
        real(layout.page_height),
    ];

    let mut kids: Vec<Object> = Vec::with_capacity(layout.pages.len());
    for page in &layout.pages {
        let content = page_content(page, layout.page_height);
        let bytes = content.encode().map_err(serialization)?;
        let content_id = doc.add_object(Stream::new(Dictionary::new(), bytes));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => media_box.clone(),
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
        }),
    );

    let catalog_id: ObjectId = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::String(encode_win_ansi(title), StringFormat::Literal),
        "Producer" => Object::string_literal(PRODUCER),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    doc.save_to(out).map_err(write_failure)?;
    Ok(())
}

/// Content stream for one page. Only emits `Tf` when the face or size changes.
fn page_content(page: &LaidOutPage, page_height: f32) -> Content {
    let mut ops: Vec<Operation> = Vec::new();

    for rule in &page.rules {
        let y = page_height - rule.y;
        ops.push(Operation::new("w", vec![real(rule.thickness)]));
        ops.push(Operation::new("m", vec![real(rule.x1), real(y)]));
        ops.push(Operation::new("l", vec![real(rule.x2), real(y)]));
        ops.push(Operation::new("S", vec![]));
    }

    let mut active: Option<(FontFace, f32)> = None;
    for run in &page.runs {
        ops.push(Operation::new("BT", vec![]));
        if active != Some((run.face, run.size)) {
            ops.push(Operation::new(
                "Tf",
                vec![
                    Object::Name(run.face.resource_name().as_bytes().to_vec()),
                    real(run.size),
                ],
            ));
            active = Some((run.face, run.size));
        }
        ops.push(Operation::new(
            "Td",
            vec![real(run.x), real(page_height - run.baseline)],
        ));
        ops.push(Operation::new(
            "Tj",
            vec![Object::String(encode_win_ansi(&run.text), StringFormat::Literal)],
        ));
        ops.push(Operation::new("ET", vec![]));
    }

    Content { operations: ops }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::FontFamily;
    use crate::render::paginator::{Rule, RunRole, TextRun};

    fn make_run(text: &str, face: FontFace, baseline: f32) -> TextRun {
        TextRun {
            text: text.to_string(),
            x: 20.0,
            baseline,
            face,
            size: 10.0,
            role: RunRole::Detail,
        }
    }

    fn make_layout(pages: usize, family: FontFamily) -> LaidOutDocument {
        LaidOutDocument {
            page_width: 612.0,
            page_height: 792.0,
            font_family: family,
            pages: (0..pages)
                .map(|i| LaidOutPage {
                    runs: vec![
                        make_run(&format!("Page {i}"), FontFace::Bold, 40.0),
                        make_run("• Shipped – on time", FontFace::Regular, 60.0),
                    ],
                    rules: vec![Rule {
                        x1: 20.0,
                        x2: 592.0,
                        y: 50.0,
                        thickness: 0.75,
                    }],
                })
                .collect(),
        }
    }

    /// Accepts a few bytes, then fails like a full disk.
    struct FailingWriter {
        budget: usize,
    }

    impl Write for FailingWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if self.budget == 0 {
                return Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
            }
            let n = buf.len().min(self.budget);
            self.budget -= n;
            Ok(n)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    fn first_page_ops(bytes: &[u8]) -> Vec<Operation> {
        let doc = Document::load_mem(bytes).unwrap();
        let page_id = *doc.get_pages().get(&1).unwrap();
        let raw = doc.get_page_content(page_id).unwrap();
        Content::decode(&raw).unwrap().operations
    }

    fn shown_strings(ops: &[Operation]) -> Vec<Vec<u8>> {
        ops.iter()
            .filter(|op| op.operator == "Tj")
            .map(|op| op.operands[0].as_str().unwrap().to_vec())
            .collect()
    }

    #[test]
    fn test_writes_loadable_pdf_with_all_pages() {
        let bytes = write_pdf(&make_layout(3, FontFamily::Helvetica), "Test CV").unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 3);
    }

    #[test]
    fn test_text_is_written_in_win_ansi() {
        let bytes = write_pdf(&make_layout(1, FontFamily::Helvetica), "Test CV").unwrap();
        let strings = shown_strings(&first_page_ops(&bytes));
        assert_eq!(strings[0], b"Page 0".to_vec());
        assert_eq!(strings[1], encode_win_ansi("• Shipped – on time"));
        assert_eq!(strings[1][0], 0x95);
    }

    #[test]
    fn test_font_is_set_only_on_change() {
        let bytes = write_pdf(&make_layout(1, FontFamily::Helvetica), "Test CV").unwrap();
        let ops = first_page_ops(&bytes);
        let fonts: Vec<&[u8]> = ops
            .iter()
            .filter(|op| op.operator == "Tf")
            .map(|op| op.operands[0].as_name().unwrap())
            .collect();
        assert_eq!(fonts, vec![b"F2".as_slice(), b"F1".as_slice()]);
    }

    #[test]
    fn test_standard_fonts_are_referenced_not_embedded() {
        let bytes = write_pdf(&make_layout(1, FontFamily::Times), "Test CV").unwrap();
        assert!(contains(&bytes, b"/Times-Roman"));
        assert!(contains(&bytes, b"/Times-Bold"));
        assert!(contains(&bytes, b"/Times-Italic"));
        assert!(contains(&bytes, b"/WinAnsiEncoding"));
        assert!(!contains(&bytes, b"/FontFile"));
    }

    #[test]
    fn test_baseline_is_flipped_to_pdf_space() {
        let bytes = write_pdf(&make_layout(1, FontFamily::Helvetica), "Test CV").unwrap();
        let ops = first_page_ops(&bytes);
        let td = ops.iter().find(|op| op.operator == "Td").unwrap();
        assert_eq!(td.operands[0].as_float().unwrap(), 20.0);
        // 792 - 40
        assert_eq!(td.operands[1].as_float().unwrap(), 752.0);

        let rule_move = ops.iter().find(|op| op.operator == "m").unwrap();
        assert_eq!(rule_move.operands[1].as_float().unwrap(), 742.0);
    }

    #[test]
    fn test_output_is_deterministic() {
        let layout = make_layout(2, FontFamily::Helvetica);
        let first = write_pdf(&layout, "Test CV").unwrap();
        let second = write_pdf(&layout, "Test CV").unwrap();
        assert_eq!(first, second);
        assert!(!contains(&first, b"/CreationDate"));
        assert!(!contains(&first, b"/ID"));
    }

    #[test]
    fn test_write_error_becomes_serialization_failure() {
        let layout = make_layout(1, FontFamily::Helvetica);
        let mut sink = FailingWriter { budget: 16 };
        let err = write_pdf_to(&layout, "Test CV", &mut sink).unwrap_err();
        let RenderError::Serialization(message) = err;
        assert!(message.contains("disk full"), "{message}");
    }
}
