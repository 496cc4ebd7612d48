//! Builders for in-memory PPTX fixtures.

use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::ZipWriter;

/// Namespace declarations shared by slide fixtures.
const SLIDE_NAMESPACES: &str = r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#;

/// Build a ZIP archive from `(name, contents)` entries, in the given order.
pub fn build_package(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default();

    for (name, contents) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(contents.as_bytes()).unwrap();
    }

    zip.finish().unwrap().into_inner()
}

/// Wrap shape-tree children in a complete slide document.
pub fn slide_with_shapes(shapes: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld {SLIDE_NAMESPACES}><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>{shapes}</p:spTree></p:cSld></p:sld>"#
    )
}

/// A text shape holding one single-run paragraph per entry.
pub fn text_shape(paragraphs: &[&str]) -> String {
    let body: String = paragraphs
        .iter()
        .map(|text| format!("<a:p><a:r><a:rPr lang=\"en-US\"/><a:t>{}</a:t></a:r></a:p>", text))
        .collect();
    format!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="2" name="Text"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr/><a:lstStyle/>{body}</p:txBody></p:sp>"#
    )
}

/// A slide with a single text shape, one paragraph per entry.
pub fn slide_xml(paragraphs: &[&str]) -> String {
    slide_with_shapes(&text_shape(paragraphs))
}

/// Package with one slide per entry, named `slide1.xml`, `slide2.xml`, ...
pub fn package_with_slides(slides: &[String]) -> Vec<u8> {
    let names: Vec<String> = (1..=slides.len())
        .map(|i| format!("ppt/slides/slide{}.xml", i))
        .collect();
    let mut entries: Vec<(&str, &str)> = vec![
        ("[Content_Types].xml", "<Types/>"),
        ("ppt/presentation.xml", "<p:presentation/>"),
    ];
    entries.extend(names.iter().map(String::as_str).zip(slides.iter().map(String::as_str)));
    build_package(&entries)
}

/// Invert the stored bytes of one entry in a built package so that reading
/// it fails while the archive directory stays intact.
pub fn corrupt_entry(data: &mut [u8], name: &str) {
    const LOCAL_HEADER_LEN: usize = 30;

    // The first occurrence of the name is in the entry's local header.
    let name = name.as_bytes();
    let name_start = data
        .windows(name.len())
        .position(|window| window == name)
        .unwrap();
    let header = name_start - LOCAL_HEADER_LEN;
    assert_eq!(&data[header..header + 4], b"PK\x03\x04");

    let compressed_len =
        u32::from_le_bytes(data[header + 18..header + 22].try_into().unwrap()) as usize;
    let extra_len = u16::from_le_bytes(data[header + 28..header + 30].try_into().unwrap()) as usize;
    assert!(compressed_len > 0);

    let payload = name_start + name.len() + extra_len;
    for byte in &mut data[payload..payload + compressed_len] {
        *byte ^= 0xFF;
    }
}
