//! Slide text extraction.
//!
//! Walks `cSld/spTree`, then each shape's `txBody`, then its paragraphs, and
//! recovers at most one [`TextFragment`] per paragraph. Group shapes are
//! walked in place so document order is preserved.
//!
//! Extraction is best-effort: a slide that cannot be walked keeps whatever
//! fragments were collected before the failure, and the failure is returned
//! alongside them rather than propagated.

use crate::xml::{NodeSet, XmlNode};
use deck_core::{Error, Result, TextFragment};

/// Fragments recovered from one slide, plus the failure that cut the walk
/// short, if any.
#[derive(Debug, Default)]
pub struct Extraction {
    pub fragments: Vec<TextFragment>,

    /// Always an [`Error::SlideExtraction`].
    pub error: Option<Error>,
}

/// Extract the text fragments of one slide document.
pub fn extract_fragments(xml: &str) -> Extraction {
    let mut fragments = Vec::new();

    let result = match XmlNode::parse(xml) {
        Ok(root) => walk_slide(&root, &mut fragments),
        Err(partial) => {
            // Salvage what the parser built; the parse error is what gets reported.
            if let Some(root) = &partial.root {
                if let Err(e) = walk_slide(root, &mut fragments) {
                    log::debug!("Partial slide tree is incomplete: {}", e);
                }
            }
            Err(Error::SlideExtraction(format!(
                "Malformed slide XML: {}",
                partial
            )))
        }
    };

    Extraction {
        fragments,
        error: result.err(),
    }
}

fn walk_slide(root: &XmlNode, out: &mut Vec<TextFragment>) -> Result<()> {
    let sp_tree = root
        .child("cSld")
        .ok_or_else(|| Error::SlideExtraction("No <p:cSld> element found".to_string()))?
        .child("spTree")
        .ok_or_else(|| Error::SlideExtraction("No <p:spTree> element found".to_string()))?;

    walk_shapes(sp_tree, out);
    Ok(())
}

/// Collect fragments from every shape under `container`, entering group
/// shapes where they appear. One iterator per open group, no recursion.
fn walk_shapes(container: &XmlNode, out: &mut Vec<TextFragment>) {
    let mut levels = vec![container.children.iter()];

    while let Some(level) = levels.last_mut() {
        let Some(node) = level.next() else {
            levels.pop();
            continue;
        };

        match node.name.as_str() {
            "sp" => {
                for tx_body in node.get("txBody").iter() {
                    for paragraph in tx_body.get("p").iter() {
                        if let Some(fragment) = paragraph_fragment(paragraph) {
                            out.push(fragment);
                        }
                    }
                }
            }
            "grpSp" => levels.push(node.children.iter()),
            _ => {}
        }
    }
}

/// The paragraph's text, taken from the first carrier that has any:
/// text runs, then field runs, then bare text nodes.
fn paragraph_fragment(paragraph: &XmlNode) -> Option<TextFragment> {
    TextFragment::new(carrier_text(&paragraph.get("r")))
        .or_else(|| TextFragment::new(carrier_text(&paragraph.get("fld"))))
        .or_else(|| TextFragment::new(concat_text(&paragraph.get("t"))))
}

/// Concatenated `t` text of each carrier, no separator.
fn carrier_text(carriers: &NodeSet<'_>) -> String {
    let mut text = String::new();
    for carrier in carriers.iter() {
        text.push_str(&concat_text(&carrier.get("t")));
    }
    text
}

fn concat_text(nodes: &NodeSet<'_>) -> String {
    nodes.iter().map(XmlNode::text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{slide_with_shapes, slide_xml, text_shape};

    fn texts(extraction: &Extraction) -> Vec<&str> {
        extraction.fragments.iter().map(TextFragment::as_str).collect()
    }

    #[test]
    fn test_paragraphs_in_order() {
        let extraction = extract_fragments(&slide_xml(&["Title", "First", "Second"]));
        assert!(extraction.error.is_none());
        assert_eq!(texts(&extraction), vec!["Title", "First", "Second"]);
    }

    #[test]
    fn test_shapes_in_document_order() {
        let shapes = format!("{}{}", text_shape(&["Heading"]), text_shape(&["Body"]));
        let extraction = extract_fragments(&slide_with_shapes(&shapes));
        assert_eq!(texts(&extraction), vec!["Heading", "Body"]);
    }

    #[test]
    fn test_runs_concatenate_without_separator() {
        let shape = r#"<p:sp><p:txBody><a:p><a:r><a:t>Hel</a:t></a:r><a:r><a:rPr b="1"/><a:t>lo </a:t></a:r><a:r><a:t>World</a:t></a:r></a:p></p:txBody></p:sp>"#;
        let extraction = extract_fragments(&slide_with_shapes(shape));
        assert_eq!(texts(&extraction), vec!["Hello World"]);
    }

    #[test]
    fn test_field_run_paragraph() {
        let shape = r#"<p:sp><p:txBody><a:p><a:fld id="{B6F15528-21DE-4FAA-801E-634DDDAF4B2B}" type="slidenum"><a:rPr lang="en-US"/><a:t>7</a:t></a:fld></a:p></p:txBody></p:sp>"#;
        let extraction = extract_fragments(&slide_with_shapes(shape));
        assert_eq!(texts(&extraction), vec!["7"]);
    }

    #[test]
    fn test_runs_take_precedence_over_fields() {
        let shape = r#"<p:sp><p:txBody><a:p><a:r><a:t>Page </a:t></a:r><a:fld type="slidenum"><a:t>3</a:t></a:fld></a:p></p:txBody></p:sp>"#;
        let extraction = extract_fragments(&slide_with_shapes(shape));
        assert_eq!(texts(&extraction), vec!["Page"]);
    }

    #[test]
    fn test_blank_runs_fall_back_to_field() {
        let shape = r#"<p:sp><p:txBody><a:p><a:r><a:t>  </a:t></a:r><a:fld type="datetime1"><a:t>10/15/2026</a:t></a:fld></a:p></p:txBody></p:sp>"#;
        let extraction = extract_fragments(&slide_with_shapes(shape));
        assert_eq!(texts(&extraction), vec!["10/15/2026"]);
    }

    #[test]
    fn test_bare_text_on_paragraph() {
        let shape = r#"<p:sp><p:txBody><a:p><a:t>Loose text</a:t></a:p></p:txBody></p:sp>"#;
        let extraction = extract_fragments(&slide_with_shapes(shape));
        assert_eq!(texts(&extraction), vec!["Loose text"]);
    }

    #[test]
    fn test_empty_paragraphs_are_dropped() {
        let shape = r#"<p:sp><p:txBody><a:p/><a:p><a:endParaRPr lang="en-US"/></a:p><a:p><a:r><a:t>   </a:t></a:r></a:p><a:p><a:r><a:t> kept </a:t></a:r></a:p></p:txBody></p:sp>"#;
        let extraction = extract_fragments(&slide_with_shapes(shape));
        assert_eq!(texts(&extraction), vec!["kept"]);
    }

    #[test]
    fn test_shapes_without_text_body_are_skipped() {
        let shapes = format!(
            r#"<p:pic><p:nvPicPr/></p:pic><p:sp><p:spPr/></p:sp>{}"#,
            text_shape(&["Only"])
        );
        let extraction = extract_fragments(&slide_with_shapes(&shapes));
        assert!(extraction.error.is_none());
        assert_eq!(texts(&extraction), vec!["Only"]);
    }

    #[test]
    fn test_group_shapes_walked_in_place() {
        let shapes = format!(
            "{}<p:grpSp><p:grpSpPr/>{}{}</p:grpSp>{}",
            text_shape(&["A"]),
            text_shape(&["B"]),
            text_shape(&["C"]),
            text_shape(&["D"])
        );
        let extraction = extract_fragments(&slide_with_shapes(&shapes));
        assert_eq!(texts(&extraction), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_nested_groups_keep_document_order() {
        let mut shapes = text_shape(&["inner"]);
        for depth in 0..100 {
            shapes = format!(
                "<p:grpSp>{}{}</p:grpSp>",
                shapes,
                text_shape(&[&format!("after {}", depth)])
            );
        }
        let extraction = extract_fragments(&slide_with_shapes(&shapes));

        assert!(extraction.error.is_none());
        assert_eq!(extraction.fragments.len(), 101);
        assert_eq!(extraction.fragments[0].as_str(), "inner");
        assert_eq!(extraction.fragments[1].as_str(), "after 0");
        assert_eq!(extraction.fragments[100].as_str(), "after 99");
    }

    #[test]
    fn test_overly_deep_groups_are_an_error() {
        let depth = 50_000;
        let shapes = format!(
            "{}{}{}",
            text_shape(&["Kept"]),
            "<p:grpSp>".repeat(depth),
            "</p:grpSp>".repeat(depth)
        );
        let extraction = extract_fragments(&slide_with_shapes(&shapes));

        assert_eq!(texts(&extraction), vec!["Kept"]);
        assert!(matches!(extraction.error, Some(Error::SlideExtraction(_))));
    }

    #[test]
    fn test_missing_shape_tree_is_an_error() {
        let extraction = extract_fragments(r#"<p:sld xmlns:p="urn:p"><p:cSld/></p:sld>"#);
        assert!(extraction.fragments.is_empty());
        assert!(matches!(extraction.error, Some(Error::SlideExtraction(_))));
    }

    #[test]
    fn test_malformed_xml_keeps_collected_fragments() {
        // The second shape is cut off by a mismatched end tag.
        let xml = format!(
            "<p:sld><p:cSld><p:spTree>{}<p:sp><p:txBody><a:p><a:r><a:t>lost</a:t></a:r></p:sp></p:spTree></p:cSld></p:sld>",
            text_shape(&["Survivor"])
        );
        let extraction = extract_fragments(&xml);
        assert!(extraction.error.is_some());
        assert_eq!(texts(&extraction)[0], "Survivor");
    }

    #[test]
    fn test_garbage_yields_no_fragments() {
        let extraction = extract_fragments("this is not xml at all <<<");
        assert!(extraction.fragments.is_empty());
        assert!(extraction.error.is_some());
    }
}
