use std::io::{Cursor, Read as _};

use crate::foundation::error::{HandwriteError, HandwriteResult};

const WORD_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const MAIN_PART: &str = "word/document.xml";

/// Text of each top-level body paragraph, in document order.
///
/// Paragraphs nested in tables or text boxes are not part of the body flow and are skipped.
pub(super) fn paragraphs(bytes: &[u8]) -> HandwriteResult<Vec<String>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| HandwriteError::input(format!("document is not a docx package: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name(MAIN_PART)
        .map_err(|e| HandwriteError::input(format!("docx is missing '{MAIN_PART}': {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| HandwriteError::input(format!("failed to read '{MAIN_PART}': {e}")))?;

    parse_document_xml(&xml)
}

fn parse_document_xml(xml: &str) -> HandwriteResult<Vec<String>> {
    let doc = roxmltree::Document::parse(xml)
        .map_err(|e| HandwriteError::input(format!("malformed '{MAIN_PART}': {e}")))?;

    let body = doc
        .root_element()
        .children()
        .find(|n| is_word(n, "body"))
        .ok_or_else(|| HandwriteError::input(format!("'{MAIN_PART}' has no w:body")))?;

    Ok(body
        .children()
        .filter(|n| is_word(n, "p"))
        .map(|p| {
            let mut out = String::new();
            collect_run_text(p, &mut out);
            out
        })
        .collect())
}

fn collect_run_text(node: roxmltree::Node<'_, '_>, out: &mut String) {
    for child in node.children().filter(|n| n.is_element()) {
        if child.tag_name().namespace() != Some(WORD_NS) {
            continue;
        }
        match child.tag_name().name() {
            "t" => out.push_str(child.text().unwrap_or_default()),
            "tab" => out.push('\t'),
            "br" | "cr" => {
                // Page and column breaks carry no text.
                if matches!(child.attribute((WORD_NS, "type")), None | Some("textWrapping")) {
                    out.push('\n');
                }
            }
            "noBreakHyphen" => out.push('-'),
            // Deleted revisions and floating content are not part of the paragraph text.
            "del" | "txbxContent" | "drawing" | "pict" => {}
            _ => collect_run_text(child, out),
        }
    }
}

fn is_word(node: &roxmltree::Node<'_, '_>, name: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == name
        && node.tag_name().namespace() == Some(WORD_NS)
}

#[cfg(test)]
#[path = "../../tests/unit/document/docx.rs"]
mod tests;
