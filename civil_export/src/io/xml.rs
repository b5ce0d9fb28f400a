use std::io;
use std::path::Path;

use log::info;

use crate::document::{Document, Element};

use super::write_string;

const DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>";

fn escape_attribute(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\n' => out.push_str("&#xA;"),
            '\r' => out.push_str("&#xD;"),
            '\t' => out.push_str("&#x9;"),
            _ => out.push(c),
        }
    }
}

fn write_element(element: &Element, depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str("  ");
    }
    out.push('<');
    out.push_str(&element.name);
    for (name, value) in &element.attributes {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        escape_attribute(value, out);
        out.push('"');
    }
    if element.children.is_empty() {
        out.push_str(" />\n");
        return;
    }
    out.push_str(">\n");
    for child in &element.children {
        write_element(child, depth + 1, out);
    }
    for _ in 0..depth {
        out.push_str("  ");
    }
    out.push_str("</");
    out.push_str(&element.name);
    out.push_str(">\n");
}

/// Renders a document as indented XML text.
pub fn to_xml_string(doc: &Document) -> String {
    let mut xml = String::new();
    xml.push_str(DECLARATION);
    xml.push('\n');
    write_element(&doc.root, 0, &mut xml);
    xml
}

/// Writes a document to `path`, replacing any previous file.
pub fn write_document(path: &Path, doc: &Document) -> io::Result<()> {
    let xml = to_xml_string(doc);
    write_string(path, &xml)?;
    info!("Wrote {} ({} bytes)", path.display(), xml.len());
    Ok(())
}
