use std::io::Read;

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::error::ParseError;
use crate::node::{Attributes, Document, Element, Node};

// ── Public parse entry points ─────────────────────────────────────────────

/// Read `reader` to the end and parse it as a UTF-8 HTML document.
///
/// Fails only when the stream cannot be read or is not valid UTF-8. A design
/// fragment without `<html>`, `<head>` or `<body>` is accepted; the HTML5 tree
/// builder places its elements under an implied `<body>`.
pub fn parse_bytes<R: Read>(mut reader: R) -> Result<Document, ParseError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let text = String::from_utf8(bytes)?;
    parse_str(&text)
}

/// Parse in-memory markup text into a [`Document`].
pub fn parse_str(src: &str) -> Result<Document, ParseError> {
    let src = src.strip_prefix('\u{feff}').unwrap_or(src);
    let dom = parse_document(RcDom::default(), Default::default()).one(src);
    let document = convert_document(&dom.document);
    log::trace!(
        "parsed markup document with {} top-level body element(s)",
        document.body().map(|b| b.child_elements().count()).unwrap_or(0)
    );
    Ok(document)
}

// ── RcDom → owned tree ────────────────────────────────────────────────────

fn convert_document(document: &Handle) -> Document {
    let root = document
        .children
        .borrow()
        .iter()
        .find_map(|child| match &child.data {
            NodeData::Element { name, .. } if &*name.local == "html" => convert_element(child),
            _ => None,
        });

    match root {
        Some(root) => Document { root },
        None => Document::skeleton(),
    }
}

fn convert_element(handle: &Handle) -> Option<Element> {
    let NodeData::Element { name, attrs, .. } = &handle.data else {
        return None;
    };

    let mut attributes = Attributes::new();
    for attr in attrs.borrow().iter() {
        let key = match &attr.name.prefix {
            Some(prefix) => format!("{}:{}", prefix, attr.name.local),
            None => attr.name.local.to_string(),
        };
        attributes.set(key, attr.value.to_string());
    }

    let mut children = Vec::new();
    for child in handle.children.borrow().iter() {
        match &child.data {
            NodeData::Element { .. } => {
                if let Some(el) = convert_element(child) {
                    children.push(Node::Element(el));
                }
            }
            NodeData::Text { contents } => {
                let text = contents.borrow();
                if !text.trim().is_empty() {
                    children.push(Node::Text(text.to_string()));
                }
            }
            // Comments, doctypes and processing instructions carry no design data.
            _ => {}
        }
    }

    Some(Element { tag: name.local.to_string(), attrs: attributes, children })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_lands_in_body() {
        let doc = parse_str(r#"<v-vertical-layout><v-button caption="OK"></v-button></v-vertical-layout>"#).unwrap();
        let body = doc.body().unwrap();
        let root = body.child_elements().next().unwrap();
        assert_eq!(root.tag, "v-vertical-layout");
        let button = root.child_elements().next().unwrap();
        assert_eq!(button.attrs.get("caption"), Some("OK"));
    }

    #[test]
    fn full_document_keeps_root_attributes() {
        let doc = parse_str(
            r#"<!DOCTYPE html><html xmlns:my="com.example"><head></head><body><my-widget></my-widget></body></html>"#,
        )
        .unwrap();
        assert_eq!(doc.root.attrs.get("xmlns:my"), Some("com.example"));
        assert_eq!(doc.body().unwrap().child_elements().count(), 1);
    }

    #[test]
    fn whitespace_text_is_dropped() {
        let doc = parse_str("<v-label>\n   </v-label>").unwrap();
        let label = doc.body().unwrap().child_elements().next().unwrap();
        assert!(label.children.is_empty());
    }

    #[test]
    fn text_content_is_kept() {
        let doc = parse_str("<v-label>Hello &amp; bye</v-label>").unwrap();
        let label = doc.body().unwrap().child_elements().next().unwrap();
        assert_eq!(label.own_text().as_deref(), Some("Hello & bye"));
    }

    #[test]
    fn tags_are_lowercased() {
        let doc = parse_str("<V-Button></V-Button>").unwrap();
        let el = doc.body().unwrap().child_elements().next().unwrap();
        assert_eq!(el.tag, "v-button");
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        let bytes: &[u8] = &[b'<', b'a', b'>', 0xff, 0xfe];
        assert!(matches!(parse_bytes(bytes), Err(ParseError::Encoding(_))));
    }

    #[test]
    fn bytes_and_text_agree() {
        let src = "<v-button id=\"b\"></v-button>";
        assert_eq!(parse_bytes(src.as_bytes()).unwrap(), parse_str(src).unwrap());
    }
}
