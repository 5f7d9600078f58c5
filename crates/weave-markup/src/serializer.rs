use crate::node::{Document, Element, Node};

// ── Options ───────────────────────────────────────────────────────────────

/// Target dialect for serialized output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Syntax {
    /// HTML5: bare boolean attributes, void elements without end tags.
    #[default]
    Html,
    /// XML-compatible: every attribute has a value, void elements self-close.
    Xml,
}

/// Output formatting. Formatting is cosmetic; any setting re-parses to the
/// same tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Spaces per nesting level when `pretty` is set.
    pub indent: usize,
    pub syntax: Syntax,
    pub pretty: bool,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self { indent: 4, syntax: Syntax::Html, pretty: true }
    }
}

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track", "wbr",
];

// ── Serializer ────────────────────────────────────────────────────────────

/// Render `doc` as text, starting with an HTML5 doctype.
pub fn serialize(doc: &Document, options: &SerializeOptions) -> String {
    let mut out = String::from("<!DOCTYPE html>");
    if options.pretty {
        out.push('\n');
    }
    let mut w = Writer { out, options };
    w.element(&doc.root, 0);
    w.out
}

/// Render a single element subtree without a doctype.
pub fn serialize_element(element: &Element, options: &SerializeOptions) -> String {
    let mut w = Writer { out: String::new(), options };
    w.element(element, 0);
    w.out
}

struct Writer<'o> {
    out: String,
    options: &'o SerializeOptions,
}

impl Writer<'_> {
    fn element(&mut self, el: &Element, depth: usize) {
        self.indent(depth);
        self.out.push('<');
        self.out.push_str(&el.tag);
        for (key, value) in el.attrs.iter() {
            self.out.push(' ');
            self.out.push_str(key);
            if value.is_empty() && self.options.syntax == Syntax::Html {
                continue;
            }
            self.out.push_str("=\"");
            escape_into(&mut self.out, value, true);
            self.out.push('"');
        }

        if el.children.is_empty() {
            // HTML parsers ignore `/>` on non-void elements, so only void
            // elements may self-close.
            match (self.options.syntax, VOID_ELEMENTS.contains(&el.tag.as_str())) {
                (Syntax::Xml, true) => self.out.push_str(" />"),
                (Syntax::Html, true) => self.out.push('>'),
                (_, false) => {
                    self.out.push('>');
                    self.close(el);
                }
            }
            self.newline();
            return;
        }
        self.out.push('>');

        // Text-only content stays on one line so it round-trips verbatim.
        let text_only = el.children.iter().all(|c| matches!(c, Node::Text(_)));
        if text_only {
            for child in &el.children {
                if let Node::Text(t) = child {
                    escape_into(&mut self.out, t, false);
                }
            }
            self.close(el);
            self.newline();
            return;
        }

        self.newline();
        for child in &el.children {
            match child {
                Node::Element(e) => self.element(e, depth + 1),
                Node::Text(t) => {
                    self.indent(depth + 1);
                    escape_into(&mut self.out, t.trim(), false);
                    self.newline();
                }
            }
        }
        self.indent(depth);
        self.close(el);
        self.newline();
    }

    fn close(&mut self, el: &Element) {
        self.out.push_str("</");
        self.out.push_str(&el.tag);
        self.out.push('>');
    }

    fn indent(&mut self, depth: usize) {
        if self.options.pretty {
            self.out.extend(std::iter::repeat_n(' ', depth * self.options.indent));
        }
    }

    fn newline(&mut self) {
        if self.options.pretty {
            self.out.push('\n');
        }
    }
}

fn escape_into(out: &mut String, s: &str, attribute: bool) {
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_str;

    fn compact() -> SerializeOptions {
        SerializeOptions { pretty: false, ..SerializeOptions::default() }
    }

    #[test]
    fn pretty_output_uses_indent() {
        let mut doc = Document::skeleton();
        doc.body_mut().append(Element::new("v-vertical-layout").child(Element::new("v-button")));
        let text = serialize(&doc, &SerializeOptions::default());
        assert!(text.starts_with("<!DOCTYPE html>\n<html>\n    <head></head>\n    <body>\n"));
        assert!(text.contains("\n        <v-vertical-layout>\n            <v-button></v-button>\n"));
    }

    #[test]
    fn html_boolean_attribute_is_bare() {
        let el = Element::new("v-check-box").attr("checked", "");
        assert_eq!(serialize_element(&el, &compact()), "<v-check-box checked></v-check-box>");
    }

    #[test]
    fn xml_syntax_self_closes_only_void_elements() {
        let opts = SerializeOptions { syntax: Syntax::Xml, ..compact() };
        let el = Element::new("v-check-box").attr("checked", "");
        assert_eq!(serialize_element(&el, &opts), "<v-check-box checked=\"\"></v-check-box>");
        assert_eq!(serialize_element(&Element::new("br"), &opts), "<br />");
    }

    #[test]
    fn xml_output_reparses_to_same_body() {
        let src = r#"<v-vertical-layout><v-button caption="A"></v-button><v-button caption="B"></v-button></v-vertical-layout>"#;
        let doc = parse_str(src).unwrap();
        let opts = SerializeOptions { syntax: Syntax::Xml, ..SerializeOptions::default() };
        let again = parse_str(&serialize(&doc, &opts)).unwrap();
        assert_eq!(doc.body(), again.body());
    }

    #[test]
    fn values_are_escaped() {
        let el = Element::new("v-label").attr("caption", "a \"b\" & <c>").text("1 < 2");
        assert_eq!(
            serialize_element(&el, &compact()),
            "<v-label caption=\"a &quot;b&quot; &amp; &lt;c&gt;\">1 &lt; 2</v-label>"
        );
    }

    #[test]
    fn output_reparses_to_same_body() {
        let src = r#"<v-horizontal-layout spacing><v-label>Name</v-label><v-text-field id="name"></v-text-field></v-horizontal-layout>"#;
        let doc = parse_str(src).unwrap();
        let again = parse_str(&serialize(&doc, &SerializeOptions::default())).unwrap();
        assert_eq!(doc.body(), again.body());
    }
}
