// ── Attributes ────────────────────────────────────────────────────────────

/// Ordered attribute list of an element. Keys are unique.
///
/// Insertion order is kept so that serialized output is stable: a key that is
/// set again keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k == key)
    }

    /// Set `key` to `value`, replacing an existing value in place.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
    }

    /// Remove `key`, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let idx = self.0.iter().position(|(k, _)| k == key)?;
        Some(self.0.remove(idx).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attributes::new();
        for (k, v) in iter {
            attrs.set(k, v);
        }
        attrs
    }
}

// ── Node ──────────────────────────────────────────────────────────────────

/// A child of an [`Element`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Text content. Whitespace-only runs are dropped while parsing.
    Text(String),
}

// ── Element ───────────────────────────────────────────────────────────────

/// A tagged element with attributes and ordered children.
///
/// ```html
/// <v-button id="save" caption="Save"></v-button>
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Lowercase tag name: `"body"`, `"v-vertical-layout"`.
    pub tag: String,
    pub attrs: Attributes,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into(), attrs: Attributes::new(), children: Vec::new() }
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.set(key, value);
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn append(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    pub fn append_text(&mut self, text: impl Into<String>) {
        self.children.push(Node::Text(text.into()));
    }

    /// Child elements in document order, skipping text.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// First direct child element with the given tag.
    pub fn find_child(&self, tag: &str) -> Option<&Element> {
        self.child_elements().find(|e| e.tag == tag)
    }

    pub fn find_child_mut(&mut self, tag: &str) -> Option<&mut Element> {
        self.child_elements_mut().find(|e| e.tag == tag)
    }

    /// Concatenated direct text children, or `None` if there are none.
    pub fn own_text(&self) -> Option<String> {
        let mut out: Option<String> = None;
        for n in &self.children {
            if let Node::Text(t) = n {
                out.get_or_insert_with(String::new).push_str(t);
            }
        }
        out
    }
}

// ── Document ──────────────────────────────────────────────────────────────

/// A parsed or generated HTML document.
///
/// `root` is always the `<html>` element; the parser guarantees `<head>` and
/// `<body>` children, and [`Document::skeleton`] creates them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub root: Element,
}

impl Document {
    /// An empty `html/head/body` document.
    pub fn skeleton() -> Self {
        Self { root: Element::new("html").child(Element::new("head")).child(Element::new("body")) }
    }

    pub fn head(&self) -> Option<&Element> {
        self.root.find_child("head")
    }

    pub fn body(&self) -> Option<&Element> {
        self.root.find_child("body")
    }

    /// Mutable `<body>`, creating it if the tree lacks one.
    pub fn body_mut(&mut self) -> &mut Element {
        if self.root.find_child("body").is_none() {
            self.root.append(Element::new("body"));
        }
        match self.root.find_child_mut("body") {
            Some(body) => body,
            None => unreachable!("body element inserted above"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_keeps_position() {
        let mut a = Attributes::new();
        a.set("id", "x");
        a.set("caption", "c");
        a.set("id", "y");
        let keys: Vec<_> = a.keys().collect();
        assert_eq!(keys, ["id", "caption"]);
        assert_eq!(a.get("id"), Some("y"));
    }

    #[test]
    fn remove_returns_value() {
        let mut a: Attributes = [("id", "x"), ("width", "100%")].into_iter().collect();
        assert_eq!(a.remove("id").as_deref(), Some("x"));
        assert_eq!(a.remove("id"), None);
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn own_text_skips_elements() {
        let e = Element::new("v-label").text("Hello ").child(Element::new("b")).text("world");
        assert_eq!(e.own_text().as_deref(), Some("Hello world"));
        assert_eq!(Element::new("x").own_text(), None);
    }

    #[test]
    fn skeleton_has_head_and_body() {
        let mut doc = Document::skeleton();
        assert!(doc.head().is_some());
        doc.body_mut().append(Element::new("v-button"));
        assert_eq!(doc.body().map(|b| b.child_elements().count()), Some(1));
    }
}
