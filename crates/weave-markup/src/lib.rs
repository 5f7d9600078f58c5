//! Markup engine for **weave** component designs.
//!
//! Designs are HTML documents whose `<body>` holds a single component element
//! tree. This crate only knows about markup: it parses text into an owned
//! element tree and renders such a tree back to text. Mapping elements to
//! components lives in `weave-design`.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`node`] | `Document`, `Element`, `Node`, `Attributes` |
//! | [`error`] | `ParseError` |
//! | [`parser`] | `parse_bytes`, `parse_str` (html5ever based) |
//! | [`serializer`] | `serialize`, `SerializeOptions`, `Syntax` |
//!
//! # Quick start
//!
//! ```rust
//! use weave_markup::{parse_str, serialize, SerializeOptions};
//!
//! let doc = parse_str(r#"<v-vertical-layout><v-button caption="OK"></v-button></v-vertical-layout>"#).unwrap();
//! let root = doc.body().unwrap().child_elements().next().unwrap();
//! assert_eq!(root.tag, "v-vertical-layout");
//!
//! let text = serialize(&doc, &SerializeOptions::default());
//! assert!(text.starts_with("<!DOCTYPE html>"));
//! ```

pub mod error;
pub mod node;
pub mod parser;
pub mod serializer;

pub use error::ParseError;
pub use node::{Attributes, Document, Element, Node};
pub use parser::{parse_bytes, parse_str};
pub use serializer::{serialize, serialize_element, SerializeOptions, Syntax};
