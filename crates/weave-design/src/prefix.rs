use std::collections::{BTreeMap, BTreeSet};

use weave_markup::Element;

use crate::config::{DEFAULT_PACKAGE, DEFAULT_PREFIX};
use crate::error::DesignError;

/// Tag prefix ↔ component package table of one design pass.
///
/// The default prefix is always mapped to the default package and needs no
/// declaration in markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixTable {
    by_prefix: BTreeMap<String, String>,
    default_prefix: String,
    default_package: String,
}

impl Default for PrefixTable {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX, DEFAULT_PACKAGE)
    }
}

impl PrefixTable {
    pub fn new(default_prefix: impl Into<String>, default_package: impl Into<String>) -> Self {
        let default_prefix = default_prefix.into();
        let default_package = default_package.into();
        let mut by_prefix = BTreeMap::new();
        by_prefix.insert(default_prefix.clone(), default_package.clone());
        Self { by_prefix, default_prefix, default_package }
    }

    /// Map `prefix` to `package`. Re-declaring the same mapping is a no-op.
    pub fn declare(&mut self, prefix: impl Into<String>, package: impl Into<String>) -> Result<(), DesignError> {
        let prefix = prefix.into();
        let package = package.into();
        match self.by_prefix.get(&prefix) {
            Some(existing) if *existing == package => Ok(()),
            Some(existing) => Err(DesignError::PrefixConflict {
                prefix,
                existing: existing.clone(),
                requested: package,
            }),
            None => {
                log::trace!("prefix {prefix:?} → package {package:?}");
                self.by_prefix.insert(prefix, package);
                Ok(())
            }
        }
    }

    pub fn package(&self, prefix: &str) -> Option<&str> {
        self.by_prefix.get(prefix).map(String::as_str)
    }

    /// Prefix mapped to `package`, preferring the default prefix.
    pub fn prefix(&self, package: &str) -> Option<&str> {
        if package == self.default_package {
            return Some(&self.default_prefix);
        }
        self.by_prefix.iter().find(|(_, p)| *p == package).map(|(prefix, _)| prefix.as_str())
    }

    /// Prefix for `package`, declaring a derived one if none is mapped.
    ///
    /// Derived prefixes are the package lowercased with every non-alphanumeric
    /// replaced by `_`, suffixed with a counter on collision.
    pub fn ensure_prefix(&mut self, package: &str) -> String {
        if let Some(prefix) = self.prefix(package) {
            return prefix.to_owned();
        }
        let base: String = package
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
            .collect();
        let mut candidate = base.clone();
        let mut n = 2;
        while self.by_prefix.contains_key(&candidate) {
            candidate = format!("{base}{n}");
            n += 1;
        }
        self.by_prefix.insert(candidate.clone(), package.to_owned());
        candidate
    }

    /// Explicit declarations, excluding the implicit default mapping.
    pub fn declarations(&self) -> impl Iterator<Item = (&str, &str)> {
        self.by_prefix
            .iter()
            .filter(|(prefix, _)| **prefix != self.default_prefix)
            .map(|(prefix, package)| (prefix.as_str(), package.as_str()))
    }

    /// Collect `<attr_prefix><prefix>="<package>"` declarations from `element`.
    pub fn read_declarations(&mut self, element: &Element, attr_prefix: &str) -> Result<(), DesignError> {
        for (key, value) in element.attrs.iter() {
            if let Some(prefix) = key.strip_prefix(attr_prefix) {
                if !prefix.is_empty() {
                    self.declare(prefix, value)?;
                }
            }
        }
        Ok(())
    }

    /// Write declarations for `packages` onto `element`, sorted by prefix.
    /// The default package needs none.
    pub fn write_declarations(&mut self, element: &mut Element, packages: &BTreeSet<String>, attr_prefix: &str) {
        let mut pairs: Vec<(String, &str)> = Vec::new();
        for package in packages {
            if *package != self.default_package {
                pairs.push((self.ensure_prefix(package), package.as_str()));
            }
        }
        pairs.sort();
        for (prefix, package) in pairs {
            element.attrs.set(format!("{attr_prefix}{prefix}"), package);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_prefix_is_mapped() {
        let t = PrefixTable::default();
        assert_eq!(t.package("v"), Some(DEFAULT_PACKAGE));
        assert_eq!(t.prefix(DEFAULT_PACKAGE), Some("v"));
        assert_eq!(t.declarations().count(), 0);
    }

    #[test]
    fn conflicting_declaration_fails() {
        let mut t = PrefixTable::default();
        t.declare("my", "com.example").unwrap();
        t.declare("my", "com.example").unwrap();
        assert!(matches!(t.declare("my", "org.other"), Err(DesignError::PrefixConflict { .. })));
        assert!(matches!(t.declare("v", "org.other"), Err(DesignError::PrefixConflict { .. })));
    }

    #[test]
    fn reads_only_declaration_attributes() {
        let html = Element::new("html").attr("lang", "en").attr("xmlns:my", "com.example").attr("xmlns:", "x");
        let mut t = PrefixTable::default();
        t.read_declarations(&html, "xmlns:").unwrap();
        let decls: Vec<_> = t.declarations().collect();
        assert_eq!(decls, [("my", "com.example")]);
    }

    #[test]
    fn derived_prefix_avoids_collisions() {
        let mut t = PrefixTable::default();
        t.declare("com_example", "something.else").unwrap();
        assert_eq!(t.ensure_prefix("com.example"), "com_example2");
        assert_eq!(t.ensure_prefix("com.example"), "com_example2");
    }

    #[test]
    fn writes_minimal_sorted_declarations() {
        let mut t = PrefixTable::default();
        t.declare("zz", "org.last").unwrap();
        t.declare("unused", "org.unused").unwrap();
        let packages: BTreeSet<String> =
            ["org.last", "com.example", DEFAULT_PACKAGE].into_iter().map(String::from).collect();
        let mut html = Element::new("html");
        t.write_declarations(&mut html, &packages, "xmlns:");
        let written: Vec<_> = html.attrs.iter().collect();
        assert_eq!(written, [("xmlns:com_example", "com.example"), ("xmlns:zz", "org.last")]);
    }
}
