use weave_markup::Attributes;

use crate::component::{Common, Component};
use crate::error::DesignError;

/// Read-only text. The value is the element's text content:
///
/// ```html
/// <v-label>Hello, world!</v-label>
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Label {
    common: Common,
    value: String,
}

impl Label {
    pub fn new(value: impl Into<String>) -> Self {
        Self { common: Common::default(), value: value.into() }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }
}

impl Component for Label {
    fn common(&self) -> &Common {
        &self.common
    }

    fn common_mut(&mut self) -> &mut Common {
        &mut self.common
    }

    fn read_design(&mut self, attrs: &Attributes, content: Option<&str>) -> Result<(), DesignError> {
        self.common.read_design(attrs)?;
        self.value = content.unwrap_or_default().to_owned();
        Ok(())
    }

    fn design_content(&self) -> Option<String> {
        Some(self.value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_comes_from_content() {
        let mut label = Label::new("old");
        label.read_design(&Attributes::new(), Some("new")).unwrap();
        assert_eq!(label.value(), "new");
        label.read_design(&Attributes::new(), None).unwrap();
        assert_eq!(label.value(), "");
    }

    #[test]
    fn value_is_written_as_content_only() {
        assert_eq!(Label::new("x").design_content().as_deref(), Some("x"));
        let mut attrs = Attributes::new();
        Label::default().write_design(&mut attrs);
        assert!(attrs.is_empty());
    }
}
