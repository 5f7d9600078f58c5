use weave_markup::Attributes;

use crate::component::{read_bool, read_parsed, write_bool, Common, Component};
use crate::error::DesignError;

/// A single-line text input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    common: Common,
    value: String,
    placeholder: Option<String>,
    max_length: Option<u32>,
    readonly: bool,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }

    pub fn max_length(mut self, n: u32) -> Self {
        self.max_length = Some(n);
        self
    }

    pub fn readonly(mut self, v: bool) -> Self {
        self.readonly = v;
        self
    }

    pub fn placeholder_text(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    pub fn length_limit(&self) -> Option<u32> {
        self.max_length
    }

    pub fn is_readonly(&self) -> bool {
        self.readonly
    }
}

impl Component for TextField {
    fn common(&self) -> &Common {
        &self.common
    }

    fn common_mut(&mut self) -> &mut Common {
        &mut self.common
    }

    fn read_design(&mut self, attrs: &Attributes, _content: Option<&str>) -> Result<(), DesignError> {
        self.common.read_design(attrs)?;
        if let Some(v) = attrs.get("value") {
            self.value = v.to_owned();
        }
        if let Some(v) = attrs.get("placeholder") {
            self.placeholder = Some(v.to_owned()).filter(|v| !v.is_empty());
        }
        if let Some(n) = read_parsed::<u32>(attrs, "max-length")? {
            self.max_length = Some(n);
        }
        if let Some(v) = read_bool(attrs, "readonly")? {
            self.readonly = v;
        }
        Ok(())
    }

    fn write_design(&self, attrs: &mut Attributes) {
        self.common.write_design(attrs);
        if !self.value.is_empty() {
            attrs.set("value", self.value.as_str());
        }
        if let Some(p) = &self.placeholder {
            attrs.set("placeholder", p.as_str());
        }
        if let Some(n) = self.max_length {
            attrs.set("max-length", n.to_string());
        }
        write_bool(attrs, "readonly", self.readonly, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_and_writes_attributes() {
        let attrs: Attributes =
            [("value", "bob"), ("placeholder", "Name"), ("max-length", "20"), ("readonly", "true")]
                .into_iter()
                .collect();
        let mut field = TextField::new();
        field.read_design(&attrs, None).unwrap();
        assert_eq!(field.value(), "bob");
        assert_eq!(field.length_limit(), Some(20));
        assert!(field.is_readonly());

        let mut out = Attributes::new();
        field.write_design(&mut out);
        assert_eq!(out.get("readonly"), Some(""));
        assert_eq!(out.get("max-length"), Some("20"));
    }

    #[test]
    fn bad_max_length_is_rejected() {
        let attrs: Attributes = [("max-length", "lots")].into_iter().collect();
        let err = TextField::new().read_design(&attrs, None).unwrap_err();
        assert!(matches!(err, DesignError::InvalidAttribute { name, .. } if name == "max-length"));
    }
}
