use weave_markup::Attributes;

use crate::component::{read_bool, write_bool, Common, Component};
use crate::error::DesignError;

/// A two-state check box; the caption is its label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckBox {
    common: Common,
    checked: bool,
}

impl CheckBox {
    pub fn new(caption: impl Into<String>) -> Self {
        let mut check_box = Self::default();
        check_box.common.caption = Some(caption.into());
        check_box
    }

    pub fn checked(mut self, v: bool) -> Self {
        self.checked = v;
        self
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }
}

impl Component for CheckBox {
    fn common(&self) -> &Common {
        &self.common
    }

    fn common_mut(&mut self) -> &mut Common {
        &mut self.common
    }

    fn read_design(&mut self, attrs: &Attributes, _content: Option<&str>) -> Result<(), DesignError> {
        self.common.read_design(attrs)?;
        if let Some(v) = read_bool(attrs, "checked")? {
            self.checked = v;
        }
        Ok(())
    }

    fn write_design(&self, attrs: &mut Attributes) {
        self.common.write_design(attrs);
        write_bool(attrs, "checked", self.checked, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_checked_attribute() {
        let attrs: Attributes = [("checked", "")].into_iter().collect();
        let mut check_box = CheckBox::default();
        check_box.read_design(&attrs, None).unwrap();
        assert!(check_box.is_checked());

        let mut out = Attributes::new();
        CheckBox::new("x").write_design(&mut out);
        assert!(out.get("checked").is_none());
    }
}
