use weave_markup::Attributes;

use crate::component::{read_bool, write_bool, Common, Component};
use crate::error::DesignError;

/// A clickable button. The caption is its label.
///
/// # Example
/// ```html
/// <v-button caption="Save" icon="icons/save.png" click-shortcut="ctrl+s"></v-button>
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Button {
    common: Common,
    icon: Option<String>,
    click_shortcut: Option<String>,
    disable_on_click: bool,
}

impl Button {
    pub fn new(caption: impl Into<String>) -> Self {
        let mut button = Self::default();
        button.common.caption = Some(caption.into());
        button
    }

    /// Icon resource shown next to the caption.
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Key combination that triggers a click, e.g. `ctrl+s`.
    pub fn click_shortcut(mut self, shortcut: impl Into<String>) -> Self {
        self.click_shortcut = Some(shortcut.into());
        self
    }

    pub fn disable_on_click(mut self, v: bool) -> Self {
        self.disable_on_click = v;
        self
    }

    pub fn icon_resource(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn shortcut(&self) -> Option<&str> {
        self.click_shortcut.as_deref()
    }

    pub fn is_disabled_on_click(&self) -> bool {
        self.disable_on_click
    }
}

impl Component for Button {
    fn common(&self) -> &Common {
        &self.common
    }

    fn common_mut(&mut self) -> &mut Common {
        &mut self.common
    }

    fn read_design(&mut self, attrs: &Attributes, _content: Option<&str>) -> Result<(), DesignError> {
        self.common.read_design(attrs)?;
        if let Some(v) = attrs.get("icon") {
            self.icon = Some(v.to_owned()).filter(|v| !v.is_empty());
        }
        if let Some(v) = attrs.get("click-shortcut") {
            self.click_shortcut = Some(v.to_owned()).filter(|v| !v.is_empty());
        }
        if let Some(v) = read_bool(attrs, "disable-on-click")? {
            self.disable_on_click = v;
        }
        Ok(())
    }

    fn write_design(&self, attrs: &mut Attributes) {
        self.common.write_design(attrs);
        if let Some(icon) = &self.icon {
            attrs.set("icon", icon.as_str());
        }
        if let Some(shortcut) = &self.click_shortcut {
            attrs.set("click-shortcut", shortcut.as_str());
        }
        write_bool(attrs, "disable-on-click", self.disable_on_click, false);
    }
}
