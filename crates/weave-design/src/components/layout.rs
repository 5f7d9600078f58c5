use weave_markup::Attributes;

use crate::component::{read_bool, write_bool, Common, Component, ComponentRef};
use crate::error::DesignError;

// ── Ordered layout ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
struct Ordered {
    common: Common,
    children: Vec<ComponentRef>,
    spacing: bool,
    margin: bool,
}

impl Ordered {
    fn read_design(&mut self, attrs: &Attributes) -> Result<(), DesignError> {
        self.common.read_design(attrs)?;
        if let Some(v) = read_bool(attrs, "spacing")? {
            self.spacing = v;
        }
        if let Some(v) = read_bool(attrs, "margin")? {
            self.margin = v;
        }
        Ok(())
    }

    fn write_design(&self, attrs: &mut Attributes) {
        self.common.write_design(attrs);
        write_bool(attrs, "spacing", self.spacing, false);
        write_bool(attrs, "margin", self.margin, false);
    }
}

macro_rules! ordered_layout {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default)]
        pub struct $name {
            inner: Ordered,
        }

        impl $name {
            pub fn new() -> Self {
                Self::default()
            }

            pub fn child(mut self, child: impl Into<ComponentRef>) -> Self {
                self.inner.children.push(child.into());
                self
            }

            /// Gap between children.
            pub fn spacing(mut self, v: bool) -> Self {
                self.inner.spacing = v;
                self
            }

            /// Space around the children.
            pub fn margin(mut self, v: bool) -> Self {
                self.inner.margin = v;
                self
            }

            pub fn has_spacing(&self) -> bool {
                self.inner.spacing
            }

            pub fn has_margin(&self) -> bool {
                self.inner.margin
            }
        }

        impl Component for $name {
            fn common(&self) -> &Common {
                &self.inner.common
            }

            fn common_mut(&mut self) -> &mut Common {
                &mut self.inner.common
            }

            fn read_design(&mut self, attrs: &Attributes, _content: Option<&str>) -> Result<(), DesignError> {
                self.inner.read_design(attrs)
            }

            fn write_design(&self, attrs: &mut Attributes) {
                self.inner.write_design(attrs)
            }

            fn max_children(&self) -> Option<usize> {
                None
            }

            fn children(&self) -> &[ComponentRef] {
                &self.inner.children
            }

            fn add_child(&mut self, child: ComponentRef) {
                self.inner.children.push(child);
            }

            fn remove_all_children(&mut self) {
                self.inner.children.clear();
            }
        }
    };
}

ordered_layout! {
    /// Stacks children top to bottom.
    VerticalLayout
}

ordered_layout! {
    /// Places children left to right.
    HorizontalLayout
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::label::Label;

    #[test]
    fn children_keep_insertion_order() {
        let layout = VerticalLayout::new().child(Label::new("a")).child(Label::new("b"));
        let values: Vec<String> = layout
            .children()
            .iter()
            .map(|c| c.downcast_ref::<Label>().map(|l| l.value().to_owned()).unwrap_or_default())
            .collect();
        assert_eq!(values, ["a", "b"]);
    }

    #[test]
    fn flags_are_written_when_set() {
        let mut attrs = Attributes::new();
        HorizontalLayout::new().spacing(true).write_design(&mut attrs);
        let written: Vec<_> = attrs.iter().collect();
        assert_eq!(written, [("spacing", "")]);

        let mut layout = HorizontalLayout::new();
        layout.read_design(&attrs, None).unwrap();
        assert!(layout.has_spacing());
        assert!(!layout.has_margin());
    }
}
