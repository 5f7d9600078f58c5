use crate::component::{Common, Component, ComponentRef};

/// A captioned frame around at most one content component.
#[derive(Debug, Clone, Default)]
pub struct Panel {
    common: Common,
    content: Option<ComponentRef>,
}

impl Panel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, content: impl Into<ComponentRef>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn content_ref(&self) -> Option<&ComponentRef> {
        self.content.as_ref()
    }

    pub fn set_content(&mut self, content: Option<ComponentRef>) {
        self.content = content;
    }
}

impl Component for Panel {
    fn common(&self) -> &Common {
        &self.common
    }

    fn common_mut(&mut self) -> &mut Common {
        &mut self.common
    }

    fn max_children(&self) -> Option<usize> {
        Some(1)
    }

    fn children(&self) -> &[ComponentRef] {
        self.content.as_slice()
    }

    fn add_child(&mut self, child: ComponentRef) {
        self.content = Some(child);
    }

    fn remove_all_children(&mut self) {
        self.content = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::label::Label;

    #[test]
    fn content_is_the_only_child() {
        let mut panel = Panel::new();
        assert!(panel.children().is_empty());
        panel.add_child(ComponentRef::new(Label::new("a")));
        assert_eq!(panel.children().len(), 1);
        panel.remove_all_children();
        assert!(panel.content_ref().is_none());
    }
}
