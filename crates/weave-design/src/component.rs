use std::any::{Any, TypeId};
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use weave_markup::Attributes;

use crate::binder::SlotSchema;
use crate::error::DesignError;

// ── AsAny ─────────────────────────────────────────────────────────────────

/// Downcasting support, implemented for every `'static` type.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn type_name(&self) -> &'static str;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

// ── Component trait ───────────────────────────────────────────────────────

/// A UI component that can be read from and written to design markup.
///
/// Only the design-facing surface lives here; rendering and events belong to
/// the hosting UI framework.
///
/// # Implementing a custom component
///
/// ```rust
/// use weave_design::prelude::*;
///
/// #[derive(Default)]
/// pub struct Badge { common: Common, tone: Option<String> }
///
/// impl Component for Badge {
///     fn common(&self) -> &Common { &self.common }
///     fn common_mut(&mut self) -> &mut Common { &mut self.common }
///
///     fn read_design(&mut self, attrs: &Attributes, _content: Option<&str>) -> Result<(), DesignError> {
///         self.common.read_design(attrs)?;
///         self.tone = attrs.get("tone").map(str::to_owned);
///         Ok(())
///     }
///
///     fn write_design(&self, attrs: &mut Attributes) {
///         self.common.write_design(attrs);
///         if let Some(tone) = &self.tone {
///             attrs.set("tone", tone.as_str());
///         }
///     }
/// }
///
/// let mut registry = ComponentRegistry::with_builtins();
/// registry.register(ComponentType::of::<Badge>("com.example", "Badge"));
/// ```
pub trait Component: AsAny {
    fn common(&self) -> &Common;

    fn common_mut(&mut self) -> &mut Common;

    /// Apply the element's attributes (identity attributes already removed)
    /// and its direct text content.
    ///
    /// The default reads only the [`Common`] attributes. Attributes a
    /// component does not understand are ignored.
    fn read_design(&mut self, attrs: &Attributes, _content: Option<&str>) -> Result<(), DesignError> {
        self.common_mut().read_design(attrs)
    }

    /// Write non-default attribute values, in a fixed order.
    fn write_design(&self, attrs: &mut Attributes) {
        self.common().write_design(attrs)
    }

    /// Text written as the element's content.
    fn design_content(&self) -> Option<String> {
        None
    }

    /// Maximum number of child components; `None` means unbounded.
    fn max_children(&self) -> Option<usize> {
        Some(0)
    }

    fn children(&self) -> &[ComponentRef] {
        &[]
    }

    /// Append a child. Only called while fewer than [`max_children`] children
    /// are present.
    ///
    /// [`max_children`]: Component::max_children
    fn add_child(&mut self, _child: ComponentRef) {}

    fn remove_all_children(&mut self) {}

    /// Named component slots this instance exposes when used as the root of a
    /// design read. `None` means the type declares no slots.
    fn slots(&self) -> Option<SlotSchema> {
        None
    }

    /// Store `component` into the slot `name` declared by [`slots`].
    ///
    /// [`slots`]: Component::slots
    fn bind_slot(&mut self, name: &str, _component: ComponentRef) -> Result<(), DesignError> {
        Err(DesignError::BindingSetup {
            reason: format!("{} has no slot named {name:?}", std::any::type_name::<Self>()),
        })
    }
}

// ── Common ────────────────────────────────────────────────────────────────

/// State every component carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Common {
    pub id: Option<String>,
    pub caption: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
    pub description: Option<String>,
    pub enabled: bool,
    pub visible: bool,
}

impl Default for Common {
    fn default() -> Self {
        Self {
            id: None,
            caption: None,
            width: None,
            height: None,
            description: None,
            enabled: true,
            visible: true,
        }
    }
}

impl Common {
    pub fn read_design(&mut self, attrs: &Attributes) -> Result<(), DesignError> {
        if let Some(v) = attrs.get("width") {
            self.width = non_empty(v);
        }
        if let Some(v) = attrs.get("height") {
            self.height = non_empty(v);
        }
        if let Some(v) = attrs.get("description") {
            self.description = non_empty(v);
        }
        if let Some(v) = read_bool(attrs, "enabled")? {
            self.enabled = v;
        }
        if let Some(v) = read_bool(attrs, "visible")? {
            self.visible = v;
        }
        Ok(())
    }

    pub fn write_design(&self, attrs: &mut Attributes) {
        if let Some(v) = &self.width {
            attrs.set("width", v.as_str());
        }
        if let Some(v) = &self.height {
            attrs.set("height", v.as_str());
        }
        if let Some(v) = &self.description {
            attrs.set("description", v.as_str());
        }
        write_bool(attrs, "enabled", self.enabled, true);
        write_bool(attrs, "visible", self.visible, true);
    }
}

// ── Attribute helpers ─────────────────────────────────────────────────────

fn non_empty(v: &str) -> Option<String> {
    if v.is_empty() { None } else { Some(v.to_owned()) }
}

/// Read a boolean attribute. A bare attribute (`checked`) and `"true"` mean
/// true, `"false"` means false.
pub fn read_bool(attrs: &Attributes, name: &str) -> Result<Option<bool>, DesignError> {
    match attrs.get(name) {
        None => Ok(None),
        Some("") | Some("true") => Ok(Some(true)),
        Some("false") => Ok(Some(false)),
        Some(other) => Err(DesignError::invalid_attribute(name, other, "expected true or false")),
    }
}

/// Write a boolean attribute only when it differs from `default`.
pub fn write_bool(attrs: &mut Attributes, name: &str, value: bool, default: bool) {
    if value != default {
        attrs.set(name, if value { "" } else { "false" });
    }
}

/// Read an attribute through [`FromStr`].
pub fn read_parsed<T>(attrs: &Attributes, name: &str) -> Result<Option<T>, DesignError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match attrs.get(name) {
        None => Ok(None),
        Some(v) => v
            .parse::<T>()
            .map(Some)
            .map_err(|e| DesignError::invalid_attribute(name, v, e.to_string())),
    }
}

// ── ComponentRef ──────────────────────────────────────────────────────────

/// Shared handle to a component in a design tree.
///
/// Parents hold their children through handles, and root slots hold handles
/// to the same components, so a bound slot and the tree always agree.
#[derive(Clone)]
pub struct ComponentRef(Rc<RefCell<Box<dyn Component>>>);

impl ComponentRef {
    pub fn new<C: Component>(component: C) -> Self {
        Self::from_box(Box::new(component))
    }

    pub fn from_box(component: Box<dyn Component>) -> Self {
        Self(Rc::new(RefCell::new(component)))
    }

    /// Panics if the component is mutably borrowed.
    pub fn borrow(&self) -> Ref<'_, dyn Component + 'static> {
        Ref::map(self.0.borrow(), |b| &**b)
    }

    /// Panics if the component is already borrowed.
    pub fn borrow_mut(&self) -> RefMut<'_, dyn Component + 'static> {
        RefMut::map(self.0.borrow_mut(), |b| &mut **b)
    }

    pub fn downcast_ref<T: Component>(&self) -> Option<Ref<'_, T>> {
        Ref::filter_map(self.borrow(), |c| c.as_any().downcast_ref::<T>()).ok()
    }

    pub fn downcast_mut<T: Component>(&self) -> Option<RefMut<'_, T>> {
        RefMut::filter_map(self.borrow_mut(), |c| c.as_any_mut().downcast_mut::<T>()).ok()
    }

    pub fn is<T: Component>(&self) -> bool {
        self.concrete_type() == TypeId::of::<T>()
    }

    /// `TypeId` of the component behind the handle.
    pub fn concrete_type(&self) -> TypeId {
        let c = self.borrow();
        let c: &dyn Component = &*c;
        c.as_any().type_id()
    }

    pub fn type_name(&self) -> &'static str {
        let c = self.borrow();
        let c: &dyn Component = &*c;
        c.type_name()
    }

    pub fn ptr_eq(&self, other: &ComponentRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn id(&self) -> Option<String> {
        self.borrow().common().id.clone()
    }

    pub fn caption(&self) -> Option<String> {
        self.borrow().common().caption.clone()
    }

    /// Snapshot of the child handles.
    pub fn children(&self) -> Vec<ComponentRef> {
        self.borrow().children().to_vec()
    }

    /// Address-based key, stable while any handle is alive.
    pub(crate) fn key(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }
}

impl<C: Component> From<C> for ComponentRef {
    fn from(component: C) -> Self {
        Self::new(component)
    }
}

impl fmt::Debug for ComponentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(c) => {
                let c: &dyn Component = &**c;
                f.debug_struct("ComponentRef")
                    .field("type", &c.type_name())
                    .field("id", &c.common().id)
                    .field("children", &c.children().len())
                    .finish()
            }
            Err(_) => f.write_str("ComponentRef(<borrowed>)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{button::Button, label::Label};

    #[test]
    fn downcast_to_concrete_type() {
        let r = ComponentRef::new(Label::new("hi"));
        assert!(r.is::<Label>());
        assert!(!r.is::<Button>());
        assert_eq!(r.downcast_ref::<Label>().unwrap().value(), "hi");
        assert!(r.downcast_ref::<Button>().is_none());
    }

    #[test]
    fn handles_share_state() {
        let a = ComponentRef::new(Button::default());
        let b = a.clone();
        b.borrow_mut().common_mut().caption = Some("Go".into());
        assert!(a.ptr_eq(&b));
        assert_eq!(a.caption().as_deref(), Some("Go"));
    }

    #[test]
    fn default_bind_slot_names_the_type() {
        let mut label = Label::default();
        let err = label.bind_slot("title", ComponentRef::new(Button::default())).unwrap_err();
        assert!(matches!(err, DesignError::BindingSetup { reason } if reason.contains("Label") && reason.contains("title")));
    }

    #[test]
    fn read_bool_accepts_bare_attribute() {
        let attrs: Attributes = [("enabled", ""), ("visible", "false")].into_iter().collect();
        assert_eq!(read_bool(&attrs, "enabled").unwrap(), Some(true));
        assert_eq!(read_bool(&attrs, "visible").unwrap(), Some(false));
        assert_eq!(read_bool(&attrs, "missing").unwrap(), None);
    }

    #[test]
    fn read_bool_rejects_garbage() {
        let attrs: Attributes = [("enabled", "maybe")].into_iter().collect();
        assert!(matches!(read_bool(&attrs, "enabled"), Err(DesignError::InvalidAttribute { .. })));
    }

    #[test]
    fn common_writes_only_non_defaults() {
        let mut common = Common::default();
        let mut attrs = Attributes::new();
        common.write_design(&mut attrs);
        assert!(attrs.is_empty());

        common.width = Some("100%".into());
        common.enabled = false;
        common.write_design(&mut attrs);
        let written: Vec<_> = attrs.iter().collect();
        assert_eq!(written, [("width", "100%"), ("enabled", "false")]);
    }

    #[test]
    fn common_round_trips_through_attributes() {
        let mut original = Common::default();
        original.height = Some("40px".into());
        original.description = Some("tip".into());
        original.visible = false;
        let mut attrs = Attributes::new();
        original.write_design(&mut attrs);

        let mut read = Common::default();
        read.read_design(&attrs).unwrap();
        assert_eq!(read, original);
    }
}
