use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::rc::Rc;

use weave_markup::{Document, Element};

use crate::component::ComponentRef;
use crate::config::DesignConfig;
use crate::error::DesignError;
use crate::prefix::PrefixTable;
use crate::registry::ComponentRegistry;
use crate::sync::{Synchronized, TreeSynchronizer, TreeWriter};

// ── Creation events ───────────────────────────────────────────────────────

/// Fired once per component materialized while reading a design, after its
/// attributes are applied and before its children are read.
#[derive(Debug, Clone)]
pub struct CreationEvent {
    pub component: ComponentRef,
    pub local_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type CreationListener = Box<dyn FnMut(&CreationEvent)>;

// ── DesignContext ─────────────────────────────────────────────────────────

/// State of one design read or write.
///
/// Holds the root component, the prefix table and the local ids of the
/// components involved. Create a fresh context per pass; the root can only be
/// set once.
pub struct DesignContext {
    registry: Rc<ComponentRegistry>,
    config: Rc<DesignConfig>,
    prefixes: PrefixTable,
    root: Option<ComponentRef>,
    local_ids: HashMap<usize, String>,
    by_local_id: HashMap<String, ComponentRef>,
    listeners: Vec<(ListenerId, CreationListener)>,
    next_listener: u64,
}

impl DesignContext {
    pub fn new(registry: Rc<ComponentRegistry>, config: Rc<DesignConfig>) -> Self {
        let prefixes = PrefixTable::new(config.default_prefix.clone(), config.default_package.clone());
        Self {
            registry,
            config,
            prefixes,
            root: None,
            local_ids: HashMap::new(),
            by_local_id: HashMap::new(),
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    pub fn config(&self) -> &DesignConfig {
        &self.config
    }

    pub fn prefixes(&self) -> &PrefixTable {
        &self.prefixes
    }

    pub fn prefixes_mut(&mut self) -> &mut PrefixTable {
        &mut self.prefixes
    }

    // ── root ──────────────────────────────────────────────────────────────

    /// # Panics
    /// If a root was already set for this pass.
    pub fn set_root(&mut self, root: ComponentRef) {
        assert!(self.root.is_none(), "the root component of a design context can only be set once");
        self.root = Some(root);
    }

    pub fn root(&self) -> Option<&ComponentRef> {
        self.root.as_ref()
    }

    pub fn into_root(self) -> Option<ComponentRef> {
        self.root
    }

    // ── prefixes ──────────────────────────────────────────────────────────

    /// Record the package declarations found on `<html>` and `<body>`.
    pub fn resolve_prefixes(&mut self, doc: &Document) -> Result<(), DesignError> {
        let attr = &self.config.prefix_attribute;
        self.prefixes.read_declarations(&doc.root, attr)?;
        if let Some(body) = doc.body() {
            self.prefixes.read_declarations(body, attr)?;
        }
        Ok(())
    }

    /// Declare on `<html>` the packages of every component type in the root
    /// component's tree.
    pub fn store_prefixes(&mut self, doc: &mut Document) -> Result<(), DesignError> {
        let mut packages = BTreeSet::new();
        if let Some(root) = &self.root {
            collect_packages(&self.registry, root, &mut packages)?;
        }
        self.prefixes.write_declarations(&mut doc.root, &packages, &self.config.prefix_attribute);
        Ok(())
    }

    // ── local ids ─────────────────────────────────────────────────────────

    pub fn local_id(&self, component: &ComponentRef) -> Option<&str> {
        self.local_ids.get(&component.key()).map(String::as_str)
    }

    /// Assign or clear (`None`) the local id written for `component`.
    pub fn set_local_id(&mut self, component: &ComponentRef, local_id: Option<String>) {
        if let Some(old) = self.local_ids.remove(&component.key()) {
            self.by_local_id.remove(&old);
        }
        if let Some(local_id) = local_id.filter(|l| !l.is_empty()) {
            self.by_local_id.insert(local_id.clone(), component.clone());
            self.local_ids.insert(component.key(), local_id);
        }
    }

    pub fn component_by_local_id(&self, local_id: &str) -> Option<ComponentRef> {
        self.by_local_id.get(local_id).cloned()
    }

    /// Search the root's tree in pre-order for a component with `id`.
    pub fn component_by_id(&self, id: &str) -> Option<ComponentRef> {
        self.find(|c| c.id().as_deref() == Some(id))
    }

    /// First component in pre-order whose caption is `caption`.
    pub fn component_by_caption(&self, caption: &str) -> Option<ComponentRef> {
        self.find(|c| c.caption().as_deref() == Some(caption))
    }

    fn find(&self, pred: impl Fn(&ComponentRef) -> bool) -> Option<ComponentRef> {
        let mut stack = vec![self.root.clone()?];
        while let Some(c) = stack.pop() {
            if pred(&c) {
                return Some(c);
            }
            stack.extend(c.children().into_iter().rev());
        }
        None
    }

    // ── creation listeners ────────────────────────────────────────────────

    pub fn register_creation_listener(&mut self, listener: impl FnMut(&CreationEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns whether the listener was registered.
    pub fn unregister_creation_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(l, _)| *l != id);
        self.listeners.len() != before
    }

    /// Run `f` with `listener` registered; it is removed afterwards whatever
    /// `f` returns.
    pub fn with_creation_listener<R>(
        &mut self,
        listener: impl FnMut(&CreationEvent) + 'static,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        let id = self.register_creation_listener(listener);
        let out = f(self);
        self.unregister_creation_listener(id);
        out
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    // ── tree translation ──────────────────────────────────────────────────

    /// Materialize `element` into `instance` (or a new component), firing the
    /// creation listeners, and record every local id found.
    pub fn synchronize(
        &mut self,
        instance: Option<ComponentRef>,
        element: &Element,
    ) -> Result<Synchronized, DesignError> {
        let listeners = &mut self.listeners;
        let mut fire = |event: &CreationEvent| {
            for (_, listener) in listeners.iter_mut() {
                listener(event);
            }
        };
        let synced = TreeSynchronizer::new(&self.registry, &self.prefixes, &self.config.identity, &mut fire)
            .synchronize(instance, element)?;

        for created in &synced.created {
            if let Some(local_id) = &created.local_id {
                self.set_local_id(&created.component, Some(local_id.clone()));
            }
        }
        Ok(synced)
    }

    /// Markup element for `component` and its subtree.
    pub fn create_node(&self, component: &ComponentRef) -> Result<Element, DesignError> {
        TreeWriter::new(&self.registry, &self.prefixes, &self.config.identity, &self.local_ids).create_node(component)
    }
}

impl fmt::Debug for DesignContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DesignContext")
            .field("root", &self.root)
            .field("prefixes", &self.prefixes)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

fn collect_packages(
    registry: &ComponentRegistry,
    component: &ComponentRef,
    out: &mut BTreeSet<String>,
) -> Result<(), DesignError> {
    let ty = registry
        .get(component.concrete_type())
        .ok_or_else(|| DesignError::UnknownComponentType { name: component.type_name().to_owned() })?;
    if !out.contains(ty.package()) {
        out.insert(ty.package().to_owned());
    }
    for child in component.children() {
        collect_packages(registry, &child, out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::components::{button::Button, label::Label, layout::VerticalLayout};

    fn context() -> DesignContext {
        DesignContext::new(Rc::new(ComponentRegistry::with_builtins()), Rc::new(DesignConfig::default()))
    }

    fn tree() -> (ComponentRef, ComponentRef, ComponentRef) {
        let ok = ComponentRef::new(Button::new("OK"));
        let name = ComponentRef::new(Label::new("Name"));
        name.borrow_mut().common_mut().id = Some("name-label".into());
        let root = ComponentRef::new(VerticalLayout::new().child(name.clone()).child(ok.clone()));
        (root, name, ok)
    }

    #[test]
    #[should_panic(expected = "only be set once")]
    fn root_can_only_be_set_once() {
        let mut ctx = context();
        let (root, _, _) = tree();
        ctx.set_root(root.clone());
        ctx.set_root(root);
    }

    #[test]
    fn finds_components_by_identity() {
        let mut ctx = context();
        let (root, name, ok) = tree();
        ctx.set_root(root);
        ctx.set_local_id(&ok, Some("ok_button".into()));
        assert!(ctx.component_by_local_id("ok_button").unwrap().ptr_eq(&ok));
        assert!(ctx.component_by_id("name-label").unwrap().ptr_eq(&name));
        assert!(ctx.component_by_caption("OK").unwrap().ptr_eq(&ok));
        assert!(ctx.component_by_id("missing").is_none());
    }

    #[test]
    fn clearing_local_id_forgets_component() {
        let mut ctx = context();
        let (_, _, ok) = tree();
        ctx.set_local_id(&ok, Some("ok".into()));
        ctx.set_local_id(&ok, None);
        assert_eq!(ctx.local_id(&ok), None);
        assert!(ctx.component_by_local_id("ok").is_none());
    }

    #[test]
    fn listeners_fire_in_registration_order() {
        let mut ctx = context();
        let log = Rc::new(RefCell::new(Vec::new()));
        let (a, b) = (Rc::clone(&log), Rc::clone(&log));
        ctx.register_creation_listener(move |_| a.borrow_mut().push("first"));
        let second = ctx.register_creation_listener(move |_| b.borrow_mut().push("second"));

        let el = Element::new("v-button");
        ctx.synchronize(None, &el).unwrap();
        assert_eq!(*log.borrow(), ["first", "second"]);

        assert!(ctx.unregister_creation_listener(second));
        assert!(!ctx.unregister_creation_listener(second));
        ctx.synchronize(None, &el).unwrap();
        assert_eq!(*log.borrow(), ["first", "second", "first"]);
    }

    #[test]
    fn scoped_listener_is_removed_after_failure() {
        let mut ctx = context();
        let result = ctx.with_creation_listener(|_| {}, |ctx| ctx.synchronize(None, &Element::new("v-nope")));
        assert!(matches!(result, Err(DesignError::UnknownComponentType { .. })));
        assert_eq!(ctx.listener_count(), 0);
    }

    #[test]
    fn debug_output_names_root_and_listener_count() {
        let mut ctx = context();
        ctx.register_creation_listener(|_| {});
        ctx.set_root(ComponentRef::new(Button::new("OK")));
        let out = format!("{ctx:?}");
        assert!(out.starts_with("DesignContext"));
        assert!(out.contains("listeners: 1"));
        assert!(out.contains("Button"));
    }

    #[test]
    fn store_prefixes_skips_default_package() {
        let mut ctx = context();
        let (root, _, _) = tree();
        ctx.set_root(root);
        let mut doc = Document::skeleton();
        ctx.store_prefixes(&mut doc).unwrap();
        assert!(doc.root.attrs.is_empty());
    }
}
