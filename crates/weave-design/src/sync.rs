//! Element ↔ component tree translation.
//!
//! [`TreeSynchronizer`] reads: it resolves each element's tag to a component
//! type, applies identity and component attributes, notifies the creation
//! callback and recurses into child elements in document order.
//! [`TreeWriter`] is the inverse walk.

use std::collections::{HashMap, HashSet};

use weave_markup::Element;

use crate::component::ComponentRef;
use crate::config::IdentityAttributes;
use crate::context::CreationEvent;
use crate::error::DesignError;
use crate::prefix::PrefixTable;
use crate::registry::{split_tag, tag_name, ComponentRegistry, ComponentType};

/// A component materialized during a read, with the local id it carried.
#[derive(Debug, Clone)]
pub struct Created {
    pub component: ComponentRef,
    pub local_id: Option<String>,
}

/// Result of a read: the subtree root plus every component in creation
/// (pre-)order, root first.
#[derive(Debug, Clone)]
pub struct Synchronized {
    pub root: ComponentRef,
    pub created: Vec<Created>,
}

// ── Parse direction ───────────────────────────────────────────────────────

pub struct TreeSynchronizer<'a> {
    registry: &'a ComponentRegistry,
    prefixes: &'a PrefixTable,
    identity: &'a IdentityAttributes,
    on_created: &'a mut dyn FnMut(&CreationEvent),
    created: Vec<Created>,
    ids: HashSet<String>,
}

impl<'a> TreeSynchronizer<'a> {
    pub fn new(
        registry: &'a ComponentRegistry,
        prefixes: &'a PrefixTable,
        identity: &'a IdentityAttributes,
        on_created: &'a mut dyn FnMut(&CreationEvent),
    ) -> Self {
        Self { registry, prefixes, identity, on_created, created: Vec::new(), ids: HashSet::new() }
    }

    /// Read `element` into `instance`, or into a new component of the
    /// element's type when `instance` is `None`.
    pub fn synchronize(
        mut self,
        instance: Option<ComponentRef>,
        element: &Element,
    ) -> Result<Synchronized, DesignError> {
        let root = self.sync_element(instance, element)?;
        Ok(Synchronized { root, created: self.created })
    }

    fn sync_element(&mut self, instance: Option<ComponentRef>, element: &Element) -> Result<ComponentRef, DesignError> {
        let ty = self.resolve_tag(&element.tag)?;

        let component = match instance {
            Some(existing) => {
                let found = existing.concrete_type();
                if !self.registry.is_assignable(found, ty.type_id())
                    && !self.registry.is_assignable(ty.type_id(), found)
                {
                    return Err(DesignError::RootTypeMismatch {
                        expected: ty.qualified_name(),
                        found: self.registry.describe(found, existing.type_name()),
                    });
                }
                existing.borrow_mut().remove_all_children();
                existing
            }
            None => ComponentRef::from_box(ty.instantiate()),
        };

        let mut attrs = element.attrs.clone();
        let id = take_identity(&mut attrs, &self.identity.id);
        let local_id = take_identity(&mut attrs, &self.identity.local_id);
        let caption = take_identity(&mut attrs, &self.identity.caption);

        if let Some(id) = &id {
            if !self.ids.insert(id.clone()) {
                return Err(DesignError::DuplicateId { id: id.clone() });
            }
        }

        let content = element.own_text();
        if log::log_enabled!(log::Level::Trace) {
            let keys: Vec<&str> = attrs.keys().collect();
            log::trace!("<{}> applying attributes {keys:?}", element.tag);
        }
        {
            let mut c = component.borrow_mut();
            let common = c.common_mut();
            common.id = id;
            common.caption = caption;
            c.read_design(&attrs, content.as_deref())?;
        }
        log::debug!("<{}> → {} (local id {:?})", element.tag, ty.qualified_name(), local_id);

        (self.on_created)(&CreationEvent { component: component.clone(), local_id: local_id.clone() });
        self.created.push(Created { component: component.clone(), local_id });

        let child_elements: Vec<&Element> = element.child_elements().collect();
        let max_children = component.borrow().max_children();
        if let Some(max) = max_children {
            if child_elements.len() > max {
                return Err(if max == 0 {
                    DesignError::NotAContainer { tag: element.tag.clone() }
                } else {
                    DesignError::TooManyChildren { tag: element.tag.clone(), max }
                });
            }
        }

        let mut sibling_local_ids = HashSet::new();
        for child_element in child_elements {
            if let Some(local_id) = child_element.attrs.get(&self.identity.local_id).filter(|l| !l.is_empty()) {
                if !sibling_local_ids.insert(local_id) {
                    return Err(DesignError::DuplicateLocalId { local_id: local_id.to_owned() });
                }
            }
            let child = self.sync_element(None, child_element)?;
            component.borrow_mut().add_child(child);
        }

        Ok(component)
    }

    fn resolve_tag(&self, tag: &str) -> Result<&'a ComponentType, DesignError> {
        let unknown = || DesignError::UnknownComponentType { name: tag.to_owned() };
        let (prefix, name) = split_tag(tag).ok_or_else(unknown)?;
        let package = self.prefixes.package(prefix).ok_or_else(unknown)?;
        self.registry.lookup(package, &name).ok_or_else(unknown)
    }
}

fn take_identity(attrs: &mut weave_markup::Attributes, key: &str) -> Option<String> {
    attrs.remove(key).filter(|v| !v.is_empty())
}

// ── Serialize direction ───────────────────────────────────────────────────

pub struct TreeWriter<'a> {
    registry: &'a ComponentRegistry,
    prefixes: &'a PrefixTable,
    identity: &'a IdentityAttributes,
    local_ids: &'a HashMap<usize, String>,
}

impl<'a> TreeWriter<'a> {
    pub fn new(
        registry: &'a ComponentRegistry,
        prefixes: &'a PrefixTable,
        identity: &'a IdentityAttributes,
        local_ids: &'a HashMap<usize, String>,
    ) -> Self {
        Self { registry, prefixes, identity, local_ids }
    }

    /// Element for `component`: identity attributes first (id, local id,
    /// caption), then the component's own attributes, then its children in
    /// order.
    pub fn create_node(&self, component: &ComponentRef) -> Result<Element, DesignError> {
        let ty = self
            .registry
            .get(component.concrete_type())
            .ok_or_else(|| DesignError::UnknownComponentType { name: component.type_name().to_owned() })?;
        let prefix = match self.prefixes.prefix(ty.package()) {
            Some(prefix) => prefix.to_owned(),
            None => self.prefixes.clone().ensure_prefix(ty.package()),
        };

        let mut element = Element::new(tag_name(&prefix, ty.name()));
        let children = {
            let c = component.borrow();
            let common = c.common();
            if let Some(id) = common.id.as_deref().filter(|v| !v.is_empty()) {
                element.attrs.set(self.identity.id.as_str(), id);
            }
            if let Some(local_id) = self.local_ids.get(&component.key()) {
                element.attrs.set(self.identity.local_id.as_str(), local_id.as_str());
            }
            if let Some(caption) = common.caption.as_deref().filter(|v| !v.is_empty()) {
                element.attrs.set(self.identity.caption.as_str(), caption);
            }
            c.write_design(&mut element.attrs);
            if let Some(text) = c.design_content().filter(|t| !t.is_empty()) {
                element.append_text(text);
            }
            c.children().to_vec()
        };

        for child in &children {
            element.append(self.create_node(child)?);
        }
        Ok(element)
    }
}
