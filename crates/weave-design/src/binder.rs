//! Binding of designed components into the named slots of a root instance.
//!
//! A root type lists its slots explicitly through [`Component::slots`]:
//!
//! ```rust
//! use weave_design::prelude::*;
//!
//! #[derive(Default)]
//! pub struct LoginForm {
//!     layout: VerticalLayout,
//!     user_name: Option<ComponentRef>,
//!     login: Option<ComponentRef>,
//! }
//!
//! impl Component for LoginForm {
//!     fn common(&self) -> &Common { self.layout.common() }
//!     fn common_mut(&mut self) -> &mut Common { self.layout.common_mut() }
//!     fn max_children(&self) -> Option<usize> { None }
//!     fn children(&self) -> &[ComponentRef] { self.layout.children() }
//!     fn add_child(&mut self, child: ComponentRef) { self.layout.add_child(child) }
//!     fn remove_all_children(&mut self) { self.layout.remove_all_children() }
//!
//!     fn slots(&self) -> Option<SlotSchema> {
//!         Some(SlotSchema::new()
//!             .slot::<TextField>("user_name", &self.user_name)
//!             .slot::<Button>("login", &self.login))
//!     }
//!
//!     fn bind_slot(&mut self, name: &str, component: ComponentRef) -> Result<(), DesignError> {
//!         match name {
//!             "user_name" => self.user_name = Some(component),
//!             "login" => self.login = Some(component),
//!             _ => unreachable!("only declared slots are bound"),
//!         }
//!         Ok(())
//!     }
//! }
//! ```

use std::any::TypeId;
use std::collections::HashSet;

use crate::component::{Component, ComponentRef};
use crate::error::DesignError;
use crate::registry::ComponentRegistry;

// ── Slot schema ───────────────────────────────────────────────────────────

/// Declared type of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotType {
    /// Accepts any component.
    Any,
    /// Accepts components assignable to this type.
    Component { type_id: TypeId, rust_name: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub name: String,
    pub ty: SlotType,
    /// Already holds a component; bound slots are never matched.
    pub bound: bool,
}

/// The component slots a root type exposes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotSchema {
    slots: Vec<Slot>,
}

impl SlotSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// A slot holding a `T` (or a registered subtype of `T`).
    pub fn slot<T: Component>(mut self, name: impl Into<String>, current: &Option<ComponentRef>) -> Self {
        self.slots.push(Slot {
            name: name.into(),
            ty: SlotType::Component { type_id: TypeId::of::<T>(), rust_name: std::any::type_name::<T>() },
            bound: current.is_some(),
        });
        self
    }

    /// A slot holding any component.
    pub fn any_slot(mut self, name: impl Into<String>, current: &Option<ComponentRef>) -> Self {
        self.slots.push(Slot { name: name.into(), ty: SlotType::Any, bound: current.is_some() });
        self
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }
}

// ── FieldBinder ───────────────────────────────────────────────────────────

/// Matches components against the unbound slots of a root instance.
pub struct FieldBinder<'r> {
    registry: &'r ComponentRegistry,
    root: ComponentRef,
    pending: Vec<(String, SlotType)>,
}

impl<'r> FieldBinder<'r> {
    /// Validate the root's slot schema and collect its unbound slots.
    pub fn new(registry: &'r ComponentRegistry, root: &ComponentRef) -> Result<Self, DesignError> {
        let schema = root.borrow().slots().unwrap_or_default();
        let mut names = HashSet::new();
        let mut pending = Vec::new();
        for slot in schema.slots {
            if !names.insert(slot.name.clone()) {
                return Err(DesignError::BindingSetup {
                    reason: format!("slot {:?} is declared more than once", slot.name),
                });
            }
            if let SlotType::Component { type_id, rust_name } = slot.ty {
                if registry.get(type_id).is_none() {
                    return Err(DesignError::BindingSetup {
                        reason: format!("slot {:?} has unregistered component type {rust_name}", slot.name),
                    });
                }
            }
            if !slot.bound {
                pending.push((slot.name, slot.ty));
            }
        }
        log::debug!("binding {} unbound slot(s) of {}", pending.len(), root.type_name());
        Ok(Self { registry, root: root.clone(), pending })
    }

    /// Bind `component` to the pending slot named by its local id, id or
    /// caption, tried in that order. Returns whether a slot was bound.
    ///
    /// Components without a matching slot are left alone; the root itself is
    /// never bound.
    pub fn bind_field(&mut self, component: &ComponentRef, local_id: Option<&str>) -> Result<bool, DesignError> {
        if component.ptr_eq(&self.root) {
            return Ok(false);
        }
        let candidates = [
            local_id.map(str::to_owned),
            component.id(),
            component.caption().map(|c| to_identifier(&c)),
        ];
        for name in candidates.into_iter().flatten().filter(|n| !n.is_empty()) {
            if self.bind_by_name(&name, component)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn bind_by_name(&mut self, name: &str, component: &ComponentRef) -> Result<bool, DesignError> {
        let Some(idx) = self.pending.iter().position(|(n, _)| n == name) else {
            return Ok(false);
        };
        if let SlotType::Component { type_id, rust_name } = self.pending[idx].1 {
            let found = component.concrete_type();
            if !self.registry.is_assignable(found, type_id) {
                return Err(DesignError::BindingTypeMismatch {
                    slot: name.to_owned(),
                    expected: self.registry.describe(type_id, rust_name),
                    found: self.registry.describe(found, component.type_name()),
                });
            }
        }
        self.root.borrow_mut().bind_slot(name, component.clone())?;
        self.pending.remove(idx);
        log::trace!("bound slot {name:?} to {}", component.type_name());
        Ok(true)
    }

    /// Names of slots not yet bound, in declaration order.
    pub fn unbound_fields(&self) -> Vec<String> {
        self.pending.iter().map(|(n, _)| n.clone()).collect()
    }
}

/// Slot-name form of a caption: `"Save & Close"` → `"save_close"`.
pub fn to_identifier(caption: &str) -> String {
    let mut out = String::with_capacity(caption.len());
    let mut gap = false;
    for c in caption.chars() {
        if c.is_alphanumeric() {
            if gap && !out.is_empty() {
                out.push('_');
            }
            gap = false;
            out.extend(c.to_lowercase());
        } else {
            gap = true;
        }
    }
    out
}
