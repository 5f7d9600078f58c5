//! Component types known to a design pass.
//!
//! Tags map to types through `(package, TypeName)`: the tag prefix selects the
//! package via the [`PrefixTable`](crate::prefix::PrefixTable) and the rest of
//! the tag is the kebab-case type name.

use std::any::TypeId;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::component::Component;
use crate::components::{
    button::Button,
    check_box::CheckBox,
    label::Label,
    layout::{HorizontalLayout, VerticalLayout},
    panel::Panel,
    text_field::TextField,
};
use crate::config::DEFAULT_PACKAGE;

// ── ComponentType ─────────────────────────────────────────────────────────

/// Descriptor of one instantiable component type.
#[derive(Debug, Clone)]
pub struct ComponentType {
    type_id: TypeId,
    rust_name: &'static str,
    package: String,
    name: String,
    factory: fn() -> Box<dyn Component>,
    extends: Vec<TypeId>,
    resource_dir: Option<PathBuf>,
}

fn instantiate<C: Component + Default>() -> Box<dyn Component> {
    Box::new(C::default())
}

impl ComponentType {
    /// Describe `C` as `package.name`. `name` must be PascalCase ASCII.
    pub fn of<C: Component + Default>(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_id: TypeId::of::<C>(),
            rust_name: std::any::type_name::<C>(),
            package: package.into(),
            name: name.into(),
            factory: instantiate::<C>,
            extends: Vec::new(),
            resource_dir: None,
        }
    }

    /// Declare that `C` may stand in wherever `P` is expected.
    pub fn extends<P: Component>(mut self) -> Self {
        self.extends.push(TypeId::of::<P>());
        self
    }

    /// Directory holding named designs for this type.
    pub fn resource_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.resource_dir = Some(dir.into());
        self
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn rust_name(&self) -> &'static str {
        self.rust_name
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `package.Name`, used in messages.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.package, self.name)
    }

    pub fn resources(&self) -> Option<&Path> {
        self.resource_dir.as_deref()
    }

    pub fn instantiate(&self) -> Box<dyn Component> {
        (self.factory)()
    }
}

// ── ComponentRegistry ─────────────────────────────────────────────────────

/// Registry of component types, built once and shared by every pass.
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    types: Vec<ComponentType>,
    by_name: HashMap<(String, String), usize>,
    by_type: HashMap<TypeId, usize>,
}

impl ComponentRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in components of the `weave.ui` package.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry
            .register(ComponentType::of::<Label>(DEFAULT_PACKAGE, "Label"))
            .register(ComponentType::of::<Button>(DEFAULT_PACKAGE, "Button"))
            .register(ComponentType::of::<TextField>(DEFAULT_PACKAGE, "TextField"))
            .register(ComponentType::of::<CheckBox>(DEFAULT_PACKAGE, "CheckBox"))
            .register(ComponentType::of::<Panel>(DEFAULT_PACKAGE, "Panel"))
            .register(ComponentType::of::<VerticalLayout>(DEFAULT_PACKAGE, "VerticalLayout"))
            .register(ComponentType::of::<HorizontalLayout>(DEFAULT_PACKAGE, "HorizontalLayout"));
        registry
    }

    /// Add a type. Re-registering a Rust type or a `package.Name` replaces the
    /// earlier entry.
    ///
    /// # Panics
    /// If the type name is not PascalCase ASCII; such a name has no tag form.
    pub fn register(&mut self, ty: ComponentType) -> &mut Self {
        assert!(
            is_type_name(&ty.name),
            "component type name {:?} must be PascalCase ASCII alphanumerics",
            ty.name
        );
        let key = (ty.package.clone(), ty.name.clone());
        let existing = self.by_type.get(&ty.type_id).or_else(|| self.by_name.get(&key)).copied();
        match existing {
            Some(idx) => {
                log::warn!("replacing component type {} with {}", self.types[idx].qualified_name(), ty.qualified_name());
                let old = &self.types[idx];
                self.by_name.remove(&(old.package.clone(), old.name.clone()));
                self.by_type.remove(&old.type_id);
                self.by_name.insert(key, idx);
                self.by_type.insert(ty.type_id, idx);
                self.types[idx] = ty;
            }
            None => {
                let idx = self.types.len();
                self.by_name.insert(key, idx);
                self.by_type.insert(ty.type_id, idx);
                self.types.push(ty);
            }
        }
        self
    }

    pub fn lookup(&self, package: &str, name: &str) -> Option<&ComponentType> {
        self.by_name.get(&(package.to_owned(), name.to_owned())).map(|&i| &self.types[i])
    }

    pub fn get(&self, type_id: TypeId) -> Option<&ComponentType> {
        self.by_type.get(&type_id).map(|&i| &self.types[i])
    }

    pub fn get_of<C: Component>(&self) -> Option<&ComponentType> {
        self.get(TypeId::of::<C>())
    }

    /// Whether a component of type `from` can fill a place typed `to`.
    /// Reflexive and transitive over declared [`ComponentType::extends`].
    pub fn is_assignable(&self, from: TypeId, to: TypeId) -> bool {
        let mut stack = vec![from];
        let mut seen = HashSet::new();
        while let Some(t) = stack.pop() {
            if t == to {
                return true;
            }
            if seen.insert(t) {
                if let Some(ty) = self.get(t) {
                    stack.extend(ty.extends.iter().copied());
                }
            }
        }
        false
    }

    /// Qualified name of a type for messages, falling back to `fallback`.
    pub fn describe(&self, type_id: TypeId, fallback: &str) -> String {
        self.get(type_id).map(ComponentType::qualified_name).unwrap_or_else(|| fallback.to_owned())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ComponentType> {
        self.types.iter()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

// ── Tag names ─────────────────────────────────────────────────────────────

fn is_type_name(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
        && name.chars().all(|c| c.is_ascii_alphanumeric())
}

/// `("v", "VerticalLayout")` → `"v-vertical-layout"`.
pub fn tag_name(prefix: &str, type_name: &str) -> String {
    let mut tag = String::with_capacity(prefix.len() + type_name.len() + 4);
    tag.push_str(prefix);
    for c in type_name.chars() {
        if c.is_ascii_uppercase() {
            tag.push('-');
            tag.push(c.to_ascii_lowercase());
        } else {
            tag.push(c);
        }
    }
    tag
}

/// `"v-vertical-layout"` → `("v", "VerticalLayout")`.
pub fn split_tag(tag: &str) -> Option<(&str, String)> {
    let (prefix, rest) = tag.split_once('-')?;
    if prefix.is_empty() || rest.is_empty() {
        return None;
    }
    let mut name = String::with_capacity(rest.len());
    for segment in rest.split('-') {
        let mut chars = segment.chars();
        let first = chars.next()?;
        name.push(first.to_ascii_uppercase());
        name.extend(chars);
    }
    is_type_name(&name).then_some((prefix, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Common;

    #[derive(Default)]
    struct Fancy {
        common: Common,
    }

    impl Component for Fancy {
        fn common(&self) -> &Common {
            &self.common
        }
        fn common_mut(&mut self) -> &mut Common {
            &mut self.common
        }
    }

    #[derive(Default)]
    struct Fancier {
        common: Common,
    }

    impl Component for Fancier {
        fn common(&self) -> &Common {
            &self.common
        }
        fn common_mut(&mut self) -> &mut Common {
            &mut self.common
        }
    }

    // ── tags ──────────────────────────────────────────────────────────────

    #[test]
    fn tag_from_type_name() {
        assert_eq!(tag_name("v", "VerticalLayout"), "v-vertical-layout");
        assert_eq!(tag_name("my", "Panel2"), "my-panel2");
    }

    #[test]
    fn split_tag_into_prefix_and_name() {
        assert_eq!(split_tag("v-text-field"), Some(("v", "TextField".to_owned())));
        assert_eq!(split_tag("com_example-html-view"), Some(("com_example", "HtmlView".to_owned())));
    }

    #[test]
    fn split_tag_rejects_plain_html() {
        assert_eq!(split_tag("div"), None);
        assert_eq!(split_tag("v-"), None);
        assert_eq!(split_tag("-button"), None);
        assert_eq!(split_tag("v--button"), None);
    }

    #[test]
    fn acronyms_round_trip() {
        let tag = tag_name("v", "HTMLView");
        assert_eq!(split_tag(&tag), Some(("v", "HTMLView".to_owned())));
    }

    // ── registry ──────────────────────────────────────────────────────────

    #[test]
    fn builtins_are_registered() {
        let r = ComponentRegistry::with_builtins();
        assert_eq!(r.len(), 7);
        let ty = r.lookup(DEFAULT_PACKAGE, "VerticalLayout").unwrap();
        assert_eq!(ty.type_id(), TypeId::of::<VerticalLayout>());
        let instance = ty.instantiate();
        let instance: &dyn Component = &*instance;
        assert!(instance.as_any().is::<VerticalLayout>());
    }

    #[test]
    fn assignability_follows_extends() {
        let mut r = ComponentRegistry::new();
        r.register(ComponentType::of::<Fancy>("x", "Fancy"))
            .register(ComponentType::of::<Fancier>("x", "Fancier").extends::<Fancy>());
        let (fancy, fancier) = (TypeId::of::<Fancy>(), TypeId::of::<Fancier>());
        assert!(r.is_assignable(fancier, fancy));
        assert!(r.is_assignable(fancy, fancy));
        assert!(!r.is_assignable(fancy, fancier));
    }

    #[test]
    fn re_register_replaces_entry() {
        let mut r = ComponentRegistry::new();
        r.register(ComponentType::of::<Fancy>("x", "Fancy"));
        r.register(ComponentType::of::<Fancy>("y", "Fancy"));
        assert_eq!(r.len(), 1);
        assert!(r.lookup("x", "Fancy").is_none());
        assert_eq!(r.get_of::<Fancy>().unwrap().package(), "y");
    }

    #[test]
    #[should_panic]
    fn snake_case_name_is_rejected() {
        ComponentRegistry::new().register(ComponentType::of::<Fancy>("x", "fancy_thing"));
    }
}
