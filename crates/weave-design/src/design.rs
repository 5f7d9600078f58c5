//! Read and write entry points.
//!
//! [`Design`] ties the pieces together: the markup engine turns text into a
//! [`Document`], the [`DesignContext`] synchronizes its single body element
//! into components, and the [`FieldBinder`] fills the slots of a caller's root
//! instance from what was created. Writing runs the same pieces backwards.

use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::PathBuf;
use std::rc::Rc;

use weave_markup::{parse_bytes, parse_str, serialize, Document, Element, Node};

use crate::binder::FieldBinder;
use crate::component::ComponentRef;
use crate::config::DesignConfig;
use crate::context::DesignContext;
use crate::error::DesignError;
use crate::registry::ComponentRegistry;

/// Design reader and writer over one component registry.
///
/// `Design` holds no per-call state; every call uses a fresh
/// [`DesignContext`] unless one is passed in.
///
/// # Example
/// ```rust
/// use weave_design::prelude::*;
///
/// let design = Design::new(ComponentRegistry::with_builtins());
/// let root = design.read_str(r#"<v-vertical-layout><v-button caption="OK"></v-button></v-vertical-layout>"#).unwrap();
/// assert_eq!(root.children()[0].caption().as_deref(), Some("OK"));
///
/// let html = design.write_string(&root).unwrap();
/// assert!(html.contains(r#"<v-button caption="OK"></v-button>"#));
/// ```
#[derive(Debug, Clone)]
pub struct Design {
    registry: Rc<ComponentRegistry>,
    config: Rc<DesignConfig>,
}

impl Design {
    pub fn new(registry: ComponentRegistry) -> Self {
        Self::with_config(registry, DesignConfig::default())
    }

    pub fn with_config(registry: ComponentRegistry, config: DesignConfig) -> Self {
        Self { registry: Rc::new(registry), config: Rc::new(config) }
    }

    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    pub fn config(&self) -> &DesignConfig {
        &self.config
    }

    /// An empty context sharing this design's registry and config.
    pub fn new_context(&self) -> DesignContext {
        DesignContext::new(Rc::clone(&self.registry), Rc::clone(&self.config))
    }

    // ── reading ───────────────────────────────────────────────────────────

    /// Build a new component tree from markup.
    pub fn read(&self, reader: impl Read) -> Result<ComponentRef, DesignError> {
        let doc = parse_bytes(reader)?;
        let mut ctx = self.new_context();
        self.read_document(&mut ctx, &doc, None)
    }

    pub fn read_str(&self, src: &str) -> Result<ComponentRef, DesignError> {
        let doc = parse_str(src)?;
        let mut ctx = self.new_context();
        self.read_document(&mut ctx, &doc, None)
    }

    /// Read markup into a fresh context, using `root` (if any) as the root
    /// component and binding its slots.
    pub fn read_into(&self, reader: impl Read, root: Option<ComponentRef>) -> Result<DesignContext, DesignError> {
        let doc = parse_bytes(reader)?;
        let mut ctx = self.new_context();
        self.read_document(&mut ctx, &doc, root)?;
        Ok(ctx)
    }

    pub fn read_str_into(&self, src: &str, root: Option<ComponentRef>) -> Result<DesignContext, DesignError> {
        let doc = parse_str(src)?;
        let mut ctx = self.new_context();
        self.read_document(&mut ctx, &doc, root)?;
        Ok(ctx)
    }

    /// Read the design file `name` kept with `root`'s component type.
    ///
    /// The file is looked up in the type's
    /// [`resource_dir`](crate::registry::ComponentType::resource_dir), or else
    /// under the configured resource root in a directory named after the
    /// type's package (`com.example` → `com/example`).
    pub fn read_resource(&self, name: &str, root: ComponentRef) -> Result<DesignContext, DesignError> {
        let path = self.resource_path(name, &root)?;
        log::debug!("reading design resource {}", path.display());
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(DesignError::ResourceNotFound { name: name.to_owned(), path });
            }
            Err(e) => return Err(DesignError::Io(e)),
        };
        self.read_into(BufReader::new(file), Some(root))
    }

    fn resource_path(&self, name: &str, root: &ComponentRef) -> Result<PathBuf, DesignError> {
        let ty = self
            .registry
            .get(root.concrete_type())
            .ok_or_else(|| DesignError::UnknownComponentType { name: root.type_name().to_owned() })?;
        let dir = match ty.resources() {
            Some(dir) => dir.to_path_buf(),
            None => self.config.resource_root.join(ty.package().replace('.', "/")),
        };
        Ok(dir.join(name))
    }

    /// Synchronize the body of `doc` into `ctx` and set the context root.
    ///
    /// With a `root` instance its slots are bound from the created components
    /// in creation order, and every slot must end up bound.
    ///
    /// # Panics
    /// If `ctx` already has a root. The check runs before anything is read,
    /// so `root` is left untouched.
    pub fn read_document(
        &self,
        ctx: &mut DesignContext,
        doc: &Document,
        root: Option<ComponentRef>,
    ) -> Result<ComponentRef, DesignError> {
        assert!(ctx.root().is_none(), "the root component of a design context can only be set once");
        ctx.resolve_prefixes(doc)?;
        let element = single_root(doc)?;

        let mut binder = match &root {
            Some(root) => Some(FieldBinder::new(&self.registry, root)?),
            None => None,
        };

        let synced = ctx.synchronize(root, element)?;

        if let Some(binder) = binder.as_mut() {
            for created in &synced.created {
                binder.bind_field(&created.component, created.local_id.as_deref())?;
            }
            let unbound = binder.unbound_fields();
            if !unbound.is_empty() {
                return Err(DesignError::UnboundFields(unbound));
            }
        }

        log::debug!("read design with {} component(s)", synced.created.len());
        ctx.set_root(synced.root.clone());
        Ok(synced.root)
    }

    // ── writing ───────────────────────────────────────────────────────────

    /// Write `component` and its subtree as a design document.
    pub fn write(&self, component: &ComponentRef, writer: impl Write) -> Result<(), DesignError> {
        let mut ctx = self.new_context();
        ctx.set_root(component.clone());
        self.write_context(&mut ctx, writer)
    }

    /// Write the root of `ctx`, keeping the local ids it records.
    pub fn write_context(&self, ctx: &mut DesignContext, mut writer: impl Write) -> Result<(), DesignError> {
        let doc = self.create_document(ctx)?;
        writer.write_all(serialize(&doc, &self.config.output).as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    pub fn write_string(&self, component: &ComponentRef) -> Result<String, DesignError> {
        let mut ctx = self.new_context();
        ctx.set_root(component.clone());
        let doc = self.create_document(&mut ctx)?;
        Ok(serialize(&doc, &self.config.output))
    }

    /// Document for the root of `ctx`: prefix declarations on `<html>`, the
    /// component tree under `<body>`.
    pub fn create_document(&self, ctx: &mut DesignContext) -> Result<Document, DesignError> {
        let root = ctx.root().cloned().ok_or(DesignError::Structure { found: 0 })?;
        let mut doc = Document::skeleton();
        ctx.store_prefixes(&mut doc)?;
        let node = ctx.create_node(&root)?;
        doc.body_mut().append(node);
        Ok(doc)
    }
}

/// The one component element under `<body>`.
fn single_root(doc: &Document) -> Result<&Element, DesignError> {
    let body = doc.body().ok_or(DesignError::Structure { found: 0 })?;
    if body.children.iter().any(|n| matches!(n, Node::Text(_))) {
        log::warn!("ignoring text directly inside <body>");
    }
    let mut elements = body.child_elements();
    match (elements.next(), elements.count()) {
        (Some(element), 0) => Ok(element),
        (None, _) => Err(DesignError::Structure { found: 0 }),
        (Some(_), rest) => Err(DesignError::Structure { found: rest + 1 }),
    }
}
