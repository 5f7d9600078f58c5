//! Weave declarative designs: component trees ↔ HTML markup.
//!
//! A design is an HTML document whose `<body>` holds exactly one component
//! element. Component tags are `<prefix>-<kebab-type-name>`; the `v` prefix
//! names the built-in `weave.ui` package, other prefixes are declared on
//! `<html>` or `<body>` as `xmlns:<prefix>="<package>"`.
//!
//! ```html
//! <!DOCTYPE html>
//! <html xmlns:ex="com.example">
//!     <body>
//!         <ex-login-form>
//!             <v-text-field _id="user_name" placeholder="User"></v-text-field>
//!             <v-button _id="login" caption="Log in"></v-button>
//!         </ex-login-form>
//!     </body>
//! </html>
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use weave_design::prelude::*;
//!
//! let design = Design::new(ComponentRegistry::with_builtins());
//! let root = design
//!     .read_str(r#"<v-horizontal-layout spacing>
//!                     <v-label>Name</v-label>
//!                     <v-text-field id="name"></v-text-field>
//!                  </v-horizontal-layout>"#)
//!     .unwrap();
//! assert_eq!(root.children().len(), 2);
//! assert_eq!(root.children()[1].id().as_deref(), Some("name"));
//! ```
//!
//! # Binding into a root instance
//!
//! Pass your own root component to [`Design::read_into`]; components whose
//! local id (`_id`), id or caption names one of its [`SlotSchema`] slots are
//! stored there. See [`binder`] for a complete root type.
//!
//! # Custom components
//!
//! Implement [`Component`] and register the type under a package with
//! [`ComponentRegistry::register`].

pub mod binder;
pub mod component;
pub mod components;
pub mod config;
pub mod context;
pub mod design;
pub mod error;
pub mod logging;
pub mod prefix;
pub mod registry;
pub mod sync;

pub use binder::{FieldBinder, SlotSchema};
pub use component::{Common, Component, ComponentRef};
pub use config::DesignConfig;
pub use context::DesignContext;
pub use design::Design;
pub use error::DesignError;
pub use registry::{ComponentRegistry, ComponentType};

/// Everything needed to read, write and extend designs.
pub mod prelude {
    pub use crate::binder::{SlotSchema, SlotType};
    pub use crate::component::{read_bool, read_parsed, write_bool, Common, Component, ComponentRef};
    pub use crate::components::{
        button::Button,
        check_box::CheckBox,
        label::Label,
        layout::{HorizontalLayout, VerticalLayout},
        panel::Panel,
        text_field::TextField,
    };
    pub use crate::config::{DesignConfig, IdentityAttributes};
    pub use crate::context::{CreationEvent, DesignContext, ListenerId};
    pub use crate::design::Design;
    pub use crate::error::DesignError;
    pub use crate::logging::{init_logging, LoggingConfig};
    pub use crate::registry::{ComponentRegistry, ComponentType};

    pub use weave_markup::{Attributes, SerializeOptions, Syntax};
}
