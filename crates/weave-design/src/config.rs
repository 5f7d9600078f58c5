use std::path::PathBuf;

use weave_markup::SerializeOptions;

/// Package of the built-in components, bound to [`DEFAULT_PREFIX`].
pub const DEFAULT_PACKAGE: &str = "weave.ui";
/// Tag prefix implicitly declared for [`DEFAULT_PACKAGE`].
pub const DEFAULT_PREFIX: &str = "v";

/// Reserved attribute names carrying component identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityAttributes {
    /// Global id, unique within a document.
    pub id: String,
    /// Id unique among siblings; used to bind components to root slots.
    pub local_id: String,
    pub caption: String,
}

impl Default for IdentityAttributes {
    fn default() -> Self {
        Self { id: "id".into(), local_id: "_id".into(), caption: "caption".into() }
    }
}

/// Settings shared by every read and write of a [`Design`](crate::Design).
#[derive(Debug, Clone)]
pub struct DesignConfig {
    pub identity: IdentityAttributes,
    /// Attribute-name prefix of package declarations: `xmlns:my="com.example"`.
    pub prefix_attribute: String,
    pub default_prefix: String,
    pub default_package: String,
    /// Base directory for named designs of types without their own resource
    /// directory. The package path (`.` → `/`) is appended.
    pub resource_root: PathBuf,
    pub output: SerializeOptions,
}

impl Default for DesignConfig {
    fn default() -> Self {
        Self {
            identity: IdentityAttributes::default(),
            prefix_attribute: "xmlns:".into(),
            default_prefix: DEFAULT_PREFIX.into(),
            default_package: DEFAULT_PACKAGE.into(),
            resource_root: PathBuf::from("."),
            output: SerializeOptions::default(),
        }
    }
}
