use std::fmt;
use std::io;
use std::path::PathBuf;

use weave_markup::ParseError;

/// Everything that can abort a design read or write.
///
/// Every variant is fatal to the call that produced it; no partial component
/// tree is ever returned alongside an error.
#[derive(Debug)]
pub enum DesignError {
    /// The input could not be decoded as markup.
    Parse(ParseError),
    /// `<body>` must contain exactly one component element.
    Structure { found: usize },
    /// A tag name or Rust component type has no registry entry.
    UnknownComponentType { name: String },
    /// The caller-supplied root is not compatible with the root element's type.
    RootTypeMismatch { expected: String, found: String },
    /// The root instance's slot schema is unusable.
    BindingSetup { reason: String },
    /// A slot matched by name declares a type the component does not satisfy.
    BindingTypeMismatch { slot: String, expected: String, found: String },
    /// Slots of the root instance left unset after the whole design was read.
    UnboundFields(Vec<String>),
    /// A named design resource does not exist where the root type keeps them.
    ResourceNotFound { name: String, path: PathBuf },
    /// Child elements were given to a component that holds no children.
    NotAContainer { tag: String },
    /// More child elements than a single-child component accepts.
    TooManyChildren { tag: String, max: usize },
    DuplicateId { id: String },
    DuplicateLocalId { local_id: String },
    /// One prefix declared for two different packages.
    PrefixConflict { prefix: String, existing: String, requested: String },
    /// An attribute value a component could not interpret.
    InvalidAttribute { name: String, value: String, reason: String },
    /// Reading a design resource or writing a design failed.
    Io(io::Error),
}

impl DesignError {
    pub(crate) fn invalid_attribute(
        name: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidAttribute { name: name.into(), value: value.into(), reason: reason.into() }
    }
}

impl fmt::Display for DesignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "{e}"),
            Self::Structure { found } => write!(
                f,
                "the first level of a component hierarchy should contain exactly one root component, but found {found}"
            ),
            Self::UnknownComponentType { name } => write!(f, "unknown component type {name:?}"),
            Self::RootTypeMismatch { expected, found } => write!(
                f,
                "root instance of type {found} cannot be used for a design whose root is {expected}"
            ),
            Self::BindingSetup { reason } => {
                write!(f, "could not bind fields of the root component: {reason}")
            }
            Self::BindingTypeMismatch { slot, expected, found } => write!(
                f,
                "field {slot:?} expects {expected} but the design provides {found}"
            ),
            Self::UnboundFields(names) => {
                write!(f, "found unbound fields from component root: [{}]", names.join(", "))
            }
            Self::ResourceNotFound { name, path } => {
                write!(f, "design {name:?} was not found at {}", path.display())
            }
            Self::NotAContainer { tag } => write!(f, "<{tag}> cannot contain child components"),
            Self::TooManyChildren { tag, max } => {
                write!(f, "<{tag}> can contain at most {max} child component(s)")
            }
            Self::DuplicateId { id } => write!(f, "id {id:?} is used by more than one component"),
            Self::DuplicateLocalId { local_id } => {
                write!(f, "local id {local_id:?} is used by more than one sibling")
            }
            Self::PrefixConflict { prefix, existing, requested } => write!(
                f,
                "prefix {prefix:?} is already mapped to {existing:?}, cannot map it to {requested:?}"
            ),
            Self::InvalidAttribute { name, value, reason } => {
                write!(f, "invalid value {value:?} for attribute {name:?}: {reason}")
            }
            Self::Io(e) => write!(f, "design I/O failed: {e}"),
        }
    }
}

impl std::error::Error for DesignError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParseError> for DesignError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<io::Error> for DesignError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structure_message_names_count() {
        let msg = DesignError::Structure { found: 2 }.to_string();
        assert!(msg.ends_with("but found 2"));
    }

    #[test]
    fn unbound_fields_lists_names() {
        let msg = DesignError::UnboundFields(vec!["a".into(), "b".into()]).to_string();
        assert!(msg.contains("[a, b]"));
    }

    #[test]
    fn parse_error_is_source() {
        let bad = String::from_utf8(vec![0xff]).unwrap_err();
        let err = DesignError::from(ParseError::from(bad));
        assert!(std::error::Error::source(&err).is_some());
    }
}
