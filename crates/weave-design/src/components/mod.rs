//! Built-in components of the `weave.ui` package.
//!
//! | Type               | Tag                     | Children |
//! |--------------------|-------------------------|----------|
//! | [`Label`]          | `v-label`               | none     |
//! | [`Button`]         | `v-button`              | none     |
//! | [`TextField`]      | `v-text-field`          | none     |
//! | [`CheckBox`]       | `v-check-box`           | none     |
//! | [`Panel`]          | `v-panel`               | one      |
//! | [`VerticalLayout`] | `v-vertical-layout`     | any      |
//! | [`HorizontalLayout`] | `v-horizontal-layout` | any      |

pub mod button;
pub mod check_box;
pub mod label;
pub mod layout;
pub mod panel;
pub mod text_field;

pub use button::Button;
pub use check_box::CheckBox;
pub use label::Label;
pub use layout::{HorizontalLayout, VerticalLayout};
pub use panel::Panel;
pub use text_field::TextField;
