//! Dynamic extra-field editor.
//!
//! The modules here hold no reactive state and never touch the DOM:
//! - `dispatch`: which input, rules and editability apply to a column for a field type
//! - `draft`: the on-screen form of a field under edit
//! - `coercion`: conversion between the draft and the stored representation
//! - `machine`: the single-row edit/save state machine
//!
//! The Leptos view model in `ui` owns an [`ExtraFieldEditor`] inside a signal
//! and drives it from user events.

pub mod coercion;
pub mod dispatch;
pub mod draft;
pub mod machine;

pub use dispatch::{Column, ColumnSpec, FieldError, InputKind, Rule};
pub use draft::{Draft, DraftValue};
pub use machine::{EditorState, ExtraFieldEditor, SaveError, SaveRequest};
