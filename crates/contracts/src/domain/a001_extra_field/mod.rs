//! Extra fields: user-defined, typed attributes attached to an entity category.

pub mod aggregate;
pub mod entity_type;
pub mod field_type;
pub mod validation;
pub mod value;

pub use aggregate::{ExtraField, ExtraFieldParameters, NEW_FIELD_KEY};
pub use entity_type::EntityType;
pub use field_type::ExtraFieldType;
pub use value::{FieldValue, FieldValueError, DATETIME_FORMAT};
