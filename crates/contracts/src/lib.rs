//! Types shared between the frontend and the backend: the extra-field data
//! model, the typed default-value codec and the wire DTOs.

pub mod domain;
pub mod shared;
