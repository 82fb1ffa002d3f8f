//! Form processing and validation for Reinhardt
//!
//! This crate provides the form primitive multi-form views are built on:
//! - Prefix-namespaced forms sharing one submitted payload
//! - Text, email and choice fields with cleaning and validation
//! - Form-level and per-field clean functions
//! - Bound fields and render-context output for templates

pub mod bound_field;
pub mod field;
pub mod fields;
pub mod files;
pub mod form;

pub use bound_field::BoundField;
pub use field::{FieldError, FieldResult, FormField, Widget};
pub use fields::{CharField, Choice, ChoiceField, EmailField, MultipleChoiceField};
pub use files::UploadedFile;
pub use form::{ALL_FIELDS_KEY, Form, FormError, FormResult};
