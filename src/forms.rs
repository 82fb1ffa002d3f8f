//! Form primitives.
//!
//! Fields, widgets and the [`Form`] container that multi-form views
//! instantiate once per declared name.
//!
//! # Examples
//!
//! ```rust
//! use reinhardt_multiforms::forms::{EmailField, Form};
//!
//! let mut form = Form::with_prefix("newsletter".to_string());
//! form.add_field(Box::new(EmailField::new("email".to_string()).required()));
//! assert_eq!(form.prefix(), "newsletter");
//! ```

pub use reinhardt_forms::*;
