//! # Reinhardt Views
//!
//! Class-based views for Reinhardt.
//!
//! ## Features
//!
//! - **View trait**: async `dispatch` over an incoming [`multiform::Submission`]
//! - **Multi-form views**: several named forms rendered and validated on one
//!   endpoint, each completing through its own hook and redirect target
//! - **Form groups**: several forms validated together under one name
//! - **TOML settings**: declarative view configuration
//!
//! ## Example
//!
//! ```
//! use reinhardt_forms::{CharField, Form};
//! use reinhardt_views::View;
//! use reinhardt_views::multiform::{FormClass, FormKwargs, MultiFormView, Submission};
//!
//! fn contact(kwargs: FormKwargs) -> Form {
//!     let mut form = Form::new();
//!     form.add_field(Box::new(CharField::new("title".to_string())));
//!     kwargs.apply_to(&mut form);
//!     form
//! }
//!
//! let view = MultiFormView::builder()
//!     .form(FormClass::new("ContactForm", contact))
//!     .build()
//!     .unwrap();
//! assert!(view.allowed_methods().contains(&"POST"));
//! ```

pub mod core;
pub mod multiform;

pub use crate::core::{Context, View};
pub use multiform::{
	FormClass, FormDeclaration, FormGroupClass, MultiFormError, MultiFormResponse,
	MultiFormSettings, MultiFormView, MultiFormViewBuilder, Submission, make_formgroup,
};
