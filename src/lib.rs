//! # Reinhardt Multiforms
//!
//! Class-based views that host several independently validated forms behind
//! one endpoint.
//!
//! A multi-form view declares its forms once, gives each a stable name and
//! prefix, decides from the submitted keys which forms were actually posted,
//! validates those, and hands completion to a per-form handler.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `forms` - Re-export the form primitives under [`forms`]
//!
//! ## Quick Example
//!
//! ```rust
//! use reinhardt_multiforms::forms::{CharField, Form};
//! use reinhardt_multiforms::prelude::*;
//!
//! fn feedback(kwargs: FormKwargs) -> Form {
//!     let mut form = Form::new();
//!     form.add_field(Box::new(CharField::new("comment".to_string()).required()));
//!     kwargs.apply_to(&mut form);
//!     form
//! }
//!
//! let view = MultiFormView::builder()
//!     .form(FormClass::new("FeedbackForm", feedback))
//!     .success_url("/thanks/")
//!     .build()
//!     .unwrap();
//!
//! let response = view
//!     .handle(&Submission::post().with_field("feedbackform-comment", "Nice"))
//!     .unwrap();
//! assert_eq!(response.redirect_url(), Some("/thanks/"));
//! ```

#[cfg(feature = "forms")]
pub mod forms;
pub mod views;

/// Commonly used types for declaring multi-form views
pub mod prelude {
	pub use crate::views::View;
	pub use crate::views::multiform::{
		FormClass, FormCompletion, FormDeclaration, FormGroup, FormGroupClass, FormInstance,
		FormKwargs, MultiFormError, MultiFormResponse, MultiFormSettings, MultiFormView,
		MultiFormViewBuilder, PrefixMatch, Submission, SuccessUrls, make_formgroup,
	};

	pub use async_trait::async_trait;
}
