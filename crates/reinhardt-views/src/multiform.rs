//! Several independently validated forms behind one endpoint.
//!
//! A [`MultiFormView`] declares a list of forms. On every request it builds
//! each of them, binds those whose prefix shows up in the submitted keys,
//! validates the bound ones and either renders the forms again, answers
//! `403` for a submission that bound nothing, or hands the submission to
//! the completion hook of one form, chosen by name.
//!
//! ## Example
//!
//! ```
//! use reinhardt_forms::{CharField, EmailField, Form};
//! use reinhardt_views::multiform::{FormClass, FormKwargs, MultiFormView, Submission};
//!
//! fn contact(kwargs: FormKwargs) -> Form {
//!     let mut form = Form::new();
//!     form.add_field(Box::new(CharField::new("title".to_string()).required()));
//!     kwargs.apply_to(&mut form);
//!     form
//! }
//!
//! fn subscription(kwargs: FormKwargs) -> Form {
//!     let mut form = Form::new();
//!     form.add_field(Box::new(EmailField::new("email".to_string())));
//!     kwargs.apply_to(&mut form);
//!     form
//! }
//!
//! let view = MultiFormView::builder()
//!     .form(FormClass::new("ContactForm", contact))
//!     .named_form("better_name", FormClass::new("SubscriptionForm", subscription))
//!     .success_urls(["/contacted/", "/subscribed/"])
//!     .build()
//!     .unwrap();
//!
//! let response = view
//!     .handle(&Submission::post().with_field("better_name-email", "a@example.com"))
//!     .unwrap();
//! assert_eq!(response.redirect_url(), Some("/subscribed/"));
//! ```

mod coordinator;
mod error;
mod form;
mod group;
mod name;
mod redirect;
mod registry;
mod response;
mod router;
mod settings;
mod submission;
mod view;

pub use coordinator::{ValidationCoordinator, ValidationState};
pub use error::{MultiFormError, Result};
pub use form::{
	DeclaredForm, FormClass, FormDefinition, FormInstance, FormKwargs, add_form_name_field,
	multiple_form,
};
pub use group::{FormGroup, FormGroupClass, GROUP_PREFIX_SEPARATOR, make_formgroup};
pub use name::{FormDeclaration, bare_type_name, resolve_name};
pub use redirect::{RedirectResolver, SuccessUrls};
pub use registry::{DuplicatePolicy, FormRegistry};
pub use response::{MultiFormResponse, RenderContext};
pub use router::{FormMap, PrefixMatch, SubmissionRouter};
pub use settings::MultiFormSettings;
pub use submission::{FORM_NAME_KEY, Submission, SubmittedData, SubmittedFiles, is_data_carrying};
pub use view::{
	CompletionHook, FormCompletion, FormKwargsHook, InitialHook, MultiFormView,
	MultiFormViewBuilder, PrefixHook,
};
