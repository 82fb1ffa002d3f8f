//! Views module.
//!
//! This module provides the multi-form view and the [`View`] dispatch trait.
//!
//! # Examples
//!
//! ```rust,no_run
//! use reinhardt_multiforms::views::View;
//! use reinhardt_multiforms::views::multiform::{MultiFormView, Submission};
//!
//! # async fn serve(view: MultiFormView) {
//! let _response = view.dispatch(Submission::get()).await;
//! # }
//! ```

pub use reinhardt_views::*;
