//! Demo forms and views for Reinhardt multi-form views.
//!
//! - [`views::extensive_demo_view`]: forms told apart by a hidden `form_name`
//!   input, each with its own completion hook and redirect
//! - [`views::no_form_name_demo_view`]: several cart forms sharing one
//!   completion handler
//! - [`views::form_group_demo_view`]: a form group declared next to plain forms

pub mod forms;
pub mod views;
