//! Validation of the bound forms and choice of the completing form

use super::router::{FormMap, SubmissionRouter};
use super::submission::is_data_carrying;
use http::Method;

/// Outcome of validating one request's forms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationState {
	/// Read-only request; forms are rendered blank
	Unvalidated,
	AllValid,
	SomeInvalid,
	/// Data-carrying request that bound no form at all
	EmptySubmission,
}

pub struct ValidationCoordinator;

impl ValidationCoordinator {
	/// Validate every bound form of `forms`.
	///
	/// All bound forms are validated even after the first failure, so each
	/// carries its own errors into the rendered context.
	pub fn validate(method: &Method, forms: &mut FormMap) -> ValidationState {
		if !is_data_carrying(method) {
			return ValidationState::Unvalidated;
		}

		let mut bound = 0usize;
		let mut all_valid = true;
		for (name, form) in forms.iter_mut() {
			if !form.is_bound() {
				continue;
			}
			bound += 1;
			let valid = form.is_valid();
			tracing::debug!(form = %name, valid, "bound form validated");
			all_valid &= valid;
		}

		match (bound, all_valid) {
			(0, _) => ValidationState::EmptySubmission,
			(_, true) => ValidationState::AllValid,
			(_, false) => ValidationState::SomeInvalid,
		}
	}

	/// Pick the name whose completion hook handles a valid submission.
	///
	/// A submitted `form_name` that names a bound form wins. Otherwise the
	/// first bound form (registry order) with a registered hook, else the
	/// first bound form. Unbound forms are never selected.
	pub fn select_active_name<H>(
		forms: &FormMap,
		submitted_form_name: Option<&str>,
		has_hook: H,
	) -> Option<String>
	where
		H: Fn(&str) -> bool,
	{
		if let Some(name) = submitted_form_name
			&& forms.get(name).is_some_and(|form| form.is_bound())
		{
			tracing::debug!(form = %name, "completion routed by submitted form name");
			return Some(name.to_string());
		}

		let bound = SubmissionRouter::bound_names(forms);
		let active = bound
			.iter()
			.find(|name| has_hook(name))
			.or_else(|| bound.first())
			.cloned();
		tracing::debug!(form = ?active, "completion routed by bound set");
		active
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::multiform::form::{FormInstance, FormKwargs};
	use crate::multiform::submission::SubmittedData;
	use reinhardt_forms::{CharField, Form};
	use rstest::rstest;
	use serde_json::json;
	use std::sync::Arc;

	fn titled(prefix: &str, data: Option<&SubmittedData>) -> Box<dyn FormInstance> {
		let mut form = Form::new();
		form.add_field(Box::new(CharField::new("title".to_string()).required().with_max_length(5)));
		FormKwargs {
			data: data.map(|d| Arc::new(d.clone())),
			..FormKwargs::new(prefix)
		}
		.apply_to(&mut form);
		Box::new(form)
	}

	fn form_map(entries: Vec<(&str, bool)>, data: &SubmittedData) -> FormMap {
		entries
			.into_iter()
			.map(|(name, bound)| (name.to_string(), titled(name, bound.then_some(data))))
			.collect()
	}

	#[rstest]
	fn test_read_only_stays_unvalidated() {
		let mut forms = form_map(vec![("a", false)], &SubmittedData::new());
		assert_eq!(
			ValidationCoordinator::validate(&Method::GET, &mut forms),
			ValidationState::Unvalidated
		);
	}

	#[rstest]
	fn test_nothing_bound_is_empty_submission() {
		let mut forms = form_map(vec![("a", false), ("b", false)], &SubmittedData::new());
		assert_eq!(
			ValidationCoordinator::validate(&Method::POST, &mut forms),
			ValidationState::EmptySubmission
		);
	}

	#[rstest]
	fn test_every_bound_form_collects_errors() {
		let mut data = SubmittedData::new();
		data.insert("a-title".to_string(), json!("too long"));
		let mut forms = form_map(vec![("a", true), ("b", true)], &data);

		let state = ValidationCoordinator::validate(&Method::POST, &mut forms);

		assert_eq!(state, ValidationState::SomeInvalid);
		assert!(forms["a"].has_errors());
		assert!(forms["b"].errors().contains_key("title"));
	}

	#[rstest]
	fn test_all_bound_valid() {
		let mut data = SubmittedData::new();
		data.insert("a-title".to_string(), json!("ok"));
		let mut forms = form_map(vec![("a", true), ("b", false)], &data);

		assert_eq!(
			ValidationCoordinator::validate(&Method::PUT, &mut forms),
			ValidationState::AllValid
		);
	}

	#[rstest]
	#[case(None, vec![], Some("b"))]
	#[case(None, vec!["c"], Some("c"))]
	#[case(Some("c"), vec![], Some("c"))]
	#[case(Some("a"), vec!["c"], Some("c"))]
	#[case(Some("a"), vec![], Some("b"))]
	#[case(Some("unknown"), vec![], Some("b"))]
	fn test_select_active_name(
		#[case] submitted: Option<&str>,
		#[case] hooks: Vec<&str>,
		#[case] expected: Option<&str>,
	) {
		let data = SubmittedData::new();
		let forms = form_map(vec![("a", false), ("b", true), ("c", true)], &data);

		let active =
			ValidationCoordinator::select_active_name(&forms, submitted, |n| hooks.contains(&n));

		assert_eq!(active.as_deref(), expected);
	}
}
