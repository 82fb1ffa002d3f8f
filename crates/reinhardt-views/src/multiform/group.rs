//! Form groups: several forms validated together under one name

use super::form::{FormDefinition, FormInstance, FormKwargs};
use super::name::FormDeclaration;
use super::registry::FormRegistry;
use indexmap::IndexMap;
use std::any::Any;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Separator between a group prefix and a sub-form name
pub const GROUP_PREFIX_SEPARATOR: &str = "__";

/// Build a group definition out of named sub-form declarations.
///
/// The group is identified by `name`; when instantiated without a prefix it
/// uses the lowercased name.
///
/// # Examples
///
/// ```
/// use reinhardt_forms::Form;
/// use reinhardt_views::multiform::{
///     FormClass, FormDeclaration, FormDefinition, FormKwargs, make_formgroup,
/// };
///
/// fn plain(k: FormKwargs) -> Form {
///     let mut form = Form::new();
///     k.apply_to(&mut form);
///     form
/// }
///
/// let group = make_formgroup(
///     "UserCartGroup",
///     &[
///         FormDeclaration::new(FormClass::new("ContactForm", plain)),
///         FormDeclaration::new(FormClass::new("SubscriptionForm", plain)),
///     ],
/// );
/// let instance = group.build(FormKwargs::default());
/// assert_eq!(instance.prefix(), "usercartgroup");
/// ```
pub fn make_formgroup(name: impl Into<String>, declarations: &[FormDeclaration]) -> FormGroupClass {
	FormGroupClass {
		name: name.into(),
		forms: Arc::new(FormRegistry::normalize(declarations)),
	}
}

/// Definition of a form group
#[derive(Debug, Clone)]
pub struct FormGroupClass {
	name: String,
	forms: Arc<FormRegistry>,
}

impl FormGroupClass {
	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn form_names(&self) -> impl Iterator<Item = &str> {
		self.forms.names()
	}

	/// Instantiate the group as its concrete type
	pub fn instantiate(&self, kwargs: FormKwargs) -> FormGroup {
		let prefix = if kwargs.prefix.is_empty() {
			self.name.to_lowercase()
		} else {
			kwargs.prefix.clone()
		};

		let forms = self
			.forms
			.iter()
			.map(|(sub_name, definition)| {
				let sub_prefix = if prefix.is_empty() {
					sub_name.to_string()
				} else {
					format!("{prefix}{GROUP_PREFIX_SEPARATOR}{sub_name}")
				};
				let initial = kwargs
					.initial
					.get(sub_name)
					.filter(|v| v.is_object())
					.cloned()
					.unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));
				let sub_kwargs = FormKwargs {
					initial,
					prefix: sub_prefix,
					data: kwargs.data.clone(),
					files: kwargs.files.clone(),
					extra: kwargs.extra.clone(),
				};
				(sub_name.to_string(), definition.build(sub_kwargs))
			})
			.collect();

		FormGroup { prefix, forms }
	}
}

impl FormDefinition for FormGroupClass {
	fn identity(&self) -> Option<String> {
		Some(self.name.clone())
	}

	fn build(&self, kwargs: FormKwargs) -> Box<dyn FormInstance> {
		Box::new(self.instantiate(kwargs))
	}
}

/// One request's instance of a form group
#[derive(Debug)]
pub struct FormGroup {
	prefix: String,
	forms: IndexMap<String, Box<dyn FormInstance>>,
}

impl FormGroup {
	pub fn get(&self, name: &str) -> Option<&dyn FormInstance> {
		self.forms.get(name).map(|form| form.as_ref())
	}

	pub fn get_mut(&mut self, name: &str) -> Option<&mut Box<dyn FormInstance>> {
		self.forms.get_mut(name)
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.forms.keys().map(String::as_str)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn FormInstance)> {
		self.forms.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
	}

	pub fn len(&self) -> usize {
		self.forms.len()
	}

	pub fn is_empty(&self) -> bool {
		self.forms.is_empty()
	}
}

impl std::ops::Index<&str> for FormGroup {
	type Output = dyn FormInstance;

	fn index(&self, name: &str) -> &Self::Output {
		self.get(name)
			.unwrap_or_else(|| panic!("Form group has no sub-form named '{}'", name))
	}
}

impl FormInstance for FormGroup {
	fn prefix(&self) -> &str {
		&self.prefix
	}

	fn is_bound(&self) -> bool {
		self.forms.values().any(|form| form.is_bound())
	}

	fn is_valid(&mut self) -> bool {
		if !FormInstance::is_bound(self) {
			return false;
		}
		// No short-circuit: every sub-form collects its errors.
		self.forms
			.values_mut()
			.fold(true, |valid, form| form.is_valid() && valid)
	}

	fn cleaned_data(&self) -> serde_json::Map<String, serde_json::Value> {
		self.forms
			.iter()
			.map(|(name, form)| (name.clone(), serde_json::Value::Object(form.cleaned_data())))
			.collect()
	}

	fn errors(&self) -> BTreeMap<String, Vec<String>> {
		self.forms
			.iter()
			.flat_map(|(name, form)| {
				form.errors()
					.into_iter()
					.map(move |(field, messages)| (format!("{name}.{field}"), messages))
			})
			.collect()
	}

	fn to_context(&self) -> serde_json::Value {
		let forms: serde_json::Map<String, serde_json::Value> = self
			.forms
			.iter()
			.map(|(name, form)| (name.clone(), form.to_context()))
			.collect();

		serde_json::json!({
			"prefix": self.prefix,
			"is_bound": FormInstance::is_bound(self),
			"errors": FormInstance::errors(self),
			"forms": forms,
		})
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::multiform::form::FormClass;
	use crate::multiform::submission::SubmittedData;
	use reinhardt_forms::{CharField, Form};
	use rstest::{fixture, rstest};
	use serde_json::json;

	fn titled(kwargs: FormKwargs) -> Form {
		let mut form = Form::new();
		form.add_field(Box::new(CharField::new("title".to_string()).required()));
		kwargs.apply_to(&mut form);
		form
	}

	#[fixture]
	fn group() -> FormGroupClass {
		make_formgroup(
			"PairGroup",
			&[
				FormDeclaration::new(FormClass::new("First", titled)),
				FormDeclaration::new(FormClass::new("Second", titled)),
			],
		)
	}

	fn bound_kwargs(prefix: &str, pairs: &[(&str, &str)]) -> FormKwargs {
		let data: SubmittedData = pairs
			.iter()
			.map(|(k, v)| (k.to_string(), json!(v)))
			.collect();
		FormKwargs {
			data: Some(Arc::new(data)),
			..FormKwargs::new(prefix)
		}
	}

	#[rstest]
	fn test_sub_form_prefixes(group: FormGroupClass) {
		let instance = group.instantiate(FormKwargs::new("pair"));

		assert_eq!(instance["first"].prefix(), "pair__first");
		assert_eq!(instance["second"].prefix(), "pair__second");
	}

	#[rstest]
	fn test_empty_prefix_uses_group_name(group: FormGroupClass) {
		let instance = group.instantiate(FormKwargs::default());
		assert_eq!(FormInstance::prefix(&instance), "pairgroup");
		assert_eq!(instance["first"].prefix(), "pairgroup__first");
	}

	#[rstest]
	fn test_initial_is_split_per_sub_form(group: FormGroupClass) {
		let instance = group.instantiate(
			FormKwargs::new("pair").with_initial(json!({"first": {"title": "One"}, "form_name": "pair"})),
		);

		let first = instance["first"].downcast_ref::<Form>().unwrap();
		let second = instance["second"].downcast_ref::<Form>().unwrap();
		assert_eq!(first.initial()["title"], json!("One"));
		assert!(second.initial().is_empty());
	}

	#[rstest]
	fn test_group_valid_only_when_all_sub_forms_valid(group: FormGroupClass) {
		let mut instance = group.instantiate(bound_kwargs(
			"pair",
			&[("pair__first-title", "a")],
		));

		assert!(FormInstance::is_bound(&instance));
		assert!(!FormInstance::is_valid(&mut instance));
		let errors = FormInstance::errors(&instance);
		assert!(errors.contains_key("second.title"));
		assert!(!errors.contains_key("first.title"));
	}

	#[rstest]
	fn test_cleaned_data_nests_by_sub_form(group: FormGroupClass) {
		let mut instance = group.instantiate(bound_kwargs(
			"pair",
			&[("pair__first-title", "a"), ("pair__second-title", "b")],
		));

		assert!(FormInstance::is_valid(&mut instance));
		assert_eq!(
			serde_json::Value::Object(FormInstance::cleaned_data(&instance)),
			json!({"first": {"title": "a"}, "second": {"title": "b"}})
		);
	}

	#[rstest]
	fn test_unbound_group_is_never_valid(group: FormGroupClass) {
		let mut instance = group.instantiate(FormKwargs::new("pair"));
		assert!(!FormInstance::is_valid(&mut instance));
		assert!(FormInstance::errors(&instance).is_empty());
	}
}
