//! Normalized, ordered form declarations of a view

use super::error::{MultiFormError, Result};
use super::form::FormDefinition;
use super::name::{FormDeclaration, resolve_name};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// What to do when two declarations resolve to the same name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
	/// The later declaration replaces the earlier one, keeping its position
	#[default]
	LastWriteWins,
	/// A duplicate name is a configuration fault
	Reject,
}

/// Ordered mapping from form name to form definition.
///
/// Iteration order is declaration order; redirect targets given as a list
/// are paired with the forms positionally against it. Built once per view
/// and never mutated afterwards.
#[derive(Clone, Default)]
pub struct FormRegistry {
	forms: IndexMap<String, Arc<dyn FormDefinition>>,
}

impl FormRegistry {
	/// Normalize declarations, letting later duplicates overwrite earlier ones
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_forms::Form;
	/// use reinhardt_views::multiform::{FormClass, FormDeclaration, FormKwargs, FormRegistry};
	///
	/// fn plain(k: FormKwargs) -> Form {
	///     let mut form = Form::new();
	///     k.apply_to(&mut form);
	///     form
	/// }
	///
	/// let registry = FormRegistry::normalize(&[
	///     FormDeclaration::new(FormClass::new("ContactForm", plain)),
	///     FormDeclaration::named("better_name", FormClass::new("SubscriptionForm", plain)),
	/// ]);
	/// assert_eq!(registry.names().collect::<Vec<_>>(), ["contactform", "better_name"]);
	/// ```
	pub fn normalize(declarations: &[FormDeclaration]) -> Self {
		let mut forms: IndexMap<String, Arc<dyn FormDefinition>> = IndexMap::new();
		for declaration in declarations {
			let name = resolve_name(declaration);
			if forms
				.insert(name.clone(), Arc::clone(declaration.definition()))
				.is_some()
			{
				tracing::warn!(
					name = %name,
					"form name declared twice, the later declaration replaces the earlier one"
				);
			}
		}
		Self { forms }
	}

	/// Normalize declarations under an explicit duplicate-name policy
	pub fn normalize_with_policy(
		declarations: &[FormDeclaration],
		policy: DuplicatePolicy,
	) -> Result<Self> {
		match policy {
			DuplicatePolicy::LastWriteWins => Ok(Self::normalize(declarations)),
			DuplicatePolicy::Reject => {
				let mut forms: IndexMap<String, Arc<dyn FormDefinition>> = IndexMap::new();
				for declaration in declarations {
					let name = resolve_name(declaration);
					if forms.contains_key(&name) {
						return Err(MultiFormError::DuplicateFormName { name });
					}
					forms.insert(name, Arc::clone(declaration.definition()));
				}
				Ok(Self { forms })
			}
		}
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.forms.keys().map(String::as_str)
	}

	pub fn get(&self, name: &str) -> Option<&Arc<dyn FormDefinition>> {
		self.forms.get(name)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.forms.contains_key(name)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn FormDefinition>)> {
		self.forms.iter().map(|(k, v)| (k.as_str(), v))
	}

	pub fn len(&self) -> usize {
		self.forms.len()
	}

	pub fn is_empty(&self) -> bool {
		self.forms.is_empty()
	}
}

impl std::fmt::Debug for FormRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(self.forms.keys()).finish()
	}
}
