//! Demo forms

use reinhardt_multiforms::forms::{
	CharField, Choice, ChoiceField, EmailField, Form, FormError, MultipleChoiceField, Widget,
};
use reinhardt_multiforms::views::multiform::{
	DeclaredForm, FormInstance, FormKwargs, add_form_name_field,
};
use std::any::Any;
use std::collections::BTreeMap;

/// Contact form carrying the hidden `form_name` input
pub fn contact_form(kwargs: FormKwargs) -> Form {
	let mut form = Form::new();
	add_form_name_field(&mut form);
	form.add_field(Box::new(
		CharField::new("title".to_string())
			.required()
			.with_max_length(150),
	));
	form.add_field(Box::new(
		CharField::new("message".to_string())
			.required()
			.with_max_length(200)
			.with_widget(Widget::TextInput),
	));
	kwargs.apply_to(&mut form);
	form
}

pub fn subscription_form(kwargs: FormKwargs) -> Form {
	let mut form = Form::new();
	form.add_field(Box::new(EmailField::new("email".to_string()).required()));
	kwargs.apply_to(&mut form);
	form
}

/// Cart update form whose selectable items are supplied per request.
///
/// The items come from the `selection` construction argument, a list of
/// `[value, label]` pairs.
pub struct CartUpdateForm {
	form: Form,
}

impl CartUpdateForm {
	pub const SELECTION_KWARG: &'static str = "selection";

	pub fn actions() -> Vec<Choice> {
		vec![
			(String::new(), "--------".to_string()),
			("remove".to_string(), "Remove selection".to_string()),
		]
	}

	pub fn new(kwargs: FormKwargs) -> Self {
		let items = kwargs
			.extra(Self::SELECTION_KWARG)
			.map(selection_choices)
			.unwrap_or_default();

		let mut form = Form::new();
		form.add_field(Box::new(ChoiceField::new(
			"action".to_string(),
			Self::actions(),
		)));
		form.add_field(Box::new(
			MultipleChoiceField::new("selection".to_string(), vec![])
				.with_choices(items)
				.with_error_message("invalid_choice", "Invalid checkbox choice.")
				.with_error_message("required", "Select at least 1 item."),
		));
		form.add_field_clean_function("selection", |value| match value.as_array() {
			Some(items) if !items.is_empty() => Ok(value.clone()),
			_ => Err(FormError::Validation(
				"You must choose at least 1 item".to_string(),
			)),
		});
		kwargs.apply_to(&mut form);

		Self { form }
	}

	pub fn form(&self) -> &Form {
		&self.form
	}

	pub fn action(&self) -> Option<&str> {
		self.form.cleaned_data().get("action")?.as_str()
	}

	pub fn selection(&self) -> Vec<&str> {
		self.form
			.cleaned_data()
			.get("selection")
			.and_then(|v| v.as_array())
			.map(|items| items.iter().filter_map(|v| v.as_str()).collect())
			.unwrap_or_default()
	}
}

fn selection_choices(value: &serde_json::Value) -> Vec<Choice> {
	value
		.as_array()
		.map(|pairs| {
			pairs
				.iter()
				.filter_map(|pair| {
					let pair = pair.as_array()?;
					let choice_value = match pair.first()? {
						serde_json::Value::String(s) => s.clone(),
						other => other.to_string(),
					};
					let label = pair.get(1)?.as_str()?.to_string();
					Some((choice_value, label))
				})
				.collect()
		})
		.unwrap_or_default()
}

impl FormInstance for CartUpdateForm {
	fn prefix(&self) -> &str {
		self.form.prefix()
	}

	fn is_bound(&self) -> bool {
		self.form.is_bound()
	}

	fn is_valid(&mut self) -> bool {
		self.form.is_valid()
	}

	fn cleaned_data(&self) -> serde_json::Map<String, serde_json::Value> {
		FormInstance::cleaned_data(&self.form)
	}

	fn errors(&self) -> BTreeMap<String, Vec<String>> {
		FormInstance::errors(&self.form)
	}

	fn to_context(&self) -> serde_json::Value {
		self.form.to_context()
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

impl DeclaredForm for CartUpdateForm {
	fn from_kwargs(kwargs: FormKwargs) -> Self {
		Self::new(kwargs)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;
	use std::sync::Arc;

	fn bound(prefix: &str, data: serde_json::Value) -> FormKwargs {
		let data = data
			.as_object()
			.unwrap()
			.iter()
			.map(|(k, v)| (k.clone(), v.clone()))
			.collect();
		FormKwargs {
			data: Some(Arc::new(data)),
			..FormKwargs::new(prefix)
		}
		.with_extra("selection", json!([[0, "Book0"], [1, "Book1"]]))
	}

	#[test]
	fn test_cart_update_form_accepts_known_items() {
		let mut form = CartUpdateForm::new(bound(
			"cart",
			json!({"cart-action": "remove", "cart-selection": ["0", "1"]}),
		));

		assert!(FormInstance::is_valid(&mut form));
		assert_eq!(form.action(), Some("remove"));
		assert_eq!(form.selection(), ["0", "1"]);
	}

	#[test]
	fn test_cart_update_form_custom_messages() {
		let mut form = CartUpdateForm::new(bound(
			"cart",
			json!({"cart-action": "remove", "cart-selection": ["7"]}),
		));

		assert!(!FormInstance::is_valid(&mut form));
		assert_eq!(
			FormInstance::errors(&form)["selection"],
			["Invalid checkbox choice."]
		);
	}

	#[test]
	fn test_cart_update_form_requires_action() {
		let mut form = CartUpdateForm::new(bound("cart", json!({"cart-selection": "0"})));

		assert!(!FormInstance::is_valid(&mut form));
		assert!(FormInstance::errors(&form).contains_key("action"));
	}

	#[test]
	fn test_contact_form_limits() {
		let mut form = contact_form(FormKwargs {
			data: Some(Arc::new(
				[
					("contactform-form_name".to_string(), json!("contactform")),
					("contactform-title".to_string(), json!("t".repeat(151))),
					("contactform-message".to_string(), json!("hello")),
				]
				.into_iter()
				.collect(),
			)),
			..FormKwargs::new("contactform")
		});

		assert!(!form.is_valid());
		assert!(form.errors().contains_key("title"));
		assert!(!form.errors().contains_key("message"));
	}
}
