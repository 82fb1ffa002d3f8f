//! Single and multiple choice fields

use crate::field::{FieldError, FieldResult, FormField, Widget};
use std::collections::HashMap;

/// A `(value, label)` pair offered by a choice field
pub type Choice = (String, String);

/// Custom messages replace the whole error text
fn message_or(
	messages: &HashMap<String, String>,
	key: &str,
	fallback: impl FnOnce() -> FieldError,
) -> FieldError {
	match messages.get(key) {
		Some(msg) => FieldError::Validation(msg.clone()),
		None => fallback(),
	}
}

/// Field accepting exactly one value out of a fixed set of choices
#[derive(Debug, Clone)]
pub struct ChoiceField {
	pub name: String,
	pub label: Option<String>,
	pub required: bool,
	pub widget: Widget,
	pub initial: Option<serde_json::Value>,
	pub choices: Vec<Choice>,
	pub error_messages: HashMap<String, String>,
}

impl ChoiceField {
	/// Create a new ChoiceField
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_forms::ChoiceField;
	///
	/// let field = ChoiceField::new(
	///     "action".to_string(),
	///     vec![("remove".to_string(), "Remove selection".to_string())],
	/// );
	/// assert!(field.required);
	/// assert_eq!(field.choices.len(), 1);
	/// ```
	pub fn new(name: String, choices: Vec<Choice>) -> Self {
		Self {
			name,
			label: None,
			required: true,
			widget: Widget::Select,
			initial: None,
			choices,
			error_messages: HashMap::new(),
		}
	}

	pub fn optional(mut self) -> Self {
		self.required = false;
		self
	}

	/// Override the message used for `"required"` or `"invalid_choice"` errors
	pub fn with_error_message(mut self, key: impl Into<String>, msg: impl Into<String>) -> Self {
		self.error_messages.insert(key.into(), msg.into());
		self
	}

	pub fn valid_value(&self, value: &str) -> bool {
		self.choices.iter().any(|(v, _)| v == value)
	}
}

impl FormField for ChoiceField {
	fn name(&self) -> &str {
		&self.name
	}

	fn label(&self) -> Option<&str> {
		self.label.as_deref()
	}

	fn required(&self) -> bool {
		self.required
	}

	fn widget(&self) -> &Widget {
		&self.widget
	}

	fn initial(&self) -> Option<&serde_json::Value> {
		self.initial.as_ref()
	}

	fn clean(&self, value: Option<&serde_json::Value>) -> FieldResult<serde_json::Value> {
		let raw = match value {
			Some(serde_json::Value::String(s)) => s.as_str(),
			Some(serde_json::Value::Null) | None => "",
			Some(other) => {
				return Err(message_or(&self.error_messages, "invalid_choice", || {
					FieldError::InvalidChoice(other.to_string())
				}));
			}
		};

		if raw.is_empty() {
			if self.required {
				return Err(message_or(&self.error_messages, "required", || {
					FieldError::Required(self.name.clone())
				}));
			}
			return Ok(serde_json::Value::String(String::new()));
		}

		if !self.valid_value(raw) {
			return Err(message_or(&self.error_messages, "invalid_choice", || {
				FieldError::InvalidChoice(raw.to_string())
			}));
		}

		Ok(serde_json::Value::String(raw.to_string()))
	}
}

/// Field accepting any subset of a set of choices
#[derive(Debug, Clone)]
pub struct MultipleChoiceField {
	pub name: String,
	pub label: Option<String>,
	pub required: bool,
	pub widget: Widget,
	pub choices: Vec<Choice>,
	pub error_messages: HashMap<String, String>,
}

impl MultipleChoiceField {
	pub fn new(name: String, choices: Vec<Choice>) -> Self {
		Self {
			name,
			label: None,
			required: true,
			widget: Widget::CheckboxSelectMultiple,
			choices,
			error_messages: HashMap::new(),
		}
	}

	/// Replace the available choices, typically computed per request
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_forms::MultipleChoiceField;
	///
	/// let field = MultipleChoiceField::new("selection".to_string(), vec![])
	///     .with_choices(vec![("0".to_string(), "Book0".to_string())]);
	/// assert_eq!(field.choices.len(), 1);
	/// ```
	pub fn with_choices(mut self, choices: Vec<Choice>) -> Self {
		self.choices = choices;
		self
	}

	pub fn optional(mut self) -> Self {
		self.required = false;
		self
	}

	pub fn with_error_message(mut self, key: impl Into<String>, msg: impl Into<String>) -> Self {
		self.error_messages.insert(key.into(), msg.into());
		self
	}
}

impl FormField for MultipleChoiceField {
	fn name(&self) -> &str {
		&self.name
	}

	fn label(&self) -> Option<&str> {
		self.label.as_deref()
	}

	fn required(&self) -> bool {
		self.required
	}

	fn widget(&self) -> &Widget {
		&self.widget
	}

	fn clean(&self, value: Option<&serde_json::Value>) -> FieldResult<serde_json::Value> {
		let values: Vec<String> = match value {
			None | Some(serde_json::Value::Null) => vec![],
			Some(serde_json::Value::String(s)) => vec![s.clone()],
			Some(serde_json::Value::Array(items)) => items
				.iter()
				.map(|item| match item {
					serde_json::Value::String(s) => s.clone(),
					other => other.to_string(),
				})
				.collect(),
			Some(other) => {
				return Err(FieldError::Validation(format!(
					"Enter a list of values, got {}",
					other
				)));
			}
		};

		if values.is_empty() {
			if self.required {
				return Err(message_or(&self.error_messages, "required", || {
					FieldError::Required(self.name.clone())
				}));
			}
			return Ok(serde_json::Value::Array(vec![]));
		}

		for v in &values {
			if !self.choices.iter().any(|(choice, _)| choice == v) {
				return Err(message_or(&self.error_messages, "invalid_choice", || {
					FieldError::InvalidChoice(v.clone())
				}));
			}
		}

		Ok(serde_json::Value::Array(
			values.into_iter().map(serde_json::Value::String).collect(),
		))
	}
}
