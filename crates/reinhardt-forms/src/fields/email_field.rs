//! Email field

use crate::field::{FieldError, FieldResult, FormField, Widget};
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
		.expect("email pattern is valid")
});

/// Character field that only accepts email addresses
#[derive(Debug, Clone)]
pub struct EmailField {
	pub name: String,
	pub label: Option<String>,
	pub required: bool,
	pub help_text: Option<String>,
	pub widget: Widget,
	pub initial: Option<serde_json::Value>,
	pub max_length: Option<usize>,
}

impl EmailField {
	/// Create a new EmailField with the given name
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_forms::EmailField;
	///
	/// let field = EmailField::new("email".to_string());
	/// assert_eq!(field.name, "email");
	/// assert_eq!(field.max_length, Some(320));
	/// ```
	pub fn new(name: String) -> Self {
		Self {
			name,
			label: None,
			required: false,
			help_text: None,
			widget: Widget::EmailInput,
			initial: None,
			max_length: Some(320),
		}
	}

	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}
}

impl FormField for EmailField {
	fn name(&self) -> &str {
		&self.name
	}

	fn label(&self) -> Option<&str> {
		self.label.as_deref()
	}

	fn required(&self) -> bool {
		self.required
	}

	fn help_text(&self) -> Option<&str> {
		self.help_text.as_deref()
	}

	fn widget(&self) -> &Widget {
		&self.widget
	}

	fn initial(&self) -> Option<&serde_json::Value> {
		self.initial.as_ref()
	}

	fn clean(&self, value: Option<&serde_json::Value>) -> FieldResult<serde_json::Value> {
		let raw = match value {
			Some(serde_json::Value::String(s)) => s.trim(),
			Some(serde_json::Value::Null) | None => "",
			Some(_) => {
				return Err(FieldError::Validation(
					"Value must be a string".to_string(),
				));
			}
		};

		if raw.is_empty() {
			if self.required {
				return Err(FieldError::Required(self.name.clone()));
			}
			return Ok(serde_json::Value::String(String::new()));
		}

		if let Some(max_length) = self.max_length
			&& raw.chars().count() > max_length
		{
			return Err(FieldError::Validation(format!(
				"Ensure this value has at most {} characters",
				max_length
			)));
		}

		if !EMAIL_REGEX.is_match(raw) {
			return Err(FieldError::Validation(
				"Enter a valid email address.".to_string(),
			));
		}

		Ok(serde_json::Value::String(raw.to_string()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case("user@example.com", true)]
	#[case("first.last+tag@sub.example.org", true)]
	#[case("not-an-email", false)]
	#[case("missing@tld", false)]
	#[case("@example.com", false)]
	fn test_email_field_format(#[case] input: &str, #[case] valid: bool) {
		let field = EmailField::new("email".to_string());
		assert_eq!(field.clean(Some(&json!(input))).is_ok(), valid);
	}

	#[rstest]
	fn test_email_field_required() {
		let field = EmailField::new("email".to_string()).required();

		assert!(matches!(field.clean(None), Err(FieldError::Required(_))));
		assert!(matches!(
			field.clean(Some(&json!("   "))),
			Err(FieldError::Required(_))
		));
	}

	#[rstest]
	fn test_email_field_trims_value() {
		let field = EmailField::new("email".to_string());
		assert_eq!(
			field.clean(Some(&json!("  a@b.io "))).unwrap(),
			json!("a@b.io")
		);
	}
}
