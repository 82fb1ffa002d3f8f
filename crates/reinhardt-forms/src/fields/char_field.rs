//! Character field for text input

use crate::field::{FieldError, FieldResult, FormField, Widget};

/// Character field with length validation
#[derive(Debug, Clone)]
pub struct CharField {
	pub name: String,
	pub label: Option<String>,
	pub required: bool,
	pub help_text: Option<String>,
	pub widget: Widget,
	pub initial: Option<serde_json::Value>,
	pub max_length: Option<usize>,
	pub min_length: Option<usize>,
	pub strip: bool,
}

impl CharField {
	/// Create a new CharField with the given name
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_forms::CharField;
	///
	/// let field = CharField::new("title".to_string());
	/// assert_eq!(field.name, "title");
	/// assert!(!field.required);
	/// assert_eq!(field.max_length, None);
	/// ```
	pub fn new(name: String) -> Self {
		Self {
			name,
			label: None,
			required: false,
			help_text: None,
			widget: Widget::TextInput,
			initial: None,
			max_length: None,
			min_length: None,
			strip: true,
		}
	}

	/// Hidden, required field carrying a fixed marker value
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_forms::{CharField, Widget};
	///
	/// let field = CharField::hidden("form_name".to_string(), 60);
	/// assert_eq!(field.widget, Widget::HiddenInput);
	/// assert_eq!(field.max_length, Some(60));
	/// ```
	pub fn hidden(name: String, max_length: usize) -> Self {
		Self::new(name)
			.required()
			.with_max_length(max_length)
			.with_widget(Widget::HiddenInput)
	}

	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	pub fn with_max_length(mut self, max_length: usize) -> Self {
		self.max_length = Some(max_length);
		self
	}

	pub fn with_min_length(mut self, min_length: usize) -> Self {
		self.min_length = Some(min_length);
		self
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn with_initial(mut self, initial: impl Into<String>) -> Self {
		self.initial = Some(serde_json::json!(initial.into()));
		self
	}

	pub fn no_strip(mut self) -> Self {
		self.strip = false;
		self
	}

	pub fn with_widget(mut self, widget: Widget) -> Self {
		self.widget = widget;
		self
	}

	fn empty(&self) -> FieldResult<serde_json::Value> {
		if self.required {
			return Err(FieldError::Required(self.name.clone()));
		}
		Ok(serde_json::Value::String(String::new()))
	}
}

impl FormField for CharField {
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
			None | Some(serde_json::Value::Null) => return self.empty(),
			Some(v) => v
				.as_str()
				.ok_or_else(|| FieldError::Validation("Value must be a string".to_string()))?,
		};

		let raw = if self.strip { raw.trim() } else { raw };
		if raw.is_empty() {
			return self.empty();
		}

		// Lengths are counted in characters, not bytes
		let char_count = raw.chars().count();
		if let Some(max_length) = self.max_length
			&& char_count > max_length
		{
			return Err(FieldError::Validation(format!(
				"Ensure this value has at most {} characters (it has {})",
				max_length, char_count
			)));
		}

		if let Some(min_length) = self.min_length
			&& char_count < min_length
		{
			return Err(FieldError::Validation(format!(
				"Ensure this value has at least {} characters (it has {})",
				min_length, char_count
			)));
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
	fn test_char_field_required() {
		// Arrange
		let field = CharField::new("title".to_string()).required();

		// Act & Assert
		assert!(field.clean(None).is_err());
		assert!(field.clean(Some(&json!(""))).is_err());
		assert!(field.clean(Some(&json!("  "))).is_err());
	}

	#[rstest]
	#[case("12345", true)]
	#[case("123456", false)]
	#[case("ééééé", true)]
	fn test_char_field_max_length_counts_chars(#[case] input: &str, #[case] ok: bool) {
		let field = CharField::new("title".to_string()).with_max_length(5);
		assert_eq!(field.clean(Some(&json!(input))).is_ok(), ok);
	}

	#[rstest]
	fn test_char_field_min_length() {
		let field = CharField::new("title".to_string()).with_min_length(3);

		assert!(field.clean(Some(&json!("abc"))).is_ok());
		assert!(field.clean(Some(&json!("ab"))).is_err());
	}

	#[rstest]
	fn test_char_field_strip() {
		let stripped = CharField::new("message".to_string());
		let raw = CharField::new("message".to_string()).no_strip();

		assert_eq!(stripped.clean(Some(&json!(" hi "))).unwrap(), json!("hi"));
		assert_eq!(raw.clean(Some(&json!(" hi "))).unwrap(), json!(" hi "));
	}

	#[rstest]
	fn test_char_field_rejects_non_string() {
		let field = CharField::new("title".to_string());
		assert!(matches!(
			field.clean(Some(&json!(42))),
			Err(FieldError::Validation(_))
		));
	}
}
