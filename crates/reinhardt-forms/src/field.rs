//! Field trait and shared field types

/// HTML widget used to render a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Widget {
	TextInput,
	TextArea,
	EmailInput,
	HiddenInput,
	Select,
	CheckboxSelectMultiple,
}

impl Widget {
	/// Name of the widget as exposed in a render context
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_forms::Widget;
	///
	/// assert_eq!(Widget::HiddenInput.as_str(), "hidden");
	/// assert_eq!(Widget::CheckboxSelectMultiple.as_str(), "checkbox_select_multiple");
	/// ```
	pub fn as_str(&self) -> &'static str {
		match self {
			Widget::TextInput => "text",
			Widget::TextArea => "textarea",
			Widget::EmailInput => "email",
			Widget::HiddenInput => "hidden",
			Widget::Select => "select",
			Widget::CheckboxSelectMultiple => "checkbox_select_multiple",
		}
	}

	pub fn is_hidden(&self) -> bool {
		matches!(self, Widget::HiddenInput)
	}
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
	#[error("This field is required: {0}")]
	Required(String),
	#[error("{0}")]
	Validation(String),
	#[error("Select a valid choice. {0} is not one of the available choices.")]
	InvalidChoice(String),
}

pub type FieldResult<T> = Result<T, FieldError>;

/// A single form field: knows its name and how to clean a raw value
pub trait FormField: Send + Sync {
	fn name(&self) -> &str;

	fn label(&self) -> Option<&str> {
		None
	}

	fn required(&self) -> bool {
		false
	}

	fn help_text(&self) -> Option<&str> {
		None
	}

	fn widget(&self) -> &Widget;

	fn initial(&self) -> Option<&serde_json::Value> {
		None
	}

	/// Clean and validate a raw submitted value
	fn clean(&self, value: Option<&serde_json::Value>) -> FieldResult<serde_json::Value>;

	/// Whether the submitted value differs from the initial one
	fn has_changed(
		&self,
		initial: Option<&serde_json::Value>,
		data: Option<&serde_json::Value>,
	) -> bool {
		match (initial, data) {
			(None, None) => false,
			(Some(i), Some(d)) => i != d,
			(None, Some(d)) => !d.is_null() && d.as_str() != Some(""),
			(Some(_), None) => true,
		}
	}
}

/// Escape a value for use inside an HTML attribute
///
/// # Examples
///
/// ```
/// use reinhardt_forms::field::escape_attribute;
///
/// assert_eq!(escape_attribute("a\"b<c>"), "a&quot;b&lt;c&gt;");
/// ```
pub fn escape_attribute(value: &str) -> String {
	let mut escaped = String::with_capacity(value.len());
	for c in value.chars() {
		match c {
			'&' => escaped.push_str("&amp;"),
			'"' => escaped.push_str("&quot;"),
			'\'' => escaped.push_str("&#x27;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			_ => escaped.push(c),
		}
	}
	escaped
}
