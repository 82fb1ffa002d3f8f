use crate::field::{FormField, Widget};

/// BoundField represents a field bound to form data
pub struct BoundField<'a> {
	field: &'a dyn FormField,
	data: Option<&'a serde_json::Value>,
	errors: &'a [String],
	prefix: &'a str,
}

impl<'a> BoundField<'a> {
	/// Bind a field to the data and errors of one form instance
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_forms::{BoundField, CharField, FormField};
	///
	/// let field: Box<dyn FormField> = Box::new(CharField::new("title".to_string()));
	/// let data = serde_json::json!("Hello");
	///
	/// let bound = BoundField::new(field.as_ref(), Some(&data), &[], "contactform");
	/// assert_eq!(bound.name(), "title");
	/// assert_eq!(bound.html_name(), "contactform-title");
	/// assert_eq!(bound.value(), Some(&data));
	/// ```
	pub fn new(
		field: &'a dyn FormField,
		data: Option<&'a serde_json::Value>,
		errors: &'a [String],
		prefix: &'a str,
	) -> Self {
		Self {
			field,
			data,
			errors,
			prefix,
		}
	}

	pub fn name(&self) -> &str {
		self.field.name()
	}

	/// HTML name attribute, namespaced by the form prefix
	pub fn html_name(&self) -> String {
		if self.prefix.is_empty() {
			self.field.name().to_string()
		} else {
			format!("{}-{}", self.prefix, self.field.name())
		}
	}

	pub fn id_for_label(&self) -> String {
		format!("id_{}", self.html_name())
	}

	pub fn label(&self) -> Option<&str> {
		self.field.label()
	}

	/// Submitted value, falling back to the field's own initial value
	pub fn value(&self) -> Option<&serde_json::Value> {
		self.data.or_else(|| self.field.initial())
	}

	pub fn errors(&self) -> &[String] {
		self.errors
	}

	pub fn has_errors(&self) -> bool {
		!self.errors.is_empty()
	}

	pub fn widget(&self) -> &Widget {
		self.field.widget()
	}

	pub fn help_text(&self) -> Option<&str> {
		self.field.help_text()
	}

	pub fn is_required(&self) -> bool {
		self.field.required()
	}

	pub fn is_hidden(&self) -> bool {
		self.field.widget().is_hidden()
	}

	/// Render-context representation of this field
	pub fn to_context(&self) -> serde_json::Value {
		serde_json::json!({
			"name": self.name(),
			"html_name": self.html_name(),
			"id": self.id_for_label(),
			"label": self.label(),
			"widget": self.widget().as_str(),
			"required": self.is_required(),
			"is_hidden": self.is_hidden(),
			"value": self.value(),
			"errors": self.errors,
		})
	}
}
