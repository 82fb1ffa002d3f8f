use crate::bound_field::BoundField;
use crate::field::{FieldError, FormField};
use crate::files::UploadedFile;
use std::collections::HashMap;
use std::ops::Index;

#[derive(Debug, thiserror::Error)]
pub enum FormError {
	#[error("Field error in {field}: {error}")]
	Field { field: String, error: FieldError },
	#[error("Validation error: {0}")]
	Validation(String),
}

pub type FormResult<T> = Result<T, FormError>;

type CleanFunction =
	Box<dyn Fn(&HashMap<String, serde_json::Value>) -> FormResult<()> + Send + Sync>;
type FieldCleanFunction =
	Box<dyn Fn(&serde_json::Value) -> FormResult<serde_json::Value> + Send + Sync>;

/// Special key for form-level (non-field-specific) errors.
pub const ALL_FIELDS_KEY: &str = "_all";

/// A set of fields validated together, optionally namespaced by a prefix.
///
/// Submitted data is kept whole: a prefixed form only reads the keys
/// `<prefix>-<field>`, so several forms can be bound to the same payload.
pub struct Form {
	fields: Vec<Box<dyn FormField>>,
	data: HashMap<String, serde_json::Value>,
	files: HashMap<String, UploadedFile>,
	cleaned: HashMap<String, serde_json::Value>,
	initial: HashMap<String, serde_json::Value>,
	errors: HashMap<String, Vec<String>>,
	is_bound: bool,
	clean_functions: Vec<CleanFunction>,
	field_clean_functions: HashMap<String, FieldCleanFunction>,
	prefix: String,
}

impl Form {
	/// Create a new empty form
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_forms::Form;
	///
	/// let form = Form::new();
	/// assert!(!form.is_bound());
	/// assert!(form.fields().is_empty());
	/// ```
	pub fn new() -> Self {
		Self {
			fields: vec![],
			data: HashMap::new(),
			files: HashMap::new(),
			cleaned: HashMap::new(),
			initial: HashMap::new(),
			errors: HashMap::new(),
			is_bound: false,
			clean_functions: vec![],
			field_clean_functions: HashMap::new(),
			prefix: String::new(),
		}
	}

	pub fn with_initial(initial: HashMap<String, serde_json::Value>) -> Self {
		Self {
			initial,
			..Self::new()
		}
	}

	/// Create a new form with a field prefix
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_forms::Form;
	///
	/// let form = Form::with_prefix("contactform".to_string());
	/// assert_eq!(form.prefix(), "contactform");
	/// assert_eq!(form.add_prefix_to_field_name("title"), "contactform-title");
	/// ```
	pub fn with_prefix(prefix: String) -> Self {
		Self {
			prefix,
			..Self::new()
		}
	}

	pub fn add_field(&mut self, field: Box<dyn FormField>) {
		self.fields.push(field);
	}

	/// Bind submitted data for validation
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_forms::{CharField, Form};
	/// use std::collections::HashMap;
	/// use serde_json::json;
	///
	/// let mut form = Form::with_prefix("contactform".to_string());
	/// form.add_field(Box::new(CharField::new("title".to_string()).required()));
	///
	/// let mut data = HashMap::new();
	/// data.insert("contactform-title".to_string(), json!("Hello"));
	/// data.insert("better_name-email".to_string(), json!("a@b.io"));
	/// form.bind(data);
	///
	/// assert!(form.is_valid());
	/// assert_eq!(form.cleaned_data().get("title"), Some(&json!("Hello")));
	/// assert!(!form.cleaned_data().contains_key("email"));
	/// ```
	pub fn bind(&mut self, data: HashMap<String, serde_json::Value>) {
		self.data = data;
		self.is_bound = true;
	}

	pub fn bind_with_files(
		&mut self,
		data: HashMap<String, serde_json::Value>,
		files: HashMap<String, UploadedFile>,
	) {
		self.bind(data);
		self.files = files;
	}

	/// Validate the form and return true if all fields are valid
	///
	/// Unbound forms are never valid.
	pub fn is_valid(&mut self) -> bool {
		if !self.is_bound {
			return false;
		}

		self.errors.clear();
		self.cleaned.clear();

		for field in &self.fields {
			let key = self.add_prefix_to_field_name(field.name());
			let value = self.data.get(&key);

			match field.clean(value) {
				Ok(mut cleaned) => {
					if let Some(field_clean) = self.field_clean_functions.get(field.name()) {
						match field_clean(&cleaned) {
							Ok(further_cleaned) => {
								cleaned = further_cleaned;
							}
							Err(e) => {
								self.errors
									.entry(field.name().to_string())
									.or_default()
									.push(e.to_string());
								continue;
							}
						}
					}
					self.cleaned.insert(field.name().to_string(), cleaned);
				}
				Err(e) => {
					self.errors
						.entry(field.name().to_string())
						.or_default()
						.push(e.to_string());
				}
			}
		}

		for clean_fn in &self.clean_functions {
			if let Err(e) = clean_fn(&self.cleaned) {
				match e {
					FormError::Field { field, error } => {
						self.errors
							.entry(field)
							.or_default()
							.push(error.to_string());
					}
					FormError::Validation(msg) => {
						self.errors
							.entry(ALL_FIELDS_KEY.to_string())
							.or_default()
							.push(msg);
					}
				}
			}
		}

		self.errors.is_empty()
	}

	/// Values produced by the last `is_valid` call, keyed by field name
	pub fn cleaned_data(&self) -> &HashMap<String, serde_json::Value> {
		&self.cleaned
	}

	pub fn errors(&self) -> &HashMap<String, Vec<String>> {
		&self.errors
	}

	pub fn non_field_errors(&self) -> &[String] {
		self.errors
			.get(ALL_FIELDS_KEY)
			.map(Vec::as_slice)
			.unwrap_or(&[])
	}

	pub fn is_bound(&self) -> bool {
		self.is_bound
	}

	pub fn fields(&self) -> &[Box<dyn FormField>] {
		&self.fields
	}

	pub fn initial(&self) -> &HashMap<String, serde_json::Value> {
		&self.initial
	}

	pub fn set_initial(&mut self, initial: HashMap<String, serde_json::Value>) {
		self.initial = initial;
	}

	/// Raw submitted value for a field, looked up under this form's prefix
	pub fn raw_value(&self, field_name: &str) -> Option<&serde_json::Value> {
		self.data.get(&self.add_prefix_to_field_name(field_name))
	}

	pub fn files(&self) -> &HashMap<String, UploadedFile> {
		&self.files
	}

	/// Uploaded file for a field, looked up under this form's prefix
	pub fn file(&self, field_name: &str) -> Option<&UploadedFile> {
		self.files.get(&self.add_prefix_to_field_name(field_name))
	}

	/// Check if any field has changed from its initial value
	pub fn has_changed(&self) -> bool {
		if !self.is_bound {
			return false;
		}

		self.fields.iter().any(|field| {
			let initial_val = self.initial.get(field.name());
			let data_val = self.raw_value(field.name());
			field.has_changed(initial_val, data_val)
		})
	}

	pub fn get_field(&self, name: &str) -> Option<&dyn FormField> {
		self.fields
			.iter()
			.find(|f| f.name() == name)
			.map(|f| f.as_ref())
	}

	pub fn field_count(&self) -> usize {
		self.fields.len()
	}

	/// Add a custom clean function run over the cleaned data
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_forms::{Form, FormError};
	///
	/// let mut form = Form::new();
	/// form.add_clean_function(|data| {
	///     if data.get("password") != data.get("confirm_password") {
	///         Err(FormError::Validation("Passwords do not match".to_string()))
	///     } else {
	///         Ok(())
	///     }
	/// });
	/// ```
	pub fn add_clean_function<F>(&mut self, f: F)
	where
		F: Fn(&HashMap<String, serde_json::Value>) -> FormResult<()> + Send + Sync + 'static,
	{
		self.clean_functions.push(Box::new(f));
	}

	/// Add a custom clean function for a specific field
	pub fn add_field_clean_function<F>(&mut self, field_name: &str, f: F)
	where
		F: Fn(&serde_json::Value) -> FormResult<serde_json::Value> + Send + Sync + 'static,
	{
		self.field_clean_functions
			.insert(field_name.to_string(), Box::new(f));
	}

	pub fn prefix(&self) -> &str {
		&self.prefix
	}

	pub fn set_prefix(&mut self, prefix: String) {
		self.prefix = prefix;
	}

	pub fn add_prefix_to_field_name(&self, field_name: &str) -> String {
		if self.prefix.is_empty() {
			field_name.to_string()
		} else {
			format!("{}-{}", self.prefix, field_name)
		}
	}

	/// Bound field view; unbound forms expose their initial values
	pub fn get_bound_field<'a>(&'a self, name: &str) -> Option<BoundField<'a>> {
		let field = self.get_field(name)?;
		let data = if self.is_bound {
			self.raw_value(name)
		} else {
			self.initial.get(name)
		};
		let errors = self.errors.get(name).map(|e| e.as_slice()).unwrap_or(&[]);

		Some(BoundField::new(field, data, errors, &self.prefix))
	}

	/// Render-context representation of the whole form
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_forms::{CharField, Form};
	///
	/// let mut form = Form::with_prefix("contactform".to_string());
	/// form.add_field(Box::new(CharField::new("title".to_string())));
	///
	/// let ctx = form.to_context();
	/// assert_eq!(ctx["prefix"], "contactform");
	/// assert_eq!(ctx["is_bound"], false);
	/// assert_eq!(ctx["fields"][0]["html_name"], "contactform-title");
	/// ```
	pub fn to_context(&self) -> serde_json::Value {
		let fields: Vec<serde_json::Value> = self
			.fields
			.iter()
			.filter_map(|f| self.get_bound_field(f.name()))
			.map(|bf| bf.to_context())
			.collect();

		serde_json::json!({
			"prefix": self.prefix,
			"is_bound": self.is_bound,
			"errors": self.errors,
			"fields": fields,
		})
	}
}

impl Default for Form {
	fn default() -> Self {
		Self::new()
	}
}

impl Form {
	// Allow borrowed_box because Index trait impl requires &Box<dyn FormField>
	#[allow(clippy::borrowed_box)]
	pub fn get(&self, name: &str) -> Option<&Box<dyn FormField>> {
		self.fields.iter().find(|f| f.name() == name)
	}
}

impl Index<&str> for Form {
	type Output = Box<dyn FormField>;

	fn index(&self, name: &str) -> &Self::Output {
		self.get(name)
			.unwrap_or_else(|| panic!("Field '{}' not found", name))
	}
}
