//! The form abstraction multi-form views dispatch over

use super::submission::{FORM_NAME_KEY, SubmittedData, SubmittedFiles};
use reinhardt_forms::{CharField, Form};
use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Construction arguments handed to a form definition.
///
/// `data` and `files` are present only when the form takes part in the
/// current submission; they hold the whole payload, unfiltered.
#[derive(Debug, Clone)]
pub struct FormKwargs {
	pub initial: serde_json::Value,
	pub prefix: String,
	pub data: Option<Arc<SubmittedData>>,
	pub files: Option<Arc<SubmittedFiles>>,
	/// Extra construction arguments supplied by a form-kwargs hook
	pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for FormKwargs {
	fn default() -> Self {
		Self {
			initial: serde_json::Value::Object(serde_json::Map::new()),
			prefix: String::new(),
			data: None,
			files: None,
			extra: serde_json::Map::new(),
		}
	}
}

impl FormKwargs {
	pub fn new(prefix: impl Into<String>) -> Self {
		Self {
			prefix: prefix.into(),
			..Self::default()
		}
	}

	pub fn with_initial(mut self, initial: serde_json::Value) -> Self {
		self.initial = initial;
		self
	}

	pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
		self.extra.insert(key.into(), value.into());
		self
	}

	pub fn is_bound(&self) -> bool {
		self.data.is_some()
	}

	pub fn extra(&self, key: &str) -> Option<&serde_json::Value> {
		self.extra.get(key)
	}

	/// Initial values as a flat map; non-object initials yield an empty map
	pub fn initial_map(&self) -> HashMap<String, serde_json::Value> {
		match &self.initial {
			serde_json::Value::Object(map) => {
				map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
			}
			_ => HashMap::new(),
		}
	}

	/// Apply prefix, initial values and (when bound) the payload to a form
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_forms::{CharField, Form};
	/// use reinhardt_views::multiform::FormKwargs;
	/// use serde_json::json;
	///
	/// let mut form = Form::new();
	/// form.add_field(Box::new(CharField::new("title".to_string())));
	///
	/// FormKwargs::new("contactform")
	///     .with_initial(json!({"title": "Draft"}))
	///     .apply_to(&mut form);
	///
	/// assert_eq!(form.prefix(), "contactform");
	/// assert_eq!(form.initial()["title"], json!("Draft"));
	/// assert!(!form.is_bound());
	/// ```
	pub fn apply_to(&self, form: &mut Form) {
		form.set_prefix(self.prefix.clone());
		form.set_initial(self.initial_map());

		if let Some(data) = &self.data {
			let data = data.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
			let files = self
				.files
				.as_deref()
				.map(|files| files.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
				.unwrap_or_default();
			form.bind_with_files(data, files);
		}
	}
}

/// A form instance as seen by the dispatch core.
///
/// Implemented for [`Form`] and for form groups; user types wrapping a
/// form can implement it to get typed access in completion hooks.
pub trait FormInstance: Any + Send + Sync {
	fn prefix(&self) -> &str;

	fn is_bound(&self) -> bool;

	/// Run validation; unbound instances are never valid
	fn is_valid(&mut self) -> bool;

	fn cleaned_data(&self) -> serde_json::Map<String, serde_json::Value>;

	fn errors(&self) -> BTreeMap<String, Vec<String>>;

	/// Representation handed to the template layer
	fn to_context(&self) -> serde_json::Value;

	/// Runtime type name of the instance
	fn type_name(&self) -> &'static str {
		std::any::type_name::<Self>()
	}

	fn as_any(&self) -> &dyn Any;
}

impl dyn FormInstance {
	pub fn downcast_ref<T: FormInstance>(&self) -> Option<&T> {
		self.as_any().downcast_ref::<T>()
	}

	pub fn has_errors(&self) -> bool {
		!self.errors().is_empty()
	}
}

impl std::fmt::Debug for dyn FormInstance {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FormInstance")
			.field("type", &self.type_name())
			.field("prefix", &self.prefix())
			.field("is_bound", &self.is_bound())
			.finish()
	}
}

impl FormInstance for Form {
	fn prefix(&self) -> &str {
		Form::prefix(self)
	}

	fn is_bound(&self) -> bool {
		Form::is_bound(self)
	}

	fn is_valid(&mut self) -> bool {
		Form::is_valid(self)
	}

	fn cleaned_data(&self) -> serde_json::Map<String, serde_json::Value> {
		Form::cleaned_data(self)
			.iter()
			.map(|(k, v)| (k.clone(), v.clone()))
			.collect()
	}

	fn errors(&self) -> BTreeMap<String, Vec<String>> {
		Form::errors(self)
			.iter()
			.map(|(k, v)| (k.clone(), v.clone()))
			.collect()
	}

	fn to_context(&self) -> serde_json::Value {
		Form::to_context(self)
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

/// Something that can produce form instances for a multi-form view
pub trait FormDefinition: Send + Sync {
	/// Declared identity (usually a type name) used to derive the form's name
	fn identity(&self) -> Option<String> {
		None
	}

	fn build(&self, kwargs: FormKwargs) -> Box<dyn FormInstance>;
}

/// A form type that knows how to construct itself from kwargs
pub trait DeclaredForm: FormInstance + Sized {
	fn from_kwargs(kwargs: FormKwargs) -> Self;
}

type BuildFn = Arc<dyn Fn(FormKwargs) -> Box<dyn FormInstance> + Send + Sync>;

/// Form definition backed by a constructor function
#[derive(Clone)]
pub struct FormClass {
	identity: Option<String>,
	build: BuildFn,
}

impl FormClass {
	/// Definition with an explicit identity
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_forms::Form;
	/// use reinhardt_views::multiform::{FormClass, FormDefinition, FormInstance, FormKwargs};
	///
	/// let class = FormClass::new("ContactForm", |kwargs: FormKwargs| {
	///     let mut form = Form::new();
	///     kwargs.apply_to(&mut form);
	///     form
	/// });
	/// assert_eq!(class.identity().as_deref(), Some("ContactForm"));
	///
	/// let instance = class.build(FormKwargs::new("contactform"));
	/// assert_eq!(instance.prefix(), "contactform");
	/// ```
	pub fn new<F, T>(identity: impl Into<String>, build: F) -> Self
	where
		F: Fn(FormKwargs) -> T + Send + Sync + 'static,
		T: FormInstance,
	{
		Self {
			identity: Some(identity.into()),
			build: Arc::new(move |kwargs: FormKwargs| -> Box<dyn FormInstance> {
				Box::new(build(kwargs))
			}),
		}
	}

	/// Definition without a declared identity; its name is derived from the
	/// runtime type of an instance
	pub fn anonymous<F, T>(build: F) -> Self
	where
		F: Fn(FormKwargs) -> T + Send + Sync + 'static,
		T: FormInstance,
	{
		Self {
			identity: None,
			build: Arc::new(move |kwargs: FormKwargs| -> Box<dyn FormInstance> {
				Box::new(build(kwargs))
			}),
		}
	}

	/// Definition for a [`DeclaredForm`] type, identified by its type name
	pub fn of<T: DeclaredForm>() -> Self {
		Self {
			identity: Some(std::any::type_name::<T>().to_string()),
			build: Arc::new(|kwargs: FormKwargs| -> Box<dyn FormInstance> {
				Box::new(T::from_kwargs(kwargs))
			}),
		}
	}
}

impl std::fmt::Debug for FormClass {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FormClass")
			.field("identity", &self.identity)
			.finish_non_exhaustive()
	}
}

impl FormDefinition for FormClass {
	fn identity(&self) -> Option<String> {
		self.identity.clone()
	}

	fn build(&self, kwargs: FormKwargs) -> Box<dyn FormInstance> {
		(self.build)(kwargs)
	}
}

/// Add the hidden `form_name` input used to tell which form was submitted.
///
/// Its value comes from the form's initial data, which multi-form views
/// populate with the form's name when form-name tracking is on.
pub fn add_form_name_field(form: &mut Form) {
	form.add_field(Box::new(CharField::hidden(FORM_NAME_KEY.to_string(), 60)));
}

/// A prefixed form carrying the hidden `form_name` input
///
/// # Examples
///
/// ```
/// use reinhardt_views::multiform::multiple_form;
///
/// let form = multiple_form("better_name");
/// assert_eq!(form.prefix(), "better_name");
/// assert!(form.get_field("form_name").is_some());
/// ```
pub fn multiple_form(prefix: &str) -> Form {
	let mut form = Form::with_prefix(prefix.to_string());
	add_form_name_field(&mut form);
	form
}
