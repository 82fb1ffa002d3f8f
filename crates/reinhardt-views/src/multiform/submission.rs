//! Incoming submission: method, field values and uploaded files

use super::error::{MultiFormError, Result};
use http::Method;
use indexmap::IndexMap;
use reinhardt_forms::UploadedFile;
use std::sync::Arc;

/// Submitted field values, in submission order
pub type SubmittedData = IndexMap<String, serde_json::Value>;
/// Uploaded files keyed by (prefixed) field name
pub type SubmittedFiles = IndexMap<String, UploadedFile>;

/// Key of the hidden input identifying the submitting form
pub const FORM_NAME_KEY: &str = "form_name";

/// One request's worth of form input.
///
/// Data and files sit behind `Arc` so every bound form of the request can
/// receive the whole payload without copying it up front.
#[derive(Debug, Clone)]
pub struct Submission {
	method: Method,
	data: Arc<SubmittedData>,
	files: Arc<SubmittedFiles>,
}

impl Submission {
	pub fn new(method: Method) -> Self {
		Self {
			method,
			data: Arc::new(IndexMap::new()),
			files: Arc::new(IndexMap::new()),
		}
	}

	pub fn get() -> Self {
		Self::new(Method::GET)
	}

	pub fn post() -> Self {
		Self::new(Method::POST)
	}

	pub fn put() -> Self {
		Self::new(Method::PUT)
	}

	/// Add one submitted field value
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_views::multiform::Submission;
	///
	/// let submission = Submission::post()
	///     .with_field("contactform-title", "Hello")
	///     .with_field("contactform-message", "World");
	/// assert_eq!(submission.data().len(), 2);
	/// assert!(submission.is_data_carrying());
	/// ```
	pub fn with_field(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
		Arc::make_mut(&mut self.data).insert(key.into(), value.into());
		self
	}

	pub fn with_data(mut self, data: SubmittedData) -> Self {
		self.data = Arc::new(data);
		self
	}

	pub fn with_file(mut self, key: impl Into<String>, file: UploadedFile) -> Self {
		Arc::make_mut(&mut self.files).insert(key.into(), file);
		self
	}

	/// Parse an `application/x-www-form-urlencoded` body.
	///
	/// Repeated keys are folded into a JSON array, the way checkbox groups
	/// submit several values under one name.
	///
	/// # Examples
	///
	/// ```
	/// use http::Method;
	/// use reinhardt_views::multiform::Submission;
	/// use serde_json::json;
	///
	/// let submission = Submission::from_urlencoded(
	///     Method::POST,
	///     "cart-selection=0&cart-selection=1&cart-action=remove",
	/// )
	/// .unwrap();
	/// assert_eq!(submission.data()["cart-selection"], json!(["0", "1"]));
	/// assert_eq!(submission.data()["cart-action"], json!("remove"));
	/// ```
	pub fn from_urlencoded(method: Method, body: &str) -> Result<Self> {
		let pairs: Vec<(String, String)> = serde_urlencoded::from_str(body)
			.map_err(|e| MultiFormError::InvalidSubmission(e.to_string()))?;

		let mut data = SubmittedData::new();
		for (key, value) in pairs {
			match data.get_mut(&key) {
				Some(serde_json::Value::Array(values)) => {
					values.push(serde_json::Value::String(value));
				}
				Some(existing) => {
					let first = existing.take();
					*existing = serde_json::Value::Array(vec![first, serde_json::Value::String(value)]);
				}
				None => {
					data.insert(key, serde_json::Value::String(value));
				}
			}
		}

		Ok(Self::new(method).with_data(data))
	}

	pub fn method(&self) -> &Method {
		&self.method
	}

	pub fn data(&self) -> &SubmittedData {
		&self.data
	}

	pub fn files(&self) -> &SubmittedFiles {
		&self.files
	}

	pub fn shared_data(&self) -> Arc<SubmittedData> {
		Arc::clone(&self.data)
	}

	pub fn shared_files(&self) -> Arc<SubmittedFiles> {
		Arc::clone(&self.files)
	}

	/// POST and PUT carry form data; every other method is read-only
	pub fn is_data_carrying(&self) -> bool {
		is_data_carrying(&self.method)
	}

	/// Every submitted key: field names first, then file field names
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.data
			.keys()
			.chain(self.files.keys())
			.map(String::as_str)
	}

	/// Value of the `form_name` marker input, if the page sent one.
	///
	/// The exact `form_name` key wins; otherwise the first key containing
	/// `form_name` (a prefixed hidden input such as `contactform-form_name`)
	/// with a non-empty value.
	pub fn form_name(&self) -> Option<&str> {
		self.data
			.get(FORM_NAME_KEY)
			.and_then(marker_value)
			.or_else(|| {
				self.data
					.iter()
					.filter(|(k, _)| k.contains(FORM_NAME_KEY))
					.find_map(|(_, v)| marker_value(v))
			})
	}
}

fn marker_value(value: &serde_json::Value) -> Option<&str> {
	match value {
		serde_json::Value::String(s) if !s.is_empty() => Some(s.as_str()),
		serde_json::Value::Array(items) => items
			.iter()
			.filter_map(|v| v.as_str())
			.find(|s| !s.is_empty()),
		_ => None,
	}
}

pub fn is_data_carrying(method: &Method) -> bool {
	*method == Method::POST || *method == Method::PUT
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case(Method::POST, true)]
	#[case(Method::PUT, true)]
	#[case(Method::GET, false)]
	#[case(Method::HEAD, false)]
	#[case(Method::PATCH, false)]
	#[case(Method::DELETE, false)]
	fn test_data_carrying_methods(#[case] method: Method, #[case] expected: bool) {
		assert_eq!(Submission::new(method).is_data_carrying(), expected);
	}

	#[rstest]
	fn test_keys_include_files_after_data() {
		let submission = Submission::post()
			.with_field("a-title", "x")
			.with_file("b-avatar", UploadedFile::new("a.png", vec![0u8]));

		let keys: Vec<&str> = submission.keys().collect();
		assert_eq!(keys, vec!["a-title", "b-avatar"]);
	}

	#[rstest]
	fn test_form_name_exact_key_wins() {
		let submission = Submission::post()
			.with_field("contactform-form_name", "contactform")
			.with_field("form_name", "better_name");

		assert_eq!(submission.form_name(), Some("better_name"));
	}

	#[rstest]
	fn test_form_name_falls_back_to_prefixed_key() {
		let submission = Submission::post()
			.with_field("contactform-title", "t")
			.with_field("contactform-form_name", "contactform");

		assert_eq!(submission.form_name(), Some("contactform"));
	}

	#[rstest]
	fn test_form_name_skips_empty_markers() {
		let submission = Submission::post()
			.with_field("form_name", "")
			.with_field("contactform-form_name", "")
			.with_field("better_name-form_name", "better_name");

		assert_eq!(submission.form_name(), Some("better_name"));
	}

	#[rstest]
	fn test_form_name_absent_or_empty() {
		assert_eq!(Submission::post().form_name(), None);
		assert_eq!(
			Submission::post().with_field("form_name", "").form_name(),
			None
		);
	}

	#[rstest]
	fn test_from_urlencoded_decodes_values() {
		let submission =
			Submission::from_urlencoded(Method::POST, "better_name-email=a%40b.io&x=1+2").unwrap();

		assert_eq!(submission.data()["better_name-email"], json!("a@b.io"));
		assert_eq!(submission.data()["x"], json!("1 2"));
	}

	#[rstest]
	fn test_from_urlencoded_folds_three_values() {
		let submission = Submission::from_urlencoded(Method::POST, "s=0&s=1&s=2").unwrap();
		assert_eq!(submission.data()["s"], json!(["0", "1", "2"]));
	}
}
