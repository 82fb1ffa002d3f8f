//! Uploaded file values carried alongside submitted form data

use bytes::Bytes;

/// A file received in a multipart submission
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
	pub filename: String,
	pub content_type: Option<String>,
	pub content: Bytes,
}

impl UploadedFile {
	/// Create an uploaded file from its name and raw content
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_forms::UploadedFile;
	///
	/// let file = UploadedFile::new("avatar.png", b"\x89PNG".to_vec())
	///     .with_content_type("image/png");
	/// assert_eq!(file.size(), 4);
	/// assert_eq!(file.content_type.as_deref(), Some("image/png"));
	/// ```
	pub fn new(filename: impl Into<String>, content: impl Into<Bytes>) -> Self {
		Self {
			filename: filename.into(),
			content_type: None,
			content: content.into(),
		}
	}

	pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
		self.content_type = Some(content_type.into());
		self
	}

	pub fn size(&self) -> usize {
		self.content.len()
	}
}
