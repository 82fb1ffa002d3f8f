//! Errors raised by multi-form views

use reinhardt_forms::FormError;

/// Faults surfaced by a multi-form view.
///
/// Every variant except `Form` and `InvalidSubmission` is a configuration
/// fault: the view was declared incorrectly and no request can recover from
/// it. Validation failures and empty submissions are not errors; they become
/// `Render` and `Forbidden` responses.
#[derive(Debug, thiserror::Error)]
pub enum MultiFormError {
	#[error("Improperly configured: {0}")]
	ImproperlyConfigured(String),
	#[error("No redirection URL for {name} was provided.")]
	MissingSuccessUrl { name: String },
	#[error("{forms} form(s) declared but {urls} success URL(s) given")]
	SuccessUrlCountMismatch { forms: usize, urls: usize },
	#[error("Form name '{name}' is declared more than once")]
	DuplicateFormName { name: String },
	#[error("Invalid multi-form settings: {0}")]
	Settings(String),
	#[error("Malformed submission body: {0}")]
	InvalidSubmission(String),
	#[error(transparent)]
	Form(#[from] FormError),
}

impl MultiFormError {
	/// Whether the error comes from the view's declaration rather than a request
	pub fn is_configuration_fault(&self) -> bool {
		!matches!(
			self,
			MultiFormError::Form(_) | MultiFormError::InvalidSubmission(_)
		)
	}
}

impl From<toml::de::Error> for MultiFormError {
	fn from(err: toml::de::Error) -> Self {
		MultiFormError::Settings(err.to_string())
	}
}

pub type Result<T> = std::result::Result<T, MultiFormError>;

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_missing_success_url_message() {
		let err = MultiFormError::MissingSuccessUrl {
			name: "contactform".to_string(),
		};
		assert_eq!(
			err.to_string(),
			"No redirection URL for contactform was provided."
		);
		assert!(err.is_configuration_fault());
	}

	#[rstest]
	fn test_form_error_is_not_configuration_fault() {
		let err: MultiFormError = FormError::Validation("bad".to_string()).into();
		assert!(!err.is_configuration_fault());
	}
}
