//! Core view abstractions

use crate::multiform::{MultiFormResponse, MultiFormView, Result, Submission};
use async_trait::async_trait;
use std::collections::HashMap;

/// Template context
pub type Context = HashMap<String, serde_json::Value>;

/// Base trait for all views
#[async_trait]
pub trait View: Send + Sync {
	async fn dispatch(&self, submission: Submission) -> Result<MultiFormResponse>;

	/// Returns the list of HTTP methods allowed by this view
	fn allowed_methods(&self) -> Vec<&'static str> {
		vec!["GET", "HEAD", "OPTIONS"]
	}
}

#[async_trait]
impl View for MultiFormView {
	async fn dispatch(&self, submission: Submission) -> Result<MultiFormResponse> {
		self.handle(&submission)
	}

	fn allowed_methods(&self) -> Vec<&'static str> {
		vec!["GET", "HEAD", "POST", "PUT", "OPTIONS"]
	}
}

#[async_trait]
impl<V: View + ?Sized> View for std::sync::Arc<V> {
	async fn dispatch(&self, submission: Submission) -> Result<MultiFormResponse> {
		(**self).dispatch(submission).await
	}

	fn allowed_methods(&self) -> Vec<&'static str> {
		(**self).allowed_methods()
	}
}
