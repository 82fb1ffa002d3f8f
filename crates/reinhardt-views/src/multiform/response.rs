//! What a multi-form view answers with

use super::router::FormMap;
use crate::core::Context;
use http::{StatusCode, header};

/// Outgoing signal of a multi-form view
#[derive(Debug)]
pub enum MultiFormResponse {
	/// Redirect to the completed form's success URL
	Redirect(String),
	/// Render the forms, blank or carrying their errors
	Render(RenderContext),
	/// A data-carrying request that bound none of the forms
	Forbidden,
	/// Body produced directly by a completion hook
	Content(String),
}

impl MultiFormResponse {
	pub fn is_redirect(&self) -> bool {
		matches!(self, MultiFormResponse::Redirect(_))
	}

	pub fn redirect_url(&self) -> Option<&str> {
		match self {
			MultiFormResponse::Redirect(url) => Some(url),
			_ => None,
		}
	}

	pub fn render_context(&self) -> Option<&RenderContext> {
		match self {
			MultiFormResponse::Render(ctx) => Some(ctx),
			_ => None,
		}
	}

	/// Convert into an HTTP response.
	///
	/// Redirects become `302 Found` with a `Location` header, rendered forms a
	/// `200 OK` carrying the JSON context, empty submissions `403 Forbidden`.
	/// A redirect URL that is not a valid header value yields
	/// `500 Internal Server Error`, never a `302` without `Location`.
	///
	/// # Examples
	///
	/// ```
	/// use http::StatusCode;
	/// use reinhardt_views::multiform::MultiFormResponse;
	///
	/// let response = MultiFormResponse::Redirect("/thanks/".to_string()).into_http();
	/// assert_eq!(response.status(), StatusCode::FOUND);
	/// assert_eq!(response.headers()["location"], "/thanks/");
	///
	/// let response = MultiFormResponse::Forbidden.into_http();
	/// assert_eq!(response.status(), StatusCode::FORBIDDEN);
	/// ```
	pub fn into_http(self) -> http::Response<String> {
		let (status, location, content_type, body) = match self {
			MultiFormResponse::Redirect(url) => (StatusCode::FOUND, Some(url), None, String::new()),
			MultiFormResponse::Render(ctx) => (
				StatusCode::OK,
				None,
				Some("application/json"),
				ctx.to_json().to_string(),
			),
			MultiFormResponse::Forbidden => (StatusCode::FORBIDDEN, None, None, String::new()),
			MultiFormResponse::Content(body) => {
				(StatusCode::OK, None, Some("text/html; charset=utf-8"), body)
			}
		};

		let location = match location.map(header::HeaderValue::try_from).transpose() {
			Ok(location) => location,
			Err(err) => {
				tracing::warn!(error = %err, "success URL is not a valid Location header");
				let mut response = http::Response::new(String::new());
				*response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
				return response;
			}
		};

		let mut response = http::Response::new(body);
		*response.status_mut() = status;
		if let Some(value) = location {
			response.headers_mut().insert(header::LOCATION, value);
		}
		if let Some(content_type) = content_type {
			response
				.headers_mut()
				.insert(header::CONTENT_TYPE, header::HeaderValue::from_static(content_type));
		}
		response
	}
}

/// Everything handed to the template layer when forms are rendered
#[derive(Debug)]
pub struct RenderContext {
	pub template_name: Option<String>,
	pub forms: FormMap,
	/// Extra context entries
	pub context: Context,
}

impl RenderContext {
	pub fn new(template_name: Option<String>, forms: FormMap) -> Self {
		Self {
			template_name,
			forms,
			context: Context::new(),
		}
	}

	/// Form errors keyed by form name; forms without errors are left out
	pub fn errors(&self) -> serde_json::Map<String, serde_json::Value> {
		self.forms
			.iter()
			.filter(|(_, form)| form.has_errors())
			.map(|(name, form)| (name.clone(), serde_json::json!(form.errors())))
			.collect()
	}

	/// JSON representation: template name, every form's context and extras
	pub fn to_json(&self) -> serde_json::Value {
		let forms: serde_json::Map<String, serde_json::Value> = self
			.forms
			.iter()
			.map(|(name, form)| (name.clone(), form.to_context()))
			.collect();

		let mut root = serde_json::Map::new();
		for (key, value) in &self.context {
			root.insert(key.clone(), value.clone());
		}
		root.insert(
			"template_name".to_string(),
			serde_json::json!(self.template_name),
		);
		root.insert("forms".to_string(), serde_json::Value::Object(forms));
		serde_json::Value::Object(root)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::multiform::form::{FormInstance, FormKwargs};
	use reinhardt_forms::{CharField, Form};
	use rstest::rstest;
	use serde_json::json;

	fn blank(prefix: &str) -> Box<dyn FormInstance> {
		let mut form = Form::new();
		form.add_field(Box::new(CharField::new("title".to_string())));
		FormKwargs::new(prefix).apply_to(&mut form);
		Box::new(form)
	}

	#[rstest]
	fn test_render_into_http_carries_forms() {
		let mut forms = FormMap::new();
		forms.insert("contactform".to_string(), blank("contactform"));
		let mut ctx = RenderContext::new(Some("demo/multiple_forms.html".into()), forms);
		ctx.context.insert("page".to_string(), json!("demo"));

		let response = MultiFormResponse::Render(ctx).into_http();
		let body: serde_json::Value = serde_json::from_str(response.body()).unwrap();

		assert_eq!(response.status(), StatusCode::OK);
		assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
		assert_eq!(body["template_name"], json!("demo/multiple_forms.html"));
		assert_eq!(body["forms"]["contactform"]["prefix"], json!("contactform"));
		assert_eq!(body["page"], json!("demo"));
	}

	#[rstest]
	fn test_content_response_body() {
		let response = MultiFormResponse::Content("ok".to_string()).into_http();
		assert_eq!(response.status(), StatusCode::OK);
		assert_eq!(response.body(), "ok");
	}

	#[rstest]
	#[case("/done/\r\nX-Injected: y")]
	#[case("/done/\u{7f}")]
	fn test_redirect_to_invalid_url_is_server_error(#[case] url: &str) {
		let response = MultiFormResponse::Redirect(url.to_string()).into_http();

		assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
		assert!(response.headers().get(header::LOCATION).is_none());
	}

	#[rstest]
	fn test_redirect_accessors() {
		let response = MultiFormResponse::Redirect("/a/".to_string());
		assert!(response.is_redirect());
		assert_eq!(response.redirect_url(), Some("/a/"));
		assert!(response.render_context().is_none());
	}
}
