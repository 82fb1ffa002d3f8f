//! Async dispatch tests for multi-form views

use http::{Method, StatusCode};
use reinhardt_forms::{CharField, Form};
use reinhardt_views::View;
use reinhardt_views::multiform::{
	FormClass, FormKwargs, MultiFormResponse, MultiFormSettings, MultiFormView, Submission,
};
use rstest::*;
use std::sync::Arc;

fn contact(kwargs: FormKwargs) -> Form {
	let mut form = Form::new();
	form.add_field(Box::new(CharField::new("title".to_string()).required()));
	kwargs.apply_to(&mut form);
	form
}

#[fixture]
fn shared_view() -> Arc<MultiFormView> {
	let settings = MultiFormSettings::from_toml_str(
		r#"
		template_name = "demo/contact.html"
		success_url = "/thanks/"
		prefix_match = "segment"
		"#,
	)
	.expect("settings should parse");

	Arc::new(
		MultiFormView::builder()
			.form(FormClass::new("ContactForm", contact))
			.named_form("feedback", FormClass::new("ContactForm", contact))
			.settings(settings)
			.build()
			.expect("view should build"),
	)
}

#[rstest]
#[tokio::test]
async fn test_dispatch_get_renders(shared_view: Arc<MultiFormView>) {
	let response = shared_view.dispatch(Submission::get()).await.unwrap();

	let ctx = response.render_context().expect("render expected");
	assert_eq!(ctx.template_name.as_deref(), Some("demo/contact.html"));
	assert_eq!(ctx.forms.len(), 2);
}

#[rstest]
#[tokio::test]
async fn test_dispatch_post_redirects(shared_view: Arc<MultiFormView>) {
	let submission =
		Submission::from_urlencoded(Method::POST, "feedback-title=Great+work").unwrap();

	let response = shared_view.dispatch(submission).await.unwrap().into_http();

	assert_eq!(response.status(), StatusCode::FOUND);
	assert_eq!(response.headers()["location"], "/thanks/");
}

/// Test: one view serves concurrent requests
///
/// Why: The view is immutable after build, so tasks sharing it through an
/// `Arc` must each see their own forms and outcome.
#[rstest]
#[tokio::test]
async fn test_concurrent_dispatch(shared_view: Arc<MultiFormView>) {
	let mut handles = Vec::new();
	for i in 0..16 {
		let view = Arc::clone(&shared_view);
		handles.push(tokio::spawn(async move {
			let submission = if i % 2 == 0 {
				Submission::post().with_field("contactform-title", format!("t{i}"))
			} else {
				Submission::post().with_field("unrelated", "x")
			};
			view.dispatch(submission).await
		}));
	}

	for (i, handle) in handles.into_iter().enumerate() {
		let response = handle.await.unwrap().unwrap();
		if i % 2 == 0 {
			assert_eq!(response.redirect_url(), Some("/thanks/"));
		} else {
			assert!(matches!(response, MultiFormResponse::Forbidden));
		}
	}
}

#[rstest]
fn test_allowed_methods(shared_view: Arc<MultiFormView>) {
	let methods = shared_view.allowed_methods();

	assert!(methods.contains(&"POST"));
	assert!(methods.contains(&"PUT"));
	assert!(!methods.contains(&"DELETE"));
}
