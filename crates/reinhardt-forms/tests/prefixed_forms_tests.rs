//! Prefixed form tests
//!
//! Tests for several forms reading their own keys out of one shared payload

use reinhardt_forms::{
	CharField, ChoiceField, EmailField, Form, FormField, MultipleChoiceField, UploadedFile,
};
use rstest::rstest;
use serde_json::json;
use std::collections::HashMap;

fn payload() -> HashMap<String, serde_json::Value> {
	[
		("contactform-title", json!("Hello")),
		("contactform-message", json!("Hi there")),
		("better_name-email", json!("someone@example.com")),
	]
	.into_iter()
	.map(|(k, v)| (k.to_string(), v))
	.collect()
}

fn contact_form() -> Form {
	let mut form = Form::with_prefix("contactform".to_string());
	form.add_field(Box::new(
		CharField::new("title".to_string())
			.required()
			.with_max_length(150),
	));
	form.add_field(Box::new(CharField::new("message".to_string()).required()));
	form
}

fn subscription_form() -> Form {
	let mut form = Form::with_prefix("better_name".to_string());
	form.add_field(Box::new(EmailField::new("email".to_string()).required()));
	form
}

#[rstest]
fn test_forms_share_one_payload() {
	let mut contact = contact_form();
	let mut subscription = subscription_form();

	contact.bind(payload());
	subscription.bind(payload());

	assert!(contact.is_valid());
	assert!(subscription.is_valid());
	assert_eq!(contact.cleaned_data()["title"], json!("Hello"));
	assert!(!contact.cleaned_data().contains_key("email"));
	assert_eq!(
		subscription.cleaned_data()["email"],
		json!("someone@example.com")
	);
}

#[rstest]
fn test_errors_are_keyed_by_bare_field_name() {
	let mut subscription = subscription_form();
	let mut data = payload();
	data.insert("better_name-email".to_string(), json!("not-an-email"));

	subscription.bind(data);

	assert!(!subscription.is_valid());
	assert!(subscription.errors().contains_key("email"));
	assert!(!subscription.errors().contains_key("better_name-email"));
}

#[rstest]
fn test_unbound_form_is_never_valid() {
	let mut form = contact_form();

	assert!(!form.is_bound());
	assert!(!form.is_valid());
	assert!(form.errors().is_empty());
}

#[rstest]
#[case(json!("remove"), true)]
#[case(json!(""), false)]
#[case(json!("delete"), false)]
fn test_choice_field_clean(#[case] raw: serde_json::Value, #[case] ok: bool) {
	let field = ChoiceField::new(
		"action".to_string(),
		vec![
			(String::new(), "--------".to_string()),
			("remove".to_string(), "Remove selection".to_string()),
		],
	);

	assert_eq!(field.clean(Some(&raw)).is_ok(), ok);
}

#[rstest]
fn test_multiple_choice_custom_message() {
	let field = MultipleChoiceField::new("selection".to_string(), vec![])
		.with_choices(vec![("0".to_string(), "Book0".to_string())])
		.with_error_message("invalid_choice", "Invalid checkbox choice.");

	let err = field.clean(Some(&json!(["9"]))).unwrap_err();

	assert_eq!(err.to_string(), "Invalid checkbox choice.");
}

#[rstest]
fn test_field_clean_function_runs_on_prefixed_value() {
	let mut form = contact_form();
	form.add_field_clean_function("title", |value| Ok(json!(value.as_str().map(str::to_uppercase))));
	form.bind(payload());

	assert!(form.is_valid());
	assert_eq!(form.cleaned_data()["title"], json!("HELLO"));
}

#[rstest]
fn test_files_are_bound_alongside_data() {
	let mut form = Form::with_prefix("upload".to_string());
	let files: HashMap<String, UploadedFile> = [(
		"upload-attachment".to_string(),
		UploadedFile::new("notes.txt", b"hello".to_vec()),
	)]
	.into_iter()
	.collect();

	form.bind_with_files(HashMap::new(), files);

	assert!(form.is_bound());
	assert_eq!(form.file("attachment").map(|f| f.size()), Some(5));
}

#[rstest]
fn test_render_context_marks_hidden_fields() {
	let mut form = Form::with_prefix("contactform".to_string());
	form.add_field(Box::new(CharField::hidden("form_name".to_string(), 60)));
	form.add_field(Box::new(CharField::new("title".to_string())));

	let ctx = form.to_context();

	assert_eq!(ctx["prefix"], json!("contactform"));
	assert_eq!(ctx["fields"][0]["is_hidden"], json!(true));
	assert_eq!(ctx["fields"][1]["is_hidden"], json!(false));
}
