//! Multi-form view: per-request form building, routing and completion

use super::coordinator::{ValidationCoordinator, ValidationState};
use super::error::{MultiFormError, Result};
use super::form::{FormDefinition, FormInstance, FormKwargs};
use super::name::FormDeclaration;
use super::redirect::{RedirectResolver, SuccessUrls};
use super::registry::{DuplicatePolicy, FormRegistry};
use super::response::{MultiFormResponse, RenderContext};
use super::router::{FormMap, PrefixMatch, SubmissionRouter};
use super::settings::MultiFormSettings;
use super::submission::{FORM_NAME_KEY, Submission};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::Arc;

/// Initial data of one form, replacing the configured initial
pub type InitialHook = Arc<dyn Fn(&Submission) -> serde_json::Value + Send + Sync>;
/// Prefix of one form, replacing the configured prefix
pub type PrefixHook = Arc<dyn Fn() -> String + Send + Sync>;
/// Final say over the construction arguments of one form
pub type FormKwargsHook = Arc<dyn Fn(FormKwargs, &Submission) -> FormKwargs + Send + Sync>;
/// Handler of a valid submission
pub type CompletionHook =
	Arc<dyn Fn(FormCompletion<'_>) -> Result<MultiFormResponse> + Send + Sync>;

/// What a completion hook gets to work with
pub struct FormCompletion<'a> {
	/// Name the submission was routed to
	pub name: &'a str,
	/// The routed form (for a group, the group itself)
	pub form: &'a dyn FormInstance,
	/// Every form built for the request
	pub forms: &'a FormMap,
	pub view: &'a MultiFormView,
	pub submission: &'a Submission,
}

impl<'a> FormCompletion<'a> {
	/// The forms bound to the submission, in registry order
	pub fn bound_forms(&self) -> impl Iterator<Item = (&'a str, &'a dyn FormInstance)> + 'a {
		self.forms
			.iter()
			.filter(|(_, form)| form.is_bound())
			.map(|(name, form)| (name.as_str(), form.as_ref()))
	}

	pub fn cleaned_data(&self) -> serde_json::Map<String, serde_json::Value> {
		self.form.cleaned_data()
	}

	/// Redirect to the routed form's success URL
	pub fn redirect(&self) -> Result<MultiFormResponse> {
		self.view.form_valid(self.name)
	}
}

/// A view rendering and validating several named forms on one endpoint.
///
/// Immutable once built; every per-request value lives in [`handle`].
///
/// [`handle`]: MultiFormView::handle
///
/// # Examples
///
/// ```
/// use reinhardt_forms::{CharField, Form};
/// use reinhardt_views::multiform::{FormClass, FormKwargs, MultiFormView, Submission};
///
/// fn contact(kwargs: FormKwargs) -> Form {
///     let mut form = Form::new();
///     form.add_field(Box::new(CharField::new("title".to_string()).required()));
///     kwargs.apply_to(&mut form);
///     form
/// }
///
/// let view = MultiFormView::builder()
///     .form(FormClass::new("ContactForm", contact))
///     .success_url("/thanks/")
///     .build()
///     .unwrap();
///
/// let response = view
///     .handle(&Submission::post().with_field("contactform-title", "Hi"))
///     .unwrap();
/// assert_eq!(response.redirect_url(), Some("/thanks/"));
/// ```
pub struct MultiFormView {
	registry: Arc<FormRegistry>,
	redirects: RedirectResolver,
	router: SubmissionRouter,
	template_name: Option<String>,
	track_form_name: bool,
	initials: IndexMap<String, serde_json::Value>,
	prefixes: IndexMap<String, String>,
	initial_hooks: HashMap<String, InitialHook>,
	prefix_hooks: HashMap<String, PrefixHook>,
	form_kwargs_hooks: HashMap<String, FormKwargsHook>,
	completion_hooks: HashMap<String, CompletionHook>,
	default_completion: Option<CompletionHook>,
}

impl MultiFormView {
	pub fn builder() -> MultiFormViewBuilder {
		MultiFormViewBuilder::new()
	}

	pub fn registry(&self) -> &FormRegistry {
		&self.registry
	}

	pub fn form_names(&self) -> impl Iterator<Item = &str> {
		self.registry.names()
	}

	pub fn template_name(&self) -> Option<&str> {
		self.template_name.as_deref()
	}

	pub fn prefix_match(&self) -> PrefixMatch {
		self.router.policy()
	}

	pub fn tracks_form_name(&self) -> bool {
		self.track_form_name
	}

	/// Initial data for the named form
	pub fn get_initial(&self, name: &str, submission: &Submission) -> serde_json::Value {
		let mut initial = match self.initial_hooks.get(name) {
			Some(hook) => hook(submission),
			None => self
				.initials
				.get(name)
				.cloned()
				.unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new())),
		};

		if self.track_form_name
			&& let serde_json::Value::Object(map) = &mut initial
		{
			map.insert(FORM_NAME_KEY.to_string(), serde_json::Value::String(name.to_string()));
		}
		initial
	}

	/// Prefix of the named form; the name itself unless configured otherwise
	pub fn get_prefix(&self, name: &str) -> String {
		match self.prefix_hooks.get(name) {
			Some(hook) => hook(),
			None => self
				.prefixes
				.get(name)
				.cloned()
				.unwrap_or_else(|| name.to_string()),
		}
	}

	/// Construction arguments of the named form for this submission
	pub fn get_form_kwargs(&self, name: &str, submission: &Submission) -> FormKwargs {
		let mut kwargs =
			FormKwargs::new(self.get_prefix(name)).with_initial(self.get_initial(name, submission));

		if self
			.router
			.is_bound(submission.method(), &kwargs.prefix, submission.keys())
		{
			kwargs.data = Some(submission.shared_data());
			kwargs.files = Some(submission.shared_files());
		}

		match self.form_kwargs_hooks.get(name) {
			Some(hook) => hook(kwargs, submission),
			None => kwargs,
		}
	}

	/// Build the named form; `None` when the view declares no such form
	pub fn get_form(&self, name: &str, submission: &Submission) -> Option<Box<dyn FormInstance>> {
		let definition = self.registry.get(name)?;
		Some(definition.build(self.get_form_kwargs(name, submission)))
	}

	/// Build every declared form, in declaration order
	pub fn get_forms(&self, submission: &Submission) -> FormMap {
		self.registry
			.iter()
			.map(|(name, definition)| {
				let kwargs = self.get_form_kwargs(name, submission);
				(name.to_string(), definition.build(kwargs))
			})
			.collect()
	}

	pub fn get_success_url(&self, name: &str) -> Result<String> {
		self.redirects.resolve(name).map(str::to_string)
	}

	pub fn get_success_urls(&self) -> impl Iterator<Item = (&str, &str)> {
		self.redirects.success_urls()
	}

	/// Default completion: redirect to the form's success URL
	pub fn form_valid(&self, name: &str) -> Result<MultiFormResponse> {
		Ok(MultiFormResponse::Redirect(self.get_success_url(name)?))
	}

	/// Render the forms with their errors
	pub fn forms_invalid(&self, forms: FormMap) -> MultiFormResponse {
		MultiFormResponse::Render(self.get_context_data(forms))
	}

	pub fn get_context_data(&self, forms: FormMap) -> RenderContext {
		RenderContext::new(self.template_name.clone(), forms)
	}

	/// Hand a valid submission to the completion hook of the active form
	pub fn forms_valid(&self, forms: &FormMap, submission: &Submission) -> Result<MultiFormResponse> {
		let submitted = if self.track_form_name {
			submission.form_name()
		} else {
			None
		};
		let Some(name) = ValidationCoordinator::select_active_name(forms, submitted, |name| {
			self.completion_hooks.contains_key(name)
		}) else {
			return Ok(MultiFormResponse::Forbidden);
		};
		let Some(form) = forms.get(&name) else {
			return Ok(MultiFormResponse::Forbidden);
		};

		let completion = FormCompletion {
			name: &name,
			form: form.as_ref(),
			forms,
			view: self,
			submission,
		};

		match self
			.completion_hooks
			.get(&name)
			.or(self.default_completion.as_ref())
		{
			Some(hook) => hook(completion),
			None => self.form_valid(&name),
		}
	}

	/// Process one request
	pub fn handle(&self, submission: &Submission) -> Result<MultiFormResponse> {
		let mut forms = self.get_forms(submission);

		match ValidationCoordinator::validate(submission.method(), &mut forms) {
			ValidationState::Unvalidated => Ok(MultiFormResponse::Render(self.get_context_data(forms))),
			ValidationState::SomeInvalid => Ok(self.forms_invalid(forms)),
			ValidationState::EmptySubmission => {
				tracing::debug!(method = %submission.method(), "submission bound no form");
				Ok(MultiFormResponse::Forbidden)
			}
			ValidationState::AllValid => self.forms_valid(&forms, submission),
		}
	}
}

impl std::fmt::Debug for MultiFormView {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MultiFormView")
			.field("forms", &self.registry)
			.field("template_name", &self.template_name)
			.field("prefix_match", &self.router.policy())
			.field("track_form_name", &self.track_form_name)
			.finish_non_exhaustive()
	}
}

/// Builder for [`MultiFormView`]
#[derive(Default)]
pub struct MultiFormViewBuilder {
	declarations: Vec<FormDeclaration>,
	success_urls: SuccessUrls,
	template_name: Option<String>,
	prefix_match: PrefixMatch,
	duplicate_names: DuplicatePolicy,
	track_form_name: bool,
	initials: IndexMap<String, serde_json::Value>,
	prefixes: IndexMap<String, String>,
	initial_hooks: HashMap<String, InitialHook>,
	prefix_hooks: HashMap<String, PrefixHook>,
	form_kwargs_hooks: HashMap<String, FormKwargsHook>,
	completion_hooks: HashMap<String, CompletionHook>,
	default_completion: Option<CompletionHook>,
}

impl MultiFormViewBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Declare a form named after its definition
	pub fn form(mut self, definition: impl FormDefinition + 'static) -> Self {
		self.declarations.push(FormDeclaration::new(definition));
		self
	}

	/// Declare a form under an explicit name
	pub fn named_form(
		mut self,
		name: impl Into<String>,
		definition: impl FormDefinition + 'static,
	) -> Self {
		self.declarations.push(FormDeclaration::named(name, definition));
		self
	}

	pub fn declaration(mut self, declaration: FormDeclaration) -> Self {
		self.declarations.push(declaration);
		self
	}

	/// One redirect target for every form
	pub fn success_url(mut self, url: impl Into<String>) -> Self {
		self.success_urls = SuccessUrls::Single(url.into());
		self
	}

	/// Redirect targets paired with the forms in declaration order
	pub fn success_urls<I, S>(mut self, urls: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.success_urls = SuccessUrls::PerForm(urls.into_iter().map(Into::into).collect());
		self
	}

	/// Redirect targets keyed by form name
	pub fn keyed_success_urls<I, K, S>(mut self, urls: I) -> Self
	where
		I: IntoIterator<Item = (K, S)>,
		K: Into<String>,
		S: Into<String>,
	{
		self.success_urls = SuccessUrls::Keyed(
			urls.into_iter()
				.map(|(name, url)| (name.into().to_lowercase(), url.into()))
				.collect(),
		);
		self
	}

	pub fn initial(mut self, name: impl Into<String>, initial: serde_json::Value) -> Self {
		self.initials.insert(hook_key(name), initial);
		self
	}

	pub fn prefix(mut self, name: impl Into<String>, prefix: impl Into<String>) -> Self {
		self.prefixes.insert(hook_key(name), prefix.into());
		self
	}

	pub fn initial_hook<F>(mut self, name: impl Into<String>, hook: F) -> Self
	where
		F: Fn(&Submission) -> serde_json::Value + Send + Sync + 'static,
	{
		self.initial_hooks.insert(hook_key(name), Arc::new(hook));
		self
	}

	pub fn prefix_hook<F>(mut self, name: impl Into<String>, hook: F) -> Self
	where
		F: Fn() -> String + Send + Sync + 'static,
	{
		self.prefix_hooks.insert(hook_key(name), Arc::new(hook));
		self
	}

	pub fn form_kwargs_hook<F>(mut self, name: impl Into<String>, hook: F) -> Self
	where
		F: Fn(FormKwargs, &Submission) -> FormKwargs + Send + Sync + 'static,
	{
		self.form_kwargs_hooks.insert(hook_key(name), Arc::new(hook));
		self
	}

	/// Completion hook of the named form
	pub fn on_form_valid<F>(mut self, name: impl Into<String>, hook: F) -> Self
	where
		F: Fn(FormCompletion<'_>) -> Result<MultiFormResponse> + Send + Sync + 'static,
	{
		self.completion_hooks.insert(hook_key(name), Arc::new(hook));
		self
	}

	/// Completion hook of forms without their own
	pub fn on_default_form_valid<F>(mut self, hook: F) -> Self
	where
		F: Fn(FormCompletion<'_>) -> Result<MultiFormResponse> + Send + Sync + 'static,
	{
		self.default_completion = Some(Arc::new(hook));
		self
	}

	pub fn template_name(mut self, template_name: impl Into<String>) -> Self {
		self.template_name = Some(template_name.into());
		self
	}

	pub fn prefix_match(mut self, policy: PrefixMatch) -> Self {
		self.prefix_match = policy;
		self
	}

	pub fn duplicate_names(mut self, policy: DuplicatePolicy) -> Self {
		self.duplicate_names = policy;
		self
	}

	/// Inject `form_name` into initials and route completion by the
	/// submitted `form_name`
	pub fn track_form_name(mut self, enabled: bool) -> Self {
		self.track_form_name = enabled;
		self
	}

	/// Apply settings; builder calls made afterwards override them
	pub fn settings(mut self, settings: MultiFormSettings) -> Self {
		if let Some(success_urls) = settings.resolved_success_urls() {
			self.success_urls = match success_urls {
				SuccessUrls::Keyed(urls) => SuccessUrls::Keyed(
					urls.into_iter()
						.map(|(name, url)| (hook_key(name), url))
						.collect(),
				),
				other => other,
			};
		}
		if let Some(template_name) = settings.template_name {
			self.template_name = Some(template_name);
		}
		if let Some(policy) = settings.prefix_match {
			self.prefix_match = policy;
		}
		if let Some(policy) = settings.duplicate_names {
			self.duplicate_names = policy;
		}
		if let Some(enabled) = settings.track_form_name {
			self.track_form_name = enabled;
		}
		for (name, initial) in settings.initials {
			self.initials.insert(hook_key(name), initial);
		}
		for (name, prefix) in settings.prefixes {
			self.prefixes.insert(hook_key(name), prefix);
		}
		self
	}

	pub fn build(self) -> Result<MultiFormView> {
		if self.declarations.is_empty() {
			return Err(MultiFormError::ImproperlyConfigured(
				"A multi-form view needs at least one form declaration".to_string(),
			));
		}
		if self
			.declarations
			.iter()
			.any(|d| d.explicit_name().is_some_and(|n| n.trim().is_empty()))
		{
			return Err(MultiFormError::ImproperlyConfigured(
				"Form names must not be empty".to_string(),
			));
		}

		let registry =
			FormRegistry::normalize_with_policy(&self.declarations, self.duplicate_names)?;
		let redirects = RedirectResolver::new(&registry, &self.success_urls)?;

		let hook_names = self
			.initial_hooks
			.keys()
			.chain(self.prefix_hooks.keys())
			.chain(self.form_kwargs_hooks.keys())
			.chain(self.completion_hooks.keys());
		for name in hook_names {
			if !registry.contains(name) {
				tracing::warn!(name = %name, "hook registered for a form the view does not declare");
			}
		}

		Ok(MultiFormView {
			registry: Arc::new(registry),
			redirects,
			router: SubmissionRouter::new(self.prefix_match),
			template_name: self.template_name,
			track_form_name: self.track_form_name,
			initials: self.initials,
			prefixes: self.prefixes,
			initial_hooks: self.initial_hooks,
			prefix_hooks: self.prefix_hooks,
			form_kwargs_hooks: self.form_kwargs_hooks,
			completion_hooks: self.completion_hooks,
			default_completion: self.default_completion,
		})
	}
}

fn hook_key(name: impl Into<String>) -> String {
	name.into().to_lowercase()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::multiform::form::FormClass;
	use reinhardt_forms::{CharField, Form};
	use rstest::{fixture, rstest};
	use serde_json::json;

	fn titled(kwargs: FormKwargs) -> Form {
		let mut form = Form::new();
		form.add_field(Box::new(CharField::new("title".to_string()).required()));
		kwargs.apply_to(&mut form);
		form
	}

	#[fixture]
	fn view() -> MultiFormView {
		MultiFormView::builder()
			.form(FormClass::new("ContactForm", titled))
			.named_form("Better_Name", FormClass::new("SubscriptionForm", titled))
			.initial("contactform", json!({"title": "Draft"}))
			.prefix("better_name", "sub")
			.success_urls(["/contacted/", "/subscribed/"])
			.build()
			.unwrap()
	}

	#[rstest]
	fn test_view_is_send_and_sync() {
		fn assert_send_sync<T: Send + Sync>() {}
		assert_send_sync::<MultiFormView>();
	}

	#[rstest]
	fn test_get_initial_and_prefix(view: MultiFormView) {
		let submission = Submission::get();

		assert_eq!(view.get_initial("contactform", &submission), json!({"title": "Draft"}));
		assert_eq!(view.get_initial("better_name", &submission), json!({}));
		assert_eq!(view.get_prefix("contactform"), "contactform");
		assert_eq!(view.get_prefix("better_name"), "sub");
	}

	#[rstest]
	fn test_get_form_unknown_name_is_none(view: MultiFormView) {
		assert!(view.get_form("missing", &Submission::get()).is_none());
		assert!(view.get_form("better_name", &Submission::get()).is_some());
	}

	#[rstest]
	fn test_success_urls_pair_positionally(view: MultiFormView) {
		assert_eq!(view.get_success_url("contactform").unwrap(), "/contacted/");
		assert_eq!(view.get_success_url("better_name").unwrap(), "/subscribed/");
	}

	#[rstest]
	fn test_build_without_forms_is_improperly_configured() {
		let err = MultiFormView::builder().build().unwrap_err();
		assert!(matches!(err, MultiFormError::ImproperlyConfigured(_)));
	}

	#[rstest]
	fn test_build_with_blank_name_is_improperly_configured() {
		let err = MultiFormView::builder()
			.named_form("  ", FormClass::new("ContactForm", titled))
			.build()
			.unwrap_err();
		assert!(matches!(err, MultiFormError::ImproperlyConfigured(_)));
	}

	#[rstest]
	fn test_tracking_injects_form_name() {
		let view = MultiFormView::builder()
			.form(FormClass::new("ContactForm", titled))
			.initial("contactform", json!({"title": "Draft"}))
			.track_form_name(true)
			.build()
			.unwrap();

		assert_eq!(
			view.get_initial("contactform", &Submission::get()),
			json!({"title": "Draft", "form_name": "contactform"})
		);
	}

	#[rstest]
	fn test_builder_calls_after_settings_override_them() {
		let settings = MultiFormSettings::from_toml_str(
			r#"
			template_name = "from_settings.html"
			success_url = "/settings/"
			"#,
		)
		.unwrap();

		let view = MultiFormView::builder()
			.form(FormClass::new("ContactForm", titled))
			.settings(settings)
			.template_name("from_builder.html")
			.build()
			.unwrap();

		assert_eq!(view.template_name(), Some("from_builder.html"));
		assert_eq!(view.get_success_url("contactform").unwrap(), "/settings/");
	}

	#[rstest]
	fn test_settings_keyed_success_urls_ignore_case() {
		let settings = MultiFormSettings::from_toml_str(
			r#"
			[success_urls]
			ContactForm = "/contacted/"
			Better_Name = "/subscribed/"
			"#,
		)
		.unwrap();

		let view = MultiFormView::builder()
			.form(FormClass::new("ContactForm", titled))
			.named_form("better_name", FormClass::new("SubscriptionForm", titled))
			.settings(settings)
			.build()
			.unwrap();

		assert_eq!(view.get_success_url("contactform").unwrap(), "/contacted/");
		assert_eq!(view.get_success_url("better_name").unwrap(), "/subscribed/");
	}
}
