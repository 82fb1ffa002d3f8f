//! Demo multi-form views

use crate::forms::{CartUpdateForm, contact_form, subscription_form};
use reinhardt_multiforms::views::multiform::{
	FormClass, FormCompletion, FormDeclaration, FormGroup, FormGroupClass, FormKwargs,
	MultiFormResponse, MultiFormView, PrefixMatch, Result, Submission, make_formgroup,
};
use serde_json::json;

pub const CONTACT_URL: &str = "/contact/";
pub const SUBSCRIBE_URL: &str = "/subscribe/";
pub const MY_VIEW_URL: &str = "/my-view/";
pub const FORM_GROUP_URL: &str = "/formgroup/";

pub const SUBSCRIPTION_REPLY: &str = "Somebody once told me the world is gonna roll me";

/// Items a user can pick in the cart forms
pub fn get_selection() -> serde_json::Value {
	json!([[0, "Book0"], [1, "Book1"]])
}

fn with_selection(kwargs: FormKwargs, _submission: &Submission) -> FormKwargs {
	kwargs.with_extra(CartUpdateForm::SELECTION_KWARG, get_selection())
}

/// Contact and subscription forms told apart by the hidden `form_name` input
pub fn extensive_demo_view() -> Result<MultiFormView> {
	MultiFormView::builder()
		.template_name("app_name/extensive_demo.html")
		.form(FormClass::new("ContactForm", contact_form))
		.named_form("better_name", FormClass::new("SubscriptionForm", subscription_form))
		.success_urls([CONTACT_URL, SUBSCRIBE_URL])
		.initial("contactform", json!({"message": "some initial data"}))
		.track_form_name(true)
		.form_kwargs_hook("contactform", |kwargs, _| kwargs.with_extra("some_args", "some_args"))
		.on_form_valid("contactform", |completion| {
			tracing::debug!(title = ?completion.cleaned_data().get("title"), "contact form submitted");
			completion.redirect()
		})
		.on_form_valid("better_name", |completion| {
			tracing::debug!(email = ?completion.cleaned_data().get("email"), "subscription submitted");
			Ok(MultiFormResponse::Content(SUBSCRIPTION_REPLY.to_string()))
		})
		.build()
}

/// Several cart forms without `form_name` inputs, completed by one handler
pub fn no_form_name_demo_view() -> Result<MultiFormView> {
	let cart = || FormClass::of::<CartUpdateForm>();

	MultiFormView::builder()
		.template_name("app_name/no_form_name_demo.html")
		.form(FormClass::new("ContactForm", contact_form))
		.form(cart())
		.named_form("usercartform", cart())
		.named_form("cartupdateform2", cart())
		.named_form("usercartform2", cart())
		.success_url(MY_VIEW_URL)
		.prefix_match(PrefixMatch::Segment)
		.form_kwargs_hook("cartupdateform", with_selection)
		.form_kwargs_hook("usercartform", with_selection)
		.form_kwargs_hook("cartupdateform2", with_selection)
		.form_kwargs_hook("usercartform2", with_selection)
		.on_form_valid("contactform", |completion| {
			tracing::debug!(title = ?completion.cleaned_data().get("title"), "contact form submitted");
			completion.redirect()
		})
		.on_default_form_valid(complete_cart_forms)
		.build()
}

fn complete_cart_forms(completion: FormCompletion<'_>) -> Result<MultiFormResponse> {
	let is_bound = |name: &str| completion.forms.get(name).is_some_and(|f| f.is_bound());

	let name = ["cartupdateform2", "usercartform2", "cartupdateform"]
		.into_iter()
		.find(|name| is_bound(name))
		.unwrap_or(completion.name);

	if let Some(cart) = completion
		.forms
		.get(name)
		.and_then(|form| form.downcast_ref::<CartUpdateForm>())
	{
		tracing::debug!(form = %name, action = ?cart.action(), "cart updated");
	}
	completion.view.form_valid(name)
}

/// The `MyFormGroup` group: a cart form and a user cart form validated together
pub fn my_form_group() -> FormGroupClass {
	make_formgroup(
		"MyFormGroup",
		&[
			FormDeclaration::new(FormClass::of::<CartUpdateForm>()),
			FormDeclaration::named("usercartform", FormClass::of::<CartUpdateForm>()),
		],
	)
}

/// A form group declared next to the plain forms it is made of
pub fn form_group_demo_view() -> Result<MultiFormView> {
	MultiFormView::builder()
		.template_name("app_name/form_group_demo.html")
		.form(my_form_group())
		.form(FormClass::of::<CartUpdateForm>())
		.named_form("usercartform", FormClass::of::<CartUpdateForm>())
		.success_urls([FORM_GROUP_URL, MY_VIEW_URL, MY_VIEW_URL])
		.prefix_match(PrefixMatch::Segment)
		.initial_hook("myformgroup", |_| {
			json!({
				"cartupdateform": {"action": "remove"},
				"usercartform": {"action": "remove"},
			})
		})
		.form_kwargs_hook("myformgroup", with_selection)
		.form_kwargs_hook("cartupdateform", with_selection)
		.form_kwargs_hook("usercartform", with_selection)
		.on_form_valid("myformgroup", |completion| {
			if let Some(group) = completion.form.downcast_ref::<FormGroup>() {
				let actions: Vec<Option<&str>> = ["cartupdateform", "usercartform"]
					.into_iter()
					.map(|name| {
						group
							.get(name)
							.and_then(|form| form.downcast_ref::<CartUpdateForm>())
							.and_then(CartUpdateForm::action)
					})
					.collect();
				tracing::debug!(?actions, "form group submitted");
			}
			completion.redirect()
		})
		.build()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_demo_views_build() {
		assert_eq!(
			extensive_demo_view().unwrap().form_names().collect::<Vec<_>>(),
			["contactform", "better_name"]
		);
		assert_eq!(no_form_name_demo_view().unwrap().registry().len(), 5);
		assert_eq!(
			form_group_demo_view().unwrap().form_names().collect::<Vec<_>>(),
			["myformgroup", "cartupdateform", "usercartform"]
		);
	}

	#[test]
	fn test_form_group_members() {
		assert_eq!(
			my_form_group().form_names().collect::<Vec<_>>(),
			["cartupdateform", "usercartform"]
		);
	}
}
