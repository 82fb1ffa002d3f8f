//! Per-form redirect targets

use super::error::{MultiFormError, Result};
use super::registry::FormRegistry;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Redirect configuration of a multi-form view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SuccessUrls {
	#[default]
	None,
	/// One target shared by every form
	Single(String),
	/// Targets paired positionally with the forms in declaration order
	PerForm(Vec<String>),
	/// Targets keyed by form name
	Keyed(IndexMap<String, String>),
}

/// Resolved name → redirect target mapping
#[derive(Debug, Clone, Default)]
pub struct RedirectResolver {
	urls: IndexMap<String, String>,
}

impl RedirectResolver {
	/// Pair the configured targets with the registry's names
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_forms::Form;
	/// use reinhardt_views::multiform::{
	///     FormClass, FormDeclaration, FormKwargs, FormRegistry, RedirectResolver, SuccessUrls,
	/// };
	///
	/// fn plain(k: FormKwargs) -> Form {
	///     let mut form = Form::new();
	///     k.apply_to(&mut form);
	///     form
	/// }
	///
	/// let registry = FormRegistry::normalize(&[
	///     FormDeclaration::new(FormClass::new("ContactForm", plain)),
	///     FormDeclaration::new(FormClass::new("SubscriptionForm", plain)),
	/// ]);
	/// let urls = SuccessUrls::PerForm(vec!["/contacted/".into(), "/subscribed/".into()]);
	///
	/// let resolver = RedirectResolver::new(&registry, &urls).unwrap();
	/// assert_eq!(resolver.resolve("subscriptionform").unwrap(), "/subscribed/");
	/// ```
	pub fn new(registry: &FormRegistry, success_urls: &SuccessUrls) -> Result<Self> {
		let urls = match success_urls {
			SuccessUrls::None => IndexMap::new(),
			SuccessUrls::Single(url) => registry
				.names()
				.map(|name| (name.to_string(), url.clone()))
				.collect(),
			SuccessUrls::PerForm(urls) => {
				if urls.len() != registry.len() {
					return Err(MultiFormError::SuccessUrlCountMismatch {
						forms: registry.len(),
						urls: urls.len(),
					});
				}
				registry
					.names()
					.zip(urls)
					.map(|(name, url)| (name.to_string(), url.clone()))
					.collect()
			}
			SuccessUrls::Keyed(map) => {
				let mut urls = IndexMap::with_capacity(registry.len());
				for name in registry.names() {
					let url = map.get(name).ok_or_else(|| MultiFormError::MissingSuccessUrl {
						name: name.to_string(),
					})?;
					urls.insert(name.to_string(), url.clone());
				}
				urls
			}
		};

		Ok(Self { urls })
	}

	/// Redirect target of the named form
	pub fn resolve(&self, name: &str) -> Result<&str> {
		self.urls
			.get(name)
			.map(String::as_str)
			.ok_or_else(|| MultiFormError::MissingSuccessUrl {
				name: name.to_string(),
			})
	}

	/// Every name → target pair, in registry order
	pub fn success_urls(&self) -> impl Iterator<Item = (&str, &str)> {
		self.urls.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}
}
