//! Declarative multi-form view configuration loaded from TOML

use super::error::Result;
use super::redirect::SuccessUrls;
use super::registry::DuplicatePolicy;
use super::router::PrefixMatch;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Settings a multi-form view can be configured from.
///
/// Every field is optional; unset fields keep the builder defaults.
///
/// ```toml
/// template_name = "demo/multiple_forms.html"
/// success_urls = ["/contacted/", "/subscribed/"]
/// prefix_match = "segment"
/// duplicate_names = "reject"
/// track_form_name = true
///
/// [prefixes]
/// contactform = "contact"
///
/// [initials.contactform]
/// title = "Hello"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MultiFormSettings {
	pub template_name: Option<String>,
	/// One redirect target shared by every form
	pub success_url: Option<String>,
	/// Redirect targets, positional (array) or keyed by form name (table)
	pub success_urls: Option<SuccessUrls>,
	pub initials: IndexMap<String, serde_json::Value>,
	pub prefixes: IndexMap<String, String>,
	pub prefix_match: Option<PrefixMatch>,
	pub duplicate_names: Option<DuplicatePolicy>,
	pub track_form_name: Option<bool>,
}

impl MultiFormSettings {
	/// Parse settings from a TOML document
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_views::multiform::{MultiFormSettings, PrefixMatch};
	///
	/// let settings = MultiFormSettings::from_toml_str(r#"
	///     success_url = "/done/"
	///     prefix_match = "segment"
	/// "#).unwrap();
	/// assert_eq!(settings.success_url.as_deref(), Some("/done/"));
	/// assert_eq!(settings.prefix_match, Some(PrefixMatch::Segment));
	/// ```
	pub fn from_toml_str(source: &str) -> Result<Self> {
		Ok(toml::from_str(source)?)
	}

	/// Redirect configuration these settings describe, if any.
	///
	/// `success_urls` takes precedence over `success_url`.
	pub fn resolved_success_urls(&self) -> Option<SuccessUrls> {
		self.success_urls
			.clone()
			.or_else(|| self.success_url.clone().map(SuccessUrls::Single))
	}
}
