//! Deciding which forms take part in a submission

use super::form::FormInstance;
use super::submission::is_data_carrying;
use http::Method;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Every built form of a request, keyed by name in registry order
pub type FormMap = IndexMap<String, Box<dyn FormInstance>>;

/// How a form prefix is compared against submitted keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrefixMatch {
	/// The prefix occurs anywhere in the key.
	///
	/// A prefix that is a fragment of another form's prefix (`cart` inside
	/// `cartupdateform2-selection`) binds too.
	#[default]
	Substring,
	/// The key is the prefix itself or starts with `<prefix>-`, or with
	/// `<prefix>__` for the sub-forms of a group
	Segment,
}

impl PrefixMatch {
	/// Whether `key` falls under `prefix`
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_views::multiform::PrefixMatch;
	///
	/// assert!(PrefixMatch::Substring.matches("cart", "cartupdateform2-selection"));
	/// assert!(!PrefixMatch::Segment.matches("cart", "cartupdateform2-selection"));
	/// assert!(PrefixMatch::Segment.matches("cart", "cart-selection"));
	/// ```
	pub fn matches(&self, prefix: &str, key: &str) -> bool {
		match self {
			PrefixMatch::Substring => key.contains(prefix),
			PrefixMatch::Segment if prefix.is_empty() => !key.contains('-'),
			PrefixMatch::Segment => {
				key == prefix
					|| key
						.strip_prefix(prefix)
						.is_some_and(|rest| rest.starts_with('-') || rest.starts_with("__"))
			}
		}
	}
}

/// Binding decision for one request
#[derive(Debug, Clone, Copy, Default)]
pub struct SubmissionRouter {
	policy: PrefixMatch,
}

impl SubmissionRouter {
	pub fn new(policy: PrefixMatch) -> Self {
		Self { policy }
	}

	pub fn policy(&self) -> PrefixMatch {
		self.policy
	}

	/// Whether a form with `prefix` is bound to a submission with `keys`.
	///
	/// Read-only methods never bind, whatever the keys.
	pub fn is_bound<'a, I>(&self, method: &Method, prefix: &str, keys: I) -> bool
	where
		I: IntoIterator<Item = &'a str>,
	{
		if !is_data_carrying(method) {
			return false;
		}

		if prefix.is_empty() && self.policy == PrefixMatch::Substring {
			tracing::warn!("empty form prefix binds to every submitted key");
		}

		let bound = keys.into_iter().any(|key| self.policy.matches(prefix, key));
		tracing::debug!(prefix = %prefix, policy = ?self.policy, bound, "form binding decided");
		bound
	}

	/// Names of the bound forms, in registry order
	pub fn bound_names(forms: &FormMap) -> Vec<String> {
		forms
			.iter()
			.filter(|(_, form)| form.is_bound())
			.map(|(name, _)| name.clone())
			.collect()
	}
}
