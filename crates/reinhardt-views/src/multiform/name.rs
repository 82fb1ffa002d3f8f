//! Deriving form names from declarations

use super::form::{FormDefinition, FormInstance, FormKwargs};
use std::sync::Arc;

/// One entry of a view's form list: a definition and an optional explicit name
#[derive(Clone)]
pub struct FormDeclaration {
	name: Option<String>,
	definition: Arc<dyn FormDefinition>,
}

impl FormDeclaration {
	/// Declaration named after the definition's identity
	pub fn new(definition: impl FormDefinition + 'static) -> Self {
		Self {
			name: None,
			definition: Arc::new(definition),
		}
	}

	/// Declaration with an explicit name, needed when one definition is
	/// declared more than once
	pub fn named(name: impl Into<String>, definition: impl FormDefinition + 'static) -> Self {
		Self {
			name: Some(name.into()),
			definition: Arc::new(definition),
		}
	}

	pub fn from_shared(name: Option<String>, definition: Arc<dyn FormDefinition>) -> Self {
		Self { name, definition }
	}

	pub fn explicit_name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	pub fn definition(&self) -> &Arc<dyn FormDefinition> {
		&self.definition
	}

	/// Resolved lowercase name of this declaration
	pub fn resolved_name(&self) -> String {
		resolve_name(self)
	}
}

impl std::fmt::Debug for FormDeclaration {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FormDeclaration")
			.field("name", &self.name)
			.field("identity", &self.definition.identity())
			.finish()
	}
}

/// Resolve the name a declaration is registered under.
///
/// An explicit name is lowercased verbatim. Otherwise the definition's
/// declared identity is reduced to its bare type name and lowercased; a
/// definition without identity is instantiated once with default kwargs and
/// named after the runtime type of that instance.
///
/// # Examples
///
/// ```
/// use reinhardt_forms::Form;
/// use reinhardt_views::multiform::{FormClass, FormDeclaration, FormKwargs, resolve_name};
///
/// let contact = FormClass::new("app::forms::ContactForm", |k: FormKwargs| {
///     let mut form = Form::new();
///     k.apply_to(&mut form);
///     form
/// });
///
/// assert_eq!(resolve_name(&FormDeclaration::new(contact.clone())), "contactform");
/// assert_eq!(resolve_name(&FormDeclaration::named("Better_Name", contact)), "better_name");
/// ```
pub fn resolve_name(declaration: &FormDeclaration) -> String {
	if let Some(name) = declaration.explicit_name() {
		return name.to_lowercase();
	}

	match declaration.definition().identity() {
		Some(identity) => bare_type_name(&identity).to_lowercase(),
		None => {
			let instance: Box<dyn FormInstance> =
				declaration.definition().build(FormKwargs::default());
			let name = bare_type_name(instance.type_name()).to_lowercase();
			tracing::debug!(
				name = %name,
				"form definition has no declared identity, named after its runtime type"
			);
			name
		}
	}
}

/// Strip module path and generic arguments from a type name
///
/// # Examples
///
/// ```
/// use reinhardt_views::multiform::bare_type_name;
///
/// assert_eq!(bare_type_name("shop::forms::CartUpdateForm"), "CartUpdateForm");
/// assert_eq!(bare_type_name("shop::Wrapper<shop::Inner>"), "Wrapper");
/// assert_eq!(bare_type_name("ContactForm"), "ContactForm");
/// ```
pub fn bare_type_name(type_name: &str) -> &str {
	let without_generics = type_name
		.split_once('<')
		.map(|(head, _)| head)
		.unwrap_or(type_name);
	without_generics
		.rsplit_once("::")
		.map(|(_, tail)| tail)
		.unwrap_or(without_generics)
}
