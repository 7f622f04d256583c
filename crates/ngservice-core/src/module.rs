//! Module Builder
//!
//! A [`Module`] is the top-level declaration emitted into the page:
//!
//! ```text
//! angular.module("zen.demo",["proxy-module"]).factory("widgets",function(transportProxy){...})
//! ```
//!
//! Its identity for deduplication is its [`ModuleName`] alone; `Module` has no
//! equality relation of its own.

use crate::error::{NameKind, NgError, Result, require_name, require_segment};
use crate::factory::Factory;
use crate::promise::Promise;
use crate::settings::ModuleSyntax;
use ngservice_expr::Expression;
use std::collections::BTreeSet;
use std::fmt;

/// The identity key of a module.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModuleName(String);

impl ModuleName {
	/// Creates a module name, rejecting the empty string.
	pub fn new(name: impl Into<String>) -> Result<Self> {
		require_name(NameKind::Module, name).map(Self)
	}

	/// Returns the name text.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for ModuleName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Builds the endpoint path a generated function calls.
pub fn endpoint(module: &str, service: &str, function: &str) -> String {
	format!("{module}/{service}/{function}")
}

/// A module declaration with its factories and dependencies.
#[derive(Debug)]
pub struct Module {
	name: ModuleName,
	syntax: ModuleSyntax,
	dependencies: BTreeSet<String>,
	factories: Vec<(String, Factory)>,
}

impl Module {
	/// Creates an empty module.
	pub fn new(name: impl Into<String>) -> Result<Self> {
		Ok(Self {
			name: ModuleName::new(name)?,
			syntax: ModuleSyntax::default(),
			dependencies: BTreeSet::new(),
			factories: Vec::new(),
		})
	}

	/// Overrides the declaration syntax.
	///
	/// # Errors
	///
	/// Fails with [`NgError::EmptyName`] if any syntax identifier is empty.
	pub fn with_syntax(mut self, syntax: ModuleSyntax) -> Result<Self> {
		syntax.validate()?;
		self.syntax = syntax;
		Ok(self)
	}

	/// The module name.
	pub fn name(&self) -> &ModuleName {
		&self.name
	}

	/// The identity key used for deduplication.
	pub fn key(&self) -> &ModuleName {
		&self.name
	}

	/// Declares an explicit module dependency.
	pub fn add_dependency(&mut self, name: impl Into<String>) -> Result<&mut Self> {
		self.dependencies
			.insert(require_name(NameKind::Dependency, name)?);
		Ok(self)
	}

	/// Builder-style variant of [`Self::add_dependency`].
	pub fn with_dependency(mut self, name: impl Into<String>) -> Result<Self> {
		self.add_dependency(name)?;
		Ok(self)
	}

	/// Binds `factory` to `service`.
	///
	/// # Errors
	///
	/// Fails if `service` is empty, contains `/` or is already bound in this
	/// module.
	pub fn add_factory(&mut self, service: impl Into<String>, factory: Factory) -> Result<&mut Self> {
		let service = require_segment(NameKind::Service, service)?;
		if self.factory(&service).is_some() {
			return Err(NgError::DuplicateFactory {
				module: self.name.to_string(),
				service,
			});
		}
		self.factories.push((service, factory));
		Ok(self)
	}

	/// Builder-style variant of [`Self::add_factory`].
	pub fn with_factory(mut self, service: impl Into<String>, factory: Factory) -> Result<Self> {
		self.add_factory(service, factory)?;
		Ok(self)
	}

	/// Returns the factory bound to `service`.
	pub fn factory(&self, service: &str) -> Option<&Factory> {
		self.factories
			.iter()
			.find(|(existing, _)| existing == service)
			.map(|(_, factory)| factory)
	}

	/// Iterates over service names in registration order.
	pub fn services(&self) -> impl Iterator<Item = &str> {
		self.factories.iter().map(|(service, _)| service.as_str())
	}

	/// Explicit dependencies plus every factory's module dependencies.
	pub fn dependencies(&self) -> BTreeSet<String> {
		let mut dependencies = self.dependencies.clone();
		for (_, factory) in &self.factories {
			dependencies.extend(factory.module_dependencies());
		}
		dependencies
	}

	/// Generates the module declaration with its chained factory registrations.
	pub fn build(&self) -> Result<Expression> {
		let declaration = Expression::method(
			Expression::variable(self.syntax.namespace.as_str())?,
			self.syntax.declare.as_str(),
			[
				Expression::string(self.name.as_str()),
				Expression::array(self.dependencies().into_iter().map(Expression::string)),
			],
		)?;

		self.factories
			.iter()
			.try_fold(declaration, |handle, (service, factory)| -> Result<Expression> {
				let scope = format!("{}/{}", self.name, service);
				let built = factory.build(&scope)?;
				Ok(Expression::method(
					handle,
					self.syntax.register.as_str(),
					[Expression::string(service.as_str()), built.expression],
				)?)
			})
	}

	/// Renders the module declaration to source text.
	pub fn render(&self) -> Result<String> {
		self.build().map(|expression| expression.render())
	}

	/// Runs `function` of `service` for an incoming call.
	///
	/// # Errors
	///
	/// Returns [`NgError::UnknownEndpoint`] if nothing is exposed there.
	pub fn invoke(&self, service: &str, function: &str, argument: Option<&str>) -> Result<Promise> {
		self.factory(service)
			.and_then(|factory| factory.invoke(function, argument))
			.ok_or_else(|| NgError::UnknownEndpoint(endpoint(self.name.as_str(), service, function)))
	}

	/// Routes an endpoint path produced by [`endpoint`] to its function.
	pub fn dispatch(&self, path: &str, argument: Option<&str>) -> Result<Promise> {
		let (service, function) = path
			.strip_prefix(self.name.as_str())
			.and_then(|rest| rest.strip_prefix('/'))
			.and_then(|rest| rest.rsplit_once('/'))
			.ok_or_else(|| NgError::UnknownEndpoint(path.to_string()))?;
		self.invoke(service, function, argument)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::generator::FunctionGenerator;
	use crate::promise::Json;
	use rstest::{fixture, rstest};

	#[fixture]
	fn widgets() -> Factory {
		Factory::new()
			.with_function("list", FunctionGenerator::no_arg(|| Json(vec![1, 2])))
			.unwrap()
	}

	#[rstest]
	fn test_new_rejects_empty_name() {
		assert!(matches!(
			Module::new(""),
			Err(NgError::EmptyName {
				kind: NameKind::Module
			})
		));
		assert!(ModuleName::new("").is_err());
	}

	#[rstest]
	fn test_empty_module_declaration() {
		let module = Module::new("zen.empty").unwrap();
		assert_eq!(module.render().unwrap(), r#"angular.module("zen.empty",[])"#);
	}

	#[rstest]
	fn test_dependencies_union(widgets: Factory) {
		let module = Module::new("zen.demo")
			.unwrap()
			.with_dependency("ngRoute")
			.unwrap()
			.with_factory("widgets", widgets)
			.unwrap();
		assert_eq!(
			module.dependencies(),
			BTreeSet::from(["ngRoute".to_string(), "proxy-module".to_string()])
		);
		assert!(
			module
				.render()
				.unwrap()
				.starts_with(r#"angular.module("zen.demo",["ngRoute","proxy-module"]).factory("widgets","#)
		);
	}

	#[rstest]
	fn test_duplicate_factory_rejected(widgets: Factory) {
		let mut module = Module::new("zen.demo").unwrap();
		module.add_factory("widgets", widgets).unwrap();
		let err = module.add_factory("widgets", Factory::new()).unwrap_err();
		assert_eq!(
			err.to_string(),
			"service `widgets` is already bound in module `zen.demo`"
		);
		assert!(module.add_factory("", Factory::new()).is_err());
		assert!(module.add_dependency("").is_err());
	}

	#[rstest]
	fn test_service_name_must_not_split_endpoint(widgets: Factory) {
		let mut module = Module::new("zen").unwrap();
		let err = module.add_factory("svc/a", widgets).unwrap_err();
		assert!(matches!(
			err,
			NgError::InvalidName { kind: NameKind::Service, ref name } if name == "svc/a"
		));
		assert_eq!(module.services().count(), 0);
	}

	#[rstest]
	fn test_function_with_separator_never_reaches_endpoint() {
		let mut factory = Factory::new();
		assert!(
			factory
				.add_function("a/b", FunctionGenerator::no_arg(|| true))
				.is_err()
		);
		factory
			.add_function("b", FunctionGenerator::no_arg(|| true))
			.unwrap();
		let module = Module::new("zen")
			.unwrap()
			.with_factory("svc", factory)
			.unwrap();

		assert!(!module.render().unwrap().contains("zen/svc/a/b"));
		assert!(module.dispatch("zen/svc/b", None).unwrap().is_resolved());
	}

	#[rstest]
	fn test_with_syntax_rejects_empty_identifier() {
		let syntax = ModuleSyntax {
			declare: String::new(),
			..ModuleSyntax::default()
		};
		assert!(matches!(
			Module::new("zen").unwrap().with_syntax(syntax),
			Err(NgError::EmptyName {
				kind: NameKind::Syntax
			})
		));
	}

	#[rstest]
	fn test_factories_chain_in_registration_order(widgets: Factory) {
		let module = Module::new("zen.demo")
			.unwrap()
			.with_factory("widgets", widgets)
			.unwrap()
			.with_factory("gadgets", Factory::new())
			.unwrap();
		let rendered = module.render().unwrap();
		assert!(rendered.ends_with(r#".factory("gadgets",function(){return {};})"#));
		assert!(rendered.find(r#"factory("widgets""#) < rendered.find(r#"factory("gadgets""#));
		assert_eq!(module.services().collect::<Vec<_>>(), ["widgets", "gadgets"]);
	}

	#[rstest]
	fn test_invoke_and_dispatch(widgets: Factory) {
		let module = Module::new("zen.demo")
			.unwrap()
			.with_factory("widgets", widgets)
			.unwrap();

		let promise = module.invoke("widgets", "list", None).unwrap();
		assert_eq!(promise.to_json(), r#"{"success":true,"data":[1,2]}"#);

		let path = endpoint("zen.demo", "widgets", "list");
		assert_eq!(path, "zen.demo/widgets/list");
		assert_eq!(module.dispatch(&path, None).unwrap(), promise);

		assert!(matches!(
			module.invoke("widgets", "missing", None),
			Err(NgError::UnknownEndpoint(path)) if path == "zen.demo/widgets/missing"
		));
		assert!(module.dispatch("other/widgets/list", None).is_err());
	}
}
