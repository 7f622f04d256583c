//! Factory Builder
//!
//! A [`Factory`] groups named [`FunctionGenerator`]s into one generated
//! service object: an anonymous function over the injected services returning
//! an object literal keyed by function name.

use crate::error::{NameKind, NgError, Result, require_segment};
use crate::generator::FunctionGenerator;
use crate::promise::Promise;
use ngservice_expr::{Expression, ObjectLiteral};
use std::collections::BTreeSet;

/// A named group of generated client functions.
#[derive(Debug, Default)]
pub struct Factory {
	functions: Vec<(String, FunctionGenerator)>,
}

/// The output of [`Factory::build`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltFactory {
	/// Union of the generators' module dependencies.
	pub module_dependencies: BTreeSet<String>,
	/// Union of the generators' service dependencies.
	pub service_dependencies: BTreeSet<String>,
	/// The generated service constructor.
	pub expression: Expression,
}

impl BuiltFactory {
	/// Union of module and service dependencies.
	pub fn dependencies(&self) -> BTreeSet<String> {
		self.module_dependencies
			.union(&self.service_dependencies)
			.cloned()
			.collect()
	}
}

impl Factory {
	/// Creates an empty factory.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a generator under `name`.
	///
	/// # Errors
	///
	/// Fails if `name` is empty, contains `/` or is already registered in this
	/// factory.
	pub fn add_function(
		&mut self,
		name: impl Into<String>,
		generator: FunctionGenerator,
	) -> Result<&mut Self> {
		let name = require_segment(NameKind::Function, name)?;
		if self.function(&name).is_some() {
			return Err(NgError::DuplicateFunction(name));
		}
		self.functions.push((name, generator));
		Ok(self)
	}

	/// Builder-style variant of [`Self::add_function`].
	pub fn with_function(
		mut self,
		name: impl Into<String>,
		generator: FunctionGenerator,
	) -> Result<Self> {
		self.add_function(name, generator)?;
		Ok(self)
	}

	/// Returns the generator registered under `name`.
	pub fn function(&self, name: &str) -> Option<&FunctionGenerator> {
		self.functions
			.iter()
			.find(|(existing, _)| existing == name)
			.map(|(_, generator)| generator)
	}

	/// Iterates over function names in registration order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.functions.iter().map(|(name, _)| name.as_str())
	}

	/// Returns the number of functions.
	pub fn len(&self) -> usize {
		self.functions.len()
	}

	/// Checks if the factory exposes no functions.
	pub fn is_empty(&self) -> bool {
		self.functions.is_empty()
	}

	/// Union of every generator's module dependencies.
	pub fn module_dependencies(&self) -> BTreeSet<String> {
		self.functions
			.iter()
			.flat_map(|(_, generator)| generator.module_dependencies().iter().cloned())
			.collect()
	}

	/// Union of every generator's service dependencies.
	pub fn service_dependencies(&self) -> BTreeSet<String> {
		self.functions
			.iter()
			.flat_map(|(_, generator)| generator.service_dependencies().iter().cloned())
			.collect()
	}

	/// Generates the service constructor.
	///
	/// Each function calls the endpoint `{scope}/{name}`.
	pub fn build(&self, scope: &str) -> Result<BuiltFactory> {
		let object = self.functions.iter().try_fold(
			ObjectLiteral::new(),
			|object, (name, generator)| -> Result<ObjectLiteral> {
				let endpoint = format!("{scope}/{name}");
				Ok(object.property(name.as_str(), generator.to_function_expression(&endpoint)?))
			},
		)?;

		let module_dependencies = self.module_dependencies();
		let service_dependencies = self.service_dependencies();
		let expression = Expression::function(service_dependencies.iter(), object.into())?;

		Ok(BuiltFactory {
			module_dependencies,
			service_dependencies,
			expression,
		})
	}

	/// Runs the function registered under `name`.
	pub fn invoke(&self, name: &str, argument: Option<&str>) -> Option<Promise> {
		self.function(name)
			.map(|generator| generator.invoke(argument))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::promise::Json;
	use rstest::{fixture, rstest};

	#[fixture]
	fn factory() -> Factory {
		Factory::new()
			.with_function("list", FunctionGenerator::no_arg(|| Json(vec!["a"])))
			.unwrap()
			.with_function("echo", FunctionGenerator::string_arg(|s: String| Json(s)))
			.unwrap()
	}

	#[rstest]
	fn test_empty_factory_builds_empty_object() {
		let built = Factory::new().build("m/s").unwrap();
		assert!(built.dependencies().is_empty());
		assert_eq!(built.expression.render(), "function(){return {};}");
	}

	#[rstest]
	fn test_add_function_rejects_empty_name() {
		let mut factory = Factory::new();
		let err = factory
			.add_function("", FunctionGenerator::no_arg(|| true))
			.unwrap_err();
		assert!(matches!(
			err,
			NgError::EmptyName {
				kind: NameKind::Function
			}
		));
	}

	#[rstest]
	fn test_add_function_rejects_path_separator(mut factory: Factory) {
		let err = factory
			.add_function("a/b", FunctionGenerator::no_arg(|| true))
			.unwrap_err();
		assert!(matches!(
			err,
			NgError::InvalidName { kind: NameKind::Function, ref name } if name == "a/b"
		));
		assert_eq!(factory.len(), 2);
	}

	#[rstest]
	fn test_add_function_rejects_duplicate(mut factory: Factory) {
		let err = factory
			.add_function("list", FunctionGenerator::no_arg(|| true))
			.unwrap_err();
		assert!(matches!(err, NgError::DuplicateFunction(name) if name == "list"));
		assert_eq!(factory.len(), 2);
	}

	#[rstest]
	fn test_build_keeps_registration_order(factory: Factory) {
		let built = factory.build("zen.demo/widgets").unwrap();
		let rendered = built.expression.render();

		assert!(rendered.starts_with(r#"function(transportProxy){return {"list":function(){"#));
		let list = rendered.find(r#""endpoint":"zen.demo/widgets/list""#).unwrap();
		let echo = rendered.find(r#""endpoint":"zen.demo/widgets/echo","data":arg"#).unwrap();
		assert!(list < echo);
	}

	#[rstest]
	fn test_dependencies_are_deduplicated(factory: Factory) {
		let built = factory.build("m/s").unwrap();
		assert_eq!(
			built.dependencies(),
			BTreeSet::from(["proxy-module".to_string(), "transportProxy".to_string()])
		);
	}

	#[rstest]
	fn test_invoke(factory: Factory) {
		assert_eq!(
			factory.invoke("echo", Some("hi")).unwrap().to_json(),
			r#"{"success":true,"data":"hi"}"#
		);
		assert!(factory.invoke("missing", None).is_none());
	}
}
