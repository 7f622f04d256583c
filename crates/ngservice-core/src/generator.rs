//! Function Generators
//!
//! A [`FunctionGenerator`] binds one server function to one generated client
//! function. Three input shapes are supported:
//!
//! - [`FunctionGenerator::no_arg`]: `Fn() -> R`
//! - [`FunctionGenerator::string_arg`]: `Fn(String) -> R`, the raw argument is
//!   passed through unmodified
//! - [`FunctionGenerator::typed`]: `Fn(T) -> R` for `T: DeserializeOwned`; the
//!   client serializes its argument with `JSON.stringify` and malformed input is
//!   rejected with [`INVALID_INPUT_REJECTION`] before the function runs
//!
//! where `R: IntoPromise`. The generated client function calls the transport
//! proxy with a request object naming the endpoint and a callback handing the
//! promise JSON back to the proxy:
//!
//! ```text
//! function(arg){return transportProxy({"endpoint":"zen.demo/widgets/find","data":arg},function(promiseJson){return transportProxy.settle(promiseJson);});}
//! ```

use crate::error::{NameKind, Result, require_name};
use crate::promise::{INVALID_INPUT_REJECTION, IntoPromise, Promise};
use crate::settings::ProxyContract;
use ngservice_expr::{Expression, ObjectLiteral};
use serde::de::DeserializeOwned;
use std::collections::BTreeSet;
use std::fmt;

/// Parameter name of the generated client function.
const ARGUMENT_PARAM: &str = "arg";

/// Parameter name of the generated transport callback.
const RESULT_PARAM: &str = "promiseJson";

/// Input shape of a bound server function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
	/// No input.
	None,
	/// An opaque string.
	String,
	/// A structured value decoded from JSON.
	Typed,
}

type NoArgHandler = Box<dyn Fn() -> Promise + Send + Sync>;
type StringHandler = Box<dyn Fn(String) -> Promise + Send + Sync>;
type TypedHandler = Box<dyn Fn(&str) -> Promise + Send + Sync>;

enum Handler {
	NoArg(NoArgHandler),
	StringArg(StringHandler),
	Typed(TypedHandler),
}

/// A server function exposed as a generated client function.
pub struct FunctionGenerator {
	handler: Handler,
	proxy: ProxyContract,
	/// Dependencies declared with `depends_on_*`, kept apart from the proxy's.
	extra_modules: BTreeSet<String>,
	extra_services: BTreeSet<String>,
	/// Proxy dependencies plus the extras.
	module_dependencies: BTreeSet<String>,
	service_dependencies: BTreeSet<String>,
}

impl FunctionGenerator {
	fn from_handler(handler: Handler) -> Self {
		let mut generator = Self {
			handler,
			proxy: ProxyContract::default(),
			extra_modules: BTreeSet::new(),
			extra_services: BTreeSet::new(),
			module_dependencies: BTreeSet::new(),
			service_dependencies: BTreeSet::new(),
		};
		generator.refresh_dependencies();
		generator
	}

	fn refresh_dependencies(&mut self) {
		self.module_dependencies = self.extra_modules.clone();
		self.module_dependencies.insert(self.proxy.module.clone());
		self.service_dependencies = self.extra_services.clone();
		self.service_dependencies.insert(self.proxy.service.clone());
	}

	/// Binds a server function taking no input.
	pub fn no_arg<F, R>(function: F) -> Self
	where
		F: Fn() -> R + Send + Sync + 'static,
		R: IntoPromise + 'static,
	{
		Self::from_handler(Handler::NoArg(Box::new(move || function().into_promise())))
	}

	/// Binds a server function taking the raw client argument.
	pub fn string_arg<F, R>(function: F) -> Self
	where
		F: Fn(String) -> R + Send + Sync + 'static,
		R: IntoPromise + 'static,
	{
		Self::from_handler(Handler::StringArg(Box::new(move |argument: String| {
			function(argument).into_promise()
		})))
	}

	/// Binds a server function taking a JSON-decoded value.
	pub fn typed<T, F, R>(function: F) -> Self
	where
		T: DeserializeOwned + 'static,
		F: Fn(T) -> R + Send + Sync + 'static,
		R: IntoPromise + 'static,
	{
		Self::from_handler(Handler::Typed(Box::new(move |raw: &str| {
			match serde_json::from_str::<T>(raw) {
				Ok(input) => function(input).into_promise(),
				Err(e) => {
					tracing::debug!(error = %e, "Rejecting malformed typed argument");
					Promise::reject(INVALID_INPUT_REJECTION)
				}
			}
		})))
	}

	/// Rebinds the generator to another transport proxy.
	///
	/// The dependencies contributed by the previous proxy are replaced; extra
	/// dependencies added with [`Self::depends_on_module`] and
	/// [`Self::depends_on_service`] are kept, even when they share a name with
	/// the previous proxy's.
	///
	/// # Errors
	///
	/// Fails with [`NgError::EmptyName`](crate::NgError::EmptyName) if any
	/// proxy identifier is empty.
	pub fn with_proxy(mut self, proxy: ProxyContract) -> Result<Self> {
		proxy.validate()?;
		self.proxy = proxy;
		self.refresh_dependencies();
		Ok(self)
	}

	/// Declares an additional module dependency.
	pub fn depends_on_module(mut self, module: impl Into<String>) -> Result<Self> {
		self.extra_modules
			.insert(require_name(NameKind::Dependency, module)?);
		self.refresh_dependencies();
		Ok(self)
	}

	/// Declares an additional injected service.
	pub fn depends_on_service(mut self, service: impl Into<String>) -> Result<Self> {
		self.extra_services
			.insert(require_name(NameKind::Service, service)?);
		self.refresh_dependencies();
		Ok(self)
	}

	/// The input shape of the bound function.
	pub fn arity(&self) -> Arity {
		match self.handler {
			Handler::NoArg(_) => Arity::None,
			Handler::StringArg(_) => Arity::String,
			Handler::Typed(_) => Arity::Typed,
		}
	}

	/// The transport proxy this generator calls.
	pub fn proxy(&self) -> &ProxyContract {
		&self.proxy
	}

	/// Modules the enclosing module must depend on.
	pub fn module_dependencies(&self) -> &BTreeSet<String> {
		&self.module_dependencies
	}

	/// Services the enclosing factory must have injected.
	pub fn service_dependencies(&self) -> &BTreeSet<String> {
		&self.service_dependencies
	}

	/// Builds the client function calling `endpoint` through the proxy.
	pub fn to_function_expression(&self, endpoint: &str) -> Result<Expression> {
		let mut request =
			ObjectLiteral::new().property("endpoint", Expression::string(endpoint));
		let params: &[&str] = match self.handler {
			Handler::NoArg(_) => &[],
			Handler::StringArg(_) => {
				request = request.property("data", Expression::variable(ARGUMENT_PARAM)?);
				&[ARGUMENT_PARAM]
			}
			Handler::Typed(_) => {
				let encoded = Expression::method(
					Expression::variable("JSON")?,
					"stringify",
					[Expression::variable(ARGUMENT_PARAM)?],
				)?;
				request = request.property("data", encoded);
				&[ARGUMENT_PARAM]
			}
		};

		let settle = Expression::method(
			Expression::variable(self.proxy.service.as_str())?,
			self.proxy.settle.as_str(),
			[Expression::variable(RESULT_PARAM)?],
		)?;
		let callback = Expression::function([RESULT_PARAM], settle)?;
		let call = Expression::call(self.proxy.service.as_str(), [request.into(), callback])?;

		Ok(Expression::function(params.iter().copied(), call)?)
	}

	/// Runs the bound server function for an incoming call.
	///
	/// No-argument functions ignore `argument`; a missing argument is read as
	/// the empty string by the other variants.
	pub fn invoke(&self, argument: Option<&str>) -> Promise {
		match &self.handler {
			Handler::NoArg(function) => function(),
			Handler::StringArg(function) => function(argument.unwrap_or_default().to_string()),
			Handler::Typed(function) => function(argument.unwrap_or_default()),
		}
	}

	/// Runs the bound server function and renders the promise JSON.
	pub fn respond(&self, argument: Option<&str>) -> String {
		self.invoke(argument).to_json()
	}
}

impl fmt::Debug for FunctionGenerator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FunctionGenerator")
			.field("arity", &self.arity())
			.field("proxy", &self.proxy)
			.field("module_dependencies", &self.module_dependencies)
			.field("service_dependencies", &self.service_dependencies)
			.finish()
	}
}
