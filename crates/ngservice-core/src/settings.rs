//! Code generation settings
//!
//! The names baked into generated code are a contract with two external
//! collaborators: the client module framework (`angular.module(...).factory(...)`)
//! and the client-side transport proxy that performs the actual call. Both sets
//! of names can be overridden from TOML; every field falls back to its default.
//!
//! ```toml
//! [syntax]
//! namespace = "angular"
//! declare = "module"
//! register = "factory"
//!
//! [proxy]
//! service = "transportProxy"
//! module = "proxy-module"
//! settle = "settle"
//! ```

use crate::error::{NameKind, Result, require_name};
use crate::generator::FunctionGenerator;
use crate::module::Module;
use serde::{Deserialize, Serialize};

/// How module declarations and factory registrations are spelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleSyntax {
	/// Global object owning the declaration function.
	pub namespace: String,
	/// Function declaring a module, called as `namespace.declare(name, deps)`.
	pub declare: String,
	/// Method registering a service on a module handle.
	pub register: String,
}

impl Default for ModuleSyntax {
	fn default() -> Self {
		Self {
			namespace: "angular".to_string(),
			declare: "module".to_string(),
			register: "factory".to_string(),
		}
	}
}

impl ModuleSyntax {
	/// Checks that every identifier is non-empty.
	pub fn validate(&self) -> Result<()> {
		for name in [&self.namespace, &self.declare, &self.register] {
			require_name(NameKind::Syntax, name.as_str())?;
		}
		Ok(())
	}
}

/// Names of the client-side transport proxy every generated function calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyContract {
	/// Injected service identifier of the proxy (a function parameter name).
	pub service: String,
	/// Module providing the proxy service.
	pub module: String,
	/// Proxy method turning a promise JSON payload into a settled promise.
	pub settle: String,
}

impl Default for ProxyContract {
	fn default() -> Self {
		Self {
			service: "transportProxy".to_string(),
			module: "proxy-module".to_string(),
			settle: "settle".to_string(),
		}
	}
}

impl ProxyContract {
	/// Checks that every identifier is non-empty.
	pub fn validate(&self) -> Result<()> {
		require_name(NameKind::Service, self.service.as_str())?;
		require_name(NameKind::Dependency, self.module.as_str())?;
		require_name(NameKind::Syntax, self.settle.as_str())?;
		Ok(())
	}
}

/// Top-level settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
	/// Module declaration syntax.
	pub syntax: ModuleSyntax,
	/// Transport proxy names.
	pub proxy: ProxyContract,
}

impl Settings {
	/// Creates default settings.
	pub fn new() -> Self {
		Self::default()
	}

	/// Parses settings from TOML text.
	///
	/// # Errors
	///
	/// Fails on malformed TOML and on any name set to the empty string.
	pub fn from_toml_str(source: &str) -> Result<Self> {
		let settings: Self = toml::from_str(source)?;
		settings.validate()?;
		Ok(settings)
	}

	/// Checks every configured name.
	pub fn validate(&self) -> Result<()> {
		self.syntax.validate()?;
		self.proxy.validate()
	}

	/// Creates an empty module using the configured syntax.
	pub fn module(&self, name: impl Into<String>) -> Result<Module> {
		Module::new(name)?.with_syntax(self.syntax.clone())
	}

	/// Rebinds a generator to the configured transport proxy.
	pub fn bind(&self, generator: FunctionGenerator) -> Result<FunctionGenerator> {
		generator.with_proxy(self.proxy.clone())
	}
}
