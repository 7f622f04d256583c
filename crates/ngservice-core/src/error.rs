//! Error types for ngservice-core.

use ngservice_expr::ExprError;
use std::fmt;
use thiserror::Error;

/// The kind of name that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
	/// A module name
	Module,
	/// A module dependency name
	Dependency,
	/// A service (factory) name
	Service,
	/// An exposed function name
	Function,
	/// A configured syntax or proxy identifier
	Syntax,
}

impl fmt::Display for NameKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let kind = match self {
			Self::Module => "module",
			Self::Dependency => "dependency",
			Self::Service => "service",
			Self::Function => "function",
			Self::Syntax => "syntax",
		};
		f.write_str(kind)
	}
}

/// Errors raised while building or rendering generated modules.
///
/// Every variant except [`NgError::UnknownEndpoint`] signals a programming
/// error in the caller: bad names, duplicated registrations or a broken
/// render lifecycle.
#[derive(Debug, Error)]
pub enum NgError {
	/// A module, dependency, service or function name was empty
	#[error("{kind} name must not be empty")]
	EmptyName {
		/// Which name was empty
		kind: NameKind,
	},

	/// A service or function name contains the endpoint separator
	#[error("{kind} name `{name}` must not contain `/`")]
	InvalidName {
		/// Which name was rejected
		kind: NameKind,
		/// The rejected name
		name: String,
	},

	/// A function name is already registered in the factory
	#[error("function `{0}` is already registered in this factory")]
	DuplicateFunction(String),

	/// A service name is already bound in the module
	#[error("service `{service}` is already bound in module `{module}`")]
	DuplicateFactory {
		/// The module being built
		module: String,
		/// The service name bound twice
		service: String,
	},

	/// The head section was rendered a second time in one request
	#[error("head section has already been rendered for this request")]
	HeadAlreadyRendered,

	/// No function is exposed at the requested endpoint
	#[error("no function is exposed at `{0}`")]
	UnknownEndpoint(String),

	/// An expression node could not be constructed
	#[error("Expression error: {0}")]
	Expression(#[from] ExprError),

	/// Settings could not be parsed
	#[error("Invalid settings: {0}")]
	Settings(#[from] toml::de::Error),
}

/// Result type alias for ngservice-core operations.
pub type Result<T> = std::result::Result<T, NgError>;

/// Rejects empty names with [`NgError::EmptyName`].
pub(crate) fn require_name(kind: NameKind, name: impl Into<String>) -> Result<String> {
	let name = name.into();
	if name.is_empty() {
		return Err(NgError::EmptyName { kind });
	}
	Ok(name)
}

/// Rejects names that are empty or would split an endpoint path.
pub(crate) fn require_segment(kind: NameKind, name: impl Into<String>) -> Result<String> {
	let name = require_name(kind, name)?;
	if name.contains('/') {
		return Err(NgError::InvalidName { kind, name });
	}
	Ok(name)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(NameKind::Module, "module name must not be empty")]
	#[case(NameKind::Service, "service name must not be empty")]
	#[case(NameKind::Function, "function name must not be empty")]
	#[case(NameKind::Syntax, "syntax name must not be empty")]
	fn test_empty_name_display(#[case] kind: NameKind, #[case] expected: &str) {
		assert_eq!(NgError::EmptyName { kind }.to_string(), expected);
	}

	#[rstest]
	fn test_require_name() {
		assert_eq!(require_name(NameKind::Function, "list").unwrap(), "list");
		assert!(matches!(
			require_name(NameKind::Dependency, ""),
			Err(NgError::EmptyName {
				kind: NameKind::Dependency
			})
		));
	}

	#[rstest]
	#[case("list", true)]
	#[case("a/b", false)]
	#[case("/", false)]
	#[case("", false)]
	fn test_require_segment(#[case] name: &str, #[case] accepted: bool) {
		assert_eq!(require_segment(NameKind::Function, name).is_ok(), accepted);
	}

	#[rstest]
	fn test_invalid_name_display() {
		let err = require_segment(NameKind::Service, "svc/x").unwrap_err();
		assert_eq!(err.to_string(), "service name `svc/x` must not contain `/`");
	}
}
