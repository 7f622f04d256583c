//! Validated identifiers.

use crate::error::{ExprError, Result};
use std::fmt;

/// A non-empty name emitted verbatim into client code.
///
/// Used for variables, called functions and function parameters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier(String);

impl Identifier {
	/// Creates an identifier, rejecting the empty string.
	pub fn new(name: impl Into<String>) -> Result<Self> {
		let name = name.into();
		if name.is_empty() {
			return Err(ExprError::EmptyIdentifier);
		}
		Ok(Self(name))
	}

	/// Returns the identifier text.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for Identifier {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl AsRef<str> for Identifier {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl TryFrom<&str> for Identifier {
	type Error = ExprError;

	fn try_from(value: &str) -> Result<Self> {
		Self::new(value)
	}
}

impl TryFrom<String> for Identifier {
	type Error = ExprError;

	fn try_from(value: String) -> Result<Self> {
		Self::new(value)
	}
}
