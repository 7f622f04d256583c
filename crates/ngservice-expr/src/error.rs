//! Error types for ngservice-expr

use thiserror::Error;

/// Errors raised while constructing expression nodes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExprError {
	/// An identifier (variable, function or parameter name) was empty
	#[error("identifier must not be empty")]
	EmptyIdentifier,
}

/// Result type for expression construction
pub type Result<T> = std::result::Result<T, ExprError>;
