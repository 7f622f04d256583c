//! Promise Model
//!
//! Every server function result is normalized into a [`Promise`] before it
//! crosses the wire. The client-side resolver of the transport proxy only ever
//! sees one of three JSON shapes:
//!
//! | Promise | JSON |
//! |---------|------|
//! | `Resolved(None)` | `{"success":true}` |
//! | `Resolved(Some(x))` | `{"success":true,"data":x}` |
//! | `Rejected(reason)` | `{"success":false,"msg":reason}` |
//!
//! Server-side failures are never leaked to the client: absent values and
//! errors both collapse into [`DEFAULT_REJECTION`]. The only distinguishing
//! reason is [`INVALID_INPUT_REJECTION`], produced when a typed endpoint
//! receives malformed input.

use ngservice_expr::{Expression, ObjectLiteral};
use serde::Serialize;
use std::fmt::Display;

/// Rejection reason for every server-side failure.
pub const DEFAULT_REJECTION: &str = "server error";

/// Rejection reason for malformed typed-endpoint input.
pub const INVALID_INPUT_REJECTION: &str = "invalid json";

/// The normalized outcome of a server-side call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Promise {
	/// The call succeeded, optionally carrying a payload expression.
	Resolved(Option<Expression>),
	/// The call failed for the given reason.
	Rejected(String),
}

impl Promise {
	/// A successful promise without payload.
	pub fn resolved() -> Self {
		Self::Resolved(None)
	}

	/// A successful promise carrying `payload`.
	pub fn resolve(payload: Expression) -> Self {
		Self::Resolved(Some(payload))
	}

	/// A failed promise with [`DEFAULT_REJECTION`].
	pub fn rejected() -> Self {
		Self::Rejected(DEFAULT_REJECTION.to_string())
	}

	/// A failed promise with a custom reason.
	pub fn reject(reason: impl Into<String>) -> Self {
		Self::Rejected(reason.into())
	}

	/// `Resolved(None)` on success, `Rejected(DEFAULT_REJECTION)` otherwise.
	pub fn from_success(success: bool) -> Self {
		if success {
			Self::resolved()
		} else {
			Self::rejected()
		}
	}

	/// Serializes `value` into a resolved payload.
	///
	/// A value `serde_json` cannot encode yields the default rejection.
	pub fn from_value<T: Serialize + ?Sized>(value: &T) -> Self {
		match serde_json::to_string(value) {
			Ok(json) => Self::resolve(Expression::raw(json)),
			Err(e) => {
				tracing::warn!("Failed to serialize server function result: {}", e);
				Self::rejected()
			}
		}
	}

	/// Checks if the promise is resolved.
	pub fn is_resolved(&self) -> bool {
		matches!(self, Self::Resolved(_))
	}

	/// Returns the payload of a resolved promise.
	pub fn payload(&self) -> Option<&Expression> {
		match self {
			Self::Resolved(payload) => payload.as_ref(),
			Self::Rejected(_) => None,
		}
	}

	/// Returns the reason of a rejected promise.
	pub fn reason(&self) -> Option<&str> {
		match self {
			Self::Resolved(_) => None,
			Self::Rejected(reason) => Some(reason),
		}
	}

	/// Builds the transport-ready object literal.
	pub fn to_expression(&self) -> Expression {
		let object = match self {
			Self::Resolved(None) => ObjectLiteral::new().property("success", Expression::boolean(true)),
			Self::Resolved(Some(payload)) => ObjectLiteral::new()
				.property("success", Expression::boolean(true))
				.property("data", payload.clone()),
			Self::Rejected(reason) => ObjectLiteral::new()
				.property("success", Expression::boolean(false))
				.property("msg", Expression::string(reason.as_str())),
		};
		object.into()
	}

	/// Renders the promise JSON sent back through the transport.
	pub fn to_json(&self) -> String {
		self.to_expression().render()
	}
}

impl From<bool> for Promise {
	fn from(success: bool) -> Self {
		Self::from_success(success)
	}
}

/// The classes of value a server function may produce.
///
/// [`to_promise`] is total over these cases.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
	/// An already built client expression.
	Expression(Expression),
	/// Success without a value.
	Unit,
	/// A structured success value.
	Value(serde_json::Value),
	/// No result and no explicit error.
	Absent,
	/// An explicit failure; the detail stays on the server.
	Failure(String),
}

/// Maps an [`Outcome`] onto a [`Promise`].
pub fn to_promise(outcome: Outcome) -> Promise {
	match outcome {
		Outcome::Expression(expression) => Promise::resolve(expression),
		Outcome::Unit => Promise::resolved(),
		Outcome::Value(value) => Promise::from_value(&value),
		Outcome::Absent => Promise::rejected(),
		Outcome::Failure(detail) => {
			tracing::warn!("Server function failed: {}", detail);
			Promise::rejected()
		}
	}
}

/// Conversion of server function return values into a [`Promise`].
///
/// Implemented for the shapes a server function naturally returns, so bound
/// closures can return `Option<Json<T>>`, `Result<(), E>` and so on directly.
pub trait IntoPromise {
	/// Performs the conversion.
	fn into_promise(self) -> Promise;
}

/// Wrapper marking a structured value for JSON serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Json<T>(pub T);

impl IntoPromise for Promise {
	fn into_promise(self) -> Promise {
		self
	}
}

impl IntoPromise for Outcome {
	fn into_promise(self) -> Promise {
		to_promise(self)
	}
}

impl IntoPromise for Expression {
	fn into_promise(self) -> Promise {
		to_promise(Outcome::Expression(self))
	}
}

impl IntoPromise for () {
	fn into_promise(self) -> Promise {
		to_promise(Outcome::Unit)
	}
}

impl IntoPromise for bool {
	fn into_promise(self) -> Promise {
		Promise::from_success(self)
	}
}

impl IntoPromise for serde_json::Value {
	fn into_promise(self) -> Promise {
		to_promise(Outcome::Value(self))
	}
}

impl<T: Serialize> IntoPromise for Json<T> {
	fn into_promise(self) -> Promise {
		Promise::from_value(&self.0)
	}
}

impl<T: IntoPromise> IntoPromise for Option<T> {
	fn into_promise(self) -> Promise {
		match self {
			Some(value) => value.into_promise(),
			None => to_promise(Outcome::Absent),
		}
	}
}

impl<T: IntoPromise, E: Display> IntoPromise for Result<T, E> {
	fn into_promise(self) -> Promise {
		match self {
			Ok(value) => value.into_promise(),
			Err(e) => to_promise(Outcome::Failure(e.to_string())),
		}
	}
}
