//! Expression nodes and their rendering.

use crate::error::Result;
use crate::identifier::Identifier;
use crate::literal::write_quoted;
use std::fmt::{self, Write};

/// A single emittable code fragment.
///
/// Nodes are immutable once built. Rendering is the only operation and is a
/// pure function of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
	/// A function or method call.
	Call(Call),
	/// A reference to a variable in scope.
	Variable(Identifier),
	/// A string literal.
	Str(String),
	/// A boolean literal.
	Bool(bool),
	/// An array literal.
	Array(Vec<Expression>),
	/// An object literal.
	Object(ObjectLiteral),
	/// An anonymous function.
	Function(FunctionLiteral),
	/// A pre-rendered fragment emitted verbatim (for example serialized JSON).
	Raw(String),
}

/// A call `function(args)` or, with a target, `target.function(args)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
	target: Option<Box<Expression>>,
	function: Identifier,
	args: Vec<Expression>,
}

/// An ordered list of `key: value` properties with unique keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectLiteral {
	properties: Vec<(String, Expression)>,
}

/// An anonymous function with a single returned body expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionLiteral {
	params: Vec<Identifier>,
	body: Box<Expression>,
}

impl Expression {
	/// Builds a free function call.
	pub fn call(
		function: impl Into<String>,
		args: impl IntoIterator<Item = Expression>,
	) -> Result<Self> {
		Ok(Self::Call(Call {
			target: None,
			function: Identifier::new(function)?,
			args: args.into_iter().collect(),
		}))
	}

	/// Builds a call of `function` on `target`.
	pub fn method(
		target: Expression,
		function: impl Into<String>,
		args: impl IntoIterator<Item = Expression>,
	) -> Result<Self> {
		Ok(Self::Call(Call {
			target: Some(Box::new(target)),
			function: Identifier::new(function)?,
			args: args.into_iter().collect(),
		}))
	}

	/// Builds a variable reference.
	pub fn variable(name: impl Into<String>) -> Result<Self> {
		Identifier::new(name).map(Self::Variable)
	}

	/// Builds a string literal.
	pub fn string(value: impl Into<String>) -> Self {
		Self::Str(value.into())
	}

	/// Builds a boolean literal.
	pub fn boolean(value: bool) -> Self {
		Self::Bool(value)
	}

	/// Builds an array literal.
	pub fn array(items: impl IntoIterator<Item = Expression>) -> Self {
		Self::Array(items.into_iter().collect())
	}

	/// Builds an anonymous function from parameter names and a body.
	pub fn function<I, S>(params: I, body: Expression) -> Result<Self>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let params = params
			.into_iter()
			.map(Identifier::new)
			.collect::<Result<Vec<_>>>()?;
		Ok(Self::Function(FunctionLiteral {
			params,
			body: Box::new(body),
		}))
	}

	/// Wraps an already rendered fragment.
	pub fn raw(fragment: impl Into<String>) -> Self {
		Self::Raw(fragment.into())
	}

	/// Renders the expression to source text.
	pub fn render(&self) -> String {
		self.to_string()
	}

	fn write_to(&self, out: &mut impl Write) -> fmt::Result {
		match self {
			Self::Call(call) => call.write_to(out),
			Self::Variable(ident) => out.write_str(ident.as_str()),
			Self::Str(value) => write_quoted(out, value),
			Self::Bool(value) => out.write_str(if *value { "true" } else { "false" }),
			Self::Array(items) => {
				out.write_char('[')?;
				write_list(out, items)?;
				out.write_char(']')
			}
			Self::Object(object) => object.write_to(out),
			Self::Function(function) => function.write_to(out),
			Self::Raw(fragment) => out.write_str(fragment),
		}
	}
}

fn write_list(out: &mut impl Write, items: &[Expression]) -> fmt::Result {
	for (i, item) in items.iter().enumerate() {
		if i > 0 {
			out.write_char(',')?;
		}
		item.write_to(out)?;
	}
	Ok(())
}

impl fmt::Display for Expression {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.write_to(f)
	}
}

impl Call {
	/// The call target, if this is a method call.
	pub fn target(&self) -> Option<&Expression> {
		self.target.as_deref()
	}

	/// The called function name.
	pub fn function(&self) -> &Identifier {
		&self.function
	}

	/// The call arguments.
	pub fn args(&self) -> &[Expression] {
		&self.args
	}

	fn write_to(&self, out: &mut impl Write) -> fmt::Result {
		if let Some(target) = &self.target {
			target.write_to(out)?;
			out.write_char('.')?;
		}
		out.write_str(self.function.as_str())?;
		out.write_char('(')?;
		write_list(out, &self.args)?;
		out.write_char(')')
	}
}

impl ObjectLiteral {
	/// Creates an empty object literal.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a property. A repeated key replaces the earlier value in place.
	pub fn property(mut self, key: impl Into<String>, value: Expression) -> Self {
		let key = key.into();
		match self.properties.iter_mut().find(|(existing, _)| *existing == key) {
			Some((_, slot)) => *slot = value,
			None => self.properties.push((key, value)),
		}
		self
	}

	/// Returns the value stored under `key`.
	pub fn get(&self, key: &str) -> Option<&Expression> {
		self.properties
			.iter()
			.find(|(existing, _)| existing == key)
			.map(|(_, value)| value)
	}

	/// Iterates over the properties in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &Expression)> {
		self.properties
			.iter()
			.map(|(key, value)| (key.as_str(), value))
	}

	/// Returns the number of properties.
	pub fn len(&self) -> usize {
		self.properties.len()
	}

	/// Checks if the object has no properties.
	pub fn is_empty(&self) -> bool {
		self.properties.is_empty()
	}

	fn write_to(&self, out: &mut impl Write) -> fmt::Result {
		out.write_char('{')?;
		for (i, (key, value)) in self.properties.iter().enumerate() {
			if i > 0 {
				out.write_char(',')?;
			}
			write_quoted(out, key)?;
			out.write_char(':')?;
			value.write_to(out)?;
		}
		out.write_char('}')
	}
}

impl From<ObjectLiteral> for Expression {
	fn from(object: ObjectLiteral) -> Self {
		Self::Object(object)
	}
}

impl FunctionLiteral {
	/// The parameter names.
	pub fn params(&self) -> &[Identifier] {
		&self.params
	}

	/// The returned body expression.
	pub fn body(&self) -> &Expression {
		&self.body
	}

	fn write_to(&self, out: &mut impl Write) -> fmt::Result {
		out.write_str("function(")?;
		for (i, param) in self.params.iter().enumerate() {
			if i > 0 {
				out.write_char(',')?;
			}
			out.write_str(param.as_str())?;
		}
		out.write_str("){return ")?;
		self.body.write_to(out)?;
		out.write_str(";}")
	}
}
