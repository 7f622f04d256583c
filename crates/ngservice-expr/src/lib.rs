//! ngservice Expression Model
//!
//! A small, immutable tree of client-side code expressions.
//! Generated module declarations are assembled from these nodes and rendered
//! to source text in one pass, so no caller ever concatenates code by hand.
//!
//! ## Node Kinds
//!
//! | Node | Renders as |
//! |------|------------|
//! | [`Expression::Call`] | `target.function(a,b)` or `function(a,b)` |
//! | [`Expression::Variable`] | `name` |
//! | [`Expression::Str`] | `"escaped text"` |
//! | [`Expression::Bool`] | `true` / `false` |
//! | [`Expression::Array`] | `[a,b]` |
//! | [`Expression::Object`] | `{"key":value}` |
//! | [`Expression::Function`] | `function(p,q){return body;}` |
//! | [`Expression::Raw`] | the fragment, verbatim |
//!
//! Object keys are rendered as string literals, which keeps an object node
//! valid both as client code and as JSON.
//!
//! ## Example
//!
//! ```
//! use ngservice_expr::{Expression, ObjectLiteral};
//!
//! let object = ObjectLiteral::new().property("success", Expression::boolean(true));
//! assert_eq!(Expression::from(object).render(), r#"{"success":true}"#);
//! ```


pub mod error;
pub mod expression;
pub mod identifier;
pub mod literal;

pub use error::{ExprError, Result};
pub use expression::{Call, Expression, FunctionLiteral, ObjectLiteral};
pub use identifier::Identifier;
pub use literal::quote_str;
