//! # ngservice
//!
//! Server functions as client-side services, generated at page-render time.
//!
//! ngservice turns server-declared functions into AngularJS-style module
//! declarations (`angular.module(...).factory(...)`). Every generated client
//! function calls a transport proxy and receives a normalized promise, so the
//! client never needs hand-written stubs.
//!
//! ## Crates
//!
//! - [`expr`] (`ngservice-expr`): the minimal expression model generated code
//!   is built from
//! - `ngservice-core`: promises, function generators, factory/module builders
//!   and the per-request render registry, re-exported at the crate root
//!
//! ## Quick Example
//!
//! ```rust
//! use ngservice::prelude::*;
//!
//! #[derive(Deserialize)]
//! struct Lookup {
//! 	id: u32,
//! }
//!
//! fn widgets_module() -> Result<Module> {
//! 	let widgets = Factory::new()
//! 		.with_function("list", FunctionGenerator::no_arg(|| Json(vec!["bolt", "nut"])))?
//! 		.with_function(
//! 			"find",
//! 			FunctionGenerator::typed(|lookup: Lookup| (lookup.id == 1).then(|| Json("bolt"))),
//! 		)?;
//! 	Module::new("zen.demo")?.with_factory("widgets", widgets)
//! }
//!
//! // one registry per request
//! let module = widgets_module().unwrap();
//! let mut registry = RenderRegistry::new();
//! registry.register_or_emit(&module).unwrap();
//! registry.register_or_emit(&module).unwrap();
//! let head = script_tag(&registry.render_head().unwrap());
//! assert_eq!(head.matches("angular.module").count(), 1);
//!
//! // the transport proxy routes client calls back by endpoint
//! let response = module.dispatch("zen.demo/widgets/find", Some(r#"{"id":1}"#)).unwrap();
//! assert_eq!(response.to_json(), r#"{"success":true,"data":"bolt"}"#);
//! ```

pub use ngservice_expr as expr;

pub use ngservice_core::{
	Arity, BuiltFactory, DEFAULT_REJECTION, Factory, FunctionGenerator, INVALID_INPUT_REJECTION,
	IntoPromise, Json, Module, ModuleName, ModuleSyntax, NameKind, NgError, Outcome, Promise,
	ProxyContract, RenderPhase, RenderRegistry, Result, Settings, endpoint, script_tag,
	to_promise,
};
pub use ngservice_expr::{Expression, ExprError, Identifier, ObjectLiteral};

/// Commonly used types for declaring and rendering generated services.
pub mod prelude {
	pub use crate::{
		Expression, Factory, FunctionGenerator, IntoPromise, Json, Module, NgError, Promise,
		RenderRegistry, Result, Settings, script_tag,
	};

	// External
	pub use serde::{Deserialize, Serialize};
}
