//! ngservice core
//!
//! Emits client-side module and service definitions from server-declared
//! functions at page-render time, so a front-end module framework can call
//! server logic through a uniform promise contract without hand-written stubs.
//!
//! ## Architecture
//!
//! Data flows bottom-up at construction time, then through a per-request
//! registry at render time:
//!
//! - [`promise`]: two-case [`Promise`] and the mapping from server results
//! - [`generator`]: [`FunctionGenerator`] binding one server function to one
//!   generated client function
//! - [`factory`]: [`Factory`] grouping generators into one service object
//! - [`module`]: [`Module`] declaring factories and dependencies
//! - [`registry`]: [`RenderRegistry`] deduplicating module emission per page
//! - [`settings`]: names baked into generated code, loadable from TOML
//!
//! ## Example
//!
//! ```
//! use ngservice_core::{Factory, FunctionGenerator, Json, Module, RenderRegistry};
//!
//! let widgets = Factory::new()
//! 	.with_function("list", FunctionGenerator::no_arg(|| Json(vec!["bolt", "nut"])))
//! 	.unwrap();
//! let module = Module::new("zen.demo").unwrap().with_factory("widgets", widgets).unwrap();
//!
//! let mut registry = RenderRegistry::new();
//! registry.register_or_emit(&module).unwrap();
//! let head = registry.render_head().unwrap();
//! assert!(head.starts_with(r#"angular.module("zen.demo",["proxy-module"])"#));
//!
//! // the transport routes the client call back to the module
//! let response = module.invoke("widgets", "list", None).unwrap();
//! assert_eq!(response.to_json(), r#"{"success":true,"data":["bolt","nut"]}"#);
//! ```


pub mod error;
pub mod factory;
pub mod generator;
pub mod module;
pub mod promise;
pub mod registry;
pub mod settings;

pub use error::{NameKind, NgError, Result};
pub use factory::{BuiltFactory, Factory};
pub use generator::{Arity, FunctionGenerator};
pub use module::{Module, ModuleName, endpoint};
pub use promise::{
	DEFAULT_REJECTION, INVALID_INPUT_REJECTION, IntoPromise, Json, Outcome, Promise, to_promise,
};
pub use registry::{RenderPhase, RenderRegistry, script_tag};
pub use settings::{ModuleSyntax, ProxyContract, Settings};
