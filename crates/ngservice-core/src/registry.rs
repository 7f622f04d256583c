//! Per-request Render Registry
//!
//! A page may reference the same module from several render call-sites.
//! The [`RenderRegistry`] makes sure each module is declared exactly once per
//! page:
//!
//! - Before the head section is rendered, call-sites only register their
//!   modules. Everything registered is flushed together by
//!   [`RenderRegistry::render_head`].
//! - After the head section is rendered, a call-site referencing a module that
//!   is not on the page yet gets its declaration back for inline emission;
//!   modules already on the page produce nothing.
//!
//! The registry is created at request start, passed by `&mut` into every
//! call-site and dropped with the response. It holds no cross-request state.
//!
//! ## Example
//!
//! ```rust
//! use ngservice_core::{Factory, FunctionGenerator, Module, RenderRegistry, script_tag};
//!
//! # fn main() -> ngservice_core::Result<()> {
//! let module = Module::new("zen.demo")?.with_factory(
//! 	"widgets",
//! 	Factory::new().with_function("list", FunctionGenerator::no_arg(|| ()))?,
//! )?;
//! let late = Module::new("zen.late")?;
//!
//! let mut registry = RenderRegistry::new();
//!
//! // body call-sites, head not rendered yet
//! assert_eq!(registry.register_or_emit(&module)?, None);
//! assert_eq!(registry.register_or_emit(&module)?, None);
//!
//! // head section
//! let head = script_tag(&registry.render_head()?);
//! assert_eq!(head.matches("angular.module").count(), 1);
//!
//! // after the head: unseen modules are emitted inline once
//! assert_eq!(
//! 	registry.register_or_emit(&late)?.as_deref(),
//! 	Some(r#"angular.module("zen.late",[]);"#)
//! );
//! assert_eq!(registry.register_or_emit(&late)?, None);
//! assert!(registry.render_head().is_err());
//! # Ok(())
//! # }
//! ```

use crate::error::{NgError, Result};
use crate::module::{Module, ModuleName};
use std::collections::HashSet;

/// Lifecycle phase of a request's registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderPhase {
	/// The head section has not been rendered.
	#[default]
	Fresh,
	/// The head section has been rendered; the phase never goes back.
	HeadRendered,
}

/// Module emission state for one request.
#[derive(Debug, Default)]
pub struct RenderRegistry {
	phase: RenderPhase,
	/// Modules waiting for the head section, with their rendered statements.
	pending: Vec<(ModuleName, String)>,
	emitted: HashSet<ModuleName>,
}

impl RenderRegistry {
	/// Creates a registry for a new request.
	pub fn new() -> Self {
		Self::default()
	}

	/// The current phase.
	pub fn phase(&self) -> RenderPhase {
		self.phase
	}

	/// Checks if the head section has been rendered.
	pub fn is_head_rendered(&self) -> bool {
		self.phase == RenderPhase::HeadRendered
	}

	/// Checks if a module is pending or already on the page.
	pub fn contains(&self, name: &ModuleName) -> bool {
		self.emitted.contains(name) || self.pending.iter().any(|(pending, _)| pending == name)
	}

	/// Returns the number of modules waiting for the head section.
	pub fn pending_count(&self) -> usize {
		self.pending.len()
	}

	/// Returns the number of modules already on the page.
	pub fn emitted_count(&self) -> usize {
		self.emitted.len()
	}

	/// Registers `module` at a render call-site.
	///
	/// Returns the statement to emit inline, or `None` when the module is
	/// deferred to the head section or already on the page.
	///
	/// Before the head is rendered the first registration of a name wins; a
	/// later, different definition under the same name is ignored with a
	/// warning.
	pub fn register_or_emit(&mut self, module: &Module) -> Result<Option<String>> {
		let name = module.key();
		match self.phase {
			RenderPhase::Fresh => {
				let statement = statement(module)?;
				match self.pending.iter().find(|(pending, _)| pending == name) {
					Some((_, existing)) => {
						if *existing != statement {
							tracing::warn!(
								module = %name,
								"Conflicting definition registered for module; keeping the first one"
							);
						}
					}
					None => {
						tracing::debug!(module = %name, "Deferring module to head section");
						self.pending.push((name.clone(), statement));
					}
				}
				Ok(None)
			}
			RenderPhase::HeadRendered => {
				if self.emitted.contains(name) {
					tracing::debug!(module = %name, "Module already on page");
					return Ok(None);
				}
				let statement = statement(module)?;
				self.emitted.insert(name.clone());
				tracing::debug!(module = %name, "Emitting module inline");
				Ok(Some(statement))
			}
		}
	}

	/// Flushes every pending module into the head section.
	///
	/// Statements are joined by newlines in registration order. May be called
	/// once per request.
	///
	/// # Errors
	///
	/// Returns [`NgError::HeadAlreadyRendered`] on a second call.
	pub fn render_head(&mut self) -> Result<String> {
		if self.is_head_rendered() {
			return Err(NgError::HeadAlreadyRendered);
		}

		let pending = std::mem::take(&mut self.pending);
		tracing::debug!(modules = pending.len(), "Rendering head section");

		let mut head = String::new();
		for (i, (name, statement)) in pending.into_iter().enumerate() {
			if i > 0 {
				head.push('\n');
			}
			head.push_str(&statement);
			self.emitted.insert(name);
		}
		self.phase = RenderPhase::HeadRendered;
		Ok(head)
	}

	/// Registers `modules`, then flushes the head section.
	pub fn render_head_with<'a>(
		&mut self,
		modules: impl IntoIterator<Item = &'a Module>,
	) -> Result<String> {
		if self.is_head_rendered() {
			return Err(NgError::HeadAlreadyRendered);
		}
		for module in modules {
			self.register_or_emit(module)?;
		}
		self.render_head()
	}
}

fn statement(module: &Module) -> Result<String> {
	Ok(format!("{};", module.render()?))
}

/// Wraps emitted declarations in a `<script>` element.
///
/// Empty input yields an empty string so call-sites with nothing to emit add
/// no markup.
pub fn script_tag(js: &str) -> String {
	if js.is_empty() {
		return String::new();
	}
	format!(r#"<script type="text/javascript">{}</script>"#, js)
}
