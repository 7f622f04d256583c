//! Render Registry Integration Tests
//!
//! Drives a full request the way a page renderer does: modules are built,
//! registered from several call-sites, flushed into the head section once and
//! emitted inline afterwards.
//!
//! Test Categories:
//! 1. End-to-end declaration output
//! 2. Deduplication before the head section
//! 3. Inline emission after the head section
//! 4. Lifecycle errors

use ngservice_core::{
	Factory, FunctionGenerator, Json, Module, NgError, RenderPhase, RenderRegistry, script_tag,
};
use rstest::{fixture, rstest};
use serde::Serialize;

#[derive(Serialize)]
struct Widget {
	id: u32,
	name: &'static str,
}

#[fixture]
fn demo_module() -> Module {
	let widgets = Factory::new()
		.with_function(
			"list",
			FunctionGenerator::no_arg(|| {
				Json(vec![
					Widget { id: 1, name: "bolt" },
					Widget { id: 2, name: "nut" },
				])
			}),
		)
		.unwrap();

	Module::new("zen.demo")
		.unwrap()
		.with_factory("widgets", widgets)
		.unwrap()
}

fn other_module(name: &str) -> Module {
	let factory = Factory::new()
		.with_function("ping", FunctionGenerator::no_arg(|| ()))
		.unwrap();
	Module::new(name)
		.unwrap()
		.with_factory("pinger", factory)
		.unwrap()
}

// ============================================================================
// End-to-end
// ============================================================================

#[rstest]
fn test_end_to_end_head_render(demo_module: Module) {
	let mut registry = RenderRegistry::new();
	assert_eq!(registry.register_or_emit(&demo_module).unwrap(), None);

	let head = registry.render_head().unwrap();

	assert_eq!(
		head,
		concat!(
			r#"angular.module("zen.demo",["proxy-module"])"#,
			r#".factory("widgets",function(transportProxy){return {"list":function(){"#,
			r#"return transportProxy({"endpoint":"zen.demo/widgets/list"},"#,
			r#"function(promiseJson){return transportProxy.settle(promiseJson);});}};});"#,
		)
	);
	assert_eq!(head.matches(".factory(").count(), 1);
	assert_eq!(head.matches(r#""proxy-module""#).count(), 1);
}

#[rstest]
fn test_end_to_end_server_round_trip(demo_module: Module) {
	let response = demo_module
		.dispatch("zen.demo/widgets/list", None)
		.unwrap()
		.to_json();

	let value: serde_json::Value = serde_json::from_str(&response).unwrap();
	assert_eq!(
		value,
		serde_json::json!({
			"success": true,
			"data": [{"id": 1, "name": "bolt"}, {"id": 2, "name": "nut"}]
		})
	);
}

// ============================================================================
// Deduplication
// ============================================================================

#[rstest]
fn test_module_registered_twice_is_declared_once(demo_module: Module) {
	let mut registry = RenderRegistry::new();
	registry.register_or_emit(&demo_module).unwrap();
	registry.register_or_emit(&demo_module).unwrap();

	let head = registry.render_head().unwrap();
	assert_eq!(head.matches(r#"angular.module("zen.demo""#).count(), 1);
}

#[rstest]
fn test_head_keeps_registration_order(demo_module: Module) {
	let mut registry = RenderRegistry::new();
	registry.register_or_emit(&other_module("zen.b")).unwrap();
	registry.register_or_emit(&demo_module).unwrap();

	let head = registry.render_head().unwrap();
	let lines: Vec<&str> = head.lines().collect();
	assert_eq!(lines.len(), 2);
	assert!(lines[0].starts_with(r#"angular.module("zen.b""#));
	assert!(lines[1].starts_with(r#"angular.module("zen.demo""#));
}

// ============================================================================
// Inline emission
// ============================================================================

#[rstest]
fn test_unseen_module_is_emitted_inline_once(demo_module: Module) {
	let mut registry = RenderRegistry::new();
	registry.register_or_emit(&demo_module).unwrap();
	registry.render_head().unwrap();
	assert_eq!(registry.phase(), RenderPhase::HeadRendered);

	let late = other_module("zen.late");
	let inline = registry.register_or_emit(&late).unwrap().unwrap();
	assert!(inline.starts_with(r#"angular.module("zen.late",["proxy-module"])"#));
	assert!(script_tag(&inline).starts_with("<script"));

	assert_eq!(registry.register_or_emit(&late).unwrap(), None);
	assert_eq!(registry.register_or_emit(&demo_module).unwrap(), None);
}

// ============================================================================
// Lifecycle errors
// ============================================================================

#[rstest]
fn test_head_cannot_render_twice(demo_module: Module) {
	let mut registry = RenderRegistry::new();
	registry.render_head_with([&demo_module]).unwrap();

	let err = registry.render_head().unwrap_err();
	assert!(matches!(err, NgError::HeadAlreadyRendered));
	assert_eq!(
		err.to_string(),
		"head section has already been rendered for this request"
	);
}

#[rstest]
fn test_registries_are_independent_per_request(demo_module: Module) {
	let mut first = RenderRegistry::new();
	first.render_head_with([&demo_module]).unwrap();

	let mut second = RenderRegistry::new();
	assert_eq!(second.register_or_emit(&demo_module).unwrap(), None);
	assert!(second.render_head().unwrap().contains("zen.demo"));
}
