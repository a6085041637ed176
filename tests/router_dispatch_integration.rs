//! Integration tests for content-based dispatch
//!
//! This test file verifies the integration between:
//! - Path expression matching
//! - Middleware and terminal route ordering
//! - Nested router delegation
//! - Handler argument semantics
//!
//! ## Testing Strategy
//! Tests dispatch realistic message-shaped values and observe which handler
//! fired and exactly what it was invoked with.

use std::sync::{Arc, Mutex};

use jproute::{DispatchError, Handler, Result, RouteTarget, Router};
use serde_json::{Value, json};

// ============================================================
// Test Utilities
// ============================================================

/// Records every `(original, matched)` pair a handler is invoked with.
#[derive(Clone, Default)]
struct Recorder {
	calls: Arc<Mutex<Vec<(Value, Value)>>>,
}

impl Recorder {
	fn calls(&self) -> Vec<(Value, Value)> {
		self.calls.lock().unwrap().clone()
	}
}

/// A handler that records its arguments and returns a fixed tag.
struct RecordingHandler {
	tag: &'static str,
	recorder: Recorder,
}

impl Handler<&'static str> for RecordingHandler {
	fn handle(&self, original: &Value, matched: &Value) -> Result<&'static str> {
		self.recorder
			.calls
			.lock()
			.unwrap()
			.push((original.clone(), matched.clone()));
		Ok(self.tag)
	}
}

fn recording(tag: &'static str, recorder: &Recorder) -> RecordingHandler {
	RecordingHandler {
		tag,
		recorder: recorder.clone(),
	}
}

fn tag(value: &'static str) -> impl Handler<&'static str> {
	move |_o: &Value, _m: &Value| -> Result<&'static str> { Ok(value) }
}

// ============================================================
// Ordering Tests
// ============================================================

/// Test Intent: First-match-wins regardless of later specificity
/// Integration Point: terminal route scan order
#[test]
fn test_earlier_route_wins_over_more_specific_later_route() {
	let recorder = Recorder::default();
	let mut router = Router::new();
	router.path("$.order", recording("broad", &recorder)).unwrap();
	router.path("$.order.id", recording("specific", &recorder)).unwrap();

	let result = router.dispatch(&json!({"order": {"id": 42}})).unwrap();
	assert_eq!(result, Some("broad"), "registration order beats specificity");
	assert_eq!(recorder.calls().len(), 1, "only one handler may fire");
}

/// Test Intent: Middleware always runs before terminal routes
/// Integration Point: two-phase dispatch
#[test]
fn test_matching_middleware_preempts_earlier_terminal_route() {
	let recorder = Recorder::default();
	let mut router = Router::new();
	router.path("$.type", recording("route", &recorder)).unwrap();
	router
		.use_path("$.type", RouteTarget::handler(recording("middleware", &recorder)))
		.unwrap();

	let result = router.dispatch(&json!({"type": "x"})).unwrap();
	assert_eq!(result, Some("middleware"));

	let calls = recorder.calls();
	assert_eq!(calls.len(), 1, "the terminal route must not be evaluated");
}

/// Test Intent: Spec scenario - unconditional middleware shadows a route
/// Integration Point: `use_all` + terminal route
#[test]
fn test_unconditional_middleware_shadows_terminal_route() {
	let mut router = Router::new();
	router.use_all(RouteTarget::handler(tag("h1")));
	router.path("$.type", tag("h2")).unwrap();

	assert_eq!(router.dispatch(&json!({"type": "x"})).unwrap(), Some("h1"));
}

/// Test Intent: Spec scenario - a single terminal route handles its match
/// Integration Point: `path` + `dispatch`
#[test]
fn test_terminal_route_scenario() {
	let mut router = Router::new();
	router.path("$.type", tag("ok")).unwrap();

	assert_eq!(router.dispatch(&json!({"type": "x"})).unwrap(), Some("ok"));
}

// ============================================================
// Argument Semantics Tests
// ============================================================

/// Test Intent: `dispatch(x)` behaves as `dispatch_with(x, x)`
/// Integration Point: one-value dispatch form
#[test]
fn test_single_value_dispatch_uses_value_as_both_arguments() {
	let recorder = Recorder::default();
	let mut router = Router::new();
	router.use_all(RouteTarget::handler(recording("hit", &recorder)));

	let input = json!({"kind": "event"});
	router.dispatch(&input).unwrap();
	router.dispatch_with(&input, &input).unwrap();

	let calls = recorder.calls();
	assert_eq!(calls.len(), 2);
	assert_eq!(calls[0], calls[1], "both forms must agree");
	assert_eq!(calls[0].0, input, "original is the dispatched value");
	assert_eq!(calls[0].1, input, "sentinel forwards the whole object");
}

/// Test Intent: JSONPath matches arrive as the sequence of matched nodes
/// Integration Point: matcher normalization + handler invocation
#[test]
fn test_matched_value_is_sequence_of_matched_nodes() {
	let recorder = Recorder::default();
	let mut router = Router::new();
	router.path("$.items[*]", recording("items", &recorder)).unwrap();

	let input = json!({"items": [1, 2, 3]});
	router.dispatch(&input).unwrap();

	let calls = recorder.calls();
	assert_eq!(calls[0].0, input);
	assert_eq!(calls[0].1, json!([1, 2, 3]));
}

// ============================================================
// Nested Router Tests
// ============================================================

/// Test Intent: Delegation keeps `original` stable across the chain
/// Integration Point: middleware with a nested router target
#[test]
fn test_nested_router_receives_original_not_sub_value() {
	let recorder = Recorder::default();

	let mut inner = Router::new();
	inner.use_all(RouteTarget::handler(recording("inner", &recorder)));

	let mut outer = Router::new();
	outer.use_path("$.event", RouteTarget::router(inner)).unwrap();

	let input = json!({"source": "queue", "event": {"name": "created"}});
	let result = outer.dispatch(&input).unwrap();
	assert_eq!(result, Some("inner"));

	let calls = recorder.calls();
	assert_eq!(calls[0].0, input, "original must survive delegation");
	assert_eq!(
		calls[0].1,
		json!([{"name": "created"}]),
		"the inner router matches against the delegated sub-values"
	);
}

/// Test Intent: Two delegation levels still thread `original` through
/// Integration Point: recursive dispatch
#[test]
fn test_two_level_delegation_preserves_original() {
	let recorder = Recorder::default();

	let mut leaf = Router::new();
	leaf.path("$[*].name", recording("leaf", &recorder)).unwrap();

	let mut middle = Router::new();
	middle.use_path("$[*].payload", RouteTarget::router(leaf)).unwrap();

	let mut root = Router::new();
	root.use_path("$.envelope", RouteTarget::router(middle)).unwrap();

	let input = json!({"envelope": {"payload": {"name": "deep"}}});
	let result = root.dispatch(&input).unwrap();
	assert_eq!(result, Some("leaf"));

	let calls = recorder.calls();
	assert_eq!(calls[0].0, input);
	assert_eq!(calls[0].1, json!(["deep"]));
}

/// Test Intent: A delegating match ends the dispatch even on an empty result
/// Integration Point: nested absence is returned as-is, no fallthrough
#[test]
fn test_nested_no_match_does_not_fall_through_to_later_entries() {
	let recorder = Recorder::default();

	let inner: Router<&'static str> = Router::new();

	let mut outer = Router::new();
	outer.use_path("$.event", RouteTarget::router(inner)).unwrap();
	outer.use_all(RouteTarget::handler(recording("later-mw", &recorder)));
	outer.path("$.event", recording("later-route", &recorder)).unwrap();

	let result = outer.dispatch(&json!({"event": {}})).unwrap();
	assert_eq!(result, None, "the empty nested outcome is final");
	assert!(recorder.calls().is_empty(), "nothing after the match may run");
}

// ============================================================
// Error Propagation Tests
// ============================================================

/// Test Intent: Handler errors reach the outermost caller untouched
/// Integration Point: error passthrough across nested delegation
#[test]
fn test_handler_error_propagates_through_nested_routers() {
	let mut inner = Router::new();
	inner
		.path("$[*].name", |_o: &Value, _m: &Value| -> Result<&'static str> {
			Err(DispatchError::handler("inner failure"))
		})
		.unwrap();

	let mut outer = Router::new();
	outer.use_path("$.event", RouteTarget::router(inner)).unwrap();

	let err = outer
		.dispatch(&json!({"event": {"name": "boom"}}))
		.unwrap_err();
	assert!(matches!(err, DispatchError::Handler(_)));
	assert_eq!(err.to_string(), "inner failure");
}
