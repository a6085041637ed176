//! Route registration and dispatch.
//!
//! # Responsibilities
//! - Store registered middleware and terminal routes
//! - Scan both sequences in registration order on dispatch
//! - Return the first matching target's result or explicit absence
//!
//! # Design Decisions
//! - Registration takes `&mut self`, dispatch takes `&self`: the borrow
//!   checker rules out registering concurrently with dispatching
//! - Path expressions compile at registration time, so a malformed route
//!   fails the registration call instead of every later dispatch
//! - First match wins; there is no `next()`-style chaining past a match

use serde_json::Value;

use crate::matcher::PathExpr;
use crate::route::{Route, RouteTarget};
use crate::{Handler, Result};

/// A content-based router over JSON values.
///
/// Owns two ordered, append-only sequences: middleware, evaluated first on
/// every dispatch and allowed to delegate into a nested `Router`, and
/// terminal routes, evaluated only when no middleware matched. Both are
/// scanned in registration order and the first match ends the dispatch.
///
/// A fully registered router is immutable at dispatch time and can be shared
/// across threads freely. Nesting must stay cycle-free: a router that is,
/// directly or transitively, registered as its own middleware target
/// recurses without bound.
///
/// # Examples
///
/// ```
/// use jproute::Router;
/// use serde_json::{Value, json};
///
/// let mut router = Router::new();
/// router.path("$.order.id", |_o: &Value, matched: &Value| -> jproute::Result<String> {
/// 	Ok(format!("order {}", matched[0]))
/// })?;
///
/// let result = router.dispatch(&json!({"order": {"id": 7}}))?;
/// assert_eq!(result, Some("order 7".to_string()));
/// # Ok::<(), jproute::DispatchError>(())
/// ```
pub struct Router<T> {
	middleware: Vec<Route<T>>,
	routes: Vec<Route<T>>,
}

impl<T> Router<T> {
	/// Create an empty router.
	pub fn new() -> Self {
		Self {
			middleware: Vec::new(),
			routes: Vec::new(),
		}
	}

	/// Register middleware that fires on every dispatch.
	///
	/// Equivalent to [`use_path`](Self::use_path) with the `@` sentinel: the
	/// entry always matches and forwards the whole current object to its
	/// target.
	///
	/// # Examples
	///
	/// ```
	/// use jproute::{RouteTarget, Router};
	/// use serde_json::{Value, json};
	///
	/// let mut router = Router::new();
	/// router.use_all(RouteTarget::handler(
	/// 	|_o: &Value, matched: &Value| -> jproute::Result<Value> { Ok(matched.clone()) },
	/// ));
	///
	/// let input = json!({"any": "shape"});
	/// assert_eq!(router.dispatch(&input)?, Some(input.clone()));
	/// # Ok::<(), jproute::DispatchError>(())
	/// ```
	pub fn use_all(&mut self, target: impl Into<RouteTarget<T>>) {
		self.middleware.push(Route::new(PathExpr::any(), target.into()));
	}

	/// Register middleware under a path expression.
	///
	/// Middleware is evaluated before any terminal route, in registration
	/// order. The target may be a handler or a nested router; a nested
	/// router receives the matched value as its own match target while the
	/// original input stays unchanged through the whole delegation chain.
	///
	/// Registering the same expression twice yields two independent entries,
	/// both evaluated in order. Fails before anything is stored when the
	/// expression is empty or not valid JSONPath.
	pub fn use_path(&mut self, path: &str, target: impl Into<RouteTarget<T>>) -> Result<()> {
		let expr = PathExpr::parse(path)?;
		self.middleware.push(Route::new(expr, target.into()));
		Ok(())
	}

	/// Register a terminal route.
	///
	/// Terminal routes are evaluated only after every middleware entry
	/// failed to match. They always bind a handler; delegating into a
	/// nested router is a middleware capability.
	///
	/// # Examples
	///
	/// ```
	/// use jproute::Router;
	/// use serde_json::{Value, json};
	///
	/// let mut router = Router::new();
	/// router.path("$.type", |_o: &Value, _m: &Value| -> jproute::Result<&'static str> { Ok("ok") })?;
	///
	/// assert_eq!(router.dispatch(&json!({"type": "x"}))?, Some("ok"));
	/// # Ok::<(), jproute::DispatchError>(())
	/// ```
	pub fn path<H>(&mut self, path: &str, handler: H) -> Result<()>
	where
		H: Handler<T> + 'static,
	{
		let expr = PathExpr::parse(path)?;
		self.routes.push(Route::new(expr, RouteTarget::handler(handler)));
		Ok(())
	}

	/// Dispatch a value, matching routes against the value itself.
	///
	/// Equivalent to [`dispatch_with`](Self::dispatch_with) where `original`
	/// and the match target are the same value.
	pub fn dispatch(&self, original: &Value) -> Result<Option<T>> {
		self.dispatch_with(original, original)
	}

	/// Dispatch with distinct original and match-target values.
	///
	/// `original` is threaded unchanged through nested delegation; `object`
	/// is what this router's own expressions are evaluated against. Returns
	/// the first matching target's result, or `Ok(None)` when nothing
	/// matched. Absence is a normal outcome, not an error; handler errors
	/// propagate untouched.
	///
	/// A matching middleware entry ends the dispatch even when it delegates
	/// into a nested router that itself matches nothing.
	pub fn dispatch_with(&self, original: &Value, object: &Value) -> Result<Option<T>> {
		for route in &self.middleware {
			if let Some(matched) = route.expr().find(object) {
				tracing::debug!(path = %route.expr(), "middleware matched");
				return route.target().invoke(original, &matched);
			}
			tracing::trace!(path = %route.expr(), "middleware did not match");
		}

		for route in &self.routes {
			if let Some(matched) = route.expr().find(object) {
				tracing::debug!(path = %route.expr(), "route matched");
				return route.target().invoke(original, &matched);
			}
			tracing::trace!(path = %route.expr(), "route did not match");
		}

		tracing::trace!("no middleware or route matched");
		Ok(None)
	}

	/// Registered middleware, in evaluation order.
	pub fn middleware(&self) -> &[Route<T>] {
		&self.middleware
	}

	/// Registered terminal routes, in evaluation order.
	pub fn routes(&self) -> &[Route<T>] {
		&self.routes
	}

	/// Whether nothing has been registered yet.
	pub fn is_empty(&self) -> bool {
		self.middleware.is_empty() && self.routes.is_empty()
	}
}

impl<T> Default for Router<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T> std::fmt::Debug for Router<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Router")
			.field("middleware", &self.middleware.len())
			.field("routes", &self.routes.len())
			.finish()
	}
}
