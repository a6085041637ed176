//! Route definition.
//!
//! A [`Route`] is an immutable binding of a path expression to its target,
//! created once at registration time and owned exclusively by the router
//! sequence it was appended to.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::matcher::PathExpr;
use crate::router::Router;
use crate::{Handler, Result};

/// The target a route binds its path expression to.
///
/// A tagged variant rather than a shared base class: a route either invokes a
/// handler or delegates into a nested [`Router`].
pub enum RouteTarget<T> {
	/// Invoke a handler with `(original, matched)`.
	Handler(Arc<dyn Handler<T>>),
	/// Forward `(original, matched)` into a nested router's dispatch.
	Router(Arc<Router<T>>),
}

impl<T> RouteTarget<T> {
	/// Wrap a handler; the `Arc` is taken care of.
	///
	/// # Examples
	///
	/// ```
	/// use jproute::RouteTarget;
	/// use serde_json::Value;
	///
	/// let target = RouteTarget::handler(|_o: &Value, _m: &Value| -> jproute::Result<&'static str> {
	/// 	Ok("ok")
	/// });
	/// assert!(matches!(target, RouteTarget::Handler(_)));
	/// ```
	pub fn handler<H>(handler: H) -> Self
	where
		H: Handler<T> + 'static,
	{
		RouteTarget::Handler(Arc::new(handler))
	}

	/// Wrap a nested router.
	///
	/// When the owning route matches, the nested router's own sequences are
	/// evaluated against the matched value while the original top-level input
	/// is threaded through unchanged.
	pub fn router(router: Router<T>) -> Self {
		RouteTarget::Router(Arc::new(router))
	}

	/// Invoke the target for a matched value.
	///
	/// A handler's result is wrapped in `Some`; a nested router reports its
	/// own outcome, which may be `None` when nothing inside it matched.
	pub(crate) fn invoke(&self, original: &Value, matched: &Value) -> Result<Option<T>> {
		match self {
			RouteTarget::Handler(handler) => handler.handle(original, matched).map(Some),
			RouteTarget::Router(router) => router.dispatch_with(original, matched),
		}
	}
}

impl<T> Clone for RouteTarget<T> {
	fn clone(&self) -> Self {
		match self {
			RouteTarget::Handler(handler) => RouteTarget::Handler(Arc::clone(handler)),
			RouteTarget::Router(router) => RouteTarget::Router(Arc::clone(router)),
		}
	}
}

impl<T> fmt::Debug for RouteTarget<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			RouteTarget::Handler(_) => f.write_str("RouteTarget::Handler"),
			RouteTarget::Router(_) => f.write_str("RouteTarget::Router"),
		}
	}
}

impl<T> From<Arc<dyn Handler<T>>> for RouteTarget<T> {
	fn from(handler: Arc<dyn Handler<T>>) -> Self {
		RouteTarget::Handler(handler)
	}
}

impl<T> From<Router<T>> for RouteTarget<T> {
	fn from(router: Router<T>) -> Self {
		RouteTarget::router(router)
	}
}

impl<T> From<Arc<Router<T>>> for RouteTarget<T> {
	fn from(router: Arc<Router<T>>) -> Self {
		RouteTarget::Router(router)
	}
}

/// An immutable binding of a path expression to its target.
pub struct Route<T> {
	expr: PathExpr,
	target: RouteTarget<T>,
}

impl<T> Route<T> {
	pub(crate) fn new(expr: PathExpr, target: RouteTarget<T>) -> Self {
		Self { expr, target }
	}

	/// The path expression this route was registered under.
	pub fn expr(&self) -> &PathExpr {
		&self.expr
	}

	/// The handler or nested router this route binds to.
	pub fn target(&self) -> &RouteTarget<T> {
		&self.target
	}
}

impl<T> Clone for Route<T> {
	fn clone(&self) -> Self {
		Self {
			expr: self.expr.clone(),
			target: self.target.clone(),
		}
	}
}

impl<T> fmt::Debug for Route<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Route")
			.field("expr", &self.expr.as_str())
			.field("target", &self.target)
			.finish()
	}
}
