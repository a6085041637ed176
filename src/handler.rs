//! Handler system for dispatched values.

use serde_json::Value;

use crate::Result;

/// A handler invoked when a route's path expression matches.
///
/// `original` is the top-level value the dispatch started from, threaded
/// unchanged through any chain of nested routers; `matched` is the sub-value
/// the route's path expression produced.
///
/// Handlers run synchronously on the dispatching thread. The router imposes
/// no timeout, cancellation, or retry around the call; an error returned here
/// propagates to the original dispatch caller untouched.
pub trait Handler<T>: Send + Sync {
	fn handle(&self, original: &Value, matched: &Value) -> Result<T>;
}

/// Plain functions and closures are handlers.
///
/// # Examples
///
/// ```
/// use jproute::Handler;
/// use serde_json::{Value, json};
///
/// fn greet(_original: &Value, matched: &Value) -> jproute::Result<String> {
/// 	Ok(format!("hello {}", matched[0]))
/// }
///
/// let value = json!(["world"]);
/// assert_eq!(greet.handle(&json!({}), &value)?, r#"hello "world""#);
/// # Ok::<(), jproute::DispatchError>(())
/// ```
impl<T, F> Handler<T> for F
where
	F: Fn(&Value, &Value) -> Result<T> + Send + Sync,
{
	fn handle(&self, original: &Value, matched: &Value) -> Result<T> {
		self(original, matched)
	}
}
