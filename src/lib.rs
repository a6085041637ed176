//! # jproute
//!
//! Content-based routing for message-shaped JSON values:
//!
//! - **JSONPath routes**: handlers are keyed on a query expression over the
//!   input value, not on a URL
//! - **Two-tier dispatch**: middleware entries are evaluated before terminal
//!   routes on every dispatch and may delegate into a nested [`Router`]
//! - **First match wins**: both tiers are scanned in registration order and
//!   the first matching entry ends the dispatch
//! - **Absence is not an error**: a dispatch where nothing matched returns
//!   `Ok(None)`
//!
//! # Architecture
//!
//! ```text
//! value ──▶ Router::dispatch
//!             │
//!             ├── middleware, in registration order ──▶ Handler
//!             │                                     └─▶ nested Router
//!             │                                           (original value
//!             │                                            threaded through)
//!             ├── routes, in registration order ─────▶ Handler
//!             │
//!             ▼
//!          Ok(None) when nothing matched
//! ```
//!
//! # Examples
//!
//! ## Terminal routes
//!
//! ```
//! use jproute::Router;
//! use serde_json::{Value, json};
//!
//! let mut router = Router::new();
//! router.path("$.type", |_original: &Value, matched: &Value| -> jproute::Result<String> {
//! 	Ok(format!("handled {}", matched[0]))
//! })?;
//!
//! let result = router.dispatch(&json!({"type": "greeting"}))?;
//! assert_eq!(result, Some(r#"handled "greeting""#.to_string()));
//!
//! // Nothing matched: a normal outcome, not an error.
//! assert_eq!(router.dispatch(&json!({"other": 1}))?, None);
//! # Ok::<(), jproute::DispatchError>(())
//! ```
//!
//! ## Middleware and nesting
//!
//! ```
//! use jproute::{RouteTarget, Router};
//! use serde_json::{Value, json};
//!
//! // A nested router matches against the sequence of values the delegating
//! // expression produced, while `original` stays the top-level input.
//! let mut events = Router::new();
//! events.path("$[*].name", |original: &Value, matched: &Value| -> jproute::Result<String> {
//! 	Ok(format!("{} from {}", matched[0], original["source"]))
//! })?;
//!
//! let mut router = Router::new();
//! router.use_path("$.event", RouteTarget::router(events))?;
//!
//! let input = json!({"source": "queue", "event": {"name": "created"}});
//! assert_eq!(
//! 	router.dispatch(&input)?,
//! 	Some(r#""created" from "queue""#.to_string()),
//! );
//! # Ok::<(), jproute::DispatchError>(())
//! ```

pub mod handler;
pub mod matcher;
pub mod route;
pub mod router;

// Re-exports
pub use handler::Handler;
pub use matcher::{MATCH_ALL, PathExpr};
pub use route::{Route, RouteTarget};
pub use router::Router;

use thiserror::Error;

/// Errors surfaced by registration and dispatch.
///
/// "Nothing matched" is not among them: dispatch reports it as `Ok(None)`.
#[derive(Debug, Error)]
pub enum DispatchError {
	/// A path expression failed to compile at registration time.
	#[error("invalid path expression `{path}`: {source}")]
	InvalidPath {
		path: String,
		#[source]
		source: serde_json_path::ParseError,
	},

	/// A registration argument was rejected before anything was stored.
	#[error("invalid argument: {0}")]
	InvalidArgument(String),

	/// A handler failed. The router propagates the error to the dispatch
	/// caller untouched, including through nested delegation.
	#[error(transparent)]
	Handler(Box<dyn std::error::Error + Send + Sync>),
}

impl DispatchError {
	/// Wrap an arbitrary failure raised inside a handler.
	///
	/// # Examples
	///
	/// ```
	/// use jproute::DispatchError;
	///
	/// let err = DispatchError::handler("backend unavailable");
	/// assert_eq!(err.to_string(), "backend unavailable");
	/// ```
	pub fn handler<E>(error: E) -> Self
	where
		E: Into<Box<dyn std::error::Error + Send + Sync>>,
	{
		DispatchError::Handler(error.into())
	}
}

/// Crate-wide result alias.
pub type Result<T, E = DispatchError> = std::result::Result<T, E>;
