//! Path expression matching.
//!
//! JSONPath evaluation itself is delegated to [`serde_json_path`]; this
//! module only compiles expressions at registration time and normalizes
//! query results into match-or-no-match.

use std::fmt;

use serde_json::Value;
use serde_json_path::JsonPath;

use crate::{DispatchError, Result};

/// The sentinel expression that matches every value.
pub const MATCH_ALL: &str = "@";

/// A compiled path expression attached to a route.
///
/// Either the [`MATCH_ALL`] sentinel, which matches unconditionally and
/// forwards the whole current object, or a JSONPath query compiled when the
/// route was registered.
#[derive(Debug, Clone)]
pub struct PathExpr {
	raw: String,
	kind: ExprKind,
}

#[derive(Debug, Clone)]
enum ExprKind {
	/// `@`: always matches, whole-document pass-through.
	Any,
	/// A compiled JSONPath query.
	Query(JsonPath),
}

impl PathExpr {
	/// Compile a path expression.
	///
	/// Fails before any route is stored: an empty expression is rejected as
	/// an invalid argument, and a malformed JSONPath surfaces the parser
	/// error.
	///
	/// # Examples
	///
	/// ```
	/// use jproute::PathExpr;
	///
	/// let expr = PathExpr::parse("$.type")?;
	/// assert_eq!(expr.as_str(), "$.type");
	///
	/// assert!(PathExpr::parse("@")?.is_any());
	/// assert!(PathExpr::parse("").is_err());
	/// assert!(PathExpr::parse("not a path").is_err());
	/// # Ok::<(), jproute::DispatchError>(())
	/// ```
	pub fn parse(raw: &str) -> Result<Self> {
		if raw == MATCH_ALL {
			return Ok(Self::any());
		}
		if raw.trim().is_empty() {
			return Err(DispatchError::InvalidArgument(
				"path expression must not be empty".to_string(),
			));
		}
		let query = JsonPath::parse(raw).map_err(|source| DispatchError::InvalidPath {
			path: raw.to_string(),
			source,
		})?;
		Ok(Self {
			raw: raw.to_string(),
			kind: ExprKind::Query(query),
		})
	}

	/// The [`MATCH_ALL`] sentinel: matches every value.
	pub fn any() -> Self {
		Self {
			raw: MATCH_ALL.to_string(),
			kind: ExprKind::Any,
		}
	}

	/// Whether this is the [`MATCH_ALL`] sentinel.
	pub fn is_any(&self) -> bool {
		matches!(self.kind, ExprKind::Any)
	}

	/// The expression as it was registered.
	pub fn as_str(&self) -> &str {
		&self.raw
	}

	/// Evaluate the expression against `object`.
	///
	/// The sentinel yields the whole object; a JSONPath query yields an array
	/// of every matched node. An empty node list is `None`, identical to a
	/// query that finds nothing at all.
	///
	/// # Examples
	///
	/// ```
	/// use jproute::PathExpr;
	/// use serde_json::json;
	///
	/// let object = json!({"items": [1, 2]});
	///
	/// let expr = PathExpr::parse("$.items[*]")?;
	/// assert_eq!(expr.find(&object), Some(json!([1, 2])));
	///
	/// assert_eq!(PathExpr::any().find(&object), Some(object.clone()));
	/// assert_eq!(PathExpr::parse("$.absent")?.find(&object), None);
	/// # Ok::<(), jproute::DispatchError>(())
	/// ```
	pub fn find(&self, object: &Value) -> Option<Value> {
		match &self.kind {
			ExprKind::Any => Some(object.clone()),
			ExprKind::Query(query) => {
				let nodes = query.query(object).all();
				if nodes.is_empty() {
					None
				} else {
					Some(Value::Array(nodes.into_iter().cloned().collect()))
				}
			}
		}
	}
}

impl fmt::Display for PathExpr {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.raw)
	}
}
