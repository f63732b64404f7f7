//! Data-integrity errors raised while binding a graph snapshot.

use thiserror::Error;

/// The snapshot is inconsistent and cannot be simulated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BindError {
	/// A link endpoint names a node that is not in the snapshot.
	#[error("link {link} references unknown node '{id}'")]
	UnknownNode {
		/// Position of the link in the snapshot.
		link: usize,
		/// The missing node id.
		id: String,
	},

	/// Two nodes share the same id.
	#[error("duplicate node id '{0}'")]
	DuplicateNode(String),

	/// A node's `val` is zero, negative or not finite.
	#[error("node '{id}' has invalid radius {val}, expected a finite positive value")]
	InvalidRadius {
		/// Offending node.
		id: String,
		/// The rejected value.
		val: f64,
	},
}
