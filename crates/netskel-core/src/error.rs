use std::io;
use std::path::PathBuf;

use netskel_render::{Failure, RenderError};
use thiserror::Error;

/// Aggregate errors produced by the netskel-core API.
#[derive(Debug, Error)]
pub enum NetskelError {
	/// The metadata dump could not be read.
	#[error("failed to read {}: {source}", path.display())]
	Io {
		/// Path that was being read.
		path: PathBuf,
		/// Underlying I/O error.
		#[source]
		source: io::Error,
	},
	/// Failed to encode or decode JSON.
	#[error("invalid metadata dump: {0}")]
	Serialization(#[from] serde_json::Error),
	/// Errors emitted while rendering a single declaration.
	#[error(transparent)]
	Render(#[from] RenderError),
	/// A strict pass skipped at least one symbol.
	#[error("{} symbol(s) could not be rendered; first: {}", .0.len(), .0[0])]
	Incomplete(Vec<Failure>),
	/// Invalid input provided by the caller.
	#[error("{0}")]
	InvalidInput(String),
}

/// Result type returned by the netskel-core library.
pub type Result<T> = std::result::Result<T, NetskelError>;
