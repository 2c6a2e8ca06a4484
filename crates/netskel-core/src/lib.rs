//! Core library for netskel, providing the main API for rendering .NET metadata dumps.
//!
//! This crate provides the high-level `Netskel` API which loads an assembly's metadata
//! (as JSON produced by a metadata provider) and runs a rendering pass over it. It is
//! designed to be UI-agnostic and can be used by any frontend.

/// Error helpers for the core API.
pub mod error;

use std::fs;
use std::path::Path;

use netskel_model::Assembly;
use netskel_render::RenderError;
pub use netskel_render::{AttributeLayout, AttributeLayouts, Listing, MethodBodyPolicy, Renderer};
use tracing::{debug, warn};

pub use crate::error::{NetskelError, Result};

/// Netskel renders the declarations of a .NET assembly as C#-like text.
///
/// The assembly is read from a metadata dump: the JSON form of
/// [`netskel_model::Assembly`]. Reading or decoding the dump is fatal; symbols
/// that cannot be rendered are skipped and reported on the returned [`Listing`],
/// unless strict mode turns them into an error.
#[derive(Debug, Clone, Default)]
pub struct Netskel {
	/// Rendering configuration.
	renderer: Renderer,

	/// Fail the pass when any symbol is skipped.
	strict: bool,
}

impl Netskel {
	/// Creates a new Netskel instance with the default rendering configuration.
	pub fn new() -> Self {
		Self::default()
	}

	/// Replaces the rendering configuration.
	pub fn with_renderer(mut self, renderer: Renderer) -> Self {
		self.renderer = renderer;
		self
	}

	/// Enables or disables strict mode, where skipped symbols fail the pass.
	pub fn with_strict(mut self, strict: bool) -> Self {
		self.strict = strict;
		self
	}

	/// The rendering configuration in use.
	pub fn renderer(&self) -> &Renderer {
		&self.renderer
	}

	/// Decodes a metadata dump held in memory.
	pub fn load_str(&self, json: &str) -> Result<Assembly> {
		let assembly: Assembly = serde_json::from_str(json)?;
		debug!(
			assembly = %assembly.name,
			types = assembly.types.len(),
			referenced = assembly.referenced_types.len(),
			"loaded metadata"
		);
		Ok(assembly)
	}

	/// Reads and decodes a metadata dump from disk.
	pub fn load_path(&self, path: impl AsRef<Path>) -> Result<Assembly> {
		let path = path.as_ref();
		let json = fs::read_to_string(path).map_err(|source| NetskelError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		self.load_str(&json)
	}

	/// Renders every visible type of `assembly`.
	pub fn render_assembly(&self, assembly: &Assembly) -> Result<Listing> {
		let listing = self.renderer.render(assembly);
		if !listing.failures.is_empty() {
			warn!(
				assembly = %assembly.name,
				skipped = listing.failures.len(),
				"listing is incomplete"
			);
			if self.strict {
				return Err(NetskelError::Incomplete(listing.failures));
			}
		}
		Ok(listing)
	}

	/// Loads a metadata dump held in memory and renders it.
	pub fn render_str(&self, json: &str) -> Result<Listing> {
		let assembly = self.load_str(json)?;
		self.render_assembly(&assembly)
	}

	/// Loads a metadata dump from disk and renders it.
	pub fn render_path(&self, path: impl AsRef<Path>) -> Result<Listing> {
		let assembly = self.load_path(path)?;
		self.render_assembly(&assembly)
	}

	/// Renders the single type named `full_name` (`Namespace.Name`, nested types
	/// joined with `+`), nested types included.
	pub fn render_type(&self, assembly: &Assembly, full_name: &str) -> Result<String> {
		self.renderer
			.render_type(assembly, full_name)
			.map_err(|error| match error {
				RenderError::UnknownType(name) => NetskelError::InvalidInput(format!(
					"type `{name}` is not declared by assembly `{}`",
					assembly.name
				)),
				other => other.into(),
			})
	}

	/// Returns a pretty-printed version of the assembly's JSON representation.
	pub fn raw_json(&self, assembly: &Assembly) -> Result<String> {
		Ok(serde_json::to_string_pretty(assembly)?)
	}
}
