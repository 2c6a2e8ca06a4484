//! Rendering logic that turns .NET metadata into C# declaration text.
//!
//! A [`Renderer`] holds the options of a pass; [`Renderer::render`] walks an
//! [`Assembly`](netskel_model::Assembly) and produces a [`Listing`] grouped by
//! namespace, collecting the namespaces it referenced and the symbols it had to skip.

/// Syntax utilities for rendering types, literals, attributes and signatures.
pub mod syntax;

/// Main renderer configuration and public API.
pub mod core;
/// Domain-specific errors for the renderer.
pub mod error;
/// Declaration composers for types and members.
pub mod items;
/// Namespace accumulator for `using` directives.
pub mod namespaces;
/// Listing order of types and members.
pub mod order;
/// Mutable rendering state of one pass.
pub mod state;
/// Utility functions for rendering.
pub mod utils;

// Re-export public API
pub use core::{AttributeLayout, AttributeLayouts, Listing, MethodBodyPolicy, Renderer};

pub use error::{RenderError, Result};
pub use items::{Declaration, MemberRef, classify};
pub use namespaces::Namespaces;
pub use state::{Failure, RenderState};
pub use syntax::{escape_identifier, format_type, is_reserved_word};
