use std::collections::BTreeMap;
use std::fmt;

use netskel_model::{
	Accessibility, Assembly, Member, NullableContext, TypeDef, TypeRef, TypeResolver, TypedValue,
};
use tracing::{debug, warn};

use super::core::{Listing, Renderer};
use super::utils::{indent_lines, join_blocks};
use crate::error::RenderError;
use crate::items::{TypeScope, render_type_def};
use crate::namespaces::Namespaces;
use crate::order::sort_types;
use crate::syntax::{
	LiteralFormatter, LiteralOptions, TypeDecoration, TypeNameOptions, format_decorated_type,
	format_type,
};

/// A symbol that was skipped during a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
	/// Display name of the symbol.
	pub symbol: String,
	/// Why it was skipped.
	pub error: RenderError,
}

impl fmt::Display for Failure {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}: {}", self.symbol, self.error)
	}
}

/// Mutable rendering context shared across helper functions.
pub struct RenderState<'a> {
	/// Reference to the immutable renderer configuration.
	pub config: &'a Renderer,
	/// Declarations used for enum, constant and interface lookups.
	pub resolver: &'a dyn TypeResolver,
	/// Nullable context of the assembly being rendered.
	pub assembly_context: Option<NullableContext>,
	/// Namespaces referenced so far.
	pub namespaces: Namespaces,
	/// Symbols skipped so far.
	pub failures: Vec<Failure>,
}

impl<'a> RenderState<'a> {
	/// Create a new render state.
	pub fn new(
		config: &'a Renderer,
		resolver: &'a dyn TypeResolver,
		assembly_context: Option<NullableContext>,
	) -> Self {
		Self {
			config,
			resolver,
			assembly_context,
			namespaces: Namespaces::new(),
			failures: Vec::new(),
		}
	}

	/// Type name options derived from the configuration.
	pub fn type_names(&self) -> TypeNameOptions {
		TypeNameOptions {
			with_namespace: self.config.with_namespace,
			with_declaring_type_name: self.config.with_declaring_type_name,
			translate_primitive_aliases: self.config.translate_primitive_aliases,
			show_variance: false,
		}
	}

	/// Render a bare type reference.
	pub fn format_type(&mut self, ty: &TypeRef) -> String {
		format_type(ty, self.type_names(), &mut self.namespaces)
	}

	/// Render the type of a symbol with its nullability and tuple names.
	pub fn format_symbol_type(&mut self, ty: &TypeRef, decoration: TypeDecoration<'_>) -> String {
		format_decorated_type(ty, self.type_names(), decoration, &mut self.namespaces)
	}

	/// Render a literal; `None` when the value has no literal form.
	pub fn format_literal(
		&mut self,
		value: &TypedValue,
		declared: &TypeRef,
		find_constant_alias: bool,
		flags_as_hex: bool,
	) -> Option<String> {
		let opts = LiteralOptions {
			names: self.type_names(),
			find_constant_alias,
			use_default_literal: self.config.use_default_literal,
			flags_as_hex,
		};
		LiteralFormatter::new(opts, self.resolver).format(value, declared, &mut self.namespaces)
	}

	/// Whether `?` suffixes apply to a symbol, given its own context and its enclosing scope's.
	pub fn annotations_enabled(
		&self,
		member: Option<NullableContext>,
		scope: Option<NullableContext>,
	) -> bool {
		self.config.nullability_annotations
			&& member.or(scope).or(self.assembly_context) != Some(NullableContext::Disabled)
	}

	/// Whether a symbol with `accessibility` is listed.
	pub fn is_visible(&self, accessibility: Accessibility) -> bool {
		!self.config.ignore_private_and_assembly || accessibility.is_externally_visible()
	}

	/// `;`, unless terminators are omitted.
	pub fn terminator(&self) -> &'static str {
		if self.config.omit_statement_terminator {
			""
		} else {
			";"
		}
	}

	/// Record a skipped symbol.
	pub fn record_failure(&mut self, symbol: String, error: RenderError) {
		warn!(%symbol, %error, "skipping symbol");
		self.failures.push(Failure { symbol, error });
	}

	/// Render every visible type of the assembly into a listing.
	pub fn render(&mut self, assembly: &Assembly) -> Listing {
		debug!(assembly = %assembly.name, types = assembly.types.len(), "rendering assembly");

		let mut by_namespace: BTreeMap<&str, Vec<&TypeDef>> = BTreeMap::new();
		for ty in &assembly.types {
			if ty.is_compiler_generated || !self.is_visible(ty.accessibility) {
				continue;
			}
			by_namespace.entry(ty.namespace.as_str()).or_default().push(ty);
		}

		let mut sections = Vec::new();
		for (namespace, mut types) in by_namespace {
			sort_types(&mut types);
			let mut blocks = Vec::new();
			for ty in types {
				let scope = TypeScope::top_level(ty, self.assembly_context);
				match render_type_def(self, &scope) {
					Ok(lines) => blocks.push(lines),
					Err(error) => self.record_failure(scope.reference.full_name(), error),
				}
			}
			if blocks.is_empty() {
				continue;
			}
			debug!(namespace, types = blocks.len(), "rendered namespace");
			let body = join_blocks(blocks);
			if namespace.is_empty() {
				sections.push(body);
			} else {
				let mut section = vec![format!("namespace {namespace} {{")];
				section.extend(indent_lines(body, &self.config.indent));
				section.push("}".to_string());
				sections.push(section);
			}
		}

		let mut header = Vec::new();
		if self.config.nullability_annotations && may_annotate(self.assembly_context, &assembly.types) {
			header.push("#nullable enable annotations".to_string());
		}
		if !self.config.with_namespace && !self.namespaces.is_empty() {
			if !header.is_empty() {
				header.push(String::new());
			}
			header.extend(
				self.namespaces
					.ordered()
					.into_iter()
					.map(|namespace| format!("using {namespace};")),
			);
		}

		let mut lines = Vec::new();
		if !header.is_empty() {
			lines.push(header);
		}
		lines.extend(sections);
		let mut text = join_blocks(lines).join("\n");
		text.push('\n');

		Listing {
			text,
			namespaces: self
				.namespaces
				.ordered()
				.into_iter()
				.map(str::to_string)
				.collect(),
			failures: std::mem::take(&mut self.failures),
		}
	}
}

/// Whether any symbol under `context` can be rendered with `?` annotations.
fn may_annotate(context: Option<NullableContext>, types: &[TypeDef]) -> bool {
	if context != Some(NullableContext::Disabled) {
		return true;
	}
	let enabled = Some(NullableContext::Enabled);
	types.iter().any(|ty| {
		ty.nullable_context == enabled
			|| ty.members.iter().any(|member| member_context(member) == enabled)
			|| may_annotate(context, &ty.nested_types)
	})
}

fn member_context(member: &Member) -> Option<NullableContext> {
	match member {
		Member::Field(field) => field.nullable_context,
		Member::Property(property) => property.nullable_context,
		Member::Method(method) => method.nullable_context,
		Member::Event(event) => event.nullable_context,
		Member::Unreadable { .. } => None,
	}
}
