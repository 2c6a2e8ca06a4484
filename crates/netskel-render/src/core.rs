use std::fmt;
use std::sync::Arc;

use netskel_model::{Assembly, AttributeInstance, Member, TypeDef};

use crate::error::{RenderError, Result};
use crate::state::{Failure, RenderState};
use crate::syntax::default_attribute_filter;

/// How several attributes on one symbol are bracketed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttributeLayout {
	/// One bracket section per attribute: `[A] [B]`.
	#[default]
	Discrete,
	/// One bracket section listing every attribute: `[A, B]`.
	List,
}

/// Attribute layout per attribute group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttributeLayouts {
	/// Attributes on types, members and parameters.
	pub member: AttributeLayout,
	/// Attributes on property and event accessors.
	pub accessor: AttributeLayout,
	/// `field:`-targeted attributes of properties and events.
	pub backing_field: AttributeLayout,
	/// Attributes on generic parameters.
	pub generic_parameter: AttributeLayout,
	/// `return:`-targeted attributes.
	pub return_value: AttributeLayout,
}

impl AttributeLayouts {
	/// The same layout for every group.
	pub fn uniform(layout: AttributeLayout) -> Self {
		Self {
			member: layout,
			accessor: layout,
			backing_field: layout,
			generic_parameter: layout,
			return_value: layout,
		}
	}
}

/// What stands in for method and accessor bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MethodBodyPolicy {
	/// No body: `void M();`.
	Omit,
	/// Empty braces: `void M() {}`.
	#[default]
	EmptyBraces,
	/// `void M() => throw new NotImplementedException();`.
	ThrowStub,
	/// `void M() => throw null;`.
	ThrowNull,
}

/// Predicate deciding whether an attribute application is rendered.
pub type AttributeFilter = Arc<dyn Fn(&AttributeInstance) -> bool + Send + Sync>;

/// Output of one rendering pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
	/// The declaration listing.
	pub text: String,
	/// Namespaces referenced by rendered names, in `using` order.
	pub namespaces: Vec<String>,
	/// Symbols that were skipped, with the reason.
	pub failures: Vec<Failure>,
}

/// Configurable renderer that turns assembly metadata into declaration text.
#[derive(Clone)]
pub struct Renderer {
	/// Prefix type names with their namespace.
	pub with_namespace: bool,
	/// Qualify nested type names with their declaring types.
	pub with_declaring_type_name: bool,
	/// Use keyword aliases for built-in types.
	pub translate_primitive_aliases: bool,
	/// Write `default` instead of `default(T)`.
	pub use_default_literal: bool,
	/// Bracketing of attribute groups.
	pub attribute_layouts: AttributeLayouts,
	/// Body stand-in for methods and accessors.
	pub method_body: MethodBodyPolicy,
	/// Leave off the `;` that ends bodiless declarations.
	pub omit_statement_terminator: bool,
	/// Leave off `: int` on enums backed by the default underlying type.
	pub omit_enum_underlying_type: bool,
	/// Render `?` on nullable reference types.
	pub nullability_annotations: bool,
	/// Drop non-public member names from `MemberNotNull` arguments.
	pub omit_inaccessible_null_state_members: bool,
	/// Skip private and internal symbols.
	pub ignore_private_and_assembly: bool,
	/// Render records with `record` syntax.
	pub record_syntax: bool,
	/// Drop the `IEquatable<R>` every record implements.
	pub omit_record_equality_interface: bool,
	/// Render arguments bound to defaulted attribute parameters as `name: value`.
	pub named_optional_arguments: bool,
	/// One indentation level.
	pub indent: String,
	/// Attributes rendered when the filter returns true.
	pub attribute_filter: AttributeFilter,
}

impl Default for Renderer {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for Renderer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Renderer")
			.field("with_namespace", &self.with_namespace)
			.field("with_declaring_type_name", &self.with_declaring_type_name)
			.field("translate_primitive_aliases", &self.translate_primitive_aliases)
			.field("use_default_literal", &self.use_default_literal)
			.field("attribute_layouts", &self.attribute_layouts)
			.field("method_body", &self.method_body)
			.field("omit_statement_terminator", &self.omit_statement_terminator)
			.field("omit_enum_underlying_type", &self.omit_enum_underlying_type)
			.field("nullability_annotations", &self.nullability_annotations)
			.field(
				"omit_inaccessible_null_state_members",
				&self.omit_inaccessible_null_state_members,
			)
			.field("ignore_private_and_assembly", &self.ignore_private_and_assembly)
			.field("record_syntax", &self.record_syntax)
			.field("omit_record_equality_interface", &self.omit_record_equality_interface)
			.field("named_optional_arguments", &self.named_optional_arguments)
			.field("indent", &self.indent)
			.finish_non_exhaustive()
	}
}

impl Renderer {
	/// Create a renderer with default configuration.
	pub fn new() -> Self {
		Self {
			with_namespace: false,
			with_declaring_type_name: true,
			translate_primitive_aliases: true,
			use_default_literal: false,
			attribute_layouts: AttributeLayouts::default(),
			method_body: MethodBodyPolicy::default(),
			omit_statement_terminator: false,
			omit_enum_underlying_type: true,
			nullability_annotations: true,
			omit_inaccessible_null_state_members: true,
			ignore_private_and_assembly: true,
			record_syntax: true,
			omit_record_equality_interface: true,
			named_optional_arguments: false,
			indent: "  ".to_string(),
			attribute_filter: Arc::new(default_attribute_filter),
		}
	}

	/// Spell type names with their namespace.
	pub fn with_namespace(mut self, with_namespace: bool) -> Self {
		self.with_namespace = with_namespace;
		self
	}

	/// Qualify nested types with their declaring types.
	pub fn with_declaring_type_name(mut self, with_declaring_type_name: bool) -> Self {
		self.with_declaring_type_name = with_declaring_type_name;
		self
	}

	/// Use keyword aliases such as `int` for built-in types.
	pub fn with_primitive_aliases(mut self, translate: bool) -> Self {
		self.translate_primitive_aliases = translate;
		self
	}

	/// Write `default` instead of `default(T)`.
	pub fn with_default_literal(mut self, use_default_literal: bool) -> Self {
		self.use_default_literal = use_default_literal;
		self
	}

	/// Bracket attribute groups as configured.
	pub fn with_attribute_layouts(mut self, layouts: AttributeLayouts) -> Self {
		self.attribute_layouts = layouts;
		self
	}

	/// Choose what stands in for method bodies.
	pub fn with_method_body(mut self, policy: MethodBodyPolicy) -> Self {
		self.method_body = policy;
		self
	}

	/// Leave off statement terminators.
	pub fn with_omitted_terminator(mut self, omit: bool) -> Self {
		self.omit_statement_terminator = omit;
		self
	}

	/// Leave off the default `: int` on enums.
	pub fn with_omitted_enum_underlying_type(mut self, omit: bool) -> Self {
		self.omit_enum_underlying_type = omit;
		self
	}

	/// Render nullable reference type annotations.
	pub fn with_nullability(mut self, enabled: bool) -> Self {
		self.nullability_annotations = enabled;
		self
	}

	/// Drop non-public names from null-state attribute arguments.
	pub fn with_omitted_inaccessible_null_state_members(mut self, omit: bool) -> Self {
		self.omit_inaccessible_null_state_members = omit;
		self
	}

	/// Skip private and internal symbols.
	pub fn with_ignore_private_and_assembly(mut self, ignore: bool) -> Self {
		self.ignore_private_and_assembly = ignore;
		self
	}

	/// Render records with `record` syntax.
	pub fn with_record_syntax(mut self, enabled: bool) -> Self {
		self.record_syntax = enabled;
		self
	}

	/// Drop a record's implicit `IEquatable<R>`.
	pub fn with_omitted_record_equality_interface(mut self, omit: bool) -> Self {
		self.omit_record_equality_interface = omit;
		self
	}

	/// Name arguments bound to defaulted attribute parameters.
	pub fn with_named_optional_arguments(mut self, named: bool) -> Self {
		self.named_optional_arguments = named;
		self
	}

	/// Set one level of indentation.
	pub fn with_indent(mut self, indent: &str) -> Self {
		self.indent = indent.to_string();
		self
	}

	/// Replace the attribute filter.
	pub fn with_attribute_filter<F>(mut self, filter: F) -> Self
	where
		F: Fn(&AttributeInstance) -> bool + Send + Sync + 'static,
	{
		self.attribute_filter = Arc::new(filter);
		self
	}

	/// Render every visible type of an assembly into a listing.
	///
	/// Never fails as a whole: symbols that cannot be rendered are reported in
	/// [`Listing::failures`].
	pub fn render(&self, assembly: &Assembly) -> Listing {
		let mut state = RenderState::new(self, assembly, assembly.nullable_context);
		state.render(assembly)
	}

	/// Render the declaration of the type named `full_name` (`Namespace.Outer+Inner`),
	/// nested types included.
	///
	/// The type is rendered in the same context as in [`Renderer::render`]: the
	/// assembly's nullable context and the declaring-type chain both apply.
	pub fn render_type(&self, assembly: &Assembly, full_name: &str) -> Result<String> {
		use crate::items::{TypeScope, render_type_def};

		let path = assembly.type_path(full_name).unwrap_or_default();
		let Some((top, nested)) = path.split_first() else {
			return Err(RenderError::UnknownType(full_name.to_string()));
		};
		let mut scope = TypeScope::top_level(*top, assembly.nullable_context);
		for def in nested {
			scope = scope.nested(*def);
		}
		let mut state = RenderState::new(self, assembly, assembly.nullable_context);
		let lines = render_type_def(&mut state, &scope)?;
		Ok(lines.join("\n"))
	}

	/// Render one member as declared in `owner`, a top-level type of `assembly`;
	/// `None` for members that are never listed.
	pub fn render_member(
		&self,
		assembly: &Assembly,
		owner: &TypeDef,
		member: &Member,
	) -> Result<Option<String>> {
		use crate::items::{TypeScope, render_member};

		let mut state = RenderState::new(self, assembly, assembly.nullable_context);
		let scope = TypeScope::top_level(owner, assembly.nullable_context);
		let declaration = render_member(&mut state, &scope, member)?;
		Ok(declaration.map(|declaration| declaration.lines.join("\n")))
	}
}
