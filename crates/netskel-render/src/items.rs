use std::borrow::Cow;

use netskel_model::{
	Accessibility, AttributeInstance, AttributeTarget, EventDef, FieldDef, GenericParameterDef,
	Member, MethodDef, NullableContext, Primitive, PropertyDef, TypeDef, TypeKind, TypeRef,
	strip_arity,
};
use tracing::debug;

use crate::core::{AttributeLayout, MethodBodyPolicy};
use crate::error::{RenderError, Result};
use crate::order::{MemberGroup, sort_declarations, sort_types};
use crate::state::RenderState;
use crate::syntax::attributes::{inline_sections, prune_null_state_members, render_attribute_sections};
use crate::syntax::function::{render_parameters, render_return_attributes, render_return_type};
use crate::syntax::generics::{render_constraints, render_generic_parameters};
use crate::syntax::keywords::escape_identifier;
use crate::syntax::literal::format_flags_hex;
use crate::syntax::modifiers::{
	ResolvedModifiers, explicit_mapping, resolve_event, resolve_field, resolve_method,
	resolve_property,
};
use crate::syntax::operators::{OperatorSyntax, is_operator_name, operator_syntax};
use crate::syntax::types::TypeDecoration;
use crate::utils::{indent_lines, join_blocks};

/// Prefixes of accessor methods that are listed through their property or event.
const ACCESSOR_PREFIXES: &[&str] = &["get_", "set_", "add_", "remove_", "raise_"];

/// The type whose body is being rendered.
#[derive(Debug, Clone)]
pub struct TypeScope<'t> {
	/// The declaration.
	pub def: &'t TypeDef,
	/// Reference to the declaration, nested chain included.
	pub reference: TypeRef,
	/// Effective nullable context of the type.
	pub context: Option<NullableContext>,
}

impl<'t> TypeScope<'t> {
	/// Scope of a top-level type inside an assembly with context `inherited`.
	pub fn top_level(def: &'t TypeDef, inherited: Option<NullableContext>) -> Self {
		Self {
			def,
			reference: def.type_ref(),
			context: def.nullable_context.or(inherited),
		}
	}

	/// Scope of a type nested in this one.
	pub fn nested(&self, def: &'t TypeDef) -> Self {
		Self {
			def,
			reference: def.nested_ref(&self.reference),
			context: def.nullable_context.or(self.context),
		}
	}

	/// Source name of the type, without arity suffix.
	pub fn simple_name(&self) -> String {
		escape_identifier(strip_arity(&self.def.name).0)
	}

	/// Generic parameters declared by this type itself, not by its declaring types.
	pub fn own_generic_parameters(&self) -> &'t [GenericParameterDef] {
		let (_, arity) = strip_arity(&self.def.name);
		let all = &self.def.generic_parameters;
		&all[all.len().saturating_sub(arity)..]
	}

	/// Whether no member named `name` is hidden from other assemblies.
	fn is_member_name_visible(&self, name: &str) -> bool {
		!self
			.def
			.members
			.iter()
			.any(|member| member.name() == name && !member_accessibility(member).is_externally_visible())
	}
}

/// One rendered member, ready to be ordered within its type body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
	/// Listing group.
	pub group: MemberGroup,
	/// Metadata name used for ordering.
	pub name: String,
	/// Rendered lines, attribute sections first.
	pub lines: Vec<String>,
}

/// A member classified by the construct it is declared as.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MemberRef<'m> {
	/// A field, constant or fixed buffer.
	Field(&'m FieldDef),
	/// A property or indexer.
	Property(&'m PropertyDef),
	/// An ordinary method.
	Method(&'m MethodDef),
	/// An instance or static constructor.
	Constructor(&'m MethodDef),
	/// A finalizer.
	Destructor(&'m MethodDef),
	/// A user-defined operator or conversion.
	Operator(&'m MethodDef, OperatorSyntax),
	/// An event.
	Event(&'m EventDef),
}

impl MemberRef<'_> {
	/// Listing group of the member.
	pub fn group(&self) -> MemberGroup {
		match self {
			Self::Event(_) => MemberGroup::Event,
			Self::Field(_) => MemberGroup::Field,
			Self::Constructor(_) => MemberGroup::Constructor,
			Self::Property(_) => MemberGroup::Property,
			Self::Method(_) | Self::Destructor(_) | Self::Operator(..) => MemberGroup::Method,
		}
	}
}

fn is_accessor_name(name: &str) -> bool {
	let simple = name.rsplit('.').next().unwrap_or(name);
	ACCESSOR_PREFIXES.iter().any(|prefix| simple.starts_with(prefix))
}

fn is_destructor(method: &MethodDef) -> bool {
	method.name == "Finalize"
		&& method.parameters.is_empty()
		&& method.generic_parameters.is_empty()
		&& method.return_value.ty.is_primitive(Primitive::Void)
		&& method.base_definition.is_some()
}

/// Classify a raw member; `Ok(None)` for members that are never listed.
pub fn classify(member: &Member) -> Result<Option<MemberRef<'_>>> {
	let classified = match member {
		Member::Unreadable { name, reason } => {
			return Err(RenderError::Unreadable {
				name: name.clone(),
				reason: reason.clone(),
			});
		}
		Member::Field(field) if field.is_compiler_generated => return Ok(None),
		Member::Method(method) if method.is_compiler_generated => return Ok(None),
		Member::Field(field) => MemberRef::Field(field),
		Member::Property(property) => MemberRef::Property(property),
		Member::Event(event) => MemberRef::Event(event),
		Member::Method(method) if method.is_constructor() => MemberRef::Constructor(method),
		Member::Method(method) if method.is_special_name && is_accessor_name(&method.name) => {
			return Ok(None);
		}
		Member::Method(method) if method.is_special_name && is_operator_name(&method.name) => {
			let syntax = operator_syntax(&method.name)
				.ok_or_else(|| RenderError::UnknownOperator(method.name.clone()))?;
			MemberRef::Operator(method, syntax)
		}
		Member::Method(method) if is_destructor(method) => MemberRef::Destructor(method),
		Member::Method(method) => MemberRef::Method(method),
	};
	Ok(Some(classified))
}

/// The most open accessibility among accessors, private when there are none.
fn accessor_accessibility<'m>(accessors: impl Iterator<Item = &'m MethodDef>) -> Accessibility {
	accessors
		.map(|accessor| accessor.accessibility)
		.max()
		.unwrap_or_default()
}

fn member_accessibility(member: &Member) -> Accessibility {
	match member {
		Member::Field(field) => field.accessibility,
		Member::Property(property) => accessor_accessibility(property.accessors()),
		Member::Method(method) => method.accessibility,
		Member::Event(event) => accessor_accessibility(event.accessors()),
		Member::Unreadable { .. } => Accessibility::Public,
	}
}

/// Whether the member implements an interface member explicitly.
fn is_explicit_implementation(scope: &TypeScope<'_>, member: &MemberRef<'_>) -> bool {
	let mapped = |method: &MethodDef| explicit_mapping(scope.def, &method.name).is_some();
	match member {
		MemberRef::Method(method) | MemberRef::Operator(method, _) => mapped(method),
		MemberRef::Property(property) => property.accessors().any(mapped),
		MemberRef::Event(event) => event.accessors().any(mapped),
		MemberRef::Field(_) | MemberRef::Constructor(_) | MemberRef::Destructor(_) => false,
	}
}

fn is_listed(state: &RenderState<'_>, scope: &TypeScope<'_>, member: &MemberRef<'_>) -> bool {
	let accessibility = match member {
		MemberRef::Field(field) => field.accessibility,
		MemberRef::Property(property) => accessor_accessibility(property.accessors()),
		MemberRef::Event(event) => accessor_accessibility(event.accessors()),
		MemberRef::Method(method)
		| MemberRef::Constructor(method)
		| MemberRef::Destructor(method)
		| MemberRef::Operator(method, _) => method.accessibility,
	};
	// Static constructors and finalizers carry no accessibility of their own.
	let implicit = matches!(member, MemberRef::Destructor(_))
		|| matches!(member, MemberRef::Constructor(method) if method.name == ".cctor");
	implicit || state.is_visible(accessibility) || is_explicit_implementation(scope, member)
}

/// Render one member of `scope`; `Ok(None)` for members that are not listed.
pub fn render_member(
	state: &mut RenderState<'_>,
	scope: &TypeScope<'_>,
	member: &Member,
) -> Result<Option<Declaration>> {
	let Some(classified) = classify(member)? else {
		return Ok(None);
	};
	if !is_listed(state, scope, &classified) {
		return Ok(None);
	}
	let group = classified.group();
	let lines = match classified {
		MemberRef::Field(field) => render_field(state, scope, field)?,
		MemberRef::Property(property) => render_property(state, scope, property)?,
		MemberRef::Event(event) => render_event(state, scope, event)?,
		MemberRef::Method(method) => render_method(state, scope, method)?,
		MemberRef::Constructor(method) => render_constructor(state, scope, method)?,
		MemberRef::Destructor(method) => render_destructor(state, scope, method)?,
		MemberRef::Operator(method, syntax) => render_operator(state, scope, method, syntax)?,
	};
	Ok(Some(Declaration {
		group,
		name: member.name().to_string(),
		lines,
	}))
}

/// Attribute sections of a member-level symbol, one line per section.
///
/// `field:`-targeted attributes of properties and events follow the member's own
/// sections and use the backing-field layout.
fn member_attribute_lines(
	state: &mut RenderState<'_>,
	scope: &TypeScope<'_>,
	attributes: &[AttributeInstance],
	owner: AttributeTarget,
) -> Result<Vec<String>> {
	let layouts = state.config.attribute_layouts;
	if !matches!(owner, AttributeTarget::Property | AttributeTarget::Event) {
		return attribute_lines(state, scope, attributes, owner, layouts.member);
	}
	let (backing, own): (Vec<&AttributeInstance>, Vec<&AttributeInstance>) =
		attributes.iter().partition(|attribute| {
			matches!(
				attribute.target,
				Some(AttributeTarget::BackingField | AttributeTarget::Field)
			)
		});
	let mut lines = attribute_lines(state, scope, own, owner, layouts.member)?;
	lines.extend(attribute_lines(state, scope, backing, owner, layouts.backing_field)?);
	Ok(lines)
}

fn attribute_lines<'a>(
	state: &mut RenderState<'_>,
	scope: &TypeScope<'_>,
	attributes: impl IntoIterator<Item = &'a AttributeInstance>,
	owner: AttributeTarget,
	layout: AttributeLayout,
) -> Result<Vec<String>> {
	if state.config.omit_inaccessible_null_state_members {
		let visible = |name: &str| scope.is_member_name_visible(name);
		let pruned: Vec<Cow<'a, AttributeInstance>> = attributes
			.into_iter()
			.filter_map(|attribute| prune_null_state_members(attribute, &visible))
			.collect();
		render_attribute_sections(state, pruned, owner, layout)
	} else {
		render_attribute_sections(state, attributes.into_iter().map(Cow::Borrowed), owner, layout)
	}
}

/// Inline attribute sections of an accessor.
fn accessor_attributes(
	state: &mut RenderState<'_>,
	accessor: &MethodDef,
	owner: AttributeTarget,
) -> Result<String> {
	let layout = state.config.attribute_layouts.accessor;
	let sections = render_attribute_sections(state, accessor.attributes.iter().map(Cow::Borrowed), owner, layout)?;
	Ok(inline_sections(sections))
}

fn not_implemented(state: &mut RenderState<'_>) -> String {
	state.format_type(&TypeRef::named("System", "NotImplementedException"))
}

/// The body of a method-like member, terminator included.
fn method_body(state: &mut RenderState<'_>, bodiless: bool) -> String {
	let terminator = state.terminator();
	if bodiless {
		return terminator.to_string();
	}
	match state.config.method_body {
		MethodBodyPolicy::Omit => terminator.to_string(),
		MethodBodyPolicy::EmptyBraces => " {}".to_string(),
		MethodBodyPolicy::ThrowStub => format!(" => throw new {}(){terminator}", not_implemented(state)),
		MethodBodyPolicy::ThrowNull => format!(" => throw null{terminator}"),
	}
}

/// The body of a property accessor inside `{ … }`.
///
/// Auto-accessor form (`get;`) is used unless a throwing body is requested.
fn property_accessor_body(state: &mut RenderState<'_>, bodiless: bool) -> String {
	if bodiless {
		return ";".to_string();
	}
	match state.config.method_body {
		MethodBodyPolicy::Omit | MethodBodyPolicy::EmptyBraces => ";".to_string(),
		MethodBodyPolicy::ThrowStub => format!(" => throw new {}();", not_implemented(state)),
		MethodBodyPolicy::ThrowNull => " => throw null;".to_string(),
	}
}

/// The body of an event accessor inside `{ … }`.
fn event_accessor_body(state: &mut RenderState<'_>, bodiless: bool) -> String {
	if bodiless {
		return ";".to_string();
	}
	match state.config.method_body {
		MethodBodyPolicy::Omit => ";".to_string(),
		MethodBodyPolicy::EmptyBraces => " {}".to_string(),
		MethodBodyPolicy::ThrowStub => format!(" => throw new {}();", not_implemented(state)),
		MethodBodyPolicy::ThrowNull => " => throw null;".to_string(),
	}
}

/// Member name, qualified by its interface for explicit implementations.
fn qualified_name(state: &mut RenderState<'_>, modifiers: &ResolvedModifiers, name: &str) -> String {
	match (&modifiers.explicit_interface, &modifiers.explicit_name) {
		(Some(interface), Some(explicit)) => {
			format!("{}.{}", state.format_type(interface), escape_identifier(explicit))
		}
		_ => escape_identifier(name),
	}
}

fn with_constraints(mut text: String, constraints: String) -> String {
	if !constraints.is_empty() {
		text.push(' ');
		text.push_str(&constraints);
	}
	text
}

/// Render a field, constant or fixed-size buffer.
pub fn render_field(state: &mut RenderState<'_>, scope: &TypeScope<'_>, field: &FieldDef) -> Result<Vec<String>> {
	let annotate = state.annotations_enabled(field.nullable_context, scope.context);
	let mut lines = member_attribute_lines(state, scope, &field.attributes, AttributeTarget::Field)?;
	let prefix = resolve_field(field).prefix();
	let name = escape_identifier(&field.name);
	let terminator = state.terminator();

	if let Some(buffer) = &field.fixed_buffer {
		let element = state.format_type(&TypeRef::primitive(buffer.element));
		lines.push(format!("{prefix}{element} {name}[{}]{terminator}", buffer.length));
		return Ok(lines);
	}

	let decoration = TypeDecoration {
		nullability: field.nullability.as_ref(),
		tuple_names: &field.tuple_names,
		annotate,
	};
	let ty = state.format_symbol_type(&field.ty, decoration);
	let mut text = format!("{prefix}{ty} {name}");
	let initial = if field.is_literal {
		field.constant.as_ref()
	} else if field.is_static && field.is_init_only {
		field.value.as_ref()
	} else {
		None
	};
	// A constant of the declaring type's own type would otherwise alias itself.
	let find_alias = field.ty.definition().full_name() != scope.reference.full_name();
	let mut comment = None;
	if let Some(value) = initial {
		match state.format_literal(value, &field.ty, find_alias, true) {
			Some(literal) => {
				text.push_str(" = ");
				text.push_str(&literal);
			}
			None => comment = Some(value.to_string()),
		}
	}
	text.push_str(terminator);
	if let Some(comment) = comment {
		text.push_str(&format!(" // = {comment}"));
	}
	lines.push(text);
	Ok(lines)
}

/// Render a property or indexer with its accessor list.
pub fn render_property(
	state: &mut RenderState<'_>,
	scope: &TypeScope<'_>,
	property: &PropertyDef,
) -> Result<Vec<String>> {
	let modifiers = resolve_property(scope.def, &scope.reference, property)?;
	let annotate = state.annotations_enabled(property.nullable_context, scope.context);
	let mut lines = member_attribute_lines(state, scope, &property.attributes, AttributeTarget::Property)?;

	let decoration = TypeDecoration {
		nullability: property.nullability.as_ref(),
		tuple_names: &property.tuple_names,
		annotate,
	};
	let ty = match &property.ty {
		TypeRef::ByRef { element } => format!("ref {}", state.format_symbol_type(element, decoration)),
		ty => state.format_symbol_type(ty, decoration),
	};
	let name = if property.index_parameters.is_empty() {
		qualified_name(state, &modifiers, &property.name)
	} else {
		let params = render_parameters(state, &property.index_parameters, annotate, false)?;
		match &modifiers.explicit_interface {
			Some(interface) => format!("{}.this[{params}]", state.format_type(interface)),
			None => format!("this[{params}]"),
		}
	};

	let bodiless = scope.def.kind == TypeKind::Interface
		|| property.accessors().any(|accessor| accessor.is_abstract || accessor.is_extern);
	let mut accessors = Vec::with_capacity(2);
	for (slot, accessor) in [&property.getter, &property.setter].into_iter().enumerate() {
		let Some(accessor) = accessor else {
			continue;
		};
		let keyword = match slot {
			0 => "get",
			_ if property.is_init_only => "init",
			_ => "set",
		};
		let attributes = accessor_attributes(state, accessor, AttributeTarget::Method)?;
		let narrowed = modifiers.accessors[slot]
			.map(|accessibility| format!("{} ", accessibility.keyword()))
			.unwrap_or_default();
		let body = property_accessor_body(state, bodiless);
		accessors.push(format!("{attributes}{narrowed}{keyword}{body}"));
	}

	lines.push(format!("{}{ty} {name} {{ {} }}", modifiers.prefix(), accessors.join(" ")));
	Ok(lines)
}

/// Render an event, field-like unless its accessors need to be spelled out.
pub fn render_event(state: &mut RenderState<'_>, scope: &TypeScope<'_>, event: &EventDef) -> Result<Vec<String>> {
	let modifiers = resolve_event(scope.def, &scope.reference, event)?;
	let annotate = state.annotations_enabled(event.nullable_context, scope.context);
	let mut lines = member_attribute_lines(state, scope, &event.attributes, AttributeTarget::Event)?;

	let decoration = TypeDecoration {
		nullability: event.nullability.as_ref(),
		tuple_names: &[],
		annotate,
	};
	let ty = state.format_symbol_type(&event.ty, decoration);
	let name = qualified_name(state, &modifiers, &event.name);

	let mut accessor_sections = Vec::with_capacity(2);
	for accessor in [&event.add, &event.remove].into_iter().flatten() {
		accessor_sections.push(accessor_attributes(state, accessor, AttributeTarget::Method)?);
	}
	let spelled_out = modifiers.is_explicit()
		|| modifiers.accessors.iter().any(Option::is_some)
		|| accessor_sections.iter().any(|sections| !sections.is_empty());

	if !spelled_out {
		lines.push(format!("{}event {ty} {name}{}", modifiers.prefix(), state.terminator()));
		return Ok(lines);
	}

	let bodiless = scope.def.kind == TypeKind::Interface
		|| event.accessors().any(|accessor| accessor.is_abstract || accessor.is_extern);
	let mut accessors = Vec::with_capacity(2);
	for (slot, (keyword, attributes)) in ["add", "remove"].into_iter().zip(accessor_sections).enumerate() {
		let narrowed = modifiers.accessors[slot]
			.map(|accessibility| format!("{} ", accessibility.keyword()))
			.unwrap_or_default();
		let body = event_accessor_body(state, bodiless);
		accessors.push(format!("{attributes}{narrowed}{keyword}{body}"));
	}
	lines.push(format!("{}event {ty} {name} {{ {} }}", modifiers.prefix(), accessors.join(" ")));
	Ok(lines)
}

fn is_extension(method: &MethodDef) -> bool {
	method
		.attributes
		.iter()
		.any(|attribute| attribute.is("System.Runtime.CompilerServices", "ExtensionAttribute"))
}

/// Render an ordinary method.
pub fn render_method(state: &mut RenderState<'_>, scope: &TypeScope<'_>, method: &MethodDef) -> Result<Vec<String>> {
	let modifiers = resolve_method(scope.def, &scope.reference, method)?;
	let annotate = state.annotations_enabled(method.nullable_context, scope.context);
	let mut lines = member_attribute_lines(state, scope, &method.attributes, AttributeTarget::Method)?;
	lines.extend(render_return_attributes(state, &method.return_value)?);

	let return_type = render_return_type(state, &method.return_value, annotate);
	let name = qualified_name(state, &modifiers, &method.name);
	let generics = render_generic_parameters(state, &method.generic_parameters, false)?;
	let params = render_parameters(state, &method.parameters, annotate, is_extension(method))?;
	let constraints = render_constraints(state, &method.generic_parameters);
	let body = method_body(state, method.is_abstract || method.is_extern);

	let text = format!("{}{return_type} {name}{generics}({params})", modifiers.prefix());
	lines.push(with_constraints(text, constraints) + &body);
	Ok(lines)
}

/// Render an instance or static constructor.
pub fn render_constructor(
	state: &mut RenderState<'_>,
	scope: &TypeScope<'_>,
	method: &MethodDef,
) -> Result<Vec<String>> {
	let modifiers = resolve_method(scope.def, &scope.reference, method)?;
	let annotate = state.annotations_enabled(method.nullable_context, scope.context);
	let mut lines = member_attribute_lines(state, scope, &method.attributes, AttributeTarget::Method)?;
	let params = render_parameters(state, &method.parameters, annotate, false)?;
	let body = method_body(state, method.is_extern);
	lines.push(format!("{}{}({params}){body}", modifiers.prefix(), scope.simple_name()));
	Ok(lines)
}

/// Render a finalizer as `~Name()`.
pub fn render_destructor(
	state: &mut RenderState<'_>,
	scope: &TypeScope<'_>,
	method: &MethodDef,
) -> Result<Vec<String>> {
	let mut lines = member_attribute_lines(state, scope, &method.attributes, AttributeTarget::Method)?;
	let body = method_body(state, method.is_extern);
	lines.push(format!("~{}(){body}", scope.simple_name()));
	Ok(lines)
}

/// Render a user-defined operator or conversion.
pub fn render_operator(
	state: &mut RenderState<'_>,
	scope: &TypeScope<'_>,
	method: &MethodDef,
	syntax: OperatorSyntax,
) -> Result<Vec<String>> {
	let modifiers = resolve_method(scope.def, &scope.reference, method)?;
	let annotate = state.annotations_enabled(method.nullable_context, scope.context);
	let mut lines = member_attribute_lines(state, scope, &method.attributes, AttributeTarget::Method)?;
	lines.extend(render_return_attributes(state, &method.return_value)?);

	let return_type = render_return_type(state, &method.return_value, annotate);
	let params = render_parameters(state, &method.parameters, annotate, false)?;
	let body = method_body(state, method.is_abstract || method.is_extern);
	let prefix = modifiers.prefix();
	let text = match syntax {
		OperatorSyntax::Symbol { token, checked } => {
			let checked = if checked { "checked " } else { "" };
			format!("{prefix}{return_type} operator {checked}{token}({params}){body}")
		}
		OperatorSyntax::Conversion { explicit, checked } => {
			let kind = if explicit { "explicit" } else { "implicit" };
			let checked = if checked { "checked " } else { "" };
			format!("{prefix}{kind} operator {checked}{return_type}({params}){body}")
		}
	};
	lines.push(text);
	Ok(lines)
}

/// Render a type declaration, members and nested types included.
pub fn render_type_def(state: &mut RenderState<'_>, scope: &TypeScope<'_>) -> Result<Vec<String>> {
	debug!(ty = %scope.reference.full_name(), kind = ?scope.def.kind, "rendering type");
	match scope.def.kind {
		TypeKind::Enum => render_enum(state, scope),
		TypeKind::Delegate => render_delegate(state, scope),
		TypeKind::Class | TypeKind::Struct | TypeKind::Interface => render_composite(state, scope),
	}
}

/// Keywords before the type name, e.g. `public static class`, `public readonly record struct`.
fn type_keywords(state: &RenderState<'_>, def: &TypeDef) -> String {
	let mut words = vec![def.accessibility.keyword()];
	let record = def.is_record && state.config.record_syntax;
	match def.kind {
		TypeKind::Class => {
			if def.is_static_class() {
				words.push("static");
			} else if def.is_abstract {
				words.push("abstract");
			} else if def.is_sealed {
				words.push("sealed");
			}
			words.push(if record { "record" } else { "class" });
		}
		TypeKind::Struct => {
			if def.is_readonly {
				words.push("readonly");
			}
			if def.is_by_ref_like {
				words.push("ref");
			}
			words.push(if record { "record struct" } else { "struct" });
		}
		TypeKind::Interface => words.push("interface"),
		TypeKind::Enum => words.push("enum"),
		TypeKind::Delegate => words.push("delegate"),
	}
	words.join(" ")
}

fn is_implicit_base(base: &TypeRef) -> bool {
	["Object", "ValueType", "Enum", "MulticastDelegate"]
		.iter()
		.any(|name| base.is_named("System", name))
		|| base.is_primitive(Primitive::Object)
}

/// Whether `interface` is the `IEquatable<Self>` every record implements.
fn is_record_equality(scope: &TypeScope<'_>, interface: &TypeRef) -> bool {
	match interface {
		TypeRef::Generic { definition, args } => {
			definition.is_named("System", "IEquatable`1")
				&& args
					.first()
					.is_some_and(|arg| arg.definition().full_name() == scope.reference.full_name())
		}
		_ => false,
	}
}

/// Base type and interfaces as written after `:`.
fn base_list(state: &mut RenderState<'_>, scope: &TypeScope<'_>) -> Vec<String> {
	let def = scope.def;
	let mut bases = Vec::new();
	if def.kind == TypeKind::Class
		&& let Some(base) = &def.base_type
		&& !is_implicit_base(base)
	{
		bases.push(state.format_type(base));
	}
	let drop_equality = def.is_record && state.config.omit_record_equality_interface;
	for interface in &def.interfaces {
		if drop_equality && is_record_equality(scope, interface) {
			continue;
		}
		bases.push(state.format_type(interface));
	}
	bases
}

/// Header line of a class, struct or interface, without the opening brace.
fn composite_header(state: &mut RenderState<'_>, scope: &TypeScope<'_>) -> Result<String> {
	let keywords = type_keywords(state, scope.def);
	let own = scope.own_generic_parameters();
	let show_variance = scope.def.kind == TypeKind::Interface;
	let generics = render_generic_parameters(state, own, show_variance)?;
	let mut header = format!("{keywords} {}{generics}", scope.simple_name());
	let bases = base_list(state, scope);
	if !bases.is_empty() {
		header.push_str(&format!(" : {}", bases.join(", ")));
	}
	let constraints = render_constraints(state, own);
	Ok(with_constraints(header, constraints))
}

/// Wrap body blocks in braces under `header`.
fn braced(state: &RenderState<'_>, header: String, blocks: Vec<Vec<String>>) -> Vec<String> {
	if blocks.is_empty() {
		return vec![format!("{header} {{}}")];
	}
	let mut lines = vec![format!("{header} {{")];
	lines.extend(indent_lines(join_blocks(blocks), &state.config.indent));
	lines.push("}".to_string());
	lines
}

/// Render members grouped by kind, then nested types.
fn render_body(state: &mut RenderState<'_>, scope: &TypeScope<'_>) -> Vec<Vec<String>> {
	let mut declarations = Vec::new();
	for member in &scope.def.members {
		match render_member(state, scope, member) {
			Ok(Some(declaration)) => declarations.push(declaration),
			Ok(None) => {}
			Err(error) => {
				let symbol = format!("{}.{}", scope.reference.full_name(), member.name());
				state.record_failure(symbol, error);
			}
		}
	}
	sort_declarations(&mut declarations);

	let mut blocks: Vec<Vec<String>> = Vec::new();
	let mut current = None;
	for declaration in declarations {
		if current != Some(declaration.group) {
			current = Some(declaration.group);
			blocks.push(Vec::new());
		}
		if let Some(block) = blocks.last_mut() {
			block.extend(declaration.lines);
		}
	}

	let mut nested: Vec<&TypeDef> = scope
		.def
		.nested_types
		.iter()
		.filter(|nested| !nested.is_compiler_generated && state.is_visible(nested.accessibility))
		.collect();
	sort_types(&mut nested);
	for def in nested {
		let child = scope.nested(def);
		match render_type_def(state, &child) {
			Ok(lines) => blocks.push(lines),
			Err(error) => state.record_failure(child.reference.full_name(), error),
		}
	}
	blocks
}

fn render_composite(state: &mut RenderState<'_>, scope: &TypeScope<'_>) -> Result<Vec<String>> {
	let mut lines = member_attribute_lines(state, scope, &scope.def.attributes, AttributeTarget::Type)?;
	let header = composite_header(state, scope)?;
	let blocks = render_body(state, scope);
	lines.extend(braced(state, header, blocks));
	Ok(lines)
}

/// Render an enum with its members ordered by value.
pub fn render_enum(state: &mut RenderState<'_>, scope: &TypeScope<'_>) -> Result<Vec<String>> {
	let def = scope.def;
	let mut lines = member_attribute_lines(state, scope, &def.attributes, AttributeTarget::Type)?;
	let underlying = def.enum_underlying.unwrap_or(Primitive::Int);
	let mut header = format!("{} {}", type_keywords(state, def), scope.simple_name());
	if underlying != Primitive::Int || !state.config.omit_enum_underlying_type {
		header.push_str(&format!(" : {}", state.format_type(&TypeRef::primitive(underlying))));
	}

	let mut constants: Vec<(i128, &FieldDef)> = def
		.members
		.iter()
		.filter_map(|member| match member {
			Member::Field(field) if field.is_literal && !field.is_compiler_generated => {
				let raw = field.constant.as_ref()?.raw_value()?;
				Some((raw, field))
			}
			_ => None,
		})
		.collect();
	constants.sort_by(|(a, a_field), (b, b_field)| a.cmp(b).then_with(|| a_field.name.cmp(&b_field.name)));

	let flags = def.is_flags();
	let mut body = Vec::with_capacity(constants.len());
	for (raw, field) in constants {
		body.extend(member_attribute_lines(state, scope, &field.attributes, AttributeTarget::Field)?);
		let value = if flags {
			format_flags_hex(raw, underlying)
		} else {
			raw.to_string()
		};
		body.push(format!("{} = {value},", escape_identifier(&field.name)));
	}
	let blocks = if body.is_empty() { Vec::new() } else { vec![body] };
	lines.extend(braced(state, header, blocks));
	Ok(lines)
}

/// Render a delegate from the signature of its `Invoke` method.
pub fn render_delegate(state: &mut RenderState<'_>, scope: &TypeScope<'_>) -> Result<Vec<String>> {
	let def = scope.def;
	let invoke = def
		.members
		.iter()
		.find_map(|member| match member {
			Member::Method(method) if method.name == "Invoke" => Some(method),
			_ => None,
		})
		.ok_or_else(|| RenderError::MissingInvoke(scope.reference.full_name()))?;

	let annotate = state.annotations_enabled(invoke.nullable_context, scope.context);
	let mut lines = member_attribute_lines(state, scope, &def.attributes, AttributeTarget::Type)?;
	lines.extend(render_return_attributes(state, &invoke.return_value)?);

	let own = scope.own_generic_parameters();
	let return_type = render_return_type(state, &invoke.return_value, annotate);
	let generics = render_generic_parameters(state, own, true)?;
	let params = render_parameters(state, &invoke.parameters, annotate, false)?;
	let constraints = render_constraints(state, own);
	let unsafe_keyword = if invoke.return_value.ty.contains_pointer()
		|| invoke.parameters.iter().any(|param| param.ty.contains_pointer())
	{
		"unsafe "
	} else {
		""
	};
	let text = format!(
		"{} {unsafe_keyword}delegate {return_type} {}{generics}({params})",
		def.accessibility.keyword(),
		scope.simple_name()
	);
	lines.push(with_constraints(text, constraints) + state.terminator());
	Ok(lines)
}
